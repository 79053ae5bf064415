//! Category nodes of the product taxonomy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fieldset::Fieldset;

/// What a category listing needs to show about a child category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryInfo {
    pub slug: String,
    pub name: String,
    /// No further subcategories: products live here directly.
    pub is_leaf: bool,
}

/// A fully resolved category.
///
/// `fieldsets`, `name_field`, `description_field` and `featured_fields` are
/// the *effective* values, after inheritance from every ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub(crate) slug: String,
    pub(crate) name: String,
    pub(crate) short_description: String,
    pub(crate) parent: Option<String>,
    pub(crate) subcategories: Vec<SubcategoryInfo>,
    pub(crate) fieldsets: Vec<Arc<Fieldset>>,
    pub(crate) name_field: Option<String>,
    pub(crate) description_field: Option<String>,
    pub(crate) featured_fields: Vec<String>,
}

impl Category {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn subcategories(&self) -> &[SubcategoryInfo] {
        &self.subcategories
    }

    /// Leaf categories hold products; the others only hold subcategories.
    pub fn is_leaf(&self) -> bool {
        self.subcategories.is_empty()
    }

    /// Ancestor fieldsets first, this category's own appended last.
    pub fn fieldsets(&self) -> &[Arc<Fieldset>] {
        &self.fieldsets
    }

    pub fn has_fieldset(&self, slug: &str) -> bool {
        self.fieldsets.iter().any(|fs| fs.slug == slug)
    }

    pub fn name_field(&self) -> Option<&str> {
        self.name_field.as_deref()
    }

    pub fn description_field(&self) -> Option<&str> {
        self.description_field.as_deref()
    }

    pub fn featured_fields(&self) -> &[String] {
        &self.featured_fields
    }

    pub fn summary(&self) -> SubcategoryInfo {
        SubcategoryInfo {
            slug: self.slug.clone(),
            name: self.name.clone(),
            is_leaf: self.is_leaf(),
        }
    }

    /// Synthetic category whose subcategories are the top-level categories.
    /// Category browsing starts here.
    pub fn root(top_level: &[SubcategoryInfo]) -> Self {
        Self {
            slug: "root".to_string(),
            name: "Root".to_string(),
            short_description: "Root".to_string(),
            parent: None,
            subcategories: top_level.to_vec(),
            fieldsets: Vec::new(),
            name_field: None,
            description_field: None,
            featured_fields: Vec::new(),
        }
    }
}

use serde::Serialize;
use serde_json::Value;

use agora_core::ProductId;
use agora_metadata::{Category, Field, Fieldset, FieldsetSchema, SubcategoryInfo};
use agora_products::ModerationOutcome;

/// A category as served to the category browser.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub slug: String,
    pub name: String,
    pub short_description: String,
    pub parent: Option<String>,
    pub is_leaf: bool,
    pub subcategories: Vec<SubcategoryInfo>,
    /// Effective fieldset slugs, ancestors first.
    pub fieldsets: Vec<String>,
    pub name_field: Option<String>,
    pub description_field: Option<String>,
    pub featured_fields: Vec<String>,
}

impl From<&Category> for CategoryResponse {
    fn from(c: &Category) -> Self {
        Self {
            slug: c.slug().to_string(),
            name: c.name().to_string(),
            short_description: c.short_description().to_string(),
            parent: c.parent().map(str::to_string),
            is_leaf: c.is_leaf(),
            subcategories: c.subcategories().to_vec(),
            fieldsets: c.fieldsets().iter().map(|fs| fs.slug.clone()).collect(),
            name_field: c.name_field().map(str::to_string),
            description_field: c.description_field().map(str::to_string),
            featured_fields: c.featured_fields().to_vec(),
        }
    }
}

/// A fieldset with its form fields and compiled schema.
#[derive(Debug, Clone, Serialize)]
pub struct FieldsetResponse {
    pub slug: String,
    pub name: String,
    pub fields: Vec<Field>,
    pub json_schema: Value,
}

impl FieldsetResponse {
    pub fn new(fieldset: &Fieldset, schema: &FieldsetSchema) -> Self {
        Self {
            slug: fieldset.slug.clone(),
            name: fieldset.name.clone(),
            fields: fieldset.fields.clone(),
            json_schema: schema.to_json(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModerationResponse {
    pub id: ProductId,
    pub status: &'static str,
}

impl From<&ModerationOutcome> for ModerationResponse {
    fn from(outcome: &ModerationOutcome) -> Self {
        match outcome {
            ModerationOutcome::Approved(product) => Self {
                id: product.id,
                status: "approved",
            },
            ModerationOutcome::Rejected(id) => Self {
                id: *id,
                status: "rejected",
            },
        }
    }
}

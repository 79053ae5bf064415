//! Category Tree Resolver.
//!
//! Building happens in two passes over the flat declarations. The first wires
//! parent/child links; the second walks the forest depth-first from every
//! top-level category and hands each node its parent's *effective* values,
//! producing a fresh effective value per node. No node is mutated once it has
//! been resolved.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::category::{Category, SubcategoryInfo};
use crate::definition::CategoryDefinition;
use crate::error::{InitializationError, LookupError};
use crate::field_path::FieldPath;
use crate::fieldset::Fieldset;
use crate::registry::FieldsetRegistry;

/// The resolved category forest.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    categories: BTreeMap<String, Category>,
    top_level: Vec<SubcategoryInfo>,
}

/// Effective, inheritable values of one node.
#[derive(Debug, Clone, Default)]
struct Inherited {
    fieldsets: Vec<Arc<Fieldset>>,
    name_field: Option<String>,
    description_field: Option<String>,
    featured_fields: Vec<String>,
}

struct Links<'a> {
    defs: &'a BTreeMap<String, CategoryDefinition>,
    children: BTreeMap<&'a str, Vec<&'a str>>,
    registry: &'a FieldsetRegistry,
}

impl CategoryTree {
    pub fn build(
        defs: &BTreeMap<String, CategoryDefinition>,
        registry: &FieldsetRegistry,
    ) -> Result<Self, InitializationError> {
        let mut roots = Vec::new();
        let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for (slug, def) in defs {
            match def.parent_slug() {
                None => roots.push(slug.as_str()),
                Some(parent) if !defs.contains_key(parent) => {
                    return Err(InitializationError::MissingParent {
                        category: slug.clone(),
                        parent: parent.to_string(),
                    });
                }
                Some(parent) => children.entry(parent).or_default().push(slug.as_str()),
            }
        }

        let links = Links {
            defs,
            children,
            registry,
        };

        let mut resolved = BTreeMap::new();
        let mut path = Vec::new();
        for &root in &roots {
            links.resolve(root, &Inherited::default(), &mut path, &mut resolved)?;
        }

        // Every chain of parents either ends at a top-level category or loops.
        // Whatever the walk above never reached is therefore on, or under, a cycle.
        if let Some(stray) = defs.keys().find(|slug| !resolved.contains_key(slug.as_str())) {
            return Err(InitializationError::Cycle {
                path: links.parent_cycle(stray),
            });
        }

        let mut categories = BTreeMap::new();
        for (slug, def) in defs {
            let effective = resolved.remove(slug.as_str()).unwrap_or_default();
            categories.insert(
                slug.clone(),
                Category {
                    slug: slug.clone(),
                    name: def.name.clone(),
                    short_description: def.short_description().to_string(),
                    parent: def.parent_slug().map(str::to_string),
                    subcategories: links.summaries(slug),
                    fieldsets: effective.fieldsets,
                    name_field: effective.name_field,
                    description_field: effective.description_field,
                    featured_fields: effective.featured_fields,
                },
            );
        }

        for category in categories.values().filter(|c| c.is_leaf()) {
            validate_leaf(category, registry)?;
        }

        let top_level = roots.iter().map(|slug| links.summary(slug)).collect();
        tracing::debug!(
            categories = categories.len(),
            top_level = roots.len(),
            "category tree resolved"
        );

        Ok(Self {
            categories,
            top_level,
        })
    }

    /// Categories without a parent, ordered by slug.
    pub fn top_level_categories(&self) -> &[SubcategoryInfo] {
        &self.top_level
    }

    pub fn category_by_slug(&self, slug: &str) -> Result<&Category, LookupError> {
        self.categories
            .get(slug)
            .ok_or_else(|| LookupError::CategoryNotFound(slug.to_string()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<'a> Links<'a> {
    fn resolve(
        &self,
        slug: &'a str,
        parent: &Inherited,
        path: &mut Vec<&'a str>,
        resolved: &mut BTreeMap<&'a str, Inherited>,
    ) -> Result<(), InitializationError> {
        if path.contains(&slug) {
            let mut cycle: Vec<String> = path.iter().map(|s| s.to_string()).collect();
            cycle.push(slug.to_string());
            return Err(InitializationError::Cycle { path: cycle });
        }

        let Some(def) = self.defs.get(slug) else {
            return Ok(());
        };

        let mut fieldsets = parent.fieldsets.clone();
        for fs_slug in &def.fieldsets {
            let fieldset = self.registry.fieldset_by_slug(fs_slug).map_err(|_| {
                InitializationError::UnknownFieldset {
                    category: slug.to_string(),
                    fieldset: fs_slug.clone(),
                }
            })?;
            fieldsets.push(Arc::clone(fieldset));
        }

        let effective = Inherited {
            fieldsets,
            name_field: def
                .name_field()
                .map(str::to_string)
                .or_else(|| parent.name_field.clone()),
            description_field: def
                .description_field()
                .map(str::to_string)
                .or_else(|| parent.description_field.clone()),
            featured_fields: if def.featured_fields.is_empty() {
                parent.featured_fields.clone()
            } else {
                def.featured_fields.clone()
            },
        };

        path.push(slug);
        for &child in self.children.get(slug).into_iter().flatten() {
            self.resolve(child, &effective, path, resolved)?;
        }
        path.pop();

        resolved.insert(slug, effective);
        Ok(())
    }

    fn summary(&self, slug: &str) -> SubcategoryInfo {
        SubcategoryInfo {
            slug: slug.to_string(),
            name: self
                .defs
                .get(slug)
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            is_leaf: !self.children.contains_key(slug),
        }
    }

    fn summaries(&self, slug: &str) -> Vec<SubcategoryInfo> {
        self.children
            .get(slug)
            .into_iter()
            .flatten()
            .map(|child| self.summary(child))
            .collect()
    }

    /// Follow parent links from `start` until a slug repeats; returns the loop.
    fn parent_cycle(&self, start: &str) -> Vec<String> {
        let mut chain: Vec<&str> = Vec::new();
        let mut current = start;
        loop {
            if let Some(pos) = chain.iter().position(|s| *s == current) {
                let mut cycle: Vec<String> = chain[pos..].iter().map(|s| s.to_string()).collect();
                cycle.push(current.to_string());
                return cycle;
            }
            chain.push(current);
            match self.defs.get(current).and_then(|d| d.parent_slug()) {
                Some(parent) => current = parent,
                None => return chain.iter().map(|s| s.to_string()).collect(),
            }
        }
    }
}

fn validate_leaf(category: &Category, registry: &FieldsetRegistry) -> Result<(), InitializationError> {
    let missing = |which| InitializationError::MissingDerivedField {
        category: category.slug.clone(),
        which,
    };

    let name = category.name_field().ok_or_else(|| missing("name field"))?;
    check_reference(category, registry, "name field", name, true)?;

    let description = category
        .description_field()
        .ok_or_else(|| missing("description field"))?;
    check_reference(category, registry, "description field", description, true)?;

    if category.featured_fields.is_empty() {
        return Err(missing("featured fields"));
    }
    for featured in &category.featured_fields {
        check_reference(category, registry, "featured field", featured, false)?;
    }

    Ok(())
}

fn check_reference(
    category: &Category,
    registry: &FieldsetRegistry,
    which: &'static str,
    reference: &str,
    must_be_text: bool,
) -> Result<(), InitializationError> {
    let path = FieldPath::parse(reference).map_err(|_| InitializationError::MalformedFieldPath {
        category: category.slug.clone(),
        which,
        reference: reference.to_string(),
    })?;

    let field = registry.field(path.fieldset(), path.field()).ok_or_else(|| {
        InitializationError::UnresolvedFieldReference {
            category: category.slug.clone(),
            which,
            reference: reference.to_string(),
        }
    })?;

    if !category.has_fieldset(path.fieldset()) {
        return Err(InitializationError::ReferenceOutsideCategory {
            category: category.slug.clone(),
            which,
            reference: reference.to_string(),
        });
    }

    if must_be_text && !field.field_type.is_textual() {
        return Err(InitializationError::NonTextDerivedField {
            category: category.slug.clone(),
            which,
            reference: reference.to_string(),
        });
    }

    Ok(())
}

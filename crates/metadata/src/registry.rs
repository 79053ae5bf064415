//! Fieldset Registry: the flat, named set of fieldsets.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::definition::{FieldDefinition, MetadataDefinition};
use crate::error::{InitializationError, LookupError};
use crate::fieldset::{Field, FieldType, Fieldset};

/// All fieldsets known to the service, keyed by slug.
///
/// Built once from the definition and never mutated afterwards. Fieldsets are
/// shared (`Arc`) with every category that inherits them.
#[derive(Debug, Clone, Default)]
pub struct FieldsetRegistry {
    fieldsets: BTreeMap<String, Arc<Fieldset>>,
}

impl FieldsetRegistry {
    pub fn from_definition(def: &MetadataDefinition) -> Result<Self, InitializationError> {
        if let Some(orphan) = def.fields.keys().find(|slug| !def.fieldsets.contains_key(*slug)) {
            return Err(InitializationError::FieldsForUnknownFieldset(orphan.clone()));
        }

        let mut fieldsets = BTreeMap::new();
        for (slug, fs) in &def.fieldsets {
            let declared: &[FieldDefinition] = match def.fields.get(slug) {
                Some(block) if !fs.fields.is_empty() && !block.is_empty() => {
                    return Err(InitializationError::AmbiguousFields(slug.clone()));
                }
                Some(block) if !block.is_empty() => block,
                _ => &fs.fields,
            };

            let fields = declared
                .iter()
                .map(|f| build_field(slug, f))
                .collect::<Result<Vec<_>, _>>()?;

            fieldsets.insert(
                slug.clone(),
                Arc::new(Fieldset {
                    slug: slug.clone(),
                    name: fs.name.clone(),
                    fields,
                }),
            );
        }

        Ok(Self { fieldsets })
    }

    pub fn fieldset_by_slug(&self, slug: &str) -> Result<&Arc<Fieldset>, LookupError> {
        self.fieldsets
            .get(slug)
            .ok_or_else(|| LookupError::FieldsetNotFound(slug.to_string()))
    }

    /// All fieldsets, ordered by slug.
    pub fn all_fieldsets(&self) -> impl Iterator<Item = &Arc<Fieldset>> {
        self.fieldsets.values()
    }

    pub fn len(&self) -> usize {
        self.fieldsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fieldsets.is_empty()
    }

    /// Resolve a `fieldset`/`field` pair to its field definition.
    pub fn field(&self, fieldset: &str, field: &str) -> Option<&Field> {
        self.fieldsets.get(fieldset)?.field(field)
    }
}

fn build_field(fieldset: &str, def: &FieldDefinition) -> Result<Field, InitializationError> {
    let field_type: FieldType =
        def.kind
            .parse()
            .map_err(|kind| InitializationError::UnknownFieldType {
                fieldset: fieldset.to_string(),
                field: def.name.clone(),
                kind,
            })?;

    if field_type.has_options() == def.options.is_empty() {
        return Err(InitializationError::InvalidOptions {
            fieldset: fieldset.to_string(),
            field: def.name.clone(),
        });
    }

    // Options are the enum of the compiled schema; repeats would be noise.
    let mut seen = BTreeSet::new();
    let options = def
        .options
        .iter()
        .filter(|o| seen.insert(o.as_str()))
        .cloned()
        .collect();

    Ok(Field {
        name: def.name.clone(),
        label: def.label.clone(),
        field_type,
        optional: def.optional,
        options,
    })
}

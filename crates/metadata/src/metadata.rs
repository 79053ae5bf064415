//! Owning handle over the registry, compiled schemas and category tree.

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::category::{Category, SubcategoryInfo};
use crate::definition::MetadataDefinition;
use crate::error::{InitializationError, LookupError};
use crate::fieldset::Fieldset;
use crate::registry::FieldsetRegistry;
use crate::schema::{CompiledSchemas, FieldsetSchema, SchemaError};
use crate::tree::CategoryTree;

/// Immutable, fully checked category and fieldset metadata.
#[derive(Debug, Clone)]
pub struct Metadata {
    registry: FieldsetRegistry,
    schemas: CompiledSchemas,
    tree: CategoryTree,
}

impl Metadata {
    /// Build and check everything. Any error means the definition is unusable.
    pub fn from_definition(def: &MetadataDefinition) -> Result<Self, InitializationError> {
        let registry = FieldsetRegistry::from_definition(def)?;
        let schemas = CompiledSchemas::compile_all(&registry)?;
        let tree = CategoryTree::build(&def.categories, &registry)?;

        tracing::info!(
            fieldsets = registry.len(),
            categories = tree.len(),
            top_level = tree.top_level_categories().len(),
            "metadata loaded"
        );

        Ok(Self {
            registry,
            schemas,
            tree,
        })
    }

    pub fn from_toml_str(source: &str) -> Result<Self, InitializationError> {
        Self::from_definition(&MetadataDefinition::from_toml_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InitializationError> {
        Self::from_definition(&MetadataDefinition::from_path(path)?)
    }

    pub fn registry(&self) -> &FieldsetRegistry {
        &self.registry
    }

    pub fn schemas(&self) -> &CompiledSchemas {
        &self.schemas
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn top_level_categories(&self) -> &[SubcategoryInfo] {
        self.tree.top_level_categories()
    }

    pub fn root_category(&self) -> Category {
        Category::root(self.tree.top_level_categories())
    }

    pub fn category_by_slug(&self, slug: &str) -> Result<&Category, LookupError> {
        self.tree.category_by_slug(slug)
    }

    pub fn fieldset_by_slug(&self, slug: &str) -> Result<&Arc<Fieldset>, LookupError> {
        self.registry.fieldset_by_slug(slug)
    }

    pub fn all_fieldsets(&self) -> impl Iterator<Item = &Arc<Fieldset>> {
        self.registry.all_fieldsets()
    }

    pub fn schema_for_fieldset(&self, slug: &str) -> Result<&FieldsetSchema, LookupError> {
        self.schemas.schema(slug)
    }

    pub fn validate_segment(&self, fieldset: &str, segment: &Value) -> Result<(), SchemaError> {
        self.schemas.validate(fieldset, segment)
    }

    /// Effective fieldsets of a category paired with their compiled schemas.
    pub fn fieldsets_for_category(
        &self,
        slug: &str,
    ) -> Result<Vec<(&Arc<Fieldset>, &FieldsetSchema)>, LookupError> {
        self.category_by_slug(slug)?
            .fieldsets()
            .iter()
            .map(|fs| Ok((fs, self.schemas.schema(&fs.slug)?)))
            .collect()
    }

    /// `{fieldset_slug: {"type": "object", ...}}` for every effective fieldset.
    pub fn category_schema_json(&self, slug: &str) -> Result<Value, LookupError> {
        let schemas: Map<String, Value> = self
            .fieldsets_for_category(slug)?
            .into_iter()
            .map(|(fs, schema)| (fs.slug.clone(), schema.to_json()))
            .collect();
        Ok(Value::Object(schemas))
    }
}

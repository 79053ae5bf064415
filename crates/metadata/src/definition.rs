//! Decoded shape of the metadata definition source.
//!
//! The definition is plain data: nothing here is validated beyond what serde
//! enforces. [`FieldsetRegistry`](crate::FieldsetRegistry) and
//! [`CategoryTree`](crate::CategoryTree) turn it into checked metadata.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InitializationError;

/// Top-level definition document.
///
/// Fields of a fieldset may be listed inline (`[[fieldsets.<slug>.fields]]`)
/// or, more conveniently in TOML, in a separate block (`[[fields.<slug>]]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDefinition {
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryDefinition>,

    #[serde(default)]
    pub fieldsets: BTreeMap<String, FieldsetDefinition>,

    #[serde(default)]
    pub fields: BTreeMap<String, Vec<FieldDefinition>>,
}

impl MetadataDefinition {
    /// Decode a TOML definition document.
    pub fn from_toml_str(source: &str) -> Result<Self, InitializationError> {
        toml::from_str(source).map_err(|e| InitializationError::Parse(e.to_string()))
    }

    /// Read and decode a TOML definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InitializationError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| InitializationError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }
}

/// A category as declared; the slug is the key it is declared under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Empty or absent for top-level categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Slugs of the fieldsets this category adds on top of its ancestors'.
    #[serde(default)]
    pub fieldsets: Vec<String>,

    /// `"fieldset.field"` reference; inherited from the parent when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_field: Option<String>,

    /// Replaces (never merges with) the parent's list when non-empty.
    #[serde(default)]
    pub featured_fields: Vec<String>,
}

impl CategoryDefinition {
    pub fn parent_slug(&self) -> Option<&str> {
        non_empty(self.parent.as_deref())
    }

    pub fn name_field(&self) -> Option<&str> {
        non_empty(self.name_field.as_deref())
    }

    pub fn description_field(&self) -> Option<&str> {
        non_empty(self.description_field.as_deref())
    }

    pub fn short_description(&self) -> &str {
        non_empty(self.short_description.as_deref()).unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsetDefinition {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// A field as declared. `kind` is kept as text so an unknown type can be
/// reported with the fieldset and field it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub options: Vec<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_field_blocks_and_defaults() {
        let def = MetadataDefinition::from_toml_str(
            r#"
            [categories.laptops]
            name = "Laptops"
            parent = ""
            fieldsets = ["basics"]
            name_field = "basics.title"

            [fieldsets.basics]
            name = "Basics"

            [[fields.basics]]
            name = "title"
            label = "Title"
            type = "short-text"
            "#,
        )
        .unwrap();

        let laptops = &def.categories["laptops"];
        assert_eq!(laptops.parent_slug(), None);
        assert_eq!(laptops.short_description(), "Laptops");
        assert_eq!(laptops.name_field(), Some("basics.title"));
        assert_eq!(laptops.description_field(), None);
        assert!(laptops.featured_fields.is_empty());

        let title = &def.fields["basics"][0];
        assert_eq!(title.kind, "short-text");
        assert!(!title.optional);
        assert!(title.options.is_empty());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = MetadataDefinition::from_toml_str("[categories.laptops\nname = 1").unwrap_err();
        assert!(matches!(err, InitializationError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = MetadataDefinition::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, InitializationError::Io { .. }));
    }
}

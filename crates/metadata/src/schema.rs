//! Schema Compiler: per-fieldset validation schemas.
//!
//! The dialect is deliberately narrow: an object of typed scalars with a
//! required list, string enums and the `uri` string format. Undeclared
//! properties are allowed, as in JSON Schema without `additionalProperties`.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::error::{InitializationError, LookupError};
use crate::fieldset::{FieldType, Fieldset};
use crate::registry::FieldsetRegistry;

/// Constraint on a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySchema {
    String {
        format: Option<StringFormat>,
        allowed: Option<Vec<String>>,
    },
    Boolean,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StringFormat {
    Uri,
}

impl StringFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            StringFormat::Uri => "uri",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub title: String,
    pub schema: PropertySchema,
}

/// Compiled schema of one fieldset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsetSchema {
    fieldset: String,
    properties: Vec<Property>,
    required: Vec<String>,
}

/// Why a segment failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("required field is missing")]
    MissingRequired,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value:?} is not one of {allowed:?}")]
    NotAllowed { value: String, allowed: Vec<String> },

    #[error("{value:?} is not a valid uri")]
    InvalidUri { value: String },
}

/// First constraint a submitted fieldset segment failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("fieldset {fieldset:?}{}: {kind}", .field.as_ref().map(|f| format!(", field {f:?}")).unwrap_or_default())]
pub struct SchemaViolation {
    pub fieldset: String,
    /// `None` when the segment as a whole is wrong (not an object).
    pub field: Option<String>,
    pub kind: ViolationKind,
}

/// Compile one fieldset. Fails when two fields share a name.
pub fn compile(fieldset: &Fieldset) -> Result<FieldsetSchema, InitializationError> {
    let mut seen = BTreeSet::new();
    let mut properties = Vec::with_capacity(fieldset.fields.len());
    let mut required = Vec::new();

    for field in &fieldset.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(InitializationError::DuplicateField {
                fieldset: fieldset.slug.clone(),
                field: field.name.clone(),
            });
        }

        let schema = match field.field_type {
            FieldType::ShortText | FieldType::Textarea => PropertySchema::String {
                format: None,
                allowed: None,
            },
            FieldType::Url => PropertySchema::String {
                format: Some(StringFormat::Uri),
                allowed: None,
            },
            FieldType::RadioButtons | FieldType::Dropdown => PropertySchema::String {
                format: None,
                allowed: Some(field.options.clone()),
            },
            FieldType::Checkbox => PropertySchema::Boolean,
        };

        if !field.optional {
            required.push(field.name.clone());
        }
        properties.push(Property {
            name: field.name.clone(),
            title: field.label.clone(),
            schema,
        });
    }

    Ok(FieldsetSchema {
        fieldset: fieldset.slug.clone(),
        properties,
        required,
    })
}

impl FieldsetSchema {
    pub fn fieldset(&self) -> &str {
        &self.fieldset
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Validate a submitted segment, stopping at the first violation.
    ///
    /// Fields are checked in declaration order, so the reported violation is
    /// deterministic for a given payload.
    pub fn validate(&self, segment: &Value) -> Result<(), SchemaViolation> {
        let object = segment.as_object().ok_or_else(|| SchemaViolation {
            fieldset: self.fieldset.clone(),
            field: None,
            kind: ViolationKind::NotAnObject {
                found: json_type_name(segment),
            },
        })?;

        for property in &self.properties {
            let Some(value) = object.get(&property.name) else {
                if self.required.contains(&property.name) {
                    return Err(self.violation(&property.name, ViolationKind::MissingRequired));
                }
                continue;
            };

            check_property(&property.schema, value)
                .map_err(|kind| self.violation(&property.name, kind))?;
        }

        Ok(())
    }

    fn violation(&self, field: &str, kind: ViolationKind) -> SchemaViolation {
        SchemaViolation {
            fieldset: self.fieldset.clone(),
            field: Some(field.to_string()),
            kind,
        }
    }

    /// JSON form consumed by form-building clients:
    /// `{"type": "object", "properties": {...}, "required": [...]}`.
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| {
                let mut schema = match &p.schema {
                    PropertySchema::String { format, allowed } => {
                        let mut s = json!({ "type": "string" });
                        if let Some(format) = format {
                            s["format"] = json!(format.as_str());
                        }
                        if let Some(allowed) = allowed {
                            s["enum"] = json!(allowed);
                        }
                        s
                    }
                    PropertySchema::Boolean => json!({ "type": "boolean" }),
                };
                schema["title"] = json!(p.title);
                (p.name.clone(), schema)
            })
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }
}

fn check_property(schema: &PropertySchema, value: &Value) -> Result<(), ViolationKind> {
    match schema {
        PropertySchema::Boolean => match value {
            Value::Bool(_) => Ok(()),
            other => Err(ViolationKind::WrongType {
                expected: "boolean",
                found: json_type_name(other),
            }),
        },
        PropertySchema::String { format, allowed } => {
            let Value::String(s) = value else {
                return Err(ViolationKind::WrongType {
                    expected: "string",
                    found: json_type_name(value),
                });
            };

            if let Some(allowed) = allowed {
                if !allowed.iter().any(|a| a == s) {
                    return Err(ViolationKind::NotAllowed {
                        value: s.clone(),
                        allowed: allowed.clone(),
                    });
                }
            }

            match format {
                Some(StringFormat::Uri) if !is_absolute_uri(s) => {
                    Err(ViolationKind::InvalidUri { value: s.clone() })
                }
                _ => Ok(()),
            }
        }
    }
}

/// JSON Schema name of a value's type.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compiled schemas for every registered fieldset, keyed by slug.
///
/// Built once at startup and owned by [`Metadata`](crate::Metadata); never
/// mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CompiledSchemas {
    by_slug: BTreeMap<String, FieldsetSchema>,
}

impl CompiledSchemas {
    pub fn compile_all(registry: &FieldsetRegistry) -> Result<Self, InitializationError> {
        let by_slug = registry
            .all_fieldsets()
            .map(|fs| Ok((fs.slug.clone(), compile(fs)?)))
            .collect::<Result<BTreeMap<_, _>, InitializationError>>()?;
        Ok(Self { by_slug })
    }

    pub fn schema(&self, fieldset: &str) -> Result<&FieldsetSchema, LookupError> {
        self.by_slug
            .get(fieldset)
            .ok_or_else(|| LookupError::FieldsetNotFound(fieldset.to_string()))
    }

    pub fn validate(&self, fieldset: &str, segment: &Value) -> Result<(), SchemaError> {
        self.schema(fieldset)?.validate(segment)?;
        Ok(())
    }
}

/// Outcome of [`CompiledSchemas::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error(transparent)]
    NotFound(#[from] LookupError),

    #[error(transparent)]
    Violation(#[from] SchemaViolation),
}

/// `Url::parse` quietly trims, strips tabs/newlines and escapes spaces, so
/// those are refused up front.
fn is_absolute_uri(s: &str) -> bool {
    !s.chars().any(|c| c.is_ascii_whitespace() || c.is_control()) && url::Url::parse(s).is_ok()
}

//! Dotted `fieldset.field` references used by derived fields.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed field reference {0:?} (expected \"fieldset.field\")")]
pub struct MalformedFieldPath(pub String);

/// A parsed `fieldset_slug.field_name` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath<'a> {
    fieldset: &'a str,
    field: &'a str,
}

impl<'a> FieldPath<'a> {
    /// Exactly two non-empty segments separated by a single `.`.
    pub fn parse(reference: &'a str) -> Result<Self, MalformedFieldPath> {
        let mut parts = reference.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(fieldset), Some(field), None) if !fieldset.is_empty() && !field.is_empty() => {
                Ok(Self { fieldset, field })
            }
            _ => Err(MalformedFieldPath(reference.to_string())),
        }
    }

    pub fn fieldset(&self) -> &'a str {
        self.fieldset
    }

    pub fn field(&self) -> &'a str {
        self.field
    }
}

impl core::fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.fieldset, self.field)
    }
}

//! Metadata error model.
//!
//! Two families: `InitializationError` is raised while the metadata is being
//! built and must stop the process from serving; `LookupError` is raised by
//! queries against already-built metadata and is recoverable.

use thiserror::Error;

use agora_core::DomainError;

/// The metadata definition is inconsistent. Always fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitializationError {
    #[error("failed to parse metadata definition: {0}")]
    Parse(String),

    #[error("failed to read metadata definition from {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("found fields block for nonexistent fieldset {0:?}")]
    FieldsForUnknownFieldset(String),

    #[error("fieldset {0:?} declares fields both inline and in a fields block")]
    AmbiguousFields(String),

    #[error("field {fieldset}.{field} has unrecognized type {kind:?}")]
    UnknownFieldType {
        fieldset: String,
        field: String,
        kind: String,
    },

    #[error("field {fieldset}.{field}: options must be non-empty exactly for radio-buttons and dropdown fields")]
    InvalidOptions { fieldset: String, field: String },

    #[error("fieldset {fieldset:?} declares field {field:?} more than once")]
    DuplicateField { fieldset: String, field: String },

    #[error("category {category:?} has parent {parent:?}, but no such category exists")]
    MissingParent { category: String, parent: String },

    #[error("category {category:?} references nonexistent fieldset {fieldset:?}")]
    UnknownFieldset { category: String, fieldset: String },

    #[error("category parent graph contains a cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("leaf category {category:?} has no {which}")]
    MissingDerivedField {
        category: String,
        which: &'static str,
    },

    #[error("leaf category {category:?} has malformed {which} reference {reference:?} (expected \"fieldset.field\")")]
    MalformedFieldPath {
        category: String,
        which: &'static str,
        reference: String,
    },

    #[error("leaf category {category:?} has nonexistent {which} {reference:?}")]
    UnresolvedFieldReference {
        category: String,
        which: &'static str,
        reference: String,
    },

    #[error("leaf category {category:?} has {which} {reference:?} outside of its own fieldsets")]
    ReferenceOutsideCategory {
        category: String,
        which: &'static str,
        reference: String,
    },

    #[error("leaf category {category:?} uses {reference:?} as {which}, but that field does not hold text")]
    NonTextDerivedField {
        category: String,
        which: &'static str,
        reference: String,
    },
}

/// Lookup of a slug that isn't part of the loaded metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no such category: {0:?}")]
    CategoryNotFound(String),

    #[error("no such fieldset: {0:?}")]
    FieldsetNotFound(String),
}

impl From<LookupError> for DomainError {
    fn from(err: LookupError) -> Self {
        DomainError::not_found(err.to_string())
    }
}

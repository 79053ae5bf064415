//! `agora-metadata`: the dynamic schema engine behind marketplace categories.
//!
//! Categories are configured, not hard-coded: each one declares the fieldsets
//! its products must carry and inherits fieldsets, display rules and derived
//! field references from its ancestors. Everything here is built once at
//! startup ([`Metadata::from_definition`]) and is read-only afterwards, so a
//! single `Metadata` can be shared across any number of request handlers.

pub mod category;
pub mod definition;
pub mod error;
pub mod field_path;
pub mod fieldset;
pub mod metadata;
pub mod registry;
pub mod schema;
pub mod tree;

pub use category::{Category, SubcategoryInfo};
pub use definition::{CategoryDefinition, FieldDefinition, FieldsetDefinition, MetadataDefinition};
pub use error::{InitializationError, LookupError};
pub use field_path::{FieldPath, MalformedFieldPath};
pub use fieldset::{Field, FieldType, Fieldset};
pub use metadata::Metadata;
pub use registry::FieldsetRegistry;
pub use schema::{CompiledSchemas, FieldsetSchema, SchemaError, SchemaViolation, ViolationKind};
pub use tree::CategoryTree;

/// Definition compiled into the binary, used when no file is configured.
pub const DEFAULT_DEFINITION: &str = include_str!("../definitions/marketplace.toml");

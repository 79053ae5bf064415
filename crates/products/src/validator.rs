//! Product Validator: submitted JSON against a category's resolved schema.

use thiserror::Error;

use agora_core::DomainError;
use agora_metadata::{Category, LookupError, Metadata, SchemaViolation};

use crate::product::ProductData;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The body isn't a JSON object.
    #[error("malformed product JSON: {0}")]
    Parse(String),

    #[error(transparent)]
    NotFound(#[from] LookupError),

    #[error("product data doesn't contain fieldset {0:?}")]
    MissingFieldset(String),

    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NotFound(e) => e.into(),
            other => DomainError::validation(other.to_string()),
        }
    }
}

/// Validates submissions against immutable metadata. Cheap to construct.
#[derive(Debug, Clone, Copy)]
pub struct ProductValidator<'m> {
    metadata: &'m Metadata,
}

impl<'m> ProductValidator<'m> {
    pub fn new(metadata: &'m Metadata) -> Self {
        Self { metadata }
    }

    /// Parse `raw` and validate it against `category_slug`. On success the
    /// parsed mapping is the product's data, extra segments included.
    pub fn validate(&self, category_slug: &str, raw: &[u8]) -> Result<ProductData, ValidationError> {
        let data: ProductData =
            serde_json::from_slice(raw).map_err(|e| ValidationError::Parse(e.to_string()))?;
        let category = self.metadata.category_by_slug(category_slug)?;
        self.check(category, &data)?;
        Ok(data)
    }

    /// Check already-parsed data. Fails fast on the first problem, walking the
    /// category's effective fieldsets in order.
    pub fn check(&self, category: &Category, data: &ProductData) -> Result<(), ValidationError> {
        for fieldset in category.fieldsets() {
            let segment = data
                .get(&fieldset.slug)
                .ok_or_else(|| ValidationError::MissingFieldset(fieldset.slug.clone()))?;

            self.metadata
                .schema_for_fieldset(&fieldset.slug)?
                .validate(segment)?;
        }
        Ok(())
    }
}

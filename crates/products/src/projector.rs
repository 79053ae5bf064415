//! Derived-Field Projector.
//!
//! Reads name, description and featured values out of untyped product data
//! through the category's `fieldset.field` references.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use agora_core::DomainError;
use agora_metadata::schema::json_type_name;
use agora_metadata::{Category, FieldPath, MalformedFieldPath};

use crate::product::{DerivedFields, ProductData};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("category {category:?} has no {which}")]
    MissingReference {
        category: String,
        which: &'static str,
    },

    #[error(transparent)]
    MalformedFieldPath(#[from] MalformedFieldPath),

    #[error("product doesn't contain fieldset {fieldset:?} (needed for {reference:?})")]
    FieldsetAbsent { fieldset: String, reference: String },

    #[error("fieldset {fieldset:?} of the product isn't an object (needed for {reference:?})")]
    SegmentNotObject { fieldset: String, reference: String },

    #[error("fieldset {fieldset:?} doesn't contain field {field:?}")]
    FieldAbsent { fieldset: String, field: String },

    #[error("{which} {reference:?} must hold a string, found {found}")]
    DerivedFieldTypeMismatch {
        which: &'static str,
        reference: String,
        found: &'static str,
    },
}

impl From<DerivationError> for DomainError {
    fn from(err: DerivationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// Compute the derived fields of `data` for `category`.
///
/// Deterministic: identical inputs give identical output. Featured values are
/// copied as-is, whatever their JSON type.
pub fn project(category: &Category, data: &ProductData) -> Result<DerivedFields, DerivationError> {
    let name = text(category, "name field", category.name_field(), data)?;
    let description = text(category, "description field", category.description_field(), data)?;

    let featured_fields = category
        .featured_fields()
        .iter()
        .map(|reference| Ok((reference.clone(), resolve(reference, data)?.clone())))
        .collect::<Result<BTreeMap<_, _>, DerivationError>>()?;

    Ok(DerivedFields {
        name,
        description,
        featured_fields,
    })
}

fn text(
    category: &Category,
    which: &'static str,
    reference: Option<&str>,
    data: &ProductData,
) -> Result<String, DerivationError> {
    let reference = reference.ok_or_else(|| DerivationError::MissingReference {
        category: category.slug().to_string(),
        which,
    })?;

    match resolve(reference, data)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(DerivationError::DerivedFieldTypeMismatch {
            which,
            reference: reference.to_string(),
            found: json_type_name(other),
        }),
    }
}

/// Dereference one `fieldset.field` path into `data`.
pub fn resolve<'d>(reference: &str, data: &'d ProductData) -> Result<&'d Value, DerivationError> {
    let path = FieldPath::parse(reference)?;

    let segment = data
        .get(path.fieldset())
        .ok_or_else(|| DerivationError::FieldsetAbsent {
            fieldset: path.fieldset().to_string(),
            reference: reference.to_string(),
        })?;

    let fields = segment
        .as_object()
        .ok_or_else(|| DerivationError::SegmentNotObject {
            fieldset: path.fieldset().to_string(),
            reference: reference.to_string(),
        })?;

    fields
        .get(path.field())
        .ok_or_else(|| DerivationError::FieldAbsent {
            fieldset: path.fieldset().to_string(),
            field: path.field().to_string(),
        })
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use agora_core::ProductId;

/// Submitted product data: fieldset slug -> segment.
///
/// Segments of the category's fieldsets are objects of field name -> value
/// once validated; segments for other fieldsets pass through untouched.
pub type ProductData = Map<String, Value>;

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub category_slug: String,
    pub data: ProductData,
    pub submitted_at: DateTime<Utc>,
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category_slug: String,
    /// Starts out `false`; set once by moderation, never reverted.
    pub approved: bool,
    pub data: ProductData,
    pub submitted_at: DateTime<Utc>,
}

impl Product {
    /// Store-side constructor: the store assigns the id.
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            category_slug: new.category_slug,
            approved: false,
            data: new.data,
            submitted_at: new.submitted_at,
        }
    }
}

/// Values computed from a product's data via its category's field references.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    pub name: String,
    pub description: String,
    /// Keyed by the `fieldset.field` reference the value was read from.
    pub featured_fields: BTreeMap<String, Value>,
}

/// A product together with its derived fields, as shown to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedProduct {
    #[serde(flatten)]
    pub product: Product,
    #[serde(flatten)]
    pub derived: DerivedFields,
}

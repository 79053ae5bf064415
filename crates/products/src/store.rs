//! Port to the durable product store.

use std::sync::Arc;

use thiserror::Error;

use agora_core::{DomainError, ProductId};

use crate::product::{NewProduct, Product};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no such product: {0}")]
    NotFound(ProductId),

    /// Failure inside the storage backend, passed through unchanged.
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => DomainError::not_found(err.to_string()),
            StoreError::Backend(msg) => DomainError::storage(msg),
        }
    }
}

/// Durable product storage.
///
/// The core issues at most one logical write per call and provides no
/// transactional or retry semantics of its own.
pub trait ProductStore: Send + Sync {
    /// Persist a validated submission; the store assigns the id.
    fn add(&self, product: NewProduct) -> Result<Product, StoreError>;

    fn get(&self, id: ProductId) -> Result<Product, StoreError>;

    /// Approved products of one category, oldest first.
    fn list_by_category(&self, category_slug: &str) -> Result<Vec<Product>, StoreError>;

    /// Products still waiting for moderation, oldest first.
    fn list_pending(&self) -> Result<Vec<Product>, StoreError>;

    /// Set `approved`. Approving an approved product is not an error.
    fn approve(&self, id: ProductId) -> Result<Product, StoreError>;

    /// Remove the product entirely.
    fn reject(&self, id: ProductId) -> Result<(), StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn add(&self, product: NewProduct) -> Result<Product, StoreError> {
        (**self).add(product)
    }

    fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        (**self).get(id)
    }

    fn list_by_category(&self, category_slug: &str) -> Result<Vec<Product>, StoreError> {
        (**self).list_by_category(category_slug)
    }

    fn list_pending(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_pending()
    }

    fn approve(&self, id: ProductId) -> Result<Product, StoreError> {
        (**self).approve(id)
    }

    fn reject(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).reject(id)
    }
}

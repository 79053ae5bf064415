//! Product service: submission, reads with derived fields, moderation.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use agora_core::{DomainError, ProductId};
use agora_metadata::{LookupError, Metadata};

use crate::moderation::{ModerationCommand, ModerationOutcome};
use crate::product::{ListedProduct, NewProduct, Product};
use crate::projector::{project, DerivationError};
use crate::store::{ProductStore, StoreError};
use crate::validator::{ProductValidator, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Submitted data passed validation but its derived fields can't be read.
    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error("category {0:?} has subcategories and can't hold products directly")]
    NotALeaf(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored product no longer fits its category.
    #[error("stored product {id} is inconsistent with its category: {source}")]
    Inconsistent {
        id: ProductId,
        #[source]
        source: Box<ServiceError>,
    },
}

impl From<ServiceError> for DomainError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => e.into(),
            ServiceError::Derivation(e) => e.into(),
            ServiceError::NotALeaf(_) => DomainError::validation(err.to_string()),
            ServiceError::Lookup(e) => e.into(),
            ServiceError::Store(e) => e.into(),
            ServiceError::Inconsistent { .. } => DomainError::internal(err.to_string()),
        }
    }
}

/// Products use case layer over immutable metadata and a store.
#[derive(Debug)]
pub struct ProductService<S> {
    metadata: Arc<Metadata>,
    store: S,
}

impl<S> ProductService<S>
where
    S: ProductStore,
{
    pub fn new(metadata: Arc<Metadata>, store: S) -> Self {
        Self { metadata, store }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a raw JSON submission and store it, pending moderation. Only
    /// leaf categories accept products.
    ///
    /// Derived fields are computed before storing so a submission whose name or
    /// description can't be read is rejected up front.
    pub fn create_product(&self, category_slug: &str, raw: &[u8]) -> Result<ListedProduct, ServiceError> {
        let category = self.metadata.category_by_slug(category_slug)?;
        if !category.is_leaf() {
            return Err(ServiceError::NotALeaf(category_slug.to_string()));
        }

        let data = ProductValidator::new(&self.metadata)
            .validate(category_slug, raw)
            .inspect_err(|e| tracing::debug!(category = category_slug, error = %e, "submission rejected"))?;
        let derived = project(category, &data)?;

        let product = self
            .store
            .add(NewProduct {
                category_slug: category_slug.to_string(),
                data,
                submitted_at: Utc::now(),
            })
            .inspect_err(|e| tracing::warn!(error = %e, "failed to store product"))?;

        tracing::info!(product_id = %product.id, category = category_slug, "product submitted");
        Ok(ListedProduct { product, derived })
    }

    pub fn get_product(&self, id: ProductId) -> Result<ListedProduct, ServiceError> {
        let product = self.store.get(id)?;
        self.listed(product)
    }

    /// Approved products of an existing category.
    pub fn products_by_category(&self, category_slug: &str) -> Result<Vec<ListedProduct>, ServiceError> {
        self.metadata.category_by_slug(category_slug)?;
        self.store
            .list_by_category(category_slug)?
            .into_iter()
            .map(|p| self.listed(p))
            .collect()
    }

    /// Products waiting for a moderator.
    pub fn pending_products(&self) -> Result<Vec<ListedProduct>, ServiceError> {
        self.store
            .list_pending()?
            .into_iter()
            .map(|p| self.listed(p))
            .collect()
    }

    /// Approve or reject a product. Rejection removes it from the store.
    pub fn moderate(&self, id: ProductId, command: ModerationCommand) -> Result<ModerationOutcome, ServiceError> {
        let outcome = command.execute(&self.store, id)?;
        tracing::info!(product_id = %id, ?command, "product moderated");
        Ok(outcome)
    }

    fn listed(&self, product: Product) -> Result<ListedProduct, ServiceError> {
        let derived = self
            .metadata
            .category_by_slug(&product.category_slug)
            .map_err(ServiceError::from)
            .and_then(|category| project(category, &product.data).map_err(ServiceError::from))
            .map_err(|source| ServiceError::Inconsistent {
                id: product.id,
                source: Box::new(source),
            })?;
        Ok(ListedProduct { product, derived })
    }
}

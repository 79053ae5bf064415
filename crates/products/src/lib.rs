//! Products domain module.
//!
//! Validation of submitted product data against a category's resolved schema,
//! projection of derived fields, and moderation. Pure domain logic: storage is
//! reached only through the [`ProductStore`] port.

pub mod moderation;
pub mod product;
pub mod projector;
pub mod service;
pub mod store;
pub mod validator;

pub use moderation::{ModerationCommand, ModerationOutcome};
pub use product::{DerivedFields, ListedProduct, NewProduct, Product, ProductData};
pub use projector::{project, DerivationError};
pub use service::{ProductService, ServiceError};
pub use store::{ProductStore, StoreError};
pub use validator::{ProductValidator, ValidationError};

#[cfg(test)]
pub(crate) mod fixtures;

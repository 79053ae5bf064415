//! `agora-core`: primitives shared by every marketplace crate.
//!
//! Nothing in here knows about categories, fieldsets or HTTP.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;

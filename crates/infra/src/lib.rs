//! Infrastructure layer: adapters for the ports the core defines.
//!
//! Durable storage is an external collaborator; what lives here is the
//! in-memory store used in development and tests.

pub mod product_store;

pub use product_store::InMemoryProductStore;

mod integration_tests;

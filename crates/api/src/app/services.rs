//! Service wiring shared by every handler.

use std::sync::Arc;

use agora_infra::InMemoryProductStore;
use agora_metadata::Metadata;
use agora_products::ProductService;

pub type Products = ProductService<Arc<InMemoryProductStore>>;

pub struct AppServices {
    pub metadata: Arc<Metadata>,
    pub products: Products,
}

pub fn build_services(metadata: Arc<Metadata>) -> AppServices {
    let store = Arc::new(InMemoryProductStore::new());
    let products = ProductService::new(metadata.clone(), store);
    AppServices { metadata, products }
}

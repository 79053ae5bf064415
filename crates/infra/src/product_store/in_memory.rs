use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use agora_core::ProductId;
use agora_products::{NewProduct, Product, ProductStore, StoreError};

/// In-memory product store for tests/dev. Lists in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    by_seq: BTreeMap<u64, Product>,
    seq_of: HashMap<ProductId, u64>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.by_seq.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("product store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("product store lock poisoned".to_string()))
    }

    fn list_where(&self, keep: impl Fn(&Product) -> bool) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .read()?
            .by_seq
            .values()
            .filter(|p| keep(p))
            .cloned()
            .collect())
    }
}

impl ProductStore for InMemoryProductStore {
    fn add(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.write()?;
        let id = ProductId::new();
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let stored = Product::from_new(id, product);
        inner.seq_of.insert(id, seq);
        inner.by_seq.insert(seq, stored.clone());
        Ok(stored)
    }

    fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        let inner = self.read()?;
        inner
            .seq_of
            .get(&id)
            .and_then(|seq| inner.by_seq.get(seq))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list_by_category(&self, category_slug: &str) -> Result<Vec<Product>, StoreError> {
        self.list_where(|p| p.approved && p.category_slug == category_slug)
    }

    fn list_pending(&self) -> Result<Vec<Product>, StoreError> {
        self.list_where(Product::is_pending)
    }

    fn approve(&self, id: ProductId) -> Result<Product, StoreError> {
        let mut inner = self.write()?;
        let seq = *inner.seq_of.get(&id).ok_or(StoreError::NotFound(id))?;
        let product = inner
            .by_seq
            .get_mut(&seq)
            .ok_or(StoreError::NotFound(id))?;
        product.approve();
        Ok(product.clone())
    }

    fn reject(&self, id: ProductId) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        let seq = inner.seq_of.remove(&id).ok_or(StoreError::NotFound(id))?;
        inner.by_seq.remove(&seq);
        tracing::debug!(product_id = %id, "product removed from store");
        Ok(())
    }
}

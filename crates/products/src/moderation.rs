//! Moderation: the approve/reject workflow for submitted products.
//!
//! A product is either awaiting moderation (`approved == false`) or approved.
//! Rejection doesn't leave a tombstone: the product is removed.

use serde::{Deserialize, Serialize};

use agora_core::ProductId;

use crate::product::Product;
use crate::store::{ProductStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationCommand {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModerationOutcome {
    Approved(Product),
    Rejected(ProductId),
}

impl ModerationCommand {
    /// Run the command against the store. Unknown ids surface as
    /// `StoreError::NotFound`; no other transition is guarded here.
    pub fn execute<S>(self, store: &S, id: ProductId) -> Result<ModerationOutcome, StoreError>
    where
        S: ProductStore + ?Sized,
    {
        match self {
            ModerationCommand::Approve => store.approve(id).map(ModerationOutcome::Approved),
            ModerationCommand::Reject => store.reject(id).map(|()| ModerationOutcome::Rejected(id)),
        }
    }
}

impl Product {
    /// Mark the product as approved. Idempotent.
    pub fn approve(&mut self) {
        self.approved = true;
    }

    pub fn is_pending(&self) -> bool {
        !self.approved
    }
}

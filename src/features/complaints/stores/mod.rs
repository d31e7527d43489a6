//! Persistence backends for the complaint collection.
//!
//! [`ComplaintStore`] is the only seam between the service layer and
//! storage. Implementations must apply each `insert`/`update` atomically and
//! must never filter: predicates belong to the caller.

mod memory_store;
mod postgres_store;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::complaints::models::{Complaint, ComplaintPatch, NewComplaint, SortOrder};

pub use memory_store::MemoryComplaintStore;
pub use postgres_store::PgComplaintStore;

#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// All complaints, in creation order unless `sort` says otherwise
    async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Complaint>>;

    /// Persist a new `pending` complaint under `id`.
    ///
    /// When `idempotency_key` was already used, the record created with it
    /// is returned unchanged and nothing is written.
    async fn insert(
        &self,
        id: Uuid,
        data: &NewComplaint,
        idempotency_key: Option<&str>,
    ) -> Result<Complaint>;

    /// The complaint created under `key`, if any
    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Complaint>>;

    /// Merge `patch` into the record and bump `updated_at`.
    /// Fails with `AppError::NotFound` for an unknown id.
    async fn update(&self, id: Uuid, patch: &ComplaintPatch) -> Result<Complaint>;
}

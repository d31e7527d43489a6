use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ComplaintStore;
use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{
    next_timestamp, Complaint, ComplaintPatch, NewComplaint, SortOrder,
};

#[derive(Default)]
struct State {
    /// Insertion order doubles as creation order
    complaints: Vec<Complaint>,
    by_idempotency_key: HashMap<String, Uuid>,
    last_created_at: Option<DateTime<Utc>>,
}

impl State {
    fn lookup_key(&self, key: &str) -> Result<Option<Complaint>> {
        let Some(id) = self.by_idempotency_key.get(key) else {
            return Ok(None);
        };
        self.complaints
            .iter()
            .find(|c| c.id == *id)
            .cloned()
            .map(Some)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Idempotency key '{}' points at missing complaint {}",
                    key, id
                ))
            })
    }
}

/// In-process store for development and tests. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryComplaintStore {
    state: RwLock<State>,
}

impl MemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintStore for MemoryComplaintStore {
    async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Complaint>> {
        let state = self.state.read().await;
        let mut complaints = state.complaints.clone();

        match sort {
            None | Some(SortOrder::CreatedAtAsc) => {}
            Some(SortOrder::CreatedAtDesc) => complaints.reverse(),
        }

        Ok(complaints)
    }

    async fn insert(
        &self,
        id: Uuid,
        data: &NewComplaint,
        idempotency_key: Option<&str>,
    ) -> Result<Complaint> {
        let mut state = self.state.write().await;

        if let Some(key) = idempotency_key {
            if let Some(existing) = state.lookup_key(key)? {
                tracing::debug!("Idempotent replay for key '{}': {}", key, existing.id);
                return Ok(existing);
            }
        }

        if state.complaints.iter().any(|c| c.id == id) {
            return Err(AppError::Internal(format!("Duplicate complaint id {}", id)));
        }

        // Keep creation timestamps strictly increasing so that sorting by
        // created_at matches insertion order
        let now = match state.last_created_at {
            Some(last) => next_timestamp(last, Utc::now()),
            None => Utc::now(),
        };
        let complaint = Complaint::new(id, data.clone(), now);

        state.last_created_at = Some(now);
        state.complaints.push(complaint.clone());
        if let Some(key) = idempotency_key {
            state.by_idempotency_key.insert(key.to_string(), id);
        }

        Ok(complaint)
    }

    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Complaint>> {
        self.state.read().await.lookup_key(key)
    }

    async fn update(&self, id: Uuid, patch: &ComplaintPatch) -> Result<Complaint> {
        let mut state = self.state.write().await;

        let complaint = state
            .complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))?;

        complaint.apply(patch, Utc::now());
        Ok(complaint.clone())
    }
}

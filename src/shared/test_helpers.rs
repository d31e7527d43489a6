#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::core::config::StoreConfig;
#[cfg(test)]
use crate::features::complaints::{ComplaintService, MemoryComplaintStore};

/// Complaint service over a fresh in-memory store with short timeouts
#[cfg(test)]
pub fn memory_complaint_service() -> Arc<ComplaintService> {
    let config = StoreConfig {
        timeout: std::time::Duration::from_secs(1),
        list_retries: 0,
        ..Default::default()
    };
    Arc::new(ComplaintService::new(
        Arc::new(MemoryComplaintStore::new()),
        &config,
    ))
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::core::config::StoreConfig;
use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{Complaint, ComplaintPatch, NewComplaint, SortOrder};
use crate::features::complaints::stores::ComplaintStore;
use crate::shared::constants::{
    MAX_CITIZEN_NAME_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_IDEMPOTENCY_KEY_LENGTH,
    MAX_LOCATION_LENGTH, MAX_REMARK_LENGTH, MAX_TITLE_LENGTH,
};
use crate::shared::validation::{
    validate_coordinates, validate_max_length, validate_required_text, validate_url,
};

/// Service for complaint operations.
///
/// Owns the complaint contract on top of a [`ComplaintStore`]: input
/// validation, per-call timeouts, retries for idempotent reads, and
/// idempotency-key guarded creates.
pub struct ComplaintService {
    store: Arc<dyn ComplaintStore>,
    timeout: Duration,
    retries: u32,
    retry_backoff: Duration,
}

impl ComplaintService {
    pub fn new(store: Arc<dyn ComplaintStore>, config: &StoreConfig) -> Self {
        Self {
            store,
            timeout: config.timeout,
            retries: config.list_retries,
            retry_backoff: config.retry_backoff,
        }
    }

    /// List every complaint. Retried on transient storage failures.
    pub async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Complaint>> {
        self.with_retry("list", self.retries, || self.store.list(sort))
            .await
    }

    /// File a new complaint. Status is always `pending`.
    ///
    /// Only retried when the caller supplied an idempotency key, since a
    /// blind retry could otherwise persist the same complaint twice.
    pub async fn create(
        &self,
        data: NewComplaint,
        idempotency_key: Option<String>,
    ) -> Result<Complaint> {
        validate_new_complaint(&data)?;
        if let Some(key) = &idempotency_key {
            validate_required_text("Idempotency key", key, MAX_IDEMPOTENCY_KEY_LENGTH)
                .map_err(AppError::Validation)?;
        }

        let id = Uuid::now_v7();
        let key = idempotency_key.as_deref();
        let retries = if key.is_some() { self.retries } else { 0 };

        let complaint = self
            .with_retry("create", retries, || self.store.insert(id, &data, key))
            .await?;

        tracing::info!(
            "Complaint filed: id={}, category={}, citizen={:?}",
            complaint.id,
            complaint.category,
            complaint.citizen_name
        );

        Ok(complaint)
    }

    /// Apply a staff update. Any status may move to any other status.
    pub async fn update(&self, id: Uuid, patch: ComplaintPatch) -> Result<Complaint> {
        validate_patch(&patch)?;

        let complaint = self
            .with_retry("update", 0, || self.store.update(id, &patch))
            .await?;

        tracing::info!(
            "Complaint updated: id={}, status={}, remark_changed={}",
            complaint.id,
            complaint.status,
            patch.remark.is_some()
        );

        Ok(complaint)
    }

    async fn with_retry<T, F, Fut>(&self, op: &'static str, retries: u32, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match self.with_timeout(op, call()).await {
                Err(e) if e.is_transient() && attempt < retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Complaint store {} failed (attempt {}/{}): {}",
                        op,
                        attempt,
                        retries + 1,
                        e
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                result => return result,
            }
        }
    }

    async fn with_timeout<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                AppError::Timeout(format!(
                    "Complaint store {} did not finish within {:?}",
                    op, self.timeout
                ))
            })?
    }
}

fn validate_new_complaint(data: &NewComplaint) -> Result<()> {
    validate_required_text("Title", &data.title, MAX_TITLE_LENGTH)
        .and_then(|_| check_optional("Description", &data.description, MAX_DESCRIPTION_LENGTH))
        .and_then(|_| check_optional("Location", &data.location, MAX_LOCATION_LENGTH))
        .and_then(|_| {
            check_optional("Citizen name", &data.citizen_name, MAX_CITIZEN_NAME_LENGTH)
        })
        .and_then(|_| validate_coordinates(data.latitude, data.longitude))
        .and_then(|_| match &data.image_url {
            Some(url) => validate_url("Image URL", url),
            None => Ok(()),
        })
        .map_err(AppError::Validation)
}

fn validate_patch(patch: &ComplaintPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(AppError::Validation(
            "Update must include status or remark".to_string(),
        ));
    }
    if let Some(remark) = &patch.remark {
        validate_required_text("Remark", remark, MAX_REMARK_LENGTH)
            .map_err(AppError::Validation)?;
    }
    Ok(())
}

fn check_optional(
    field: &str,
    value: &Option<String>,
    max: usize,
) -> std::result::Result<(), String> {
    match value {
        Some(v) => validate_max_length(field, v, max),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use fake::faker::lorem::en::Sentence;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::features::complaints::models::{ComplaintCategory, ComplaintStatus};
    use crate::features::complaints::stores::MemoryComplaintStore;

    fn config() -> StoreConfig {
        StoreConfig {
            timeout: Duration::from_millis(200),
            list_retries: 2,
            retry_backoff: Duration::from_millis(1),
            ..Default::default()
        }
    }

    fn service() -> ComplaintService {
        ComplaintService::new(Arc::new(MemoryComplaintStore::new()), &config())
    }

    fn new_complaint(title: &str, category: ComplaintCategory) -> NewComplaint {
        NewComplaint {
            title: title.to_string(),
            category,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_forces_pending() {
        let service = service();
        let complaint = service
            .create(new_complaint("Pothole", ComplaintCategory::Road), None)
            .await
            .unwrap();

        assert_eq!(complaint.status, ComplaintStatus::Pending);
        assert_eq!(complaint.created_at, complaint.updated_at);
        assert_eq!(service.list(None).await.unwrap(), vec![complaint]);
    }

    #[tokio::test]
    async fn test_ids_unique_across_creates() {
        let service = service();
        let mut ids = HashSet::new();
        for _ in 0..50 {
            let title: String = Sentence(2..6).fake();
            let complaint = service
                .create(
                    NewComplaint {
                        title,
                        citizen_name: Some(Name().fake()),
                        ..Default::default()
                    },
                    None,
                )
                .await
                .unwrap();
            assert!(ids.insert(complaint.id));
        }
        assert_eq!(service.list(None).await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let service = service();
        let result = service
            .create(new_complaint("", ComplaintCategory::Road), None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = service
            .create(new_complaint("   ", ComplaintCategory::Road), None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_half_specified_coordinates() {
        let service = service();
        let result = service
            .create(
                NewComplaint {
                    title: "Pothole".to_string(),
                    latitude: Some(28.6139),
                    ..Default::default()
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_image_url() {
        let service = service();
        let result = service
            .create(
                NewComplaint {
                    title: "Pothole".to_string(),
                    image_url: Some("not a url".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.list(None).await.unwrap().is_empty());

        let created = service
            .create(
                NewComplaint {
                    title: "Pothole".to_string(),
                    image_url: Some("https://cdn.example.com/pothole.jpg".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(
            created.image_url.as_deref(),
            Some("https://cdn.example.com/pothole.jpg")
        );
    }

    #[tokio::test]
    async fn test_update_to_resolved_then_list() {
        let service = service();
        let created = service
            .create(new_complaint("Pothole", ComplaintCategory::Road), None)
            .await
            .unwrap();

        service
            .update(
                created.id,
                ComplaintPatch {
                    status: Some(ComplaintStatus::Resolved),
                    remark: None,
                },
            )
            .await
            .unwrap();

        let all = service.list(None).await.unwrap();
        let matching: Vec<_> = all.iter().filter(|c| c.id == created.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].status, ComplaintStatus::Resolved);
        assert!(matching[0].updated_at > matching[0].created_at);
        assert_eq!(matching[0].created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let service = service();
        service
            .create(new_complaint("Leak", ComplaintCategory::Water), None)
            .await
            .unwrap();
        let before = service.list(None).await.unwrap();

        let result = service
            .update(
                Uuid::now_v7(),
                ComplaintPatch {
                    status: Some(ComplaintStatus::Resolved),
                    remark: Some("Fixed".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(service.list(None).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_allows_any_transition() {
        let service = service();
        let created = service
            .create(new_complaint("Pothole", ComplaintCategory::Road), None)
            .await
            .unwrap();

        for status in [
            ComplaintStatus::Resolved,
            ComplaintStatus::Pending,
            ComplaintStatus::Pending,
            ComplaintStatus::InProgress,
        ] {
            let updated = service
                .update(
                    created.id,
                    ComplaintPatch {
                        status: Some(status),
                        remark: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch_and_blank_remark() {
        let service = service();
        let created = service
            .create(new_complaint("Pothole", ComplaintCategory::Road), None)
            .await
            .unwrap();

        let result = service.update(created.id, ComplaintPatch::default()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = service
            .update(
                created.id,
                ComplaintPatch {
                    status: None,
                    remark: Some("  ".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_end_to_end_lifecycle() {
        let service = service();
        let created = service
            .create(
                NewComplaint {
                    title: "Broken light".to_string(),
                    category: ComplaintCategory::Utilities,
                    citizen_name: Some("Asha".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(created.status, ComplaintStatus::Pending);

        let in_progress = service
            .update(
                created.id,
                ComplaintPatch {
                    status: Some(ComplaintStatus::InProgress),
                    remark: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(in_progress.status, ComplaintStatus::InProgress);
        assert!(in_progress.updated_at > created.updated_at);

        let remarked = service
            .update(
                created.id,
                ComplaintPatch {
                    status: None,
                    remark: Some("Crew dispatched".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(remarked.remark.as_deref(), Some("Crew dispatched"));
        assert_eq!(remarked.status, ComplaintStatus::InProgress);
        assert!(remarked.updated_at > in_progress.updated_at);
    }

    #[tokio::test]
    async fn test_create_with_idempotency_key_is_deduplicated() {
        let service = service();
        let first = service
            .create(
                new_complaint("Broken light", ComplaintCategory::Utilities),
                Some("submit-42".to_string()),
            )
            .await
            .unwrap();
        let second = service
            .create(
                new_complaint("Broken light", ComplaintCategory::Utilities),
                Some("submit-42".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(service.list(None).await.unwrap().len(), 1);
    }

    /// Fails the first `failures` calls of every operation, then delegates
    struct FlakyStore {
        inner: MemoryComplaintStore,
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyStore {
        fn new(failures: u32) -> Self {
            Self {
                inner: MemoryComplaintStore::new(),
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn trip(&self) -> Result<()> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(AppError::StorageUnavailable("connection reset".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ComplaintStore for FlakyStore {
        async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Complaint>> {
            self.trip()?;
            self.inner.list(sort).await
        }

        async fn insert(
            &self,
            id: Uuid,
            data: &NewComplaint,
            idempotency_key: Option<&str>,
        ) -> Result<Complaint> {
            self.trip()?;
            self.inner.insert(id, data, idempotency_key).await
        }

        async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Complaint>> {
            self.trip()?;
            self.inner.find_by_idempotency_key(key).await
        }

        async fn update(&self, id: Uuid, patch: &ComplaintPatch) -> Result<Complaint> {
            self.trip()?;
            self.inner.update(id, patch).await
        }
    }

    /// Never answers
    struct HangingStore;

    #[async_trait]
    impl ComplaintStore for HangingStore {
        async fn list(&self, _sort: Option<SortOrder>) -> Result<Vec<Complaint>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        async fn insert(
            &self,
            _id: Uuid,
            _data: &NewComplaint,
            _idempotency_key: Option<&str>,
        ) -> Result<Complaint> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(AppError::Internal("unreachable".to_string()))
        }

        async fn find_by_idempotency_key(&self, _key: &str) -> Result<Option<Complaint>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }

        async fn update(&self, _id: Uuid, _patch: &ComplaintPatch) -> Result<Complaint> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(AppError::Internal("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_list_retries_transient_failures() {
        let store = Arc::new(FlakyStore::new(2));
        let service = ComplaintService::new(store.clone(), &config());

        assert_ok!(service.list(None).await);
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_list_gives_up_after_retry_budget() {
        let store = Arc::new(FlakyStore::new(10));
        let service = ComplaintService::new(store.clone(), &config());

        let result = service.list(None).await;
        assert!(matches!(result, Err(AppError::StorageUnavailable(_))));
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_create_without_key_is_not_retried() {
        let store = Arc::new(FlakyStore::new(1));
        let service = ComplaintService::new(store.clone(), &config());

        assert_err!(
            service
                .create(new_complaint("Pothole", ComplaintCategory::Road), None)
                .await
        );
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert!(store.inner.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_key_is_retried() {
        let store = Arc::new(FlakyStore::new(1));
        let service = ComplaintService::new(store.clone(), &config());

        assert_ok!(
            service
                .create(
                    new_complaint("Pothole", ComplaintCategory::Road),
                    Some("retry-me".to_string()),
                )
                .await
        );
        assert_eq!(store.inner.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_hanging_store_times_out() {
        let service = ComplaintService::new(
            Arc::new(HangingStore),
            &StoreConfig {
                timeout: Duration::from_millis(20),
                list_retries: 0,
                ..Default::default()
            },
        );

        let result = service.list(None).await;
        assert!(matches!(result, Err(AppError::Timeout(_))));

        let result = service
            .create(new_complaint("Pothole", ComplaintCategory::Road), None)
            .await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }
}

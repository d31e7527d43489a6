use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Complaint status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplaintStatus::Pending => write!(f, "pending"),
            ComplaintStatus::InProgress => write!(f, "in-progress"),
            ComplaintStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// Complaint category enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "complaint_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComplaintCategory {
    #[default]
    Road,
    Water,
    Utilities,
    Health,
    Other,
}

impl std::fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplaintCategory::Road => write!(f, "road"),
            ComplaintCategory::Water => write!(f, "water"),
            ComplaintCategory::Utilities => write!(f, "utilities"),
            ComplaintCategory::Health => write!(f, "health"),
            ComplaintCategory::Other => write!(f, "other"),
        }
    }
}

/// Ordering for complaint listings. Without one, records come back in
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    CreatedAtAsc,
    CreatedAtDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" | "+created_at" => Ok(SortOrder::CreatedAtAsc),
            "-created_at" => Ok(SortOrder::CreatedAtDesc),
            other => Err(format!(
                "Unsupported sort '{}', expected 'created_at' or '-created_at'",
                other
            )),
        }
    }
}

/// Database model for complaint
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Complaint {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: ComplaintCategory,
    pub status: ComplaintStatus,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub citizen_name: Option<String>,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    /// Build a fresh record. Status is always `pending`.
    pub fn new(id: Uuid, data: NewComplaint, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title,
            description: data.description,
            category: data.category,
            status: ComplaintStatus::Pending,
            location: data.location,
            latitude: data.latitude,
            longitude: data.longitude,
            image_url: data.image_url,
            citizen_name: data.citizen_name,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge staff changes into the record and bump `updated_at`
    pub fn apply(&mut self, patch: &ComplaintPatch, now: DateTime<Utc>) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(remark) = &patch.remark {
            self.remark = Some(remark.clone());
        }
        self.updated_at = next_timestamp(self.updated_at, now);
    }
}

/// Returns `now`, or one microsecond past `previous` if the clock has not
/// moved past it. Microseconds match the PostgreSQL timestamp resolution.
pub fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::microseconds(1);
    if now >= floor {
        now
    } else {
        floor
    }
}

/// Data for creating a new complaint
#[derive(Debug, Clone, Default)]
pub struct NewComplaint {
    pub title: String,
    pub description: Option<String>,
    pub category: ComplaintCategory,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub citizen_name: Option<String>,
}

/// Staff-side changes to an existing complaint
#[derive(Debug, Clone, Default)]
pub struct ComplaintPatch {
    pub status: Option<ComplaintStatus>,
    pub remark: Option<String>,
}

impl ComplaintPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.remark.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ComplaintStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let parsed: ComplaintStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(parsed, ComplaintStatus::Resolved);
        assert!(serde_json::from_str::<ComplaintStatus>("\"closed\"").is_err());
        assert!(serde_json::from_str::<ComplaintStatus>("\"in_progress\"").is_err());
    }

    #[test]
    fn test_category_default_is_road() {
        assert_eq!(ComplaintCategory::default(), ComplaintCategory::Road);
        assert!(serde_json::from_str::<ComplaintCategory>("\"electricity\"").is_err());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(
            "-created_at".parse::<SortOrder>(),
            Ok(SortOrder::CreatedAtDesc)
        );
        assert_eq!("created_at".parse::<SortOrder>(), Ok(SortOrder::CreatedAtAsc));
        assert!("-title".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_new_complaint_is_pending() {
        let now = Utc::now();
        let complaint = Complaint::new(
            Uuid::now_v7(),
            NewComplaint {
                title: "Pothole".to_string(),
                ..Default::default()
            },
            now,
        );
        assert_eq!(complaint.status, ComplaintStatus::Pending);
        assert_eq!(complaint.created_at, complaint.updated_at);
        assert_eq!(complaint.remark, None);
    }

    #[test]
    fn test_apply_always_advances_updated_at() {
        let now = Utc::now();
        let mut complaint = Complaint::new(Uuid::now_v7(), NewComplaint::default(), now);

        // Same wall-clock instant as creation
        complaint.apply(
            &ComplaintPatch {
                status: Some(ComplaintStatus::Resolved),
                remark: None,
            },
            now,
        );
        assert_eq!(complaint.status, ComplaintStatus::Resolved);
        assert!(complaint.updated_at > complaint.created_at);
        assert_eq!(complaint.created_at, now);
    }

    #[test]
    fn test_apply_remark_keeps_status() {
        let now = Utc::now();
        let mut complaint = Complaint::new(Uuid::now_v7(), NewComplaint::default(), now);
        complaint.status = ComplaintStatus::InProgress;

        complaint.apply(
            &ComplaintPatch {
                status: None,
                remark: Some("Crew dispatched".to_string()),
            },
            now + Duration::seconds(5),
        );
        assert_eq!(complaint.status, ComplaintStatus::InProgress);
        assert_eq!(complaint.remark.as_deref(), Some("Crew dispatched"));
        assert_eq!(complaint.updated_at, now + Duration::seconds(5));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::complaints::models::{
    Complaint, ComplaintCategory, ComplaintPatch, ComplaintStatus, NewComplaint,
};

/// Request DTO for filing a complaint
///
/// Any `status` sent by the client is ignored; new complaints always start
/// as `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateComplaintDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    /// Defaults to `road`
    #[serde(default)]
    pub category: ComplaintCategory,

    /// Free-form address or description of the place
    #[validate(length(max = 500, message = "Location must not exceed 500 characters"))]
    pub location: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within [-90, 90]"))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be within [-180, 180]"
    ))]
    pub longitude: Option<f64>,

    /// Hosted URL of the photo evidence
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(length(max = 255, message = "Citizen name must not exceed 255 characters"))]
    pub citizen_name: Option<String>,
}

impl From<CreateComplaintDto> for NewComplaint {
    fn from(dto: CreateComplaintDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description,
            category: dto.category,
            location: dto.location,
            latitude: dto.latitude,
            longitude: dto.longitude,
            image_url: dto.image_url,
            citizen_name: dto.citizen_name,
        }
    }
}

/// Request DTO for staff updates
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateComplaintDto {
    pub status: Option<ComplaintStatus>,

    #[validate(length(min = 1, max = 2000, message = "Remark must be 1-2000 characters"))]
    pub remark: Option<String>,
}

impl From<UpdateComplaintDto> for ComplaintPatch {
    fn from(dto: UpdateComplaintDto) -> Self {
        Self {
            status: dto.status,
            remark: dto.remark.map(|r| r.trim().to_string()),
        }
    }
}

/// Response DTO for complaint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponseDto {
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

impl From<Complaint> for ComplaintResponseDto {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            category: c.category,
            status: c.status,
            location: c.location,
            latitude: c.latitude,
            longitude: c.longitude,
            image_url: c.image_url,
            citizen_name: c.citizen_name,
            remark: c.remark,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Query parameters for listing complaints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintListQuery {
    /// `-created_at` (newest first) or `created_at`
    pub sort: Option<String>,
    /// Only complaints in this status
    pub status: Option<ComplaintStatus>,
    /// Only complaints in this category
    pub category: Option<ComplaintCategory>,
    /// Case-insensitive substring of the location text
    pub location: Option<String>,
}

/// Per-status complaint counts for dashboard stat cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintSummaryDto {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::complaints::dtos::{
    ComplaintListQuery, ComplaintResponseDto, ComplaintSummaryDto, CreateComplaintDto,
    UpdateComplaintDto,
};
use crate::features::complaints::models::SortOrder;
use crate::features::complaints::services::{summarize, ComplaintFilter, ComplaintService};
use crate::shared::constants::IDEMPOTENCY_KEY_HEADER;
use crate::shared::types::{ApiResponse, Meta};

/// List complaints
///
/// Returns every complaint, optionally ordered newest first and narrowed by
/// status, category, or a location substring.
#[utoipa::path(
    get,
    path = "/api/complaints",
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "List of complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 400, description = "Invalid sort or filter value"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "complaints"
)]
pub async fn list_complaints(
    State(service): State<Arc<ComplaintService>>,
    AppQuery(query): AppQuery<ComplaintListQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<SortOrder>)
        .transpose()
        .map_err(AppError::Validation)?;

    let filter = ComplaintFilter {
        status: query.status,
        category: query.category,
        location: query.location,
    };

    let complaints = filter.apply(service.list(sort).await?);
    let total = complaints.len() as i64;
    let dtos: Vec<ComplaintResponseDto> = complaints.into_iter().map(|c| c.into()).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Per-status complaint counts
#[utoipa::path(
    get,
    path = "/api/complaints/summary",
    responses(
        (status = 200, description = "Complaint counts", body = ApiResponse<ComplaintSummaryDto>),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "complaints"
)]
pub async fn get_summary(
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<ComplaintSummaryDto>>> {
    let complaints = service.list(None).await?;
    Ok(Json(ApiResponse::success(
        Some(summarize(&complaints)),
        None,
        None,
    )))
}

/// File a new complaint
///
/// Send an `Idempotency-Key` header to make resubmission safe: repeated
/// requests with the same key return the originally created complaint.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintDto,
    params(
        ("Idempotency-Key" = Option<String>, Header, description = "Client-generated key for safe resubmission")
    ),
    responses(
        (status = 201, description = "Complaint filed", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "complaints"
)]
pub async fn create_complaint(
    State(service): State<Arc<ComplaintService>>,
    headers: HeaderMap,
    AppJson(dto): AppJson<CreateComplaintDto>,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let idempotency_key = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .map(|v| {
            v.to_str()
                .map(str::to_string)
                .map_err(|_| AppError::Validation("Idempotency-Key must be ASCII".to_string()))
        })
        .transpose()?;

    let complaint = service.create(dto.into(), idempotency_key).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(complaint.into()),
            Some("Complaint filed successfully".to_string()),
            None,
        )),
    ))
}

/// Update complaint status or remark (staff)
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    request_body = UpdateComplaintDto,
    responses(
        (status = 200, description = "Complaint updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Invalid status or empty update"),
        (status = 401, description = "Missing or invalid staff token"),
        (status = 404, description = "Complaint not found")
    ),
    security(("staff_token" = [])),
    tag = "complaints"
)]
pub async fn update_complaint(
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateComplaintDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    // An id that is not a UUID cannot name any stored complaint
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFound(format!("Complaint {} not found", id)))?;

    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let complaint = service.update(id, dto.into()).await?;
    Ok(Json(ApiResponse::success(Some(complaint.into()), None, None)))
}

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::geocoding::dtos::{GeocodeQuery, GeocodeResultDto};
use crate::features::geocoding::services::GeocodingService;
use crate::shared::types::ApiResponse;

/// Search for a place by name
///
/// `data` is null when the geocoder has no match.
#[utoipa::path(
    get,
    path = "/api/geocoding/search",
    params(GeocodeQuery),
    responses(
        (status = 200, description = "Best match, if any", body = ApiResponse<GeocodeResultDto>),
        (status = 400, description = "Empty query"),
        (status = 502, description = "Geocoder unreachable")
    ),
    tag = "geocoding"
)]
pub async fn search_location(
    State(service): State<Arc<GeocodingService>>,
    AppQuery(query): AppQuery<GeocodeQuery>,
) -> Result<Json<ApiResponse<GeocodeResultDto>>> {
    let result = service.search(&query.q).await?;
    let message = result
        .is_none()
        .then(|| "Location not found".to_string());
    Ok(Json(ApiResponse::success(result, message, None)))
}

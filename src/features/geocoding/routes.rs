use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::geocoding::handlers;
use crate::features::geocoding::services::GeocodingService;

/// Create routes for the geocoding feature (public)
pub fn routes(service: Arc<GeocodingService>) -> Router {
    Router::new()
        .route("/api/geocoding/search", get(handlers::search_location))
        .with_state(service)
}

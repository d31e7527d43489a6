use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch},
    Router,
};

use crate::core::config::StaffConfig;
use crate::core::middleware::staff_auth_middleware;
use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;

/// Create routes for the complaints feature
///
/// Listing and filing are public. The update route is guarded by the staff
/// token when one is configured.
pub fn routes(service: Arc<ComplaintService>, staff: Arc<StaffConfig>) -> Router {
    let staff_routes = Router::new()
        .route("/api/complaints/{id}", patch(handlers::update_complaint))
        .route_layer(from_fn_with_state(staff, staff_auth_middleware))
        .with_state(Arc::clone(&service));

    Router::new()
        .route(
            "/api/complaints",
            get(handlers::list_complaints).post(handlers::create_complaint),
        )
        .route("/api/complaints/summary", get(handlers::get_summary))
        .with_state(service)
        .merge(staff_routes)
}

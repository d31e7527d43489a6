use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::complaints::{
    dtos as complaints_dtos, handlers as complaints_handlers, models as complaints_models,
};
use crate::features::geocoding::{dtos as geocoding_dtos, handlers as geocoding_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Complaints
        complaints_handlers::list_complaints,
        complaints_handlers::get_summary,
        complaints_handlers::create_complaint,
        complaints_handlers::update_complaint,
        // Geocoding
        geocoding_handlers::search_location,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Complaints
            complaints_models::ComplaintStatus,
            complaints_models::ComplaintCategory,
            complaints_dtos::CreateComplaintDto,
            complaints_dtos::UpdateComplaintDto,
            complaints_dtos::ComplaintResponseDto,
            complaints_dtos::ComplaintSummaryDto,
            ApiResponse<complaints_dtos::ComplaintResponseDto>,
            ApiResponse<Vec<complaints_dtos::ComplaintResponseDto>>,
            ApiResponse<complaints_dtos::ComplaintSummaryDto>,
            // Geocoding
            geocoding_dtos::GeocodeResultDto,
            ApiResponse<geocoding_dtos::GeocodeResultDto>,
        )
    ),
    tags(
        (name = "complaints", description = "Civic complaints filed by citizens and triaged by staff"),
        (name = "geocoding", description = "Place search for complaint locations"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Civic Complaints API",
        version = "0.1.0",
        description = "API documentation for civic complaint reporting",
    )
)]
pub struct ApiDoc;

/// Adds the staff bearer token scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "staff_token",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

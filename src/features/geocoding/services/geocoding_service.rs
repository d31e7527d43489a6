use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::geocoding::dtos::GeocodeResultDto;

/// Nominatim search hit. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct NominatimResponse {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

impl NominatimResponse {
    /// `None` when the coordinates do not parse as numbers
    pub fn into_result(self) -> Option<GeocodeResultDto> {
        let lat = self.lat.trim().parse().ok()?;
        let lon = self.lon.trim().parse().ok()?;
        Some(GeocodeResultDto {
            lat,
            lon,
            display_name: self.display_name,
        })
    }
}

/// Client for a Nominatim-compatible geocoding service
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Best match for a free-text place query
    pub async fn search(&self, query: &str) -> Result<Option<GeocodeResultDto>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation(
                "Search query must not be empty".to_string(),
            ));
        }

        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        tracing::debug!("Geocoding: {} -> {}", query, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Geocoding request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Geocoding request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Geocoder returned status: {}", response.status());
            return Ok(None);
        }

        let results: Vec<NominatimResponse> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse geocoder response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse geocoder response: {}", e))
        })?;

        Ok(results
            .into_iter()
            .next()
            .and_then(NominatimResponse::into_result))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    /// Serves a fake `/search` endpoint on a random local port
    async fn spawn_geocoder() -> String {
        async fn search(Query(params): Query<std::collections::HashMap<String, String>>) -> Json<Value> {
            match params.get("q").map(String::as_str) {
                Some("New Delhi") => Json(json!([{
                    "place_id": 1,
                    "lat": "28.6138954",
                    "lon": "77.2090057",
                    "display_name": "New Delhi, Delhi, India"
                }])),
                _ => Json(json!([])),
            }
        }

        let app = Router::new()
            .route("/search", get(search))
            .route("/broken/search", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn service(base_url: String) -> GeocodingService {
        GeocodingService::new(&GeocodingConfig {
            base_url,
            user_agent: "civic-complaints-test".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_nominatim_response_into_result() {
        let hit = NominatimResponse {
            lat: "12.9716".to_string(),
            lon: "77.5946".to_string(),
            display_name: "Bangalore".to_string(),
        };
        assert_eq!(
            hit.into_result(),
            Some(GeocodeResultDto {
                lat: 12.9716,
                lon: 77.5946,
                display_name: "Bangalore".to_string(),
            })
        );

        let garbled = NominatimResponse {
            lat: "north".to_string(),
            lon: "77.5946".to_string(),
            display_name: "Bangalore".to_string(),
        };
        assert_eq!(garbled.into_result(), None);
    }

    #[tokio::test]
    async fn test_search_found_and_missing() {
        let service = service(spawn_geocoder().await);

        let hit = service.search("New Delhi").await.unwrap().unwrap();
        assert_eq!(hit.display_name, "New Delhi, Delhi, India");
        assert!((hit.lat - 28.6138954).abs() < 1e-9);

        assert_eq!(service.search("Atlantis").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_upstream_error_status_is_no_match() {
        let base = spawn_geocoder().await;
        let service = service(format!("{}/broken", base));
        assert_eq!(service.search("New Delhi").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let service = service("http://127.0.0.1:9".to_string());
        let result = service.search("   ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

use validator::ValidateUrl;

/// Checks a latitude/longitude pair.
///
/// Both must be present or both absent, finite, and inside
/// lat ∈ [-90, 90], lon ∈ [-180, 180].
pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), String> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(_), None) | (None, Some(_)) => Err(
            "latitude and longitude must be provided together".to_string(),
        ),
        (Some(lat), Some(lon)) => {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err(format!("latitude {} is out of range [-90, 90]", lat));
            }
            if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                return Err(format!("longitude {} is out of range [-180, 180]", lon));
            }
            Ok(())
        }
    }
}

/// Rejects empty or whitespace-only text and text over `max` characters
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    validate_max_length(field, value, max)
}

pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{} must not exceed {} characters", field, max));
    }
    Ok(())
}

/// Rejects values that do not parse as an absolute URL
pub fn validate_url(field: &str, value: &str) -> Result<(), String> {
    if !value.validate_url() {
        return Err(format!("{} must be a valid URL", field));
    }
    Ok(())
}

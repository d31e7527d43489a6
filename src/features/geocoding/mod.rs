//! Place-name search against an external Nominatim-compatible geocoder.
//!
//! The filing form uses this to turn a typed address into coordinates.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/geocoding/search?q=` | No | Best match for a free-text place query |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::GeocodingService;

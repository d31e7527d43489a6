mod geocoding_dto;

pub use geocoding_dto::{GeocodeQuery, GeocodeResultDto};

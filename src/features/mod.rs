pub mod complaints;
pub mod geocoding;

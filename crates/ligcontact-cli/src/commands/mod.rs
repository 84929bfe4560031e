pub mod analyze;
pub mod params;

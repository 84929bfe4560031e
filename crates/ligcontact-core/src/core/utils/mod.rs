pub mod geometry;
pub mod rings;

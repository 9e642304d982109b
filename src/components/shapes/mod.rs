pub mod curve;
pub mod points;

pub mod casteljau;
pub mod geometry;

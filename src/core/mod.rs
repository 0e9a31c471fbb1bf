//! Runtime configuration: which model file to load and where to find it.
pub mod params;

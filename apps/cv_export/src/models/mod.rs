pub mod overlay;
pub mod resume;

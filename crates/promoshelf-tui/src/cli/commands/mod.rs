pub mod cache;
pub mod render;
pub mod saved;

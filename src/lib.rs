pub mod config;
pub mod graphics;
pub mod model;

pub use model::*;

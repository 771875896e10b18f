// src/math/mod.rs
pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;
pub mod voronoi;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

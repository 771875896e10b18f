// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Geometric calculation failed: {operation}")]
    GeometricFailure { operation: String },

    #[error("Voronoi cell for generator {index} is degenerate")]
    DegenerateCell { index: usize },

    #[error("No closed region found at level {level}")]
    NoRegionAtLevel { level: f64 },
}

pub type MathResult<T> = Result<T, MathError>;

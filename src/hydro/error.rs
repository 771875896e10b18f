// src/hydro/error.rs
use crate::math::MathError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HydroError {
    #[error("Proximity threshold must be a positive number, got {value}")]
    InvalidThreshold { value: f64 },

    #[error("Distance tolerance must be a positive number, got {value}")]
    InvalidTolerance { value: f64 },

    #[error("No valid flow paths provided")]
    NoValidFlowPaths,

    #[error("Start volume must not be negative, got {value}")]
    InvalidStartVolume { value: f64 },

    #[error("Invalid channel parameter: {message}")]
    InvalidChannel { message: String },

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type HydroResult<T> = Result<T, HydroError>;

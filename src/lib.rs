// src/lib.rs

pub mod debug;
pub mod hydro;
pub mod math;

pub use hydro::{
    Catchment, CatchmentAnalysis, CatchmentConfig, CatchmentSolution, Diagnostic, FlowPath,
    HydroError, HydroResult, Severity,
};

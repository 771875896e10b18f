// src/hydro/mod.rs

pub mod catchment;
pub mod channel;
pub mod error;
pub mod flow_path;
pub mod report;
pub mod saturation;

pub use catchment::{Catchment, CatchmentAnalysis, CatchmentConfig, CatchmentSolution};
pub use error::{HydroError, HydroResult};
pub use flow_path::FlowPath;
pub use report::{Diagnostic, Severity};

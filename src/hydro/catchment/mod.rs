// src/hydro/catchment/mod.rs

pub mod assembler;
pub mod boundary;
pub mod config;
pub mod grouping;
pub mod pipeline;

pub use assembler::{Catchment, GroupColor};
pub use boundary::merge_group_boundary;
pub use config::{CatchmentConfig, estimate_proximity_threshold};
pub use grouping::{assign_groups, group_members};
pub use pipeline::{CatchmentAnalysis, CatchmentSolution};

// src/hydro/channel/mod.rs

pub mod info;
pub mod region;

pub use info::{ChannelInfo, analyze_section};
pub use region::{ChannelRegionSolver, RegionSolution};

// src/debug/mod.rs

pub mod svg;

pub use svg::{SvgOptions, render_catchment_svg};

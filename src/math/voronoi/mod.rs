// src/math/voronoi/mod.rs
pub mod solver;

pub use solver::{BruteForceSolver, CellSolver, bounding_outline};

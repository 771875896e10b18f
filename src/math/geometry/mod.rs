// src/math/geometry/mod.rs

// Deklaration der Geometriemodule
pub mod clipping;
pub mod join;
pub mod polygon;
pub mod polyline;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen
pub use self::clipping::HalfPlaneClipper;
pub use self::join::{JoinDiagnostics, join_segments};
pub use self::polygon::Polygon;
pub use self::polyline::{Polyline, Segment};

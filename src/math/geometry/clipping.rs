// src/math/geometry/clipping.rs

use crate::math::{error::*, types::*, utils::constants};

/// Schneidet konvexe Vertex-Ringe gegen Halbebenen (Sutherland-Hodgman).
///
/// Der Clipper arbeitet auf offenen Ringen (ohne schließendes Duplikat);
/// das Ergebnis ist wieder ein offener Ring und kann leer sein, wenn der
/// gesamte Ring außerhalb der Halbebene liegt.
#[derive(Debug, Clone, Copy)]
pub struct HalfPlaneClipper {
    tolerance: f64,
}

impl Default for HalfPlaneClipper {
    fn default() -> Self {
        Self {
            tolerance: constants::EPSILON,
        }
    }
}

impl HalfPlaneClipper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: setzt die Toleranz für Innen-Tests und Schnittpunkte
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Schneidet `ring` auf die Seite der Mittelsenkrechten, die `keep`
    /// enthält. `keep` und `other` sind die beiden Erzeugerpunkte.
    pub fn clip_by_bisector(
        &self,
        ring: &[Point2D],
        keep: Point2D,
        other: Point2D,
    ) -> MathResult<Vec<Point2D>> {
        let direction = other - keep;
        if direction.norm() < self.tolerance {
            return Err(MathError::GeometricFailure {
                operation: format!(
                    "perpendicular bisector of coincident points at ({:.6}, {:.6})",
                    keep.x, keep.y
                ),
            });
        }
        let mid = nalgebra::center(&keep, &other);

        let mut output: Vec<Point2D> = Vec::with_capacity(ring.len() + 1);
        if ring.is_empty() {
            return Ok(output);
        }

        // Klassische Sutherland-Hodgman-Schleife mit nachlaufendem Vertex s
        let mut s = ring[ring.len() - 1];
        for &e in ring {
            let e_inside = self.is_inside(e, mid, direction);
            let s_inside = self.is_inside(s, mid, direction);

            if e_inside {
                if !s_inside {
                    if let Some(hit) = self.bisector_intersection(s, e, mid, direction) {
                        output.push(hit);
                    }
                }
                output.push(e);
            } else if s_inside {
                if let Some(hit) = self.bisector_intersection(s, e, mid, direction) {
                    output.push(hit);
                }
            }

            s = e;
        }

        Ok(output)
    }

    /// Innen heißt: näher an `keep` als an `other`, mit Toleranzband
    fn is_inside(&self, point: Point2D, mid: Point2D, direction: Vector2D) -> bool {
        let signed = (point - mid).dot(&direction);
        signed <= self.tolerance * direction.norm()
    }

    /// Schnittpunkt der Strecke (s, e) mit der Mittelsenkrechten
    fn bisector_intersection(
        &self,
        s: Point2D,
        e: Point2D,
        mid: Point2D,
        direction: Vector2D,
    ) -> Option<Point2D> {
        let denominator = (e - s).dot(&direction);
        if denominator.abs() < constants::EPSILON_SQUARED {
            return None; // Strecke verläuft parallel zur Mittelsenkrechten
        }

        let t = (mid - s).dot(&direction) / denominator;
        Some(s + (e - s) * t)
    }
}

// src/math/voronoi/solver.rs

use crate::math::{
    error::*,
    geometry::{HalfPlaneClipper, Polygon},
    types::*,
    utils::constants,
};
use std::collections::HashSet;

/// Schnittstelle für begrenzte Voronoi-Löser.
///
/// Ein Löser liefert genau eine geschlossene Zelle pro Erzeugerpunkt,
/// in der Reihenfolge der Eingabepunkte. Aufrufer dürfen sich auf diese
/// Ordnung verlassen und Zelle i dem Punkt i zuordnen.
pub trait CellSolver {
    fn solve(&self, points: &[Point2D], outline: &Polygon) -> MathResult<Vec<Polygon>>;
}

/// Brute-Force-Löser: schneidet die Umrandung für jeden Erzeuger gegen
/// die Mittelsenkrechte zu jedem anderen Erzeuger.
///
/// Quadratisch in der Punktzahl, dafür ohne Triangulierung und für die
/// hier üblichen Punktmengen völlig ausreichend.
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    clipper: HalfPlaneClipper,
    tolerance: f64,
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BruteForceSolver {
    pub fn new() -> Self {
        Self {
            clipper: HalfPlaneClipper::new(),
            tolerance: constants::EPSILON,
        }
    }

    /// Builder: Toleranz für Schnitt- und Aufräumoperationen
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self.clipper = HalfPlaneClipper::new().with_tolerance(tolerance);
        self
    }
}

impl CellSolver for BruteForceSolver {
    fn solve(&self, points: &[Point2D], outline: &Polygon) -> MathResult<Vec<Polygon>> {
        if points.len() < 2 {
            return Err(MathError::InsufficientPoints {
                expected: 2,
                actual: points.len(),
            });
        }

        // Zusammenfallende Erzeuger früh abfangen, bevor Geometriearbeit anfällt
        let mut seen = HashSet::with_capacity(points.len());
        for point in points {
            if !seen.insert(point_key(*point)) {
                return Err(MathError::GeometricFailure {
                    operation: format!(
                        "Voronoi diagram of coincident generators at ({:.6}, {:.6})",
                        point.x, point.y
                    ),
                });
            }
        }

        let base_ring = outline.ring().to_vec();
        let mut cells = Vec::with_capacity(points.len());

        for (index, &generator) in points.iter().enumerate() {
            let mut ring = base_ring.clone();
            for (other_index, &other) in points.iter().enumerate() {
                if other_index == index {
                    continue;
                }
                ring = self.clipper.clip_by_bisector(&ring, generator, other)?;
                if ring.is_empty() {
                    break;
                }
            }

            let ring = cleanup_ring(ring, self.tolerance);
            if ring.len() < 3 {
                return Err(MathError::DegenerateCell { index });
            }
            cells.push(Polygon::closed(ring)?);
        }

        Ok(cells)
    }
}

/// Baut die Umrandung als Viereck aus den Extremkoordinaten der Punkte.
///
/// Eckpunktreihenfolge: (max_x, max_y), (max_x, min_y), (min_x, min_y),
/// (min_x, max_y). Alle Punkte liegen auf oder in dieser Umrandung.
pub fn bounding_outline(points: &[Point2D]) -> MathResult<Polygon> {
    let bounds = Bounds2D::from_points_iter(points.iter().copied()).ok_or(
        MathError::InsufficientPoints {
            expected: 2,
            actual: 0,
        },
    )?;

    if bounds.width() < constants::EPSILON || bounds.height() < constants::EPSILON {
        return Err(MathError::GeometricFailure {
            operation: "bounding outline with zero area (generators collinear on an axis)"
                .to_string(),
        });
    }

    Polygon::closed(vec![
        Point2D::new(bounds.max.x, bounds.max.y),
        Point2D::new(bounds.max.x, bounds.min.y),
        Point2D::new(bounds.min.x, bounds.min.y),
        Point2D::new(bounds.min.x, bounds.max.y),
    ])
}

/// Entfernt aufeinanderfolgende (nahezu) identische Vertices aus einem Ring
fn cleanup_ring(ring: Vec<Point2D>, tolerance: f64) -> Vec<Point2D> {
    let mut cleaned: Vec<Point2D> = Vec::with_capacity(ring.len());
    for point in ring {
        if let Some(&last) = cleaned.last() {
            if points_coincident(last, point, tolerance) {
                continue;
            }
        }
        cleaned.push(point);
    }

    // Auch das Paar aus letztem und erstem Vertex kollabieren
    while cleaned.len() > 1 {
        let first = cleaned[0];
        let last = cleaned[cleaned.len() - 1];
        if points_coincident(first, last, tolerance) {
            cleaned.pop();
        } else {
            break;
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_outline_corner_order() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 1.0),
            Point2D::new(1.0, 0.5),
        ];
        let outline = bounding_outline(&points).unwrap();

        let ring = outline.ring();
        assert_eq!(ring[0], Point2D::new(2.0, 1.0));
        assert_eq!(ring[1], Point2D::new(2.0, 0.0));
        assert_eq!(ring[2], Point2D::new(0.0, 0.0));
        assert_eq!(ring[3], Point2D::new(0.0, 1.0));
    }

    #[test]
    fn test_outline_rejects_axis_collinear_points() {
        let points = vec![
            Point2D::new(0.0, 1.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 1.0),
        ];
        assert!(matches!(
            bounding_outline(&points),
            Err(MathError::GeometricFailure { .. })
        ));
    }

    #[test]
    fn test_two_generators_split_the_outline() {
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(2.0, 1.0)];
        let outline = bounding_outline(&points).unwrap();
        let solver = BruteForceSolver::new();

        let cells = solver.solve(&points, &outline).unwrap();
        assert_eq!(cells.len(), 2);

        let total: f64 = cells.iter().map(|c| c.area()).sum();
        assert_relative_eq!(total, outline.area(), epsilon = 1e-9);

        // Zelle i gehört zum Erzeuger i
        for (cell, &generator) in cells.iter().zip(points.iter()) {
            let centroid = cell.centroid().unwrap();
            let own = (centroid - generator).norm();
            for &other in &points {
                assert!(own <= (centroid - other).norm() + 1e-9);
            }
        }
    }

    #[test]
    fn test_four_corner_generators_give_quarter_cells() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ];
        let outline = bounding_outline(&points).unwrap();
        let solver = BruteForceSolver::new();

        let cells = solver.solve(&points, &outline).unwrap();
        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert_relative_eq!(cell.area(), 0.25, epsilon = 1e-9);
            assert!(cell.is_closed());
        }
    }

    #[test]
    fn test_single_generator_is_rejected() {
        let points = vec![Point2D::new(0.0, 0.0)];
        let outline = Polygon::closed(vec![
            Point2D::new(-1.0, -1.0),
            Point2D::new(1.0, -1.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(-1.0, 1.0),
        ])
        .unwrap();

        let result = BruteForceSolver::new().solve(&points, &outline);
        assert!(matches!(
            result,
            Err(MathError::InsufficientPoints { expected: 2, .. })
        ));
    }

    #[test]
    fn test_coincident_generators_are_rejected() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 0.0),
        ];
        let outline = bounding_outline(&points).unwrap();

        let result = BruteForceSolver::new().solve(&points, &outline);
        assert!(matches!(
            result,
            Err(MathError::GeometricFailure { .. })
        ));
    }

    #[test]
    fn test_interior_generator_cell_contains_it() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.5),
            Point2D::new(2.0, 3.0),
            Point2D::new(2.0, 1.0),
        ];
        let outline = bounding_outline(&points).unwrap();
        let cells = BruteForceSolver::new().solve(&points, &outline).unwrap();

        // Der innere Erzeuger liegt strikt in seiner Zelle
        assert!(cells[3].contains_point(points[3]));
    }
}

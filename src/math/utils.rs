// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    /// Strikte Gleichheits-Toleranz für f64-Vergleiche
    pub const EPSILON: f64 = 1e-9;
    pub const EPSILON_SQUARED: f64 = EPSILON * EPSILON;
    /// Skalierungsfaktor für quantisierte Punkt-Schlüssel
    pub const KEY_QUANTIZATION: f64 = 1e6;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob zwei Floats mit custom Toleranz gleich sind
    pub fn nearly_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f64) -> bool {
        a.abs() < EPSILON
    }
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use crate::math::types::{Point2D, Vector2D};

    /// Berechnet den quadrierten Abstand zwischen zwei Punkten
    pub fn distance_sq(p1: Point2D, p2: Point2D) -> f64 {
        (p2 - p1).norm_squared()
    }

    pub fn distance(p1: Point2D, p2: Point2D) -> f64 {
        (p2 - p1).norm()
    }

    /// Berechnet das Skalarprodukt zweier 2D-Vektoren
    pub fn dot_product(a: Vector2D, b: Vector2D) -> f64 {
        a.x * b.x + a.y * b.y
    }

    /// Berechnet das Kreuzprodukt zweier 2D-Vektoren (Skalar)
    pub fn cross_product_2d(a: Vector2D, b: Vector2D) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Berechnet den Mittelpunkt zweier Punkte
    pub fn mid_point(p1: Point2D, p2: Point2D) -> Point2D {
        nalgebra::center(&p1, &p2)
    }

    /// Prüft ob ein Punkt in einem Dreieck liegt (Barycentric coordinates)
    pub fn point_in_triangle(point: Point2D, a: Point2D, b: Point2D, c: Point2D) -> bool {
        use super::constants::EPSILON;

        let v0 = c - a;
        let v1 = b - a;
        let v2 = point - a;

        let dot00 = dot_product(v0, v0);
        let dot01 = dot_product(v0, v1);
        let dot02 = dot_product(v0, v2);
        let dot11 = dot_product(v1, v1);
        let dot12 = dot_product(v1, v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom.abs() < EPSILON {
            return false; // Entartetes Dreieck
        }
        let inv_denom = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
        let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

        u >= -EPSILON && v >= -EPSILON && u + v <= 1.0 + EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::Point2D;

    #[test]
    fn test_nearly_equal() {
        assert!(comparison::nearly_equal(1.0, 1.0 + 1e-12));
        assert!(!comparison::nearly_equal(1.0, 1.0 + 1e-6));
        assert!(comparison::nearly_equal_eps(1.0, 1.05, 0.1));
    }

    #[test]
    fn test_point_in_triangle() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(4.0, 0.0);
        let c = Point2D::new(0.0, 4.0);

        assert!(simple_geometry::point_in_triangle(
            Point2D::new(1.0, 1.0),
            a,
            b,
            c
        ));
        // Eckpunkt zählt als innen
        assert!(simple_geometry::point_in_triangle(a, a, b, c));
        assert!(!simple_geometry::point_in_triangle(
            Point2D::new(3.0, 3.0),
            a,
            b,
            c
        ));
    }

    #[test]
    fn test_distance() {
        let d = simple_geometry::distance(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0));
        assert!(comparison::nearly_equal(d, 5.0));
    }
}

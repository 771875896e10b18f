// src/math/geometry/polygon.rs

use super::polyline::Segment;
use crate::math::{error::*, types::*};
use geo::{Area, Centroid, Contains};
use std::fmt;

/// Geschlossene Fläche, z.B. eine Voronoi-Zelle oder ein Einzugsgebiet.
///
/// Bei geschlossenen Polygonen wird der erste Vertex am Ende wiederholt,
/// so dass `segments` auch die schließende Kante liefert.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    is_closed: bool,
}

impl Polygon {
    /// Erstellt ein neues Polygon aus Vertices
    pub fn new(vertices: Vec<Point2D>) -> MathResult<Self> {
        Self::from_vertices(vertices, false)
    }

    /// Erstellt ein geschlossenes Polygon
    pub fn closed(vertices: Vec<Point2D>) -> MathResult<Self> {
        Self::from_vertices(vertices, true)
    }

    /// Erstellt Polygon mit Validierung
    fn from_vertices(mut vertices: Vec<Point2D>, force_closed: bool) -> MathResult<Self> {
        if vertices.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }

        // Automatisch schließen wenn erwünscht und nicht bereits geschlossen
        let is_closed = if force_closed {
            if vertices.first() != vertices.last() {
                vertices.push(vertices[0]);
            }
            true
        } else {
            vertices.first() == vertices.last()
        };

        Ok(Self {
            vertices,
            is_closed,
        })
    }

    /// Zugriff auf Vertices (inklusive schließendem Duplikat)
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Vertex-Ring ohne schließendes Duplikat
    pub fn ring(&self) -> &[Point2D] {
        if self.is_closed && self.vertices.first() == self.vertices.last() {
            &self.vertices[..self.vertices.len() - 1]
        } else {
            &self.vertices
        }
    }

    /// Anzahl der Vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Ist das Polygon geschlossen?
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Polygon schließen
    pub fn close(&mut self) {
        if !self.is_closed && !self.vertices.is_empty() {
            if self.vertices.first() != self.vertices.last() {
                self.vertices.push(self.vertices[0]);
            }
            self.is_closed = true;
        }
    }

    /// Iteriert über die Kanten des Polygons
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.vertices.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Umfang (Summe aller Kantenlängen)
    pub fn perimeter(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Bounding Box des Polygons
    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.vertices.iter().copied())
    }

    /// Fläche des Polygons (immer positiv)
    pub fn area(&self) -> f64 {
        self.to_geo().unsigned_area()
    }

    /// Vorzeichenbehaftete Fläche (positiv bei Gegenuhrzeigersinn)
    pub fn signed_area(&self) -> f64 {
        self.to_geo().signed_area()
    }

    /// Flächenschwerpunkt
    pub fn centroid(&self) -> Option<Point2D> {
        self.to_geo()
            .centroid()
            .map(|c| Point2D::new(c.x(), c.y()))
    }

    /// Prüft ob ein Punkt strikt innerhalb des Polygons liegt
    pub fn contains_point(&self, point: Point2D) -> bool {
        self.to_geo().contains(&geo::Point::new(point.x, point.y))
    }

    /// Konvertiert in den geo-Polygontyp für Flächenmaße
    fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: Vec<(f64, f64)> = self.vertices.iter().map(|p| (p.x, p.y)).collect();
        geo::Polygon::new(geo::LineString::from(exterior), vec![])
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} vertices", self.vertices.len())?;
        if self.is_closed {
            write!(f, ", closed")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_closed_appends_duplicate() {
        let square = unit_square();
        assert!(square.is_closed());
        assert_eq!(square.len(), 5);
        assert_eq!(square.ring().len(), 4);
        assert_eq!(square.segments().count(), 4);
    }

    #[test]
    fn test_too_few_vertices() {
        let result = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_area_and_perimeter() {
        let square = unit_square();
        assert_relative_eq!(square.area(), 1.0);
        assert_relative_eq!(square.perimeter(), 4.0);
    }

    #[test]
    fn test_signed_area_orientation() {
        // Uhrzeigersinn ergibt negative Fläche
        let clockwise = Polygon::closed(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(1.0, 0.0),
        ])
        .unwrap();
        assert!(clockwise.signed_area() < 0.0);
        assert_relative_eq!(clockwise.area(), 1.0);
    }

    #[test]
    fn test_centroid() {
        let square = unit_square();
        let c = square.centroid().unwrap();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
    }

    #[test]
    fn test_contains_point() {
        let square = unit_square();
        assert!(square.contains_point(Point2D::new(0.5, 0.5)));
        assert!(!square.contains_point(Point2D::new(1.5, 0.5)));
    }

    #[test]
    fn test_bounds() {
        let square = unit_square();
        let bounds = square.bounds().unwrap();
        assert_eq!(bounds.min, Point2D::new(0.0, 0.0));
        assert_eq!(bounds.max, Point2D::new(1.0, 1.0));
    }
}

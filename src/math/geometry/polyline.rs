// src/math/geometry/polyline.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// Gerades Liniensegment zwischen zwei Punkten
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Länge des Segments
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Segment mit vertauschten Endpunkten
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

/// Offener Streckenzug, z.B. ein einzelner Fließweg.
///
/// Mindestens zwei Stützpunkte; Start- und Endpunkt sind die ersten
/// und letzten Stützpunkte in Eingabereihenfolge.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point2D>,
}

impl Polyline {
    /// Erstellt einen Streckenzug aus Stützpunkten
    pub fn new(points: Vec<Point2D>) -> MathResult<Self> {
        if points.len() < 2 {
            return Err(MathError::InsufficientPoints {
                expected: 2,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Zugriff auf die Stützpunkte
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Anzahl der Stützpunkte
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Erster Stützpunkt
    pub fn start(&self) -> Point2D {
        self.points[0]
    }

    /// Letzter Stützpunkt
    pub fn end(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    /// Gesamtlänge des Streckenzugs
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Iteriert über die geraden Teilsegmente
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Erstes Teilsegment, falls vorhanden
    pub fn first_segment(&self) -> Option<Segment> {
        self.segments().next()
    }

    /// Prüft ob Start- und Endpunkt innerhalb der Toleranz zusammenfallen
    pub fn is_closed(&self, tolerance: f64) -> bool {
        points_coincident(self.start(), self.end(), tolerance)
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polyline({} points)", self.points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_requires_two_points() {
        assert!(Polyline::new(vec![]).is_err());
        assert!(Polyline::new(vec![Point2D::new(0.0, 0.0)]).is_err());
        assert!(Polyline::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]).is_ok());
    }

    #[test]
    fn test_endpoints_and_length() {
        let line = Polyline::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(3.0, 4.0),
        ])
        .unwrap();

        assert_eq!(line.start(), Point2D::new(0.0, 0.0));
        assert_eq!(line.end(), Point2D::new(3.0, 4.0));
        assert_relative_eq!(line.length(), 7.0);
        assert_eq!(line.segments().count(), 2);
    }

    #[test]
    fn test_first_segment() {
        let line = Polyline::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.5, 0.0),
            Point2D::new(2.0, 0.0),
        ])
        .unwrap();

        let first = line.first_segment().unwrap();
        assert_relative_eq!(first.length(), 0.5);
    }

    #[test]
    fn test_segment_reversed() {
        let s = Segment::new(Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0));
        let r = s.reversed();
        assert_eq!(r.start, s.end);
        assert_eq!(r.end, s.start);
        assert_relative_eq!(r.length(), s.length());
    }
}

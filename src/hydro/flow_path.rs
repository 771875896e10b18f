// src/hydro/flow_path.rs

use crate::math::{geometry::{Polygon, Polyline}, types::*};

/// Ein Fließweg mit veränderlichem Gruppierungszustand.
///
/// Die Pfade leben in einer index-basierten Arena (`Vec<FlowPath>`);
/// Gruppenzugehörigkeit ist immer der ganzzahlige `group_index`, nie
/// eine Referenz auf einen anderen Pfad. `group_index` startet als
/// eigener Index, `group_distance` als konfigurierte Schwelle ("Distanz,
/// die es zu schlagen gilt").
#[derive(Debug, Clone)]
pub struct FlowPath {
    curve: Polyline,
    start: Point2D,
    end: Point2D,
    pub group_index: usize,
    pub group_distance: f64,
    catchment: Option<Polygon>,
}

impl FlowPath {
    pub(crate) fn new(curve: Polyline, index: usize, proximity_threshold: f64) -> Self {
        let start = curve.start();
        let end = curve.end();
        Self {
            curve,
            start,
            end,
            group_index: index,
            group_distance: proximity_threshold,
            catchment: None,
        }
    }

    pub fn curve(&self) -> &Polyline {
        &self.curve
    }

    /// Startpunkt (Quelle des Fließwegs)
    pub fn start(&self) -> Point2D {
        self.start
    }

    /// Endpunkt (Auslauf des Fließwegs)
    pub fn end(&self) -> Point2D {
        self.end
    }

    /// Voronoi-Zelle dieses Pfads, gesetzt vom Zellen-Schritt
    pub fn catchment(&self) -> Option<&Polygon> {
        self.catchment.as_ref()
    }

    pub(crate) fn set_catchment(&mut self, cell: Polygon) {
        self.catchment = Some(cell);
    }
}

/// Filtert rohe Punktlisten zu gültigen Streckenzügen.
///
/// Das Pendant zum Aussortieren leerer Eingaben im Host: Listen mit
/// weniger als zwei Punkten werden verworfen und nur gezählt. Die
/// Reihenfolge der gültigen Kurven bleibt erhalten.
pub fn filter_valid_curves(raw: Vec<Vec<Point2D>>) -> (Vec<Polyline>, usize) {
    let mut curves = Vec::with_capacity(raw.len());
    let mut dropped = 0;

    for points in raw {
        match Polyline::new(points) {
            Ok(polyline) => curves.push(polyline),
            Err(_) => dropped += 1,
        }
    }

    (curves, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_derived_once() {
        let curve = Polyline::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 0.5),
        ])
        .unwrap();

        let path = FlowPath::new(curve, 3, 1.5);
        assert_eq!(path.start(), Point2D::new(0.0, 0.0));
        assert_eq!(path.end(), Point2D::new(2.0, 0.5));
        assert_eq!(path.group_index, 3);
        assert_eq!(path.group_distance, 1.5);
        assert!(path.catchment().is_none());
    }

    #[test]
    fn test_filter_drops_degenerate_lists() {
        let raw = vec![
            vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)],
            vec![Point2D::new(5.0, 5.0)],
            vec![],
            vec![Point2D::new(0.0, 1.0), Point2D::new(0.0, 2.0)],
        ];

        let (curves, dropped) = filter_valid_curves(raw);
        assert_eq!(curves.len(), 2);
        assert_eq!(dropped, 2);
    }
}

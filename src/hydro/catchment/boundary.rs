// src/hydro/catchment/boundary.rs

use crate::math::geometry::{JoinDiagnostics, Polygon, Segment, join_segments};
use crate::math::types::edge_key;
use crate::math::utils::simple_geometry::distance;
use std::collections::BTreeSet;

/// Zerlegt alle Zellen einer Gruppe in ihre Kanten
pub fn explode_cells(cells: &[&Polygon]) -> Vec<Segment> {
    cells.iter().flat_map(|cell| cell.segments()).collect()
}

/// Entfernt doppelt vorkommende Kanten aus einem Kantenhaufen.
///
/// Innenkanten einer Gruppe werden von genau zwei Zellen beigesteuert,
/// Randkanten nur von einer. Beide Exemplare eines Duplikats werden
/// gestrichen, übrig bleibt der Umriss.
///
/// Der Abgleich läuft über eine nach Kantenlänge sortierte Liste und
/// bricht ab, sobald ein Nachbar in Sortierreihenfolge nicht mehr
/// passt; nur nahezu gleich lange Kanten werden also je verglichen.
/// Innerhalb gleicher Länge ordnet ein richtungsunabhängiger
/// Endpunktschlüssel, damit identische Kanten im Sortierlauf direkt
/// nebeneinander liegen.
pub fn deduplicate_segments(mut segments: Vec<Segment>, tolerance: f64) -> Vec<Segment> {
    segments.sort_by(|a, b| {
        a.length()
            .total_cmp(&b.length())
            .then_with(|| edge_key(a.start, a.end).cmp(&edge_key(b.start, b.end)))
    });

    let mut marked: BTreeSet<usize> = BTreeSet::new();
    for i in (1..segments.len()).rev() {
        for j in (0..i).rev() {
            let d1 = distance(segments[i].start, segments[j].start);
            let d2 = distance(segments[i].start, segments[j].end);
            let d3 = distance(segments[i].end, segments[j].end);
            let d4 = distance(segments[i].end, segments[j].start);

            if (d1 < tolerance || d2 < tolerance) && (d3 < tolerance || d4 < tolerance) {
                marked.insert(i);
                marked.insert(j);
            } else {
                break;
            }
        }
    }

    // Rückwärts entfernen, damit die Indizes gültig bleiben
    for idx in marked.iter().rev() {
        segments.remove(*idx);
    }
    segments
}

/// Verschmilzt die Zellen einer Gruppe zum Gebietsumriss.
///
/// Kanten auflösen, Duplikate streichen, Rest zu geschlossenen Zügen
/// verbinden. Bei einer einzelnen Zelle entsteht wieder deren Ring.
pub fn merge_group_boundary(cells: &[&Polygon], tolerance: f64) -> (Vec<Polygon>, JoinDiagnostics) {
    let exploded = explode_cells(cells);
    let survivors = deduplicate_segments(exploded, tolerance);
    join_segments(&survivors, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::Point2D;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::closed(vec![
            Point2D::new(x0, y0),
            Point2D::new(x0 + size, y0),
            Point2D::new(x0 + size, y0 + size),
            Point2D::new(x0, y0 + size),
        ])
        .unwrap()
    }

    #[test]
    fn test_shared_edge_is_removed_twice() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);

        let exploded = explode_cells(&[&a, &b]);
        assert_eq!(exploded.len(), 8);

        let survivors = deduplicate_segments(exploded, 1e-6);
        assert_eq!(survivors.len(), 6);
    }

    #[test]
    fn test_deduplication_is_idempotent() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);

        let once = deduplicate_segments(explode_cells(&[&a, &b]), 1e-6);
        let twice = deduplicate_segments(once.clone(), 1e-6);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_merge_two_adjacent_squares() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);

        let (loops, diagnostics) = merge_group_boundary(&[&a, &b], 1e-6);

        assert_eq!(loops.len(), 1);
        assert_eq!(diagnostics.loop_count, 1);
        assert_eq!(diagnostics.open_chain_count, 0);
        assert_relative_eq!(loops[0].area(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(loops[0].perimeter(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_merge_single_cell_returns_its_ring() {
        let a = square(0.0, 0.0, 1.0);

        let (loops, _) = merge_group_boundary(&[&a], 1e-6);

        assert_eq!(loops.len(), 1);
        assert_relative_eq!(loops[0].area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_merge_quarter_grid_with_equal_edge_lengths() {
        // Vier Viertel des Einheitsquadrats: alle 16 Kanten gleich lang,
        // die vier Innenkanten müssen trotzdem als Duplikate erkannt werden
        let cells = [
            square(0.0, 0.0, 0.5),
            square(0.5, 0.0, 0.5),
            square(0.5, 0.5, 0.5),
            square(0.0, 0.5, 0.5),
        ];
        let refs: Vec<&Polygon> = cells.iter().collect();

        let (loops, diagnostics) = merge_group_boundary(&refs, 1e-6);

        assert_eq!(diagnostics.input_segment_count, 8);
        assert_eq!(loops.len(), 1);
        assert_relative_eq!(loops[0].area(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(loops[0].perimeter(), 4.0, epsilon = 1e-9);
    }
}

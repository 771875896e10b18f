// src/math/geometry/join.rs

use super::polygon::Polygon;
use super::polyline::Segment;
use crate::math::types::*;
use serde::{Deserialize, Serialize};

/// Kennzahlen eines Join-Durchlaufs, für Berichte an den Aufrufer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinDiagnostics {
    pub input_segment_count: usize,
    pub degenerate_segment_count: usize,
    pub join_count: usize,
    pub loop_count: usize,
    pub open_chain_count: usize,
}

/// Verbindet lose Segmente zu geschlossenen Umringen.
///
/// Endpunkte gelten als verbunden, wenn sie innerhalb der Toleranz
/// zusammenfallen; Teilketten werden bei Bedarf umgedreht. Ketten, die
/// sich nicht schließen lassen, werden verworfen und nur gezählt.
pub fn join_segments(segments: &[Segment], tolerance: f64) -> (Vec<Polygon>, JoinDiagnostics) {
    let mut diagnostics = JoinDiagnostics {
        input_segment_count: segments.len(),
        ..Default::default()
    };

    // Jedes Segment startet als eigene Kette; entartete Segmente fliegen raus
    let mut chains: Vec<Vec<Point2D>> = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.length() < tolerance {
            diagnostics.degenerate_segment_count += 1;
            continue;
        }
        chains.push(vec![segment.start, segment.end]);
    }

    // Greedy: solange irgendein Kettenpaar verschmilzt, von vorn suchen
    let mut merged_any = true;
    while merged_any {
        merged_any = false;

        'search: for i in 0..chains.len() {
            if chain_is_closed(&chains[i], tolerance) {
                continue;
            }
            for j in (i + 1)..chains.len() {
                if chain_is_closed(&chains[j], tolerance) {
                    continue;
                }
                if let Some(combined) = try_merge_chains(&chains[i], &chains[j], tolerance) {
                    chains[i] = combined;
                    chains.swap_remove(j);
                    diagnostics.join_count += 1;
                    merged_any = true;
                    break 'search;
                }
            }
        }
    }

    let mut loops = Vec::new();
    for mut chain in chains {
        if chain_is_closed(&chain, tolerance) && chain.len() >= 4 {
            // Endpunkt exakt auf den Anfang einrasten, dann schließen
            let first = chain[0];
            if let Some(last) = chain.last_mut() {
                *last = first;
            }
            if let Ok(polygon) = Polygon::closed(chain) {
                loops.push(polygon);
                continue;
            }
        }
        diagnostics.open_chain_count += 1;
    }
    diagnostics.loop_count = loops.len();

    (loops, diagnostics)
}

fn chain_is_closed(chain: &[Point2D], tolerance: f64) -> bool {
    match (chain.first(), chain.last()) {
        (Some(&first), Some(&last)) => chain.len() > 2 && points_coincident(first, last, tolerance),
        _ => false,
    }
}

/// Versucht zwei Ketten an einem der vier Endpunkt-Paare zu verschmelzen
fn try_merge_chains(a: &[Point2D], b: &[Point2D], tolerance: f64) -> Option<Vec<Point2D>> {
    let a_start = *a.first()?;
    let a_end = *a.last()?;
    let b_start = *b.first()?;
    let b_end = *b.last()?;

    if points_coincident(a_end, b_start, tolerance) {
        // a → b
        let mut combined = a.to_vec();
        combined.extend_from_slice(&b[1..]);
        return Some(combined);
    }
    if points_coincident(a_end, b_end, tolerance) {
        // a → b umgedreht
        let mut combined = a.to_vec();
        combined.extend(b[..b.len() - 1].iter().rev().copied());
        return Some(combined);
    }
    if points_coincident(a_start, b_end, tolerance) {
        // b → a
        let mut combined = b.to_vec();
        combined.extend_from_slice(&a[1..]);
        return Some(combined);
    }
    if points_coincident(a_start, b_start, tolerance) {
        // b umgedreht → a
        let mut combined: Vec<Point2D> = b.iter().rev().copied().collect();
        combined.extend_from_slice(&a[1..]);
        return Some(combined);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point2D::new(x1, y1), Point2D::new(x2, y2))
    }

    #[test]
    fn test_square_from_segments() {
        let segments = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 1.0, 0.0, 0.0),
        ];

        let (loops, diagnostics) = join_segments(&segments, 1e-6);
        assert_eq!(loops.len(), 1);
        assert_eq!(diagnostics.loop_count, 1);
        assert_eq!(diagnostics.open_chain_count, 0);
        assert_relative_eq!(loops[0].area(), 1.0, epsilon = 1e-9);
        assert!(loops[0].is_closed());
    }

    #[test]
    fn test_reversed_segments_are_joined() {
        // Zweites Segment zeigt in die Gegenrichtung
        let segments = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 1.0, 1.0, 0.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 0.0, 0.0, 1.0),
        ];

        let (loops, _) = join_segments(&segments, 1e-6);
        assert_eq!(loops.len(), 1);
        assert_relative_eq!(loops[0].area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_two_disjoint_loops() {
        let mut segments = vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 1.0, 0.0, 0.0),
        ];
        // Zweites Quadrat weit daneben
        segments.extend(
            [
                seg(10.0, 0.0, 11.0, 0.0),
                seg(11.0, 0.0, 11.0, 1.0),
                seg(11.0, 1.0, 10.0, 1.0),
                seg(10.0, 1.0, 10.0, 0.0),
            ],
        );

        let (loops, diagnostics) = join_segments(&segments, 1e-6);
        assert_eq!(loops.len(), 2);
        assert_eq!(diagnostics.loop_count, 2);
    }

    #[test]
    fn test_open_chain_is_dropped() {
        let segments = vec![seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0)];

        let (loops, diagnostics) = join_segments(&segments, 1e-6);
        assert!(loops.is_empty());
        assert_eq!(diagnostics.open_chain_count, 1);
        assert_eq!(diagnostics.join_count, 1);
    }

    #[test]
    fn test_degenerate_segments_are_counted() {
        let segments = vec![seg(0.0, 0.0, 0.0, 0.0)];
        let (loops, diagnostics) = join_segments(&segments, 1e-6);
        assert!(loops.is_empty());
        assert_eq!(diagnostics.degenerate_segment_count, 1);
        assert_eq!(diagnostics.open_chain_count, 0);
    }
}

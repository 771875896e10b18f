// src/math/types/point.rs

use super::Point2D;
use crate::math::utils::constants::KEY_QUANTIZATION;

/// Quantisierter Schlüssel für Punkt-Hashing.
///
/// Punkte, die näher beieinander liegen als der Quantisierungsschritt,
/// fallen auf denselben Schlüssel; darauf stützt sich der Kantenabgleich
/// benachbarter Zellen.
pub fn point_key(p: Point2D) -> (i64, i64) {
    (
        (p.x * KEY_QUANTIZATION).round() as i64,
        (p.y * KEY_QUANTIZATION).round() as i64,
    )
}

/// Richtungsunabhängiger Schlüssel für eine Kante zwischen zwei Punkten
pub fn edge_key(a: Point2D, b: Point2D) -> ((i64, i64), (i64, i64)) {
    let ka = point_key(a);
    let kb = point_key(b);
    if ka <= kb { (ka, kb) } else { (kb, ka) }
}

/// Prüft ob zwei Punkte innerhalb der Toleranz zusammenfallen
pub fn points_coincident(a: Point2D, b: Point2D, tolerance: f64) -> bool {
    (b - a).norm() < tolerance
}

// src/hydro/saturation.rs

use crate::hydro::error::{HydroError, HydroResult};
use crate::math::error::{MathError, MathResult};
use crate::math::geometry::Polyline;
use crate::math::types::Point2D;
use crate::math::utils::simple_geometry::{distance_sq, point_in_triangle};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Dreiecksfläche eines Geländenetzes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub a: Point2D,
    pub b: Point2D,
    pub c: Point2D,
}

impl Face {
    pub fn new(a: Point2D, b: Point2D, c: Point2D) -> Self {
        Self { a, b, c }
    }

    /// Flächenmittelpunkt
    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }

    pub fn contains(&self, point: Point2D) -> bool {
        point_in_triangle(point, self.a, self.b, self.c)
    }
}

/// Geländeoberfläche als Menge von Dreiecksflächen.
///
/// Die Flächen müssen kein zusammenhängendes Netz bilden; gesucht wird
/// immer nur die dem Punkt nächstliegende Fläche.
#[derive(Debug, Clone)]
pub struct Surface {
    faces: Vec<Face>,
    centers: Vec<Point2D>,
}

impl Surface {
    pub fn new(faces: Vec<Face>) -> MathResult<Self> {
        if faces.is_empty() {
            return Err(MathError::InvalidConfiguration {
                message: "saturation surface needs at least one face".to_string(),
            });
        }
        let centers = faces.iter().map(|f| f.center()).collect();
        Ok(Self { faces, centers })
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Mittelpunkte aller Flächen, parallel zu `faces`
    pub fn face_centers(&self) -> &[Point2D] {
        &self.centers
    }

    /// Index der Fläche, die den Punkt enthält; außerhalb des Netzes
    /// entscheidet der nächstgelegene Flächenmittelpunkt.
    pub fn closest_face(&self, point: Point2D) -> usize {
        for (index, face) in self.faces.iter().enumerate() {
            if face.contains(point) {
                return index;
            }
        }

        let mut best = 0;
        let mut best_sq = f64::MAX;
        for (index, &center) in self.centers.iter().enumerate() {
            let d = distance_sq(point, center);
            if d < best_sq {
                best_sq = d;
                best = index;
            }
        }
        best
    }
}

/// Parameter der Sättigungsrechnung.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaturationConfig {
    /// Wassermenge, mit der jeder Pfad startet
    pub start_volume: f64,
    /// Anteil des Startvolumens, der je Stützpunkt versickert
    pub segment_loss: f64,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            start_volume: 100.0,
            segment_loss: 0.0,
        }
    }
}

impl SaturationConfig {
    /// Builder: Startvolumen setzen
    pub fn with_start_volume(mut self, volume: f64) -> Self {
        self.start_volume = volume;
        self
    }

    /// Builder: Versickerungsanteil setzen
    pub fn with_segment_loss(mut self, loss: f64) -> Self {
        self.segment_loss = loss;
        self
    }

    pub fn validate(&self) -> HydroResult<()> {
        if self.start_volume < 0.0 {
            return Err(HydroError::InvalidStartVolume {
                value: self.start_volume,
            });
        }
        Ok(())
    }
}

/// Sättigungswerte je Fläche, alle Vektoren parallel zur Flächenliste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaturationField {
    /// Anzahl der Pfad-Stützpunkte auf der Fläche
    pub overlaps: Vec<usize>,
    /// Abgelagerte Wassermenge auf der Fläche
    pub volumes: Vec<f64>,
}

/// Verteilt das Wasser der Fließwege auf die Geländeflächen.
///
/// Jeder Pfad startet mit dem konfigurierten Volumen und lagert je
/// Stützpunkt den festen Versickerungsbetrag auf der nächstliegenden
/// Fläche ab; der letzte Stützpunkt erhält den Rest. Ist das Volumen
/// vorher aufgebraucht, endet der Pfad dort. Ohne Versickerungsanteil
/// versickert nichts, markiert wird trotzdem jeder Stützpunkt mit dem
/// vollen Startvolumen.
pub fn saturate(
    surface: &Surface,
    paths: &[Polyline],
    config: &SaturationConfig,
) -> HydroResult<SaturationField> {
    config.validate()?;
    if paths.is_empty() {
        return Err(HydroError::NoValidFlowPaths);
    }

    let mut overlaps = vec![0usize; surface.face_count()];
    let mut volumes = vec![0.0f64; surface.face_count()];

    let mut drain_at_point = config.start_volume * config.segment_loss;
    let remove_from_volume = drain_at_point;
    if config.segment_loss == 0.0 {
        drain_at_point = config.start_volume;
    }

    for path in paths {
        let mut flow_volume = config.start_volume;
        let last = path.len() - 1;

        for (index, &point) in path.points().iter().enumerate() {
            flow_volume -= remove_from_volume;
            if flow_volume <= 0.0 {
                break;
            }

            let face = surface.closest_face(point);
            overlaps[face] += 1;
            if index == last {
                // Am Endpunkt versickert der gesamte Rest
                volumes[face] += flow_volume;
            } else {
                volumes[face] += drain_at_point;
            }
        }
    }

    info!(
        paths = paths.len(),
        faces = surface.face_count(),
        "saturation field computed"
    );

    Ok(SaturationField { overlaps, volumes })
}

// src/hydro/catchment/config.rs

use crate::hydro::error::{HydroError, HydroResult};
use crate::math::geometry::Polyline;
use serde::{Deserialize, Serialize};

/// Konfiguration der Einzugsgebiets-Analyse.
///
/// `tolerance` entspricht der Modellpräzision des Hosts und wird in
/// allen Abstandsvergleichen verwendet (Gruppierung, Kantenabgleich,
/// Verbinden). Sie ist bewusst expliziter Zustand statt globaler
/// Dokumenteinstellung.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatchmentConfig {
    /// Maximaler Endpunktabstand, damit zwei Pfade ein Gebiet bilden
    pub proximity_threshold: f64,
    /// Numerische Toleranz für alle Abstandsvergleiche
    pub tolerance: f64,
    /// Seed für die Farbzuweisung der Gruppen
    pub color_seed: u64,
}

impl Default for CatchmentConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: 0.0,
            tolerance: 1e-6,
            color_seed: 0,
        }
    }
}

impl CatchmentConfig {
    pub fn new(proximity_threshold: f64) -> Self {
        Self {
            proximity_threshold,
            ..Default::default()
        }
    }

    /// Builder: Toleranz setzen
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder: Farb-Seed setzen
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = seed;
        self
    }

    /// Validiert die Konfiguration vor jeder Geometriearbeit.
    ///
    /// Eine Schwelle von 0 wird abgelehnt: der Aufrufer muss selbst eine
    /// sinnvolle Schätzung liefern (siehe
    /// [`estimate_proximity_threshold`]), sonst würde stillschweigend
    /// alles in ein einziges Gebiet fallen.
    pub fn validate(&self) -> HydroResult<()> {
        if !(self.proximity_threshold > 0.0) || !self.proximity_threshold.is_finite() {
            return Err(HydroError::InvalidThreshold {
                value: self.proximity_threshold,
            });
        }
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(HydroError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        Ok(())
    }
}

/// Schätzt eine Gruppierungs-Schwelle aus den Eingabekurven.
///
/// Heuristik: doppelte Länge des ersten Teilsegments eines
/// repräsentativen (ersten) Pfads. Liegt in der Verantwortung des
/// Aufrufers und läuft nie implizit in der Engine.
pub fn estimate_proximity_threshold(paths: &[Polyline]) -> Option<f64> {
    let sample = paths.first()?;
    let segment = sample.first_segment()?;
    let estimate = segment.length() * 2.0;
    if estimate > 0.0 { Some(estimate) } else { None }
}

// src/hydro/channel/region.rs

use crate::hydro::error::{HydroError, HydroResult};
use crate::hydro::report::Diagnostic;
use crate::math::error::MathError;
use crate::math::geometry::{Polygon, Polyline};
use crate::math::types::{Bounds2D, Point2D};
use tracing::debug;

/// Ergebnis einer Wasserstandssuche.
///
/// `regions` und `areas` laufen parallel; beide leer, wenn der Zielwert
/// im Profil nicht erreichbar war (der Lauf bricht deswegen nicht ab,
/// die Meldungen erklären die Richtung der Abweichung).
#[derive(Debug, Clone)]
pub struct RegionSolution {
    pub regions: Vec<Polygon>,
    pub areas: Vec<f64>,
    /// Gefundener Wasserstand, nur bei Erfolg belegt
    pub water_level: Option<f64>,
    pub iterations: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Sucht per Bisektion den Wasserstand, bei dem ein offenes
/// Querschnittsprofil eine gewünschte Fläche einstaut.
///
/// Das Profil füllt sich in +y; gesucht wird zwischen tiefstem und
/// höchstem Profilpunkt. Das Intervall halbiert sich pro Schritt, bis
/// die Fläche im Präzisionsfenster liegt oder das Intervall unter die
/// Höhenauflösung fällt.
#[derive(Debug, Clone)]
pub struct ChannelRegionSolver {
    /// Numerische Toleranz für Schnittpunkte entlang des Profils
    pub tolerance: f64,
    /// Abbruchauflösung für das Höhenintervall
    pub level_resolution: f64,
}

impl Default for ChannelRegionSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            level_resolution: 1e-5,
        }
    }
}

impl ChannelRegionSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Schnittpunkt-Toleranz setzen
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Wasserkörper auf einer festen Höhe.
    ///
    /// Fehler, wenn die Höhenlinie das Profil nicht in mindestens zwei
    /// Punkten schneidet (Wasserstand über dem Profilrand).
    pub fn regions_at_level(&self, profile: &Polyline, level: f64) -> HydroResult<Vec<Polygon>> {
        self.try_regions_at_level(profile, level)
            .ok_or_else(|| MathError::NoRegionAtLevel { level }.into())
    }

    /// Bestimmt den Wasserstand für eine Zielfläche.
    ///
    /// Ohne Zielfläche werden 5% der Profil-Hüllfläche angesetzt, ohne
    /// Präzision 1% der Zielfläche; beide Annahmen werden gemeldet.
    pub fn solve(
        &self,
        profile: &Polyline,
        target_area: Option<f64>,
        precision: Option<f64>,
    ) -> HydroResult<RegionSolution> {
        let bounds = Bounds2D::from_points_iter(profile.points().iter().copied()).ok_or_else(
            || HydroError::InvalidChannel {
                message: "profile has no extent".to_string(),
            },
        )?;

        let mut diagnostics = Vec::new();

        let target = match target_area {
            Some(t) if t < 0.0 => {
                return Err(HydroError::InvalidChannel {
                    message: format!("area target must be greater than 0, got {t}"),
                });
            }
            Some(t) if t > 0.0 => t,
            _ => {
                let guessed = bounds.area() * 0.05;
                diagnostics.push(Diagnostic::info(format!(
                    "area target was unspecified, set to {guessed}"
                )));
                guessed
            }
        };

        let precision = match precision {
            Some(p) if p < 0.0 => {
                return Err(HydroError::InvalidChannel {
                    message: format!("area precision must be greater than 0, got {p}"),
                });
            }
            Some(p) if p > 0.0 => p,
            _ => {
                let guessed = target * 0.01;
                diagnostics.push(Diagnostic::info(format!(
                    "area precision was unspecified, set to {guessed}"
                )));
                guessed
            }
        };

        let lower = bounds.min.y;
        let upper = bounds.max.y;

        let mut interval_begin = lower;
        let mut interval_end = upper;
        let mut last_area = 0.0;
        let mut iterations = 0;

        let mut regions = Vec::new();
        let mut areas = Vec::new();
        let mut water_level = None;

        while (interval_end - interval_begin) > self.level_resolution {
            iterations += 1;
            let middle = interval_begin + (interval_end - interval_begin) / 2.0;

            let Some(test_regions) = self.try_regions_at_level(profile, middle) else {
                // Höhenlinie verfehlt das Profil: übergelaufen
                break;
            };

            let test_areas: Vec<f64> = test_regions.iter().map(|r| r.area()).collect();
            let total: f64 = test_areas.iter().sum();
            last_area = total;
            debug!(iterations, middle, total, "probed water level");

            if (target - total).abs() <= precision {
                regions = test_regions;
                areas = test_areas;
                water_level = Some(middle);
                break;
            }

            if target < total {
                interval_end = middle;
            } else {
                interval_begin = middle;
            }
        }

        if regions.is_empty() {
            let middle = interval_begin + (interval_end - interval_begin) / 2.0;
            // Gerundet melden, bei großen Werten ganzzahlig
            let mut shown = (last_area * 100.0).round() / 100.0;
            if shown > 99.0 {
                shown = shown.round();
            }

            if (upper - middle) < (middle - lower) {
                diagnostics.push(Diagnostic::warning(format!(
                    "area of {target} exceeded the profile's capacity (largest area found was \
                     {shown}); decrease the area to produce a solution"
                )));
            } else {
                diagnostics.push(Diagnostic::warning(format!(
                    "area of {target} could not be found in the profile (smallest area found was \
                     {shown}, outside the margin of {precision}); increase the area or precision \
                     to produce a solution"
                )));
            }
        }

        Ok(RegionSolution {
            regions,
            areas,
            water_level,
            iterations,
            diagnostics,
        })
    }

    /// Wasserkörper auf einer Höhe, `None` bei weniger als zwei
    /// Schnittpunkten.
    fn try_regions_at_level(&self, profile: &Polyline, level: f64) -> Option<Vec<Polygon>> {
        let crossings = self.level_crossings(profile, level);
        if crossings.len() < 2 {
            return None;
        }

        // Nur fallende Schnittpunkte eröffnen einen Wasserkörper; der
        // jeweils nächste Schnittpunkt schließt ihn
        let mut valid: Vec<Crossing> = Vec::with_capacity(crossings.len());
        let mut i = 0;
        while i < crossings.len() {
            let current = crossings[i];
            let ahead = point_along(profile, current.param + 0.01);
            if ahead.y <= current.point.y {
                valid.push(current);
                i += 1;
                if i >= crossings.len() {
                    break;
                }
                valid.push(crossings[i]);
            }
            i += 1;
        }

        let mut regions = Vec::new();
        for pair in valid.chunks(2) {
            let [open, close] = pair else {
                break;
            };

            // Benetzter Teilzug zwischen den Schnittpunkten, der
            // Wasserspiegel entsteht durch das Schließen des Polygons
            let mut points = vec![open.point];
            for (index, &vertex) in profile.points().iter().enumerate() {
                let param = index as f64;
                if param > open.param + self.tolerance && param < close.param - self.tolerance {
                    points.push(vertex);
                }
            }
            points.push(close.point);

            if let Ok(region) = Polygon::closed(points) {
                regions.push(region);
            }
        }
        Some(regions)
    }

    /// Schnittpunkte der Höhenlinie mit dem Profil, in Laufrichtung.
    ///
    /// Der Parameter zählt Segmentindex plus Anteil im Segment;
    /// waagrechte Segmente auf der Höhenlinie liefern keinen Punkt.
    fn level_crossings(&self, profile: &Polyline, level: f64) -> Vec<Crossing> {
        let mut crossings: Vec<Crossing> = Vec::new();

        for (index, segment) in profile.segments().enumerate() {
            let dy = segment.end.y - segment.start.y;
            if dy.abs() < self.tolerance {
                continue;
            }
            let below = (segment.start.y - level) * (segment.end.y - level);
            if below > 0.0 {
                continue;
            }

            let t = ((level - segment.start.y) / dy).clamp(0.0, 1.0);
            let param = index as f64 + t;
            if let Some(last) = crossings.last() {
                if (param - last.param).abs() < self.tolerance {
                    continue;
                }
            }

            let point = segment.start + (segment.end - segment.start) * t;
            crossings.push(Crossing { param, point });
        }

        crossings
    }
}

#[derive(Debug, Clone, Copy)]
struct Crossing {
    param: f64,
    point: Point2D,
}

/// Punkt auf dem Streckenzug zum Parameter (Segmentindex plus Anteil)
fn point_along(profile: &Polyline, param: f64) -> Point2D {
    let segment_count = profile.len() - 1;
    let clamped = param.clamp(0.0, segment_count as f64);
    let index = (clamped.floor() as usize).min(segment_count - 1);
    let t = clamped - index as f64;

    let points = profile.points();
    let start = points[index];
    let end = points[index + 1];
    start + (end - start) * t
}

// src/hydro/channel/info.rs

use crate::hydro::error::{HydroError, HydroResult};
use crate::math::geometry::Polygon;
use crate::math::utils::constants;
use serde::{Deserialize, Serialize};

/// Kennzahlen eines durchströmten Querschnitts.
///
/// `velocity` und `discharge` sind nur belegt, wenn Rauheit und Gefälle
/// beide vorliegen; die reinen Geometriegrößen gibt es immer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Querschnittsfläche des Wasserkörpers
    pub area: f64,
    /// Tiefste Stelle unter dem Wasserspiegel
    pub max_depth: f64,
    /// Fläche geteilt durch Spiegelbreite
    pub mean_depth: f64,
    /// Breite des Wasserspiegels
    pub top_width: f64,
    /// Benetzter Umfang (Querschnittsrand ohne Wasserspiegel)
    pub wetted_perimeter: f64,
    /// Fläche geteilt durch benetzten Umfang
    pub hydraulic_radius: f64,
    /// Fließgeschwindigkeit nach Manning, falls berechenbar
    pub velocity: Option<f64>,
    /// Abfluss in Kubikeinheiten pro Sekunde, falls berechenbar
    pub discharge: Option<f64>,
}

/// Berechnet die Kennzahlen eines Wasserkörper-Querschnitts.
///
/// Der Querschnitt ist die geschlossene Umrandung des durchströmten
/// Bereichs mit waagrechtem Wasserspiegel obenauf. Rauheit (Manning-n)
/// und Gefälle müssen gemeinsam angegeben werden; fehlt eins von
/// beiden, ist das ein Eingabefehler.
pub fn analyze_section(
    section: &Polygon,
    roughness: Option<f64>,
    slope: Option<f64>,
) -> HydroResult<ChannelInfo> {
    if !section.is_closed() {
        return Err(HydroError::InvalidChannel {
            message: "channel section must be a closed curve".to_string(),
        });
    }

    let n = roughness.unwrap_or(0.0);
    let s = slope.unwrap_or(0.0);
    if (n > 0.0) != (s > 0.0) {
        return Err(HydroError::InvalidChannel {
            message: "velocity and discharge need both the slope and the roughness coefficient"
                .to_string(),
        });
    }

    let bounds = section
        .bounds()
        .ok_or_else(|| HydroError::InvalidChannel {
            message: "channel section has no extent".to_string(),
        })?;
    let top_width = bounds.width();
    let max_depth = bounds.height();
    if top_width < constants::EPSILON {
        return Err(HydroError::InvalidChannel {
            message: "channel section has zero surface width".to_string(),
        });
    }

    let area = section.area();
    if area < constants::EPSILON {
        return Err(HydroError::InvalidChannel {
            message: "channel section encloses no area".to_string(),
        });
    }

    let mean_depth = area / top_width;

    // Spiegelbreite vom Umfang abziehen; nur der Rest ist benetzt
    let wetted_perimeter = section.perimeter() - top_width;
    if wetted_perimeter < constants::EPSILON {
        return Err(HydroError::InvalidChannel {
            message: "wetted perimeter is not positive".to_string(),
        });
    }
    let hydraulic_radius = area / wetted_perimeter;

    let (velocity, discharge) = if n > 0.0 && s > 0.0 {
        // Manning-Formel
        let discharge = (1.0 / n) * area * hydraulic_radius.powf(2.0 / 3.0) * s.sqrt();
        (Some(discharge / area), Some(discharge))
    } else {
        (None, None)
    };

    Ok(ChannelInfo {
        area,
        max_depth,
        mean_depth,
        top_width,
        wetted_perimeter,
        hydraulic_radius,
        velocity,
        discharge,
    })
}

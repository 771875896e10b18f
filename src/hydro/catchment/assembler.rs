// src/hydro/catchment/assembler.rs

use crate::math::geometry::Polygon;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Farbe im HSL-Raum, Kanäle jeweils in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupColor {
    pub hue: f64,
    pub saturation: f64,
    pub luminance: f64,
}

impl GroupColor {
    /// Konvertiert nach RGB (8 Bit je Kanal)
    pub fn rgb(&self) -> (u8, u8, u8) {
        hsl_to_rgb(self.hue * 360.0, self.saturation, self.luminance)
    }

    /// Hex-Notation für SVG- und Report-Ausgabe
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    (
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}

/// Baut eine Palette aus `count` gut unterscheidbaren Farben.
///
/// Die Farben liegen auf einem Gitter im HSL-Raum: Farbton entlang der
/// Zeile, Helligkeit je Zeile ab 0.2 aufsteigend. Das Gitter wird über
/// das Seitenverhältnis 2:1 aus der Anzahl hergeleitet; Indizes hinter
/// der letzten Gitterzeile laufen in helleren Zeilen weiter.
pub fn build_palette(count: usize) -> Vec<GroupColor> {
    let ratio = count as f64 / 2.0;
    let square = ratio.sqrt();
    let x_max = (2.0 * square).floor() as usize + 1;
    let y_max = square.floor() as usize;
    // Einzeilige Gitter bekommen sonst eine Division durch Null
    let lum_steps = y_max.saturating_sub(1).max(1);

    (0..count)
        .map(|idx| {
            let x = idx % x_max;
            let y = idx / x_max;
            GroupColor {
                hue: x as f64 / x_max as f64,
                saturation: 1.0,
                luminance: 0.2 + 0.4 / lum_steps as f64 * y as f64,
            }
        })
        .collect()
}

/// Palette in zufälliger, aber seed-stabiler Reihenfolge.
///
/// Benachbarte Gruppenführer hätten sonst benachbarte Gitterfarben;
/// das Mischen macht angrenzende Gebiete besser unterscheidbar.
pub fn shuffled_palette(count: usize, seed: u64) -> Vec<GroupColor> {
    let mut palette = build_palette(count);
    let mut rng = StdRng::seed_from_u64(seed);
    palette.shuffle(&mut rng);
    palette
}

/// Ein fertig bestimmtes Einzugsgebiet.
#[derive(Debug, Clone)]
pub struct Catchment {
    /// Index des Gruppenführers im Pfad-Arena
    pub leader: usize,
    /// Mitglieds-Indizes, aufsteigend
    pub members: Vec<usize>,
    /// Umriss des Gebiets, bei zerfallenen Gruppen mehrere Züge
    pub boundaries: Vec<Polygon>,
    /// Anteil am Gesamtvolumen als Bruchteil in `[0, 1]`
    pub volume_share: f64,
    pub color: GroupColor,
}

impl Catchment {
    pub fn new(
        leader: usize,
        members: Vec<usize>,
        boundaries: Vec<Polygon>,
        total_paths: usize,
        color: GroupColor,
    ) -> Self {
        let volume_share = if total_paths > 0 {
            members.len() as f64 / total_paths as f64
        } else {
            0.0
        };
        Self {
            leader,
            members,
            boundaries,
            volume_share,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_palette_has_requested_size() {
        for count in [0, 1, 2, 3, 8, 100] {
            assert_eq!(build_palette(count).len(), count);
        }
    }

    #[test]
    fn test_palette_colors_are_distinct() {
        for count in [1, 2, 3, 8, 16, 100] {
            let palette = build_palette(count);
            for i in 0..palette.len() {
                for j in (i + 1)..palette.len() {
                    assert!(
                        palette[i] != palette[j],
                        "palette for {count} repeats color at {i}/{j}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_palette_luminance_stays_in_band() {
        for count in [1, 2, 3, 8, 100] {
            for color in build_palette(count) {
                assert!(color.luminance.is_finite());
                assert!(color.luminance >= 0.2 - 1e-12);
                assert!(color.luminance <= 0.6 + 1e-12);
            }
        }
    }

    #[test]
    fn test_shuffle_is_seed_stable_permutation() {
        let base = build_palette(16);
        let a = shuffled_palette(16, 7);
        let b = shuffled_palette(16, 7);
        assert_eq!(a, b);

        // Gleiche Farben, nur anders angeordnet
        let mut sorted_base: Vec<(f64, f64)> =
            base.iter().map(|c| (c.hue, c.luminance)).collect();
        let mut sorted_a: Vec<(f64, f64)> = a.iter().map(|c| (c.hue, c.luminance)).collect();
        sorted_base.sort_by(|p, q| p.partial_cmp(q).unwrap());
        sorted_a.sort_by(|p, q| p.partial_cmp(q).unwrap());
        assert_eq!(sorted_base, sorted_a);
    }

    #[test]
    fn test_rgb_primaries() {
        let red = GroupColor {
            hue: 0.0,
            saturation: 1.0,
            luminance: 0.5,
        };
        let green = GroupColor {
            hue: 1.0 / 3.0,
            saturation: 1.0,
            luminance: 0.5,
        };
        let blue = GroupColor {
            hue: 2.0 / 3.0,
            saturation: 1.0,
            luminance: 0.5,
        };

        assert_eq!(red.rgb(), (255, 0, 0));
        assert_eq!(green.rgb(), (0, 255, 0));
        assert_eq!(blue.rgb(), (0, 0, 255));
        assert_eq!(red.hex(), "#ff0000");
    }

    #[test]
    fn test_volume_share_is_member_fraction() {
        let color = GroupColor {
            hue: 0.0,
            saturation: 1.0,
            luminance: 0.2,
        };
        let catchment = Catchment::new(0, vec![0, 2, 5], vec![], 6, color);
        assert_relative_eq!(catchment.volume_share, 0.5);
    }
}

// src/debug/svg.rs

use crate::hydro::catchment::CatchmentSolution;
use crate::math::geometry::Polyline;
use crate::math::types::{Bounds2D, Point2D};
use svg::Document;
use svg::node::element::{
    Circle, Group, Polygon as SvgPolygon, Polyline as SvgPolyline, Rectangle,
};
use tracing::info;

/// Zeichenparameter für die SVG-Ausgabe
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Kantenlänge der Ausgabe in Pixeln
    pub pixel_size: f64,
    /// Rand um die Geometrie, als Anteil der mittleren Ausdehnung
    pub margin_fraction: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            pixel_size: 800.0,
            margin_fraction: 0.05,
        }
    }
}

/// Schreibt eine Übersicht der Einzugsgebiete als SVG-Datei.
///
/// Jedes Gebiet bekommt seine Gruppenfarbe als Füllung und Umrandung,
/// die Fließwege liegen als dünne Linien darüber, die Startpunkte als
/// Kreise. Strichstärken und Punktradien skalieren mit der Ausdehnung
/// der Geometrie.
pub fn render_catchment_svg(
    filename: &str,
    solution: &CatchmentSolution,
    paths: &[Polyline],
    options: &SvgOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = drawing_bounds(solution, paths).ok_or("no geometry to draw")?;

    let extent = (bounds.width() + bounds.height()) / 2.0;
    let view = bounds.expand(extent * options.margin_fraction);
    let stroke_normal = extent * 0.005;
    let stroke_thin = extent * 0.002;
    let point_radius = extent * 0.008;

    let mut document = Document::new()
        .set("width", options.pixel_size)
        .set("height", options.pixel_size)
        .set("viewBox", (view.min.x, view.min.y, view.width(), view.height()))
        .add(
            Rectangle::new()
                .set("x", view.min.x)
                .set("y", view.min.y)
                .set("width", view.width())
                .set("height", view.height())
                .set("fill", "#f0f0f0"),
        );

    for catchment in &solution.catchments {
        let mut group = Group::new()
            .set("fill", catchment.color.hex())
            .set("fill-opacity", 0.45)
            .set("stroke", catchment.color.hex())
            .set("stroke-width", stroke_normal);
        for boundary in &catchment.boundaries {
            group = group.add(SvgPolygon::new().set("points", points_attribute(boundary.ring())));
        }
        document = document.add(group);
    }

    // Fließwege über den Flächen, Startpunkte obenauf
    let mut flow_group = Group::new()
        .set("fill", "none")
        .set("stroke", "#1f4e79")
        .set("stroke-width", stroke_thin);
    for path in paths {
        flow_group =
            flow_group.add(SvgPolyline::new().set("points", points_attribute(path.points())));
    }
    document = document.add(flow_group);

    for path in paths {
        let start = path.start();
        document = document.add(
            Circle::new()
                .set("cx", start.x)
                .set("cy", start.y)
                .set("r", point_radius)
                .set("fill", "#1f4e79"),
        );
    }

    svg::save(filename, &document)?;
    info!(filename, "catchment svg written");
    Ok(())
}

/// Kleinste Box um alle Umrisse und Fließwege
fn drawing_bounds(solution: &CatchmentSolution, paths: &[Polyline]) -> Option<Bounds2D> {
    let boundary_points = solution
        .catchments
        .iter()
        .flat_map(|c| c.boundaries.iter())
        .flat_map(|b| b.ring().iter().copied());
    let path_points = paths.iter().flat_map(|p| p.points().iter().copied());

    Bounds2D::from_points_iter(boundary_points.chain(path_points))
}

fn points_attribute(points: &[Point2D]) -> String {
    points
        .iter()
        .map(|p| format!("{:.3},{:.3}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

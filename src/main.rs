// src/main.rs

use hydro_sim::debug::{SvgOptions, render_catchment_svg};
use hydro_sim::hydro::catchment::estimate_proximity_threshold;
use hydro_sim::math::geometry::Polyline;
use hydro_sim::math::types::Point2D;
use hydro_sim::{CatchmentAnalysis, CatchmentConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let curves = demo_flow_paths(24, 7);

    // Ohne gesetzte Schwelle liegt die Schätzung beim Aufrufer
    let mut config = CatchmentConfig::default().with_color_seed(7);
    if config.proximity_threshold <= 0.0 {
        match estimate_proximity_threshold(&curves) {
            Some(estimate) => {
                info!(estimate, "no proximity threshold set, estimated from first segment");
                config.proximity_threshold = estimate;
            }
            None => warn!("could not estimate a proximity threshold"),
        }
    }

    let analysis = CatchmentAnalysis::new(config);
    let solution = analysis.identify(curves.clone())?;

    for diagnostic in &solution.diagnostics {
        info!("{diagnostic}");
    }
    for catchment in &solution.catchments {
        info!(
            leader = catchment.leader,
            members = catchment.members.len(),
            share = %format!("{:.1}%", catchment.volume_share * 100.0),
            color = %catchment.color.hex(),
            boundaries = catchment.boundaries.len(),
            "catchment"
        );
    }

    render_catchment_svg("catchments.svg", &solution, &curves, &SvgOptions::default())?;
    Ok(())
}

/// Erzeugt Fließwege, die von zufälligen Startpunkten zu drei Senken
/// laufen; gleiche Saat ergibt die gleiche Szene.
fn demo_flow_paths(count: usize, seed: u64) -> Vec<Polyline> {
    let mut rng = StdRng::seed_from_u64(seed);
    let sinks = [
        Point2D::new(20.0, 25.0),
        Point2D::new(75.0, 30.0),
        Point2D::new(50.0, 80.0),
    ];

    let steps = 6;
    let mut curves = Vec::with_capacity(count);
    for index in 0..count {
        let start = Point2D::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0));
        let sink = sinks[index % sinks.len()];

        let mut points = Vec::with_capacity(steps + 1);
        points.push(start);
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            let base = start + (sink - start) * t;
            let wobble = if step == steps { 1.2 } else { 0.8 };
            points.push(Point2D::new(
                base.x + rng.random_range(-wobble..wobble),
                base.y + rng.random_range(-wobble..wobble),
            ));
        }

        if let Ok(curve) = Polyline::new(points) {
            curves.push(curve);
        }
    }
    curves
}

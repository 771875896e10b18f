// src/hydro/catchment/pipeline.rs

use super::assembler::{Catchment, shuffled_palette};
use super::boundary::merge_group_boundary;
use super::config::CatchmentConfig;
use super::grouping::{assign_groups, group_members};
use crate::hydro::error::{HydroError, HydroResult};
use crate::hydro::flow_path::{FlowPath, filter_valid_curves};
use crate::hydro::report::Diagnostic;
use crate::math::geometry::{Polygon, Polyline};
use crate::math::types::Point2D;
use crate::math::voronoi::{BruteForceSolver, CellSolver, bounding_outline};
use tracing::{debug, info};

/// Gesamtergebnis eines Analyse-Laufs.
///
/// Die Einträge in `catchments` sind die einzige Ausgabe; Meldungen in
/// `diagnostics` tragen Kontext, ohne den Lauf zu blockieren.
#[derive(Debug)]
pub struct CatchmentSolution {
    pub catchments: Vec<Catchment>,
    pub diagnostics: Vec<Diagnostic>,
    pub total_paths: usize,
}

impl CatchmentSolution {
    /// Summe aller Volumenanteile, zur Kontrolle stets 1
    pub fn total_volume_share(&self) -> f64 {
        self.catchments.iter().map(|c| c.volume_share).sum()
    }
}

/// Einzugsgebiets-Analyse über einer Menge von Fließwegen.
///
/// Ablauf je Aufruf: eine Voronoi-Zelle pro Startpunkt, dann die
/// Endpunkt-Gruppierung, dann je Gruppe das Verschmelzen der Zellränder
/// zum Gebietsumriss. Entweder entsteht ein vollständiges Ergebnis oder
/// der Lauf bricht als Ganzes ab; halbfertige Zwischenstände werden nie
/// herausgegeben.
pub struct CatchmentAnalysis {
    config: CatchmentConfig,
    solver: Box<dyn CellSolver>,
}

impl CatchmentAnalysis {
    pub fn new(config: CatchmentConfig) -> Self {
        let solver = BruteForceSolver::new().with_tolerance(config.tolerance);
        Self {
            config,
            solver: Box::new(solver),
        }
    }

    /// Builder: anderen Zellen-Löser hinterlegen
    pub fn with_solver(mut self, solver: Box<dyn CellSolver>) -> Self {
        self.solver = solver;
        self
    }

    pub fn config(&self) -> &CatchmentConfig {
        &self.config
    }

    /// Analyse über rohen Punktlisten.
    ///
    /// Listen mit weniger als zwei Punkten werden vorab aussortiert und
    /// als Warnung gemeldet, der Rest läuft durch [`Self::identify`].
    pub fn identify_from_raw(&self, raw: Vec<Vec<Point2D>>) -> HydroResult<CatchmentSolution> {
        let (curves, dropped) = filter_valid_curves(raw);
        let mut solution = self.identify(curves)?;
        if dropped > 0 {
            solution.diagnostics.insert(
                0,
                Diagnostic::warning(format!(
                    "{dropped} input curves dropped (fewer than two points)"
                )),
            );
        }
        Ok(solution)
    }

    /// Bestimmt die Einzugsgebiete der übergebenen Fließwege.
    pub fn identify(&self, curves: Vec<Polyline>) -> HydroResult<CatchmentSolution> {
        self.config.validate()?;
        if curves.is_empty() {
            return Err(HydroError::NoValidFlowPaths);
        }

        let total = curves.len();
        info!(paths = total, "starting catchment analysis");

        // Arena: Pfad i startet als Führer seiner eigenen Gruppe
        let mut paths: Vec<FlowPath> = curves
            .into_iter()
            .enumerate()
            .map(|(index, curve)| FlowPath::new(curve, index, self.config.proximity_threshold))
            .collect();

        // Schritt 1: eine Zelle je Startpunkt, in Eingabereihenfolge
        let starts: Vec<Point2D> = paths.iter().map(|p| p.start()).collect();
        let outline = bounding_outline(&starts)?;
        let cells = self.solver.solve(&starts, &outline)?;
        for (path, cell) in paths.iter_mut().zip(cells) {
            path.set_catchment(cell);
        }

        // Schritt 2: Gruppen über die Endpunkte
        assign_groups(&mut paths, self.config.tolerance);
        let groups = group_members(&paths);
        info!(groups = groups.len(), "grouping finished");

        // Schritt 3: je Gruppe Innenkanten streichen und Umriss schließen
        let palette = shuffled_palette(total, self.config.color_seed);
        let mut catchments = Vec::with_capacity(groups.len());
        let mut diagnostics = Vec::new();

        for (leader, members) in groups {
            let member_cells: Vec<&Polygon> = members
                .iter()
                .filter_map(|&idx| paths[idx].catchment())
                .collect();
            let (boundaries, join_info) =
                merge_group_boundary(&member_cells, self.config.tolerance);
            debug!(
                leader,
                members = members.len(),
                loops = join_info.loop_count,
                "merged group boundary"
            );

            if boundaries.is_empty() {
                diagnostics.push(Diagnostic::info(format!(
                    "group {leader}: no closed boundary ({} open chains), outline left empty",
                    join_info.open_chain_count
                )));
            }

            catchments.push(Catchment::new(
                leader,
                members,
                boundaries,
                total,
                palette[leader],
            ));
        }

        diagnostics.push(Diagnostic::info(format!(
            "{total} flow paths resolved into {} catchments",
            catchments.len()
        )));

        Ok(CatchmentSolution {
            catchments,
            diagnostics,
            total_paths: total,
        })
    }
}

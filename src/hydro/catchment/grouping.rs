// src/hydro/catchment/grouping.rs

use crate::hydro::flow_path::FlowPath;
use crate::math::utils::simple_geometry::distance;
use std::collections::BTreeMap;

/// Gruppiert Fließwege nach der Nähe ihrer Endpunkte.
///
/// Sequentieller Durchlauf in Indexreihenfolge: jeder Pfad wirkt als
/// Ursprung und zieht alle Kandidaten an, deren Endpunktabstand die
/// aktuelle Aufnahme-Distanz des Kandidaten nicht überschreitet. Bei
/// der Übernahme schrumpft die Aufnahme-Distanz des Kandidaten auf den
/// gemessenen Abstand, spätere Ursprünge müssen ihn also unterbieten
/// oder einstellen. Kettenbildung über Zwischenpfade ist beabsichtigt:
/// Wasser, das praktisch am selben Ort ankommt, gehört in ein Gebiet,
/// auch wenn die äußeren Endpunkte weiter auseinander liegen.
///
/// Das Ergebnis hängt von der Eingabereihenfolge ab und ist für eine
/// feste Reihenfolge deterministisch.
pub fn assign_groups(paths: &mut [FlowPath], tolerance: f64) {
    for origin_idx in 0..paths.len() {
        // Ursprung wird im inneren Durchlauf nie verändert,
        // der Schnappschuss ist daher verlustfrei
        let origin_end = paths[origin_idx].end();
        let origin_group = paths[origin_idx].group_index;

        for candidate_idx in 0..paths.len() {
            if candidate_idx == origin_idx {
                continue;
            }

            let d = distance(origin_end, paths[candidate_idx].end());
            if d <= paths[candidate_idx].group_distance + tolerance {
                let candidate = &mut paths[candidate_idx];
                candidate.group_index = origin_group;
                candidate.group_distance = d;
            }
        }
    }
}

/// Sammelt die Mitglieder je Gruppe, Schlüssel ist der Index des
/// Gruppenführers. Die Mitgliederlisten sind aufsteigend sortiert.
pub fn group_members(paths: &[FlowPath]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, path) in paths.iter().enumerate() {
        groups.entry(path.group_index).or_default().push(idx);
    }
    groups
}

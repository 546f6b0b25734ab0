//! Per-run statistics (§6): the JSON document each run emits, named after
//! its `run_label`, plus the `tracing` summary line logged alongside it.

use crate::search::{AStarResult, BSharpResult, Cost};
use serde::Serialize;
use std::fmt::Debug;

/// The A* row of §6's statistics table.
#[derive(Debug, Clone, Serialize)]
pub struct AStarStats {
    pub run_label: String,
    pub nodes_expanded: u64,
    pub nodes_generated: u64,
    pub open_size: usize,
    pub closed_size: usize,
    pub best: Cost,
    pub heuristic_weighting: f64,
}

impl AStarStats {
    pub fn from_result<S>(run_label: impl Into<String>, result: &AStarResult<S>) -> Self {
        AStarStats {
            run_label: run_label.into(),
            nodes_expanded: result.nodes_expanded,
            nodes_generated: result.nodes_generated,
            open_size: result.open_size,
            closed_size: result.closed_size,
            best: result.best,
            heuristic_weighting: result.heuristic_weighting,
        }
    }

    /// Logs the human-readable summary line (§6) at the end of a run.
    pub fn log(&self) {
        tracing::info!(
            run_label = %self.run_label,
            nodes_expanded = self.nodes_expanded,
            nodes_generated = self.nodes_generated,
            best = self.best,
            heuristic_weighting = self.heuristic_weighting,
            "A* run finished"
        );
    }
}

/// The B# row of §6's statistics table. `initial_state` and `solution_path`
/// are serialized via each state's `Debug` representation, since states are
/// domain-specific types without a shared `Serialize` bound.
#[derive(Debug, Clone, Serialize)]
pub struct BSharpStats {
    pub run_label: String,
    pub initial_state: String,
    pub nodes_expanded: u64,
    pub nodes_generated: u64,
    pub attempted_expansions: u64,
    pub open_size_forward: usize,
    pub open_size_backward: usize,
    pub closed_size_forward: usize,
    pub closed_size_backward: usize,
    pub best: Cost,
    pub heuristic_identifier: String,
    pub solution_path: Option<Vec<String>>,
}

impl BSharpStats {
    pub fn from_result<S: Debug>(
        run_label: impl Into<String>,
        heuristic_identifier: impl Into<String>,
        result: &BSharpResult<S>,
    ) -> Self {
        BSharpStats {
            run_label: run_label.into(),
            initial_state: format!("{:?}", result.initial_state),
            nodes_expanded: result.nodes_expanded,
            nodes_generated: result.nodes_generated,
            attempted_expansions: result.attempted_expansions,
            open_size_forward: result.open_size_forward,
            open_size_backward: result.open_size_backward,
            closed_size_forward: result.closed_size_forward,
            closed_size_backward: result.closed_size_backward,
            best: result.best,
            heuristic_identifier: heuristic_identifier.into(),
            solution_path: result
                .solution
                .as_ref()
                .map(|path| path.iter().map(|(g, state)| format!("({g}, {state:?})")).collect()),
        }
    }

    pub fn log(&self) {
        tracing::info!(
            run_label = %self.run_label,
            nodes_expanded = self.nodes_expanded,
            nodes_generated = self.nodes_generated,
            attempted_expansions = self.attempted_expansions,
            best = self.best,
            heuristic_identifier = %self.heuristic_identifier,
            "B# run finished"
        );
    }
}

/// Writes `stats` as pretty JSON to `<run_label>.json` in `dir` (§6,
/// "Statistics are serialized per run as a JSON document... named after
/// `run_label`").
pub fn write_json(
    dir: &std::path::Path,
    run_label: &str,
    stats: &impl Serialize,
) -> Result<(), std::io::Error> {
    let path = dir.join(format!("{run_label}.json"));
    let json = serde_json::to_string_pretty(stats).expect("stats types always serialize");
    std::fs::write(path, json)
}

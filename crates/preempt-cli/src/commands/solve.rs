//! `preempt solve` — pick victims on a single node.

use std::path::Path;

use preempt_solver::{Preemptee, ResourceList, SolveResult, Solver};
use serde::Deserialize;
use tracing::info;

use super::load_scenario;

#[derive(Debug, Deserialize)]
pub struct SolveScenario {
    pub preemptor: ResourceList,
    pub node: ResourceList,
    #[serde(default)]
    pub preemptees: Vec<Preemptee>,
}

pub fn solve(path: &Path, solver: &Solver, format: &str) -> anyhow::Result<()> {
    let scenario: SolveScenario = load_scenario(path)?;
    info!(candidates = scenario.preemptees.len(), "loaded scenario");

    let result = solver.solve(&scenario.preemptor, &scenario.preemptees, &scenario.node);

    match format {
        "json" => {
            let output = to_json(&result, scenario.preemptees.len());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!("{}", format_result(&result, scenario.preemptees.len()));
        }
    }

    Ok(())
}

fn to_json(result: &SolveResult, candidate_count: usize) -> serde_json::Value {
    serde_json::json!({
        "victims": result.victims,
        "total_cost": result.total_cost,
        "feasible": !result.is_infeasible(),
        "ranks": result.rank_labels(candidate_count),
    })
}

pub fn format_result(result: &SolveResult, candidate_count: usize) -> String {
    if result.is_noop() {
        return "✓ No preemption needed".to_string();
    }
    if result.is_infeasible() {
        return "✗ No eviction set frees enough resources on this node".to_string();
    }

    let mut out = format!(
        "✓ Evict {} of {} candidates (total cost {})",
        result.victims.len(),
        candidate_count,
        result.total_cost
    );
    for (index, rank) in result.eviction_ranks() {
        out.push_str(&format!("\n  {}  candidate {index}", preempt_solver::rank_label(rank)));
    }
    out
}

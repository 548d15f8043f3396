//! `preempt rank` — compare preemption cost across nodes.

use std::path::Path;

use preempt_solver::{NodeCandidates, NodePlan, ResourceList, Solver};
use serde::Deserialize;

use super::load_scenario;

#[derive(Debug, Deserialize)]
pub struct RankScenario {
    pub preemptor: ResourceList,
    pub nodes: Vec<NodeCandidates>,
}

pub fn rank(path: &Path, solver: &Solver, format: &str) -> anyhow::Result<()> {
    let scenario: RankScenario = load_scenario(path)?;
    let plans = solver.rank_nodes(&scenario.preemptor, &scenario.nodes);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&plans)?);
        }
        _ => {
            println!("{}", format_plans(&plans, scenario.nodes.len()));
        }
    }

    Ok(())
}

pub fn format_plans(plans: &[NodePlan], node_count: usize) -> String {
    if plans.is_empty() {
        return format!("✗ None of {node_count} nodes can host the preemptor");
    }

    let mut lines = vec![format!("{} of {node_count} nodes can host the preemptor:", plans.len())];
    for (i, plan) in plans.iter().enumerate() {
        let detail = if plan.result.is_noop() {
            "no preemption".to_string()
        } else {
            format!("evict {:?}", plan.result.victims)
        };
        lines.push(format!(
            "  {}. {}  cost {}  ({detail})",
            i + 1,
            plan.node_id,
            plan.result.total_cost
        ));
    }
    lines.join("\n")
}

//! Solver facade — normalizes platform resources and runs the search.
//!
//! A [`Solver`] holds only its configuration. Each call allocates its own
//! working state, so one solver can serve many nodes concurrently.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bounded::solve_bounded;
use crate::candidate::{Candidate, Preemptee, build_candidates};
use crate::config::{SearchStrategy, SolverConfig};
use crate::exhaustive::solve_exhaustive;
use crate::quantity::ResourceList;
use crate::resource::ResourceVector;
use crate::result::SolveResult;

/// Eviction candidates on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCandidates {
    pub node_id: String,
    pub allocatable: ResourceList,
    #[serde(default)]
    pub preemptees: Vec<Preemptee>,
}

/// The solve result for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePlan {
    pub node_id: String,
    #[serde(flatten)]
    pub result: SolveResult,
}

#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Pick the victims to evict so `preemptor` fits on a node with
    /// `allocatable` capacity currently running `preemptees`.
    pub fn solve(
        &self,
        preemptor: &ResourceList,
        preemptees: &[Preemptee],
        allocatable: &ResourceList,
    ) -> SolveResult {
        let norm = &self.config.normalization;
        let candidates = build_candidates(preemptees, norm);
        self.solve_vectors(norm.to_vector(preemptor), &candidates, norm.to_vector(allocatable))
    }

    /// Same as [`Solver::solve`] for inputs that are already normalized.
    pub fn solve_vectors(
        &self,
        preemptor: ResourceVector,
        candidates: &[Candidate],
        allocatable: ResourceVector,
    ) -> SolveResult {
        debug!(
            %preemptor,
            %allocatable,
            candidates = candidates.len(),
            strategy = ?self.config.strategy,
            "solving node preemption"
        );

        match self.config.strategy {
            SearchStrategy::Bounded => {
                solve_bounded(preemptor, candidates, allocatable, &self.config.search)
            }
            SearchStrategy::Exhaustive => solve_exhaustive(preemptor, candidates, allocatable),
        }
    }

    /// Solve every node independently and order the feasible ones by total
    /// cost, cheapest first. Nodes with equal cost keep their input order.
    pub fn rank_nodes(&self, preemptor: &ResourceList, nodes: &[NodeCandidates]) -> Vec<NodePlan> {
        let mut plans: Vec<NodePlan> = nodes
            .iter()
            .filter_map(|node| {
                let result = self.solve(preemptor, &node.preemptees, &node.allocatable);
                if result.is_infeasible() {
                    debug!(node = %node.node_id, "node cannot host preemptor");
                    return None;
                }
                Some(NodePlan {
                    node_id: node.node_id.clone(),
                    result,
                })
            })
            .collect();

        plans.sort_by(|a, b| a.result.total_cost.total_cmp(&b.result.total_cost));

        info!(
            nodes = nodes.len(),
            feasible = plans.len(),
            best = plans.first().map(|p| p.node_id.as_str()).unwrap_or("none"),
            "ranked nodes for preemption"
        );
        plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::DEFAULT_ACCELERATOR_RESOURCE;
    use crate::quantity::resource_list;

    fn res(cpu: &str, memory: &str, gpu: &str) -> ResourceList {
        resource_list([("cpu", cpu), ("memory", memory), (DEFAULT_ACCELERATOR_RESOURCE, gpu)]).unwrap()
    }

    fn pod(cpu: &str, memory: &str, gpu: &str, cost: f64) -> Preemptee {
        Preemptee {
            resources: res(cpu, memory, gpu),
            cost,
        }
    }

    fn five_pods(last_cost: f64) -> Vec<Preemptee> {
        vec![
            pod("1", "2Gi", "0", 1.0),
            pod("1", "2Gi", "0", 4.0),
            pod("2", "4Gi", "0", 6.0),
            pod("2", "4Gi", "0", 9.0),
            pod("6", "12Gi", "0", last_cost),
        ]
    }

    #[test]
    fn solves_from_resource_lists() {
        let solver = Solver::default();
        let result = solver.solve(&res("5", "10Gi", "0"), &five_pods(17.0), &res("12", "24Gi", "0"));
        assert_eq!(result, SolveResult::new(vec![0, 2, 3], 16.0));
    }

    #[test]
    fn exhaustive_strategy_agrees_on_small_input() {
        let solver = Solver::new(SolverConfig {
            strategy: SearchStrategy::Exhaustive,
            ..SolverConfig::default()
        });
        let result = solver.solve(&res("5", "10Gi", "0"), &five_pods(15.0), &res("12", "24Gi", "0"));
        assert_eq!(result, SolveResult::new(vec![4], 15.0));
    }

    #[test]
    fn missing_dimensions_are_zero() {
        let solver = Solver::default();
        let preemptor = resource_list([("cpu", "1")]).unwrap();
        let node = resource_list([("cpu", "2"), ("memory", "4Gi")]).unwrap();
        let result = solver.solve(&preemptor, &[], &node);
        assert!(result.is_noop());
    }

    #[test]
    fn ranks_nodes_by_cost() {
        let solver = Solver::default();
        let preemptor = res("5", "10Gi", "0");
        let nodes = vec![
            NodeCandidates {
                node_id: "expensive".to_string(),
                allocatable: res("12", "24Gi", "0"),
                preemptees: five_pods(17.0),
            },
            NodeCandidates {
                node_id: "too-small".to_string(),
                allocatable: res("4", "8Gi", "0"),
                preemptees: vec![pod("1", "2Gi", "0", 1.0)],
            },
            NodeCandidates {
                node_id: "cheap".to_string(),
                allocatable: res("12", "24Gi", "0"),
                preemptees: five_pods(15.0),
            },
            NodeCandidates {
                node_id: "idle".to_string(),
                allocatable: res("16", "32Gi", "1"),
                preemptees: Vec::new(),
            },
        ];

        let plans = solver.rank_nodes(&preemptor, &nodes);

        let order: Vec<&str> = plans.iter().map(|p| p.node_id.as_str()).collect();
        assert_eq!(order, vec!["idle", "cheap", "expensive"]);
        assert!(plans[0].result.is_noop());
        assert_eq!(plans[1].result.total_cost, 15.0);
    }

    #[test]
    fn unvalidated_zero_beam_still_finds_cover() {
        let mut config = SolverConfig::default();
        config.search.beam_width = 0;
        let solver = Solver::new(config);
        let pods = vec![pod("1", "1Gi", "0", 1.0); 3];

        let result = solver.solve(&res("2", "2Gi", "0"), &pods, &res("3", "3Gi", "0"));

        assert_eq!(result, SolveResult::new(vec![0, 1], 2.0));
    }

    #[test]
    fn huge_quantities_saturate_instead_of_panicking() {
        let pods = vec![pod("9E", "0", "0", 1.0), pod("9E", "0", "0", 1.0)];
        let request = res("1", "0", "0");
        let node = res("1", "0", "0");

        let bounded = Solver::default().solve(&request, &pods, &node);
        assert_eq!(bounded, SolveResult::new(vec![0, 1], 2.0));

        let exhaustive = Solver::new(SolverConfig {
            strategy: SearchStrategy::Exhaustive,
            ..SolverConfig::default()
        })
        .solve(&request, &pods, &node);
        assert_eq!(exhaustive, SolveResult::new(vec![0, 1], 2.0));
    }

    #[test]
    fn solver_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Solver>();
    }
}

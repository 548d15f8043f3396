//! Exhaustive covering search.
//!
//! Breadth-first enumeration of every candidate combination, one subset
//! size per generation. Paths only ever extend with a strictly greater
//! candidate position, so each subset is visited once. Branches whose cost
//! would reach the best feasible cost found so far are cut.
//!
//! The result is optimal but the run time is exponential in the number of
//! candidates. Production callers use [`crate::bounded`]; this module is the
//! reference it is checked against.

use tracing::{debug, trace};

use crate::candidate::{Candidate, total_demand};
use crate::resource::ResourceVector;
use crate::result::SolveResult;

struct State {
    /// Candidate positions, strictly increasing.
    path: Vec<usize>,
    cost: f64,
    /// Resources still missing; non-positive dimensions are satisfied.
    deficit: ResourceVector,
}

/// Find the cheapest subset of `candidates` whose eviction lets `preemptor`
/// fit on a node with `allocatable` capacity.
pub fn solve_exhaustive(
    preemptor: ResourceVector,
    candidates: &[Candidate],
    allocatable: ResourceVector,
) -> SolveResult {
    let free = allocatable - total_demand(candidates);
    if free.dominates(&preemptor) {
        debug!(%free, %preemptor, "free resources already fit preemptor");
        return SolveResult::noop();
    }

    let base_deficit = preemptor - free;
    let mut frontier: Vec<State> = candidates
        .iter()
        .enumerate()
        .map(|(pos, c)| State {
            path: vec![pos],
            cost: c.cost,
            deficit: base_deficit - c.demand,
        })
        .collect();

    let mut best: Option<State> = None;
    let mut generation = 1usize;

    while !frontier.is_empty() {
        trace!(generation, frontier = frontier.len(), "expanding generation");
        let mut next = Vec::new();

        for state in frontier {
            let best_cost = best.as_ref().map_or(f64::INFINITY, |b| b.cost);

            if state.deficit.is_covered() {
                if state.cost < best_cost {
                    best = Some(state);
                }
                continue;
            }

            let last = state.path[state.path.len() - 1];
            for (pos, c) in candidates.iter().enumerate().skip(last + 1) {
                let cost = state.cost + c.cost;
                if cost >= best_cost {
                    continue;
                }
                let mut path = state.path.clone();
                path.push(pos);
                next.push(State {
                    path,
                    cost,
                    deficit: state.deficit - c.demand,
                });
            }
        }

        frontier = next;
        generation += 1;
    }

    match best {
        Some(state) => {
            debug!(victims = state.path.len(), cost = state.cost, "exhaustive search found eviction set");
            SolveResult::new(
                state.path.iter().map(|&pos| candidates[pos].index).collect(),
                state.cost,
            )
        }
        None => {
            debug!(%preemptor, "no eviction set frees enough resources");
            SolveResult::infeasible()
        }
    }
}

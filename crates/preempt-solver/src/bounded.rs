//! Bounded best-first covering search.
//!
//! Same combination space as [`crate::exhaustive`], explored generation by
//! generation, but only the `beam_width` most promising states survive each
//! generation and no path grows beyond `max_subset_size` candidates.
//! States are ranked by `f = g + h`:
//!
//! ```text
//! g = accumulated eviction cost
//! h = Σ over still-short dimensions of  cost(added) / relief(added)
//! relief = shortage before adding − shortage after adding
//! ```
//!
//! `h` is a cost-per-unit-of-relief ratio. It is not an admissible lower
//! bound, so the search is not guaranteed optimal once the beam has to drop
//! states; it only decides which states the beam keeps.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::candidate::{Candidate, total_demand};
use crate::resource::ResourceVector;
use crate::result::SolveResult;

pub const DEFAULT_BEAM_WIDTH: usize = 10;
pub const DEFAULT_MAX_SUBSET_SIZE: usize = 32;

/// Static bounds on the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// States kept between generations.
    pub beam_width: usize,
    /// Maximum number of victims in a solution.
    pub max_subset_size: usize,
}

impl SearchLimits {
    /// Both limits raised to at least one.
    pub fn at_least_one(self) -> Self {
        Self {
            beam_width: self.beam_width.max(1),
            max_subset_size: self.max_subset_size.max(1),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            beam_width: DEFAULT_BEAM_WIDTH,
            max_subset_size: DEFAULT_MAX_SUBSET_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
struct State {
    /// First candidate position this state may still add.
    next: usize,
    /// Candidate positions, strictly increasing.
    path: Vec<usize>,
    /// Resources released by the candidates on `path`.
    freed: ResourceVector,
    cost: f64,
    heuristic: f64,
}

impl State {
    fn root() -> Self {
        Self {
            next: 0,
            path: Vec::new(),
            freed: ResourceVector::ZERO,
            cost: 0.0,
            heuristic: 0.0,
        }
    }

    fn f(&self) -> f64 {
        self.cost + self.heuristic
    }
}

struct Best {
    path: Vec<usize>,
    cost: f64,
}

struct Search<'a> {
    candidates: &'a [Candidate],
    deficit: ResourceVector,
    limits: SearchLimits,
    best: Best,
    pruned: usize,
}

/// Cost per unit of shortage relieved by moving from `before` to `after`.
///
/// Dimensions the added candidate does not relieve contribute nothing.
pub fn relief_heuristic(
    deficit: &ResourceVector,
    before: &ResourceVector,
    after: &ResourceVector,
    cost: f64,
) -> f64 {
    let short_before = ResourceVector::positive_deficit(deficit, before).as_array();
    let short_after = ResourceVector::positive_deficit(deficit, after).as_array();

    short_before
        .iter()
        .zip(short_after)
        .map(|(b, a)| b - a)
        .filter(|relief| *relief > 0)
        .map(|relief| cost / relief as f64)
        .sum()
}

/// Stable ascending sort on `f`; equal `f` keeps discovery order.
fn sort_and_truncate(states: &mut Vec<State>, beam_width: usize) {
    states.sort_by(|a, b| a.f().total_cmp(&b.f()));
    states.truncate(beam_width);
}

impl Search<'_> {
    fn expand(&mut self, parent: &State) -> Vec<State> {
        if parent.path.len() >= self.limits.max_subset_size {
            return Vec::new();
        }

        let mut children = Vec::new();
        for (pos, c) in self.candidates.iter().enumerate().skip(parent.next) {
            let cost = parent.cost + c.cost;
            if cost >= self.best.cost {
                self.pruned += 1;
                continue;
            }

            let freed = parent.freed + c.demand;
            let mut path = parent.path.clone();
            path.push(pos);

            if freed.dominates(&self.deficit) {
                trace!(cost, victims = path.len(), "new best eviction set");
                self.best = Best { path, cost };
                continue;
            }

            children.push(State {
                next: pos + 1,
                path,
                freed,
                cost,
                heuristic: relief_heuristic(&self.deficit, &parent.freed, &freed, c.cost),
            });
        }

        sort_and_truncate(&mut children, self.limits.beam_width);
        children
    }
}

/// Find a low-cost subset of `candidates` whose eviction lets `preemptor`
/// fit on a node with `allocatable` capacity, within `limits`.
pub fn solve_bounded(
    preemptor: ResourceVector,
    candidates: &[Candidate],
    allocatable: ResourceVector,
    limits: &SearchLimits,
) -> SolveResult {
    let free = allocatable - total_demand(candidates);
    if free.dominates(&preemptor) {
        debug!(%free, %preemptor, "free resources already fit preemptor");
        return SolveResult::noop();
    }

    // Releasing every candidate leaves exactly `allocatable` free.
    if !allocatable.dominates(&preemptor) {
        debug!(%allocatable, %preemptor, "preemptor exceeds node capacity");
        return SolveResult::infeasible();
    }

    let limits = limits.at_least_one();
    let mut search = Search {
        candidates,
        deficit: preemptor - free,
        limits,
        best: Best {
            path: Vec::new(),
            cost: f64::INFINITY,
        },
        pruned: 0,
    };

    let mut frontier = search.expand(&State::root());
    let mut generation = 1usize;

    while !frontier.is_empty() {
        trace!(
            generation,
            frontier = frontier.len(),
            best_cost = search.best.cost,
            "expanding generation"
        );

        let mut next = Vec::new();
        for state in &frontier {
            next.extend(search.expand(state));
        }
        sort_and_truncate(&mut next, limits.beam_width);

        frontier = next;
        generation += 1;
    }

    debug!(
        generations = generation,
        pruned = search.pruned,
        cost = search.best.cost,
        victims = search.best.path.len(),
        "bounded search finished"
    );

    if search.best.path.is_empty() {
        return SolveResult::infeasible();
    }

    SolveResult::new(
        search
            .best
            .path
            .iter()
            .map(|&pos| candidates[pos].index)
            .collect(),
        search.best.cost,
    )
}

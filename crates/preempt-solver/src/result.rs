//! Solve results and eviction ranking.

use serde::Serialize;

/// Rank label for tasks the solver did not select.
pub const UNRANKED_LABEL: &str = "9999";

/// Outcome of a single-node solve.
///
/// - `victims` empty and `total_cost == 0.0`: no preemption needed.
/// - `victims` empty and `total_cost` infinite: no subset (within the
///   search bounds) frees enough resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    /// Candidate indices in the order they were selected.
    pub victims: Vec<usize>,
    pub total_cost: f64,
}

impl SolveResult {
    pub fn new(victims: Vec<usize>, total_cost: f64) -> Self {
        Self {
            victims,
            total_cost,
        }
    }

    /// The node already has room for the preemptor.
    pub fn noop() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// No eviction set was found.
    pub fn infeasible() -> Self {
        Self::new(Vec::new(), f64::INFINITY)
    }

    pub fn is_noop(&self) -> bool {
        self.victims.is_empty() && self.total_cost == 0.0
    }

    pub fn is_infeasible(&self) -> bool {
        self.victims.is_empty() && self.total_cost.is_infinite()
    }

    /// `(candidate index, eviction rank)` pairs; rank 0 is evicted first.
    pub fn eviction_ranks(&self) -> Vec<(usize, usize)> {
        self.victims
            .iter()
            .enumerate()
            .map(|(rank, &index)| (index, rank))
            .collect()
    }

    /// Rank label for every one of `candidate_count` candidates, in input order.
    ///
    /// Unselected candidates get [`UNRANKED_LABEL`].
    pub fn rank_labels(&self, candidate_count: usize) -> Vec<String> {
        let mut labels = vec![UNRANKED_LABEL.to_string(); candidate_count];
        for (index, rank) in self.eviction_ranks() {
            if let Some(label) = labels.get_mut(index) {
                *label = rank_label(rank);
            }
        }
        labels
    }
}

/// Four-digit, zero-padded eviction rank (`0000`, `0001`, ...).
pub fn rank_label(rank: usize) -> String {
    format!("{rank:04}")
}

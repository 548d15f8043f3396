//! preempt-solver — minimum-cost victim selection for node preemption.
//!
//! Given a node's capacity, the resources a pending task needs and the
//! running tasks that could be evicted (each with an externally computed
//! eviction cost), pick the cheapest set of evictions that makes the
//! pending task fit.
//!
//! # Components
//!
//! - **`resource`** — three-dimensional resource vectors and dominance
//! - **`quantity`** — exact parsing of platform quantity strings
//! - **`candidate`** — unit normalization and the candidate model
//! - **`exhaustive`** — optimal breadth-first covering search (reference)
//! - **`bounded`** — beam-limited best-first search (production path)
//! - **`solver`** — facade: normalize, search, rank nodes
//! - **`result`** — solve results and eviction rank labels
//! - **`config`** — `solver.toml` loading and validation

pub mod bounded;
pub mod candidate;
pub mod config;
pub mod error;
pub mod exhaustive;
pub mod quantity;
pub mod resource;
pub mod result;
pub mod solver;

pub use bounded::{SearchLimits, solve_bounded};
pub use candidate::{Candidate, ComputeUnit, Normalization, Preemptee, build_candidates};
pub use config::{SearchStrategy, SolverConfig};
pub use error::{SolverError, SolverResult};
pub use exhaustive::solve_exhaustive;
pub use quantity::{Quantity, ResourceList, resource_list};
pub use resource::ResourceVector;
pub use result::{SolveResult, UNRANKED_LABEL, rank_label};
pub use solver::{NodeCandidates, NodePlan, Solver};

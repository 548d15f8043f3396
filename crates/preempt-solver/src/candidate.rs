//! Candidate model — converts platform resource lists into resource vectors.
//!
//! Normalization is deliberately lossy: compute is truncated to whole cores
//! (or milli-cores), memory to whole memory units (1 GiB by default) and
//! accelerators to hundredths. It is applied exactly once, here, so every
//! vector reaching the search shares the same scale.

use serde::{Deserialize, Serialize};

use crate::quantity::ResourceList;
use crate::resource::ResourceVector;

pub const CPU_RESOURCE: &str = "cpu";
pub const MEMORY_RESOURCE: &str = "memory";
pub const DEFAULT_ACCELERATOR_RESOURCE: &str = "nvidia.com/gpu";

const GIB: i64 = 1 << 30;

/// Granularity of the compute dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeUnit {
    /// Whole cores, fractional parts truncated.
    #[default]
    Cores,
    /// Milli-cores.
    MilliCores,
}

/// Unit scaling applied when building resource vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Normalization {
    pub compute_unit: ComputeUnit,
    /// Bytes per memory unit; memory is divided by this and truncated.
    pub memory_unit_bytes: i64,
    /// Resource name of the accelerator dimension.
    pub accelerator_resource: String,
    /// Accelerator quantities are multiplied by this and truncated.
    pub accelerator_scale: i64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            compute_unit: ComputeUnit::Cores,
            memory_unit_bytes: GIB,
            accelerator_resource: DEFAULT_ACCELERATOR_RESOURCE.to_string(),
            accelerator_scale: 100,
        }
    }
}

impl Normalization {
    /// Convert a resource list into a vector. Missing resources count as zero.
    pub fn to_vector(&self, resources: &ResourceList) -> ResourceVector {
        let compute = resources.get(CPU_RESOURCE).map_or(0, |q| match self.compute_unit {
            ComputeUnit::Cores => q.scaled(1, 1),
            ComputeUnit::MilliCores => q.scaled(1000, 1),
        });
        let memory = resources
            .get(MEMORY_RESOURCE)
            .map_or(0, |q| q.scaled(1, self.memory_unit_bytes));
        let accelerator = resources
            .get(&self.accelerator_resource)
            .map_or(0, |q| q.scaled(self.accelerator_scale, 1));

        ResourceVector::new(compute, memory, accelerator)
    }
}

/// A running task that could be evicted, as handed over by the cost model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preemptee {
    /// Resources held by the task.
    pub resources: ResourceList,
    /// Eviction cost; lower is cheaper to evict.
    pub cost: f64,
}

/// An eviction candidate in normalized form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position in the caller's input list.
    pub index: usize,
    pub demand: ResourceVector,
    pub cost: f64,
}

impl Candidate {
    pub fn new(index: usize, demand: ResourceVector, cost: f64) -> Self {
        Self {
            index,
            demand,
            cost,
        }
    }
}

/// Normalize every preemptee, indexing them by input position.
pub fn build_candidates(preemptees: &[Preemptee], norm: &Normalization) -> Vec<Candidate> {
    preemptees
        .iter()
        .enumerate()
        .map(|(index, p)| Candidate::new(index, norm.to_vector(&p.resources), p.cost))
        .collect()
}

/// Build candidates straight from vectors and costs, indexed by position.
pub fn candidates_from_vectors(demands: &[ResourceVector], costs: &[f64]) -> Vec<Candidate> {
    demands
        .iter()
        .zip(costs)
        .enumerate()
        .map(|(index, (demand, cost))| Candidate::new(index, *demand, *cost))
        .collect()
}

/// Resources held by all candidates together.
pub fn total_demand(candidates: &[Candidate]) -> ResourceVector {
    candidates.iter().map(|c| c.demand).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::resource_list;

    fn make_resources(cpu: &str, memory: &str, gpu: &str) -> ResourceList {
        resource_list([
            (CPU_RESOURCE, cpu),
            (MEMORY_RESOURCE, memory),
            (DEFAULT_ACCELERATOR_RESOURCE, gpu),
        ])
        .unwrap()
    }

    #[test]
    fn default_normalization_truncates() {
        let norm = Normalization::default();
        let v = norm.to_vector(&make_resources("2500m", "3.9Gi", "0.55"));
        assert_eq!(v, ResourceVector::new(2, 3, 55));
    }

    #[test]
    fn milli_cores_keep_fractions() {
        let norm = Normalization {
            compute_unit: ComputeUnit::MilliCores,
            ..Normalization::default()
        };
        let v = norm.to_vector(&make_resources("2500m", "1Gi", "0"));
        assert_eq!(v.compute, 2500);
    }

    #[test]
    fn decimal_memory_units_are_configurable() {
        let norm = Normalization {
            memory_unit_bytes: 1_000_000_000,
            ..Normalization::default()
        };
        assert_eq!(norm.to_vector(&make_resources("1", "10G", "0")).memory, 10);
        // The same quantity under the default GiB unit truncates to 9.
        assert_eq!(
            Normalization::default().to_vector(&make_resources("1", "10G", "0")).memory,
            9
        );
    }

    #[test]
    fn missing_resources_are_zero() {
        let norm = Normalization::default();
        let only_cpu = resource_list([(CPU_RESOURCE, "4")]).unwrap();
        assert_eq!(norm.to_vector(&only_cpu), ResourceVector::new(4, 0, 0));
        assert_eq!(norm.to_vector(&ResourceList::new()), ResourceVector::ZERO);
    }

    #[test]
    fn custom_accelerator_name() {
        let norm = Normalization {
            accelerator_resource: "amd.com/gpu".to_string(),
            ..Normalization::default()
        };
        let list = resource_list([("amd.com/gpu", "2"), (DEFAULT_ACCELERATOR_RESOURCE, "7")]).unwrap();
        assert_eq!(norm.to_vector(&list).accelerator, 200);
    }

    #[test]
    fn candidates_are_indexed_by_position() {
        let preemptees = vec![
            Preemptee {
                resources: make_resources("1", "2Gi", "0"),
                cost: 4.0,
            },
            Preemptee {
                resources: make_resources("6", "12Gi", "1"),
                cost: 17.0,
            },
        ];

        let candidates = build_candidates(&preemptees, &Normalization::default());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], Candidate::new(0, ResourceVector::new(1, 2, 0), 4.0));
        assert_eq!(candidates[1], Candidate::new(1, ResourceVector::new(6, 12, 100), 17.0));
    }
}

//! Solver configuration (`solver.toml`).
//!
//! ```toml
//! strategy = "bounded"
//!
//! [search]
//! beam_width = 10
//! max_subset_size = 32
//!
//! [normalization]
//! compute_unit = "cores"
//! memory_unit_bytes = 1073741824
//! accelerator_resource = "nvidia.com/gpu"
//! accelerator_scale = 100
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::bounded::SearchLimits;
use crate::candidate::Normalization;
use crate::error::{SolverError, SolverResult};

/// Which search answers [`crate::Solver::solve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Beam-limited best-first search.
    #[default]
    Bounded,
    /// Full enumeration. Optimal, but only usable for small candidate lists.
    Exhaustive,
}

impl std::str::FromStr for SearchStrategy {
    type Err = SolverError;

    fn from_str(s: &str) -> SolverResult<Self> {
        match s {
            "bounded" => Ok(Self::Bounded),
            "exhaustive" => Ok(Self::Exhaustive),
            other => Err(SolverError::InvalidConfig(format!(
                "unknown strategy {other:?} (expected \"bounded\" or \"exhaustive\")"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub strategy: SearchStrategy,
    pub search: SearchLimits,
    pub normalization: Normalization,
}

impl SolverConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading solver config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing solver config {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: SolverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.search.beam_width == 0 {
            return Err(SolverError::InvalidConfig("search.beam_width must be at least 1".into()));
        }
        if self.search.max_subset_size == 0 {
            return Err(SolverError::InvalidConfig(
                "search.max_subset_size must be at least 1".into(),
            ));
        }
        if self.normalization.memory_unit_bytes <= 0 {
            return Err(SolverError::InvalidConfig(
                "normalization.memory_unit_bytes must be positive".into(),
            ));
        }
        if self.normalization.accelerator_scale <= 0 {
            return Err(SolverError::InvalidConfig(
                "normalization.accelerator_scale must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::ComputeUnit;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.strategy, SearchStrategy::Bounded);
        assert_eq!(config.search.beam_width, 10);
        assert_eq!(config.search.max_subset_size, 32);
        assert_eq!(config.normalization.memory_unit_bytes, 1 << 30);
        assert_eq!(config.normalization.accelerator_scale, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial() {
        let config = SolverConfig::from_toml_str(
            r#"
strategy = "exhaustive"

[search]
beam_width = 4

[normalization]
compute_unit = "milli_cores"
"#,
        )
        .unwrap();

        assert_eq!(config.strategy, SearchStrategy::Exhaustive);
        assert_eq!(config.search.beam_width, 4);
        assert_eq!(config.search.max_subset_size, 32);
        assert_eq!(config.normalization.compute_unit, ComputeUnit::MilliCores);
        assert_eq!(config.normalization.accelerator_resource, "nvidia.com/gpu");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(SolverConfig::from_toml_str("").unwrap(), SolverConfig::default());
    }

    #[test]
    fn test_rejects_zero_beam() {
        let err = SolverConfig::from_toml_str("[search]\nbeam_width = 0\n").unwrap_err();
        assert!(err.to_string().contains("beam_width"));
    }

    #[test]
    fn test_rejects_bad_units() {
        let mut config = SolverConfig::default();
        config.normalization.memory_unit_bytes = 0;
        assert!(matches!(config.validate(), Err(SolverError::InvalidConfig(_))));

        let mut config = SolverConfig::default();
        config.normalization.accelerator_scale = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut config = SolverConfig::default();
        config.search.beam_width = 25;
        config.normalization.memory_unit_bytes = 1_000_000_000;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("beam_width = 25"));
        assert_eq!(SolverConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solver.toml");
        std::fs::write(&path, "[search]\nmax_subset_size = 8\n").unwrap();

        let config = SolverConfig::from_file(&path).unwrap();
        assert_eq!(config.search.max_subset_size, 8);

        let missing = SolverConfig::from_file(&dir.path().join("nope.toml"));
        assert!(missing.unwrap_err().to_string().contains("reading solver config"));
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("exhaustive".parse::<SearchStrategy>().unwrap(), SearchStrategy::Exhaustive);
        assert!("greedy".parse::<SearchStrategy>().is_err());
    }
}

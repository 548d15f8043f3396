pub mod config;
pub mod rank;
pub mod solve;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read and parse a JSON scenario file.
pub fn load_scenario<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing scenario {}", path.display()))
}

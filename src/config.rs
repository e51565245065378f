//! YAML configuration for generation runs.
//!
//! Every key is optional; command-line flags take precedence.
//!
//! ```yaml
//! records: 20
//! seed: 42
//! extension: sql
//! output_file: seed.sql
//! shared_fields:
//!   - id
//!   - tenant_id
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Run settings loaded from a YAML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateYamlConfig {
    /// Records generated per table
    pub records: Option<usize>,
    /// Random seed for reproducible output
    pub seed: Option<u64>,
    /// Schema file extension
    pub extension: Option<String>,
    /// Output file name inside the output directory
    pub output_file: Option<String>,
    /// Shared fields, merged with the shared-fields file
    pub shared_fields: Vec<String>,
}

impl GenerateYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: GenerateYamlConfig = serde_yaml_ng::from_str(content)?;
        if config.records == Some(0) {
            anyhow::bail!("records must be a positive integer");
        }
        Ok(config)
    }
}

//! Configuration for the built-in feature providers and the execution model.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! [orf]
//! min_len = 75
//!
//! [crispr]
//! max_edits = 3
//! min_repeats = 2
//!
//! [execution]
//! parallel = true
//! threads = 0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::markers::CRISPR_REPEATS;
use crate::error::{PhazeError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub orf: OrfConfig,
    #[serde(default)]
    pub crispr: CrisprConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrfConfig {
    /// Minimum ORF span in nucleotides, start codon to stop codon.
    #[serde(default = "default_min_orf_len")]
    pub min_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrisprConfig {
    /// Maximum Levenshtein edits tolerated per direct-repeat copy.
    #[serde(default = "default_max_edits")]
    pub max_edits: u8,
    /// Repeat copies required before an array is called present.
    #[serde(default = "default_min_repeats")]
    pub min_repeats: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionConfig {
    /// Run independent providers of a stage through `rayon::join`.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Worker threads for batch analysis (0 = all logical cores).
    #[serde(default)]
    pub threads: usize,
}

fn default_min_orf_len() -> usize { 75 }
fn default_max_edits() -> u8 { 3 }
fn default_min_repeats() -> usize { 2 }
fn default_parallel() -> bool { true }

impl Default for OrfConfig {
    fn default() -> Self {
        Self { min_len: default_min_orf_len() }
    }
}

impl Default for CrisprConfig {
    fn default() -> Self {
        Self {
            max_edits: default_max_edits(),
            min_repeats: default_min_repeats(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { parallel: default_parallel(), threads: 0 }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Effective worker count for batch mode.
    pub fn threads(&self) -> usize {
        if self.execution.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.execution.threads
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.crispr.min_repeats == 0 {
            return Err(PhazeError::Configuration("crispr.min_repeats must be >= 1".into()));
        }
        let shortest = CRISPR_REPEATS.iter().map(|r| r.sequence.len()).min().unwrap_or(0);
        if usize::from(self.crispr.max_edits) >= shortest {
            return Err(PhazeError::Configuration(format!(
                "crispr.max_edits ({}) must be below the shortest repeat length ({shortest})",
                self.crispr.max_edits
            )));
        }
        if self.orf.min_len < 6 {
            return Err(PhazeError::Configuration("orf.min_len must cover a start and a stop codon".into()));
        }
        Ok(())
    }
}

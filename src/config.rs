// ⚙️ Resolver configuration - every tunable of a run in one place

use crate::classifier::{Classifier, DEFAULT_THRESHOLD};
use crate::error::ResolveError;
use crate::similarity::SimilarityMetric;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Similarity threshold for c1, c2 and c3 (default: 0.7)
    pub threshold: f64,

    /// File name prefix for the identity CSV and the result tables
    pub input: String,

    /// Directory holding all CSV files
    pub output_dir: PathBuf,

    /// Repository path or URL to mine before classifying
    pub repo: Option<String>,

    pub metric: SimilarityMetric,

    /// Also write the unfiltered all-pairs table (can be large)
    pub save_all_pairs: bool,
}

impl ResolverConfig {
    pub fn new() -> Self {
        ResolverConfig {
            threshold: DEFAULT_THRESHOLD,
            input: "devs".to_string(),
            output_dir: PathBuf::from("alias-data"),
            repo: None,
            metric: SimilarityMetric::default(),
            save_all_pairs: true,
        }
    }

    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: ResolverConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ResolveError> {
        self.classifier().map(|_| ())
    }

    pub fn classifier(&self) -> Result<Classifier, ResolveError> {
        Classifier::new(self.threshold)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

// 🚀 Pipeline - mine or read → score all pairs → classify → save
//
// Either the full pair table is produced or nothing is: any failure
// before scoring aborts the run without writing result files.

use crate::aggregate::aggregate;
use crate::config::ResolverConfig;
use crate::identity::RawIdentity;
use crate::mining::GitMiner;
use crate::storage::CsvStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub population: usize,
    pub pairs: usize,
    pub duplicates: usize,
    pub threshold: f64,
    pub all_pairs_path: Option<PathBuf>,
    pub duplicates_path: PathBuf,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} identities → {} pairs → {} duplicate pairs (t={})",
            self.population, self.pairs, self.duplicates, self.threshold
        )
    }
}

/// Mine the configured repository (if any) and persist the population,
/// otherwise read the population saved by an earlier run.
pub fn fetch_or_read_identities(config: &ResolverConfig, store: &CsvStore) -> Result<Vec<RawIdentity>> {
    if let Some(repo) = &config.repo {
        let identities = GitMiner::new()
            .mine(repo)
            .with_context(|| format!("Failed to load developers from repo {}", repo))?;
        store
            .save_identities(&config.input, &identities)
            .context("Failed to save mined developers")?;
        return Ok(identities);
    }

    info!(
        file = %store.identities_path(&config.input).display(),
        "Using existing CSV file"
    );
    Ok(store.load_identities(&config.input)?)
}

pub fn run(config: &ResolverConfig) -> Result<RunSummary> {
    let classifier = config.classifier()?;
    let store = CsvStore::new(&config.output_dir);

    let identities = fetch_or_read_identities(config, &store)?;

    info!(metric = config.metric.name(), "Scoring developer pairs");
    let tables = aggregate(&config.metric, &classifier, &identities)?;
    info!("{}", tables.summary());

    let all_pairs_path = if config.save_all_pairs {
        Some(store.save_all_pairs(&config.input, &tables.all_pairs)?)
    } else {
        None
    };
    let duplicates_path = store.save_duplicates(&config.input, classifier.threshold(), &tables.duplicates)?;

    Ok(RunSummary {
        population: tables.population,
        pairs: tables.all_pairs.len(),
        duplicates: tables.duplicates.len(),
        threshold: tables.threshold,
        all_pairs_path,
        duplicates_path,
        finished_at: Utc::now(),
    })
}

// 💾 CSV Store - identities in, similarity tables out
//
// Layout under the store directory:
//   <prefix>.csv                    name,email
//   <prefix>_similarity.csv         every pair
//   <prefix>_similarity_t=<t>.csv   duplicate pairs only

use crate::error::StoreError;
use crate::identity::RawIdentity;
use crate::scoring::SimilarityRecord;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn identities_path(&self, prefix: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", prefix))
    }

    pub fn all_pairs_path(&self, prefix: &str) -> PathBuf {
        self.dir.join(format!("{}_similarity.csv", prefix))
    }

    pub fn duplicates_path(&self, prefix: &str, threshold: f64) -> PathBuf {
        // `{:?}` keeps the trailing ".0" on whole thresholds (t=1.0, not t=1)
        self.dir.join(format!("{}_similarity_t={:?}.csv", prefix, threshold))
    }

    /// Create the store directory if missing
    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    // ========================================================================
    // IDENTITIES
    // ========================================================================

    pub fn save_identities(&self, prefix: &str, identities: &[RawIdentity]) -> Result<PathBuf, StoreError> {
        let path = self.identities_path(prefix);
        self.write_rows(&path, identities)?;
        info!(path = %path.display(), count = identities.len(), "Saved developers");
        Ok(path)
    }

    /// Load identities saved by `save_identities`.
    ///
    /// The first row is skipped whatever it says; columns are read by
    /// position (name, then email).
    pub fn load_identities(&self, prefix: &str) -> Result<Vec<RawIdentity>, StoreError> {
        let path = self.identities_path(prefix);
        if !path.exists() {
            return Err(StoreError::NotFound { path });
        }

        info!(path = %path.display(), "Reading existing CSV file of developers");

        let csv_err = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(csv_err)?;

        reader
            .deserialize::<(String, String)>()
            .map(|row| row.map(RawIdentity::from))
            .collect::<Result<Vec<RawIdentity>, _>>()
            .map_err(csv_err)
    }

    // ========================================================================
    // SIMILARITY TABLES
    // ========================================================================

    pub fn save_all_pairs(&self, prefix: &str, records: &[SimilarityRecord]) -> Result<PathBuf, StoreError> {
        let path = self.all_pairs_path(prefix);
        self.write_table(&path, records)?;
        info!(path = %path.display(), rows = records.len(), "All pairs similarity data saved");
        Ok(path)
    }

    pub fn save_duplicates(
        &self,
        prefix: &str,
        threshold: f64,
        records: &[SimilarityRecord],
    ) -> Result<PathBuf, StoreError> {
        let path = self.duplicates_path(prefix, threshold);
        self.write_table(&path, records)?;
        info!(path = %path.display(), rows = records.len(), "Filtered similarity data saved");
        Ok(path)
    }

    pub fn load_table(&self, path: &Path) -> Result<Vec<SimilarityRecord>, StoreError> {
        let csv_err = |source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
        reader
            .deserialize()
            .collect::<Result<Vec<SimilarityRecord>, _>>()
            .map_err(csv_err)
    }

    /// An empty table still gets its header row
    fn write_table(&self, path: &Path, records: &[SimilarityRecord]) -> Result<(), StoreError> {
        if !records.is_empty() {
            return self.write_rows(path, records);
        }

        self.ensure_dir()?;
        let csv_err = |source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
        writer.write_record(SimilarityRecord::COLUMNS).map_err(csv_err)?;
        writer.flush().map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_rows<T: Serialize>(&self, path: &Path, rows: &[T]) -> Result<(), StoreError> {
        self.ensure_dir()?;

        let csv_err = |source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

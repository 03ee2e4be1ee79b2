// ⚠️ Error taxonomy - what can go wrong before, during, and after scoring

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// RESOLVE ERRORS (core)
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    /// Fewer than 2 identities: no pair can be formed
    #[error("population has {found} identities, at least 2 are needed to form a pair")]
    EmptyPopulation { found: usize },

    /// Threshold outside [0, 1] (or NaN)
    #[error("similarity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Email without '@' - recoverable, the whole string is used as local part
    #[error("email {0:?} has no '@'")]
    MalformedEmail(String),
}

// ============================================================================
// STORE ERRORS (CSV collaborator)
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("CSV file {path:?} not found, run with --repo to fetch identities first")]
    NotFound { path: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// ============================================================================
// MINING ERRORS (git collaborator)
// ============================================================================

#[derive(Debug, Error)]
pub enum MiningError {
    #[error("git executable not found in PATH")]
    GitNotFound,

    #[error("`{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("could not create scratch directory for clone: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("no commits found in {source_id}")]
    EmptyPopulation { source_id: String },
}

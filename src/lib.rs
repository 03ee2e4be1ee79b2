// Developer Alias Resolution - Core Library
// Decides which (name, email) pairs in a commit history belong to one person

pub mod identity;     // Identity Normalizer
pub mod similarity;   // sim(x, y) strategies
pub mod scoring;      // Pair Similarity Scorer
pub mod pairs;        // Population Pair Enumerator
pub mod classifier;   // Duplicate Classifier
pub mod aggregate;    // Result Aggregator
pub mod storage;      // CSV store
pub mod mining;       // git history miner
pub mod config;
pub mod pipeline;
pub mod error;

// Re-export commonly used types
pub use identity::{normalize, canonicalize_name, NormalizedIdentity, RawIdentity};
pub use similarity::{indel_ratio, Similarity, SimilarityMetric};
pub use scoring::{score, SimilarityRecord};
pub use pairs::{enumerate_index_pairs, enumerate_pairs, pair_count};
pub use classifier::{Classifier, Verdict, DEFAULT_THRESHOLD, MIN_VOTES};
pub use aggregate::{aggregate, filter_duplicates, score_population, SimilarityTables};
pub use storage::CsvStore;
pub use mining::{is_remote, parse_log_output, GitMiner};
pub use config::ResolverConfig;
pub use pipeline::{fetch_or_read_identities, run, RunSummary};
pub use error::{MiningError, ResolveError, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

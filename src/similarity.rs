// 📏 String similarity - the sim(x, y) used by every continuous signal
//
// Contract: ratio in [0, 1], 1.0 for equal strings, symmetric.
// The metric is picked once per run so scores stay reproducible.

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

/// Pluggable normalized string similarity
pub trait Similarity: Send + Sync {
    fn ratio(&self, a: &str, b: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    /// Insert/delete distance ratio: 2 * LCS / (len a + len b)
    #[default]
    Indel,

    /// 1 - levenshtein / max(len a, len b)
    Levenshtein,

    /// Jaro-Winkler, favours shared prefixes
    JaroWinkler,
}

impl SimilarityMetric {
    pub fn name(&self) -> &str {
        match self {
            SimilarityMetric::Indel => "indel",
            SimilarityMetric::Levenshtein => "levenshtein",
            SimilarityMetric::JaroWinkler => "jaro-winkler",
        }
    }
}

impl Similarity for SimilarityMetric {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        match self {
            SimilarityMetric::Indel => indel_ratio(a, b),
            SimilarityMetric::Levenshtein => normalized_levenshtein(a, b),
            SimilarityMetric::JaroWinkler => jaro_winkler(a, b),
        }
    }
}

/// Indel ratio over Unicode scalar values. Two empty strings are identical.
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    (2 * longest_common_subsequence(&a, &b)) as f64 / total as f64
}

/// Classic LCS length, one rolling row
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];

    for ca in a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}

// ============================================================================
// TESTS
// ============================================================================

// ⚖️ Duplicate Classifier - threshold + voting over the seven signals
//
// duplicate = identical emails OR at least two of:
//   c1 >= t, c2 >= t, (c3_1 >= t AND c3_2 >= t), c4, c5, c6, c7

use crate::error::ResolveError;
use crate::scoring::SimilarityRecord;
use serde::{Deserialize, Serialize};

/// Votes needed when emails differ
pub const MIN_VOTES: u8 = 2;

/// Default similarity threshold
pub const DEFAULT_THRESHOLD: f64 = 0.7;

// ============================================================================
// VERDICT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub c1_check: bool,
    pub c2_check: bool,
    pub c3_check: bool,
    /// Number of true signals, 0-7
    pub votes: u8,
    pub exact_email: bool,
    pub duplicate: bool,
}

impl Verdict {
    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }

    /// Which signals fired, for logs and reports
    pub fn reason(&self, record: &SimilarityRecord) -> String {
        let mut reasons = Vec::new();

        if self.exact_email {
            reasons.push("identical email".to_string());
        }
        if self.c1_check {
            reasons.push(format!("name {:.0}%", record.c1 * 100.0));
        }
        if self.c2_check {
            reasons.push(format!("email handle {:.0}%", record.c2 * 100.0));
        }
        if self.c3_check {
            reasons.push(format!(
                "first/last {:.0}%/{:.0}%",
                record.c3_1 * 100.0,
                record.c3_2 * 100.0
            ));
        }
        let labels = ["c4", "c5", "c6", "c7"];
        for (label, fired) in labels.iter().zip(record.embedding_flags()) {
            if fired {
                reasons.push(format!("{} name-in-handle", label));
            }
        }

        if reasons.is_empty() {
            "no signal".to_string()
        } else {
            format!("{} ({} votes)", reasons.join("; "), self.votes)
        }
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    threshold: f64,
}

impl Classifier {
    /// Threshold must be a number within [0, 1]
    pub fn new(threshold: f64) -> Result<Self, ResolveError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ResolveError::InvalidThreshold(threshold));
        }
        Ok(Classifier { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classify(&self, record: &SimilarityRecord) -> Verdict {
        let t = self.threshold;

        let c1_check = record.c1 >= t;
        let c2_check = record.c2 >= t;
        let c3_check = record.c3_1 >= t && record.c3_2 >= t;

        let votes = [c1_check, c2_check, c3_check]
            .into_iter()
            .chain(record.embedding_flags())
            .filter(|fired| *fired)
            .count() as u8;

        let exact_email = record.email_1 == record.email_2;

        Verdict {
            c1_check,
            c2_check,
            c3_check,
            votes,
            exact_email,
            duplicate: exact_email || votes >= MIN_VOTES,
        }
    }

    pub fn is_duplicate(&self, record: &SimilarityRecord) -> bool {
        self.classify(record).duplicate
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

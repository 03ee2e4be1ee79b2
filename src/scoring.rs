// 🔍 Pair Similarity Scorer - seven signals per identity pair
//
//   c1    full canonical name similarity
//   c2    email local part similarity (right vs left)
//   c3_1  first name similarity
//   c3_2  last name similarity, 0.0 when either last name is empty
//   c4-c7 initials/name embedded in the other side's email handle

use crate::identity::{normalize, NormalizedIdentity, RawIdentity};
use crate::similarity::Similarity;
use serde::{Deserialize, Serialize};

// ============================================================================
// SIMILARITY RECORD
// ============================================================================

/// One row of the similarity table. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub name_1: String,
    pub email_1: String,
    pub name_2: String,
    pub email_2: String,
    pub c1: f64,
    pub c2: f64,
    pub c3_1: f64,
    pub c3_2: f64,
    pub c4: bool,
    pub c5: bool,
    pub c6: bool,
    pub c7: bool,
}

impl SimilarityRecord {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 12] = [
        "name_1", "email_1", "name_2", "email_2", "c1", "c2", "c3_1", "c3_2", "c4", "c5",
        "c6", "c7",
    ];

    /// The four email-embedding flags as a slice-friendly array
    pub fn embedding_flags(&self) -> [bool; 4] {
        [self.c4, self.c5, self.c6, self.c7]
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// Score `a` (left) against `b` (right).
///
/// Order-sensitive by contract: `c2` always compares the right handle
/// to the left handle, and c4/c5 test left's name parts inside right's
/// handle while c6/c7 test the reverse.
pub fn score<S: Similarity + ?Sized>(sim: &S, a: &RawIdentity, b: &RawIdentity) -> SimilarityRecord {
    let na = normalize(a);
    let nb = normalize(b);

    let c3_2 = if na.last.is_empty() || nb.last.is_empty() {
        0.0
    } else {
        sim.ratio(&na.last, &nb.last)
    };

    SimilarityRecord {
        name_1: a.display_name.clone(),
        email_1: a.email.clone(),
        name_2: b.display_name.clone(),
        email_2: b.email.clone(),
        c1: sim.ratio(&na.canonical_name, &nb.canonical_name),
        c2: sim.ratio(&nb.email_local, &na.email_local),
        c3_1: sim.ratio(&na.first, &nb.first),
        c3_2,
        c4: initial_and_surname_in_handle(&na, &nb.email_local),
        c5: surname_initial_and_first_in_handle(&na, &nb.email_local),
        c6: initial_and_surname_in_handle(&nb, &na.email_local),
        c7: surname_initial_and_first_in_handle(&nb, &na.email_local),
    }
}

/// "jdoe" style: first initial + last name inside the handle
fn initial_and_surname_in_handle(who: &NormalizedIdentity, handle: &str) -> bool {
    !who.first_initial.is_empty()
        && !who.last.is_empty()
        && handle.contains(who.first_initial.as_str())
        && handle.contains(who.last.as_str())
}

/// "johnd" style: last initial + first name inside the handle
fn surname_initial_and_first_in_handle(who: &NormalizedIdentity, handle: &str) -> bool {
    !who.last_initial.is_empty()
        && handle.contains(who.last_initial.as_str())
        && handle.contains(who.first.as_str())
}

// ============================================================================
// TESTS
// ============================================================================

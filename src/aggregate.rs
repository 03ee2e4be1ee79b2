// 📊 Result Aggregator - full pair table + filtered duplicate table

use crate::classifier::Classifier;
use crate::error::ResolveError;
use crate::identity::RawIdentity;
use crate::pairs::pair_count;
#[cfg(feature = "parallel")]
use crate::pairs::enumerate_index_pairs;
#[cfg(not(feature = "parallel"))]
use crate::pairs::enumerate_pairs;
use crate::scoring::{score, SimilarityRecord};
use crate::similarity::Similarity;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityTables {
    /// Every pair with raw scores, enumeration order
    pub all_pairs: Vec<SimilarityRecord>,

    /// Pairs classified as the same person, same order and columns
    pub duplicates: Vec<SimilarityRecord>,

    pub threshold: f64,
    pub population: usize,
}

impl SimilarityTables {
    pub fn summary(&self) -> String {
        format!(
            "{} identities, {} pairs, {} duplicate pairs at t={}",
            self.population,
            self.all_pairs.len(),
            self.duplicates.len(),
            self.threshold
        )
    }
}

/// Score every pair in population order.
///
/// Fewer than 2 identities is an error: nothing to compare.
pub fn score_population<S: Similarity + ?Sized>(
    sim: &S,
    population: &[RawIdentity],
) -> Result<Vec<SimilarityRecord>, ResolveError> {
    if population.len() < 2 {
        return Err(ResolveError::EmptyPopulation {
            found: population.len(),
        });
    }

    let malformed = population.iter().filter(|p| p.has_malformed_email()).count();
    if malformed > 0 {
        warn!(
            malformed,
            "emails without '@', using the whole address as handle"
        );
    }

    info!(
        identities = population.len(),
        pairs = pair_count(population.len()),
        "Computing similarity for developers"
    );

    Ok(score_pairs(sim, population))
}

#[cfg(not(feature = "parallel"))]
fn score_pairs<S: Similarity + ?Sized>(sim: &S, population: &[RawIdentity]) -> Vec<SimilarityRecord> {
    enumerate_pairs(population)
        .map(|(a, b)| score(sim, a, b))
        .collect()
}

/// Rows are independent; the index pairs are split across rayon workers
/// and the indexed collect keeps enumeration order.
#[cfg(feature = "parallel")]
fn score_pairs<S: Similarity + ?Sized>(sim: &S, population: &[RawIdentity]) -> Vec<SimilarityRecord> {
    use rayon::prelude::*;

    let index_pairs: Vec<(usize, usize)> = enumerate_index_pairs(population.len()).collect();
    index_pairs
        .par_iter()
        .map(|&(i, j)| score(sim, &population[i], &population[j]))
        .collect()
}

/// Keep the rows the classifier marks as duplicates
pub fn filter_duplicates(records: &[SimilarityRecord], classifier: &Classifier) -> Vec<SimilarityRecord> {
    info!(
        threshold = classifier.threshold(),
        "Filtering similarity with threshold {:.2}",
        classifier.threshold()
    );

    records
        .iter()
        .filter(|record| {
            let verdict = classifier.classify(record);
            if verdict.duplicate {
                debug!(
                    left = %record.name_1,
                    right = %record.name_2,
                    reason = %verdict.reason(record),
                    "duplicate"
                );
            }
            verdict.duplicate
        })
        .cloned()
        .collect()
}

/// Score the population and split out the duplicate view
pub fn aggregate<S: Similarity + ?Sized>(
    sim: &S,
    classifier: &Classifier,
    population: &[RawIdentity],
) -> Result<SimilarityTables, ResolveError> {
    let all_pairs = score_population(sim, population)?;
    let duplicates = filter_duplicates(&all_pairs, classifier);

    Ok(SimilarityTables {
        all_pairs,
        duplicates,
        threshold: classifier.threshold(),
        population: population.len(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::SimilarityMetric;

    fn population() -> Vec<RawIdentity> {
        vec![
            RawIdentity::new("Erkki Esimerkki", "erkki.esimerkki@kuukkel.com"),
            RawIdentity::new("Erkki Taas", "erkki.esimerkki@kuukel.com"),
            RawIdentity::new("Maija", "maija@meikalainen.com"),
            RawIdentity::new("Tiina Tossavainen", "tiinat@yritys.fi"),
            RawIdentity::new("tiina tossavainen", "tiinat@yritys.fi"),
        ]
    }

    #[test]
    fn test_rejects_small_populations() {
        let classifier = Classifier::default();
        let one = vec![RawIdentity::new("Maija", "maija@x.com")];

        assert_eq!(
            aggregate(&SimilarityMetric::Indel, &classifier, &one),
            Err(ResolveError::EmptyPopulation { found: 1 })
        );
        assert_eq!(
            aggregate(&SimilarityMetric::Indel, &classifier, &[]),
            Err(ResolveError::EmptyPopulation { found: 0 })
        );
    }

    #[test]
    fn test_tables_keep_enumeration_order() {
        let classifier = Classifier::default();
        let tables = aggregate(&SimilarityMetric::Indel, &classifier, &population()).unwrap();

        assert_eq!(tables.all_pairs.len(), 10);
        assert_eq!(tables.all_pairs[0].name_1, "Erkki Esimerkki");
        assert_eq!(tables.all_pairs[0].name_2, "Erkki Taas");
        assert_eq!(tables.all_pairs[9].name_1, "Tiina Tossavainen");
        assert_eq!(tables.all_pairs[9].name_2, "tiina tossavainen");

        let positions: Vec<usize> = tables
            .duplicates
            .iter()
            .map(|d| tables.all_pairs.iter().position(|r| r == d).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_finds_obvious_duplicates() {
        let classifier = Classifier::default();
        let tables = aggregate(&SimilarityMetric::Indel, &classifier, &population()).unwrap();

        let pairs: Vec<(&str, &str)> = tables
            .duplicates
            .iter()
            .map(|d| (d.name_1.as_str(), d.name_2.as_str()))
            .collect();

        assert!(pairs.contains(&("Tiina Tossavainen", "tiina tossavainen")));
        assert!(pairs.contains(&("Erkki Esimerkki", "Erkki Taas")));
        assert!(!pairs.iter().any(|(a, b)| *a == "Maija" || *b == "Maija"));
        assert!(tables.summary().contains("10 pairs"));
    }

    #[test]
    fn test_malformed_emails_do_not_abort() {
        let classifier = Classifier::default();
        let population = vec![
            RawIdentity::new("Maija Meikalainen", "maija"),
            RawIdentity::new("Maija Meikalainen", "maija@firma.fi"),
        ];

        let tables = aggregate(&SimilarityMetric::Indel, &classifier, &population).unwrap();
        assert_eq!(tables.all_pairs[0].c2, 1.0);
        assert_eq!(tables.duplicates.len(), 1);
    }
}

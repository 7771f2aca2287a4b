//! Ownership statistics for a card pool and the odds of a random draft
//! from it needing more rentals than allowed.

use crate::binder::Binder;
use crate::diagnostics::{record, Diagnostic, Outcome};
use crate::error::{DraftError, Result};
use crate::hypergeometric::Hypergeometric;
use crate::names::normalize_name;
use std::collections::{BTreeSet, HashSet};

/// Default "more than" threshold, the rental service cap
pub const DEFAULT_THRESHOLD: u64 = 100;

/// Sample sizes evaluated when none are given
pub const DEFAULT_SAMPLES: [u64; 3] = [180, 270, 360];

#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipStats {
    /// Population size N
    pub population: usize,
    pub owned: usize,
    /// Non-owned cards K
    pub not_owned: usize,
    /// Names not owned, first spelling of each, sorted
    pub missing: BTreeSet<String>,
}

impl OwnershipStats {
    pub fn percent_owned(&self) -> f64 {
        if self.population == 0 {
            return 0.0;
        }
        self.owned as f64 / self.population as f64 * 100.0
    }

    fn distribution(&self, sample: u64) -> Result<Hypergeometric> {
        Hypergeometric::new(self.population as u64, self.not_owned as u64, sample)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleEstimate {
    pub sample: u64,
    pub expected: f64,
    pub std_dev: f64,
    /// P(more than `threshold` non-owned cards in the sample)
    pub p_more_than: f64,
}

/// Count how much of `cards` is owned, comparing names case-insensitively.
///
/// With `unique` the list is treated as a set (first spelling kept);
/// otherwise every line counts as a separate card.
pub fn ownership_stats<S: AsRef<str>>(
    cards: &[S],
    owned: &Binder,
    unique: bool,
) -> Result<OwnershipStats> {
    let owned_names: HashSet<String> = owned.card_names().map(normalize_name).collect();

    let mut seen = HashSet::new();
    let population: Vec<&str> = cards
        .iter()
        .map(AsRef::as_ref)
        .filter(|card| !unique || seen.insert(normalize_name(card)))
        .collect();

    if population.is_empty() {
        return Err(DraftError::EmptyPopulation);
    }

    let mut owned_count = 0;
    let mut missing = BTreeSet::new();
    let mut missing_keys = HashSet::new();
    for card in &population {
        let key = normalize_name(card);
        if owned_names.contains(&key) {
            owned_count += 1;
        } else if missing_keys.insert(key) {
            missing.insert(card.to_string());
        }
    }

    let stats = OwnershipStats {
        population: population.len(),
        owned: owned_count,
        not_owned: population.len() - owned_count,
        missing,
    };
    log::info!(
        "Population {}: {} owned, {} not owned ({:.2}% owned)",
        stats.population,
        stats.owned,
        stats.not_owned,
        stats.percent_owned()
    );
    Ok(stats)
}

/// Hypergeometric estimates for each sample size.
///
/// A sample larger than the population is skipped with a diagnostic and
/// does not stop the remaining sizes from being evaluated.
pub fn estimate_samples(
    stats: &OwnershipStats,
    samples: &[u64],
    threshold: u64,
) -> Outcome<Vec<SampleEstimate>> {
    let mut estimates = Vec::new();
    let mut diagnostics = Vec::new();

    for &sample in samples {
        match stats.distribution(sample) {
            Ok(dist) => estimates.push(SampleEstimate {
                sample,
                expected: dist.expected_value(),
                std_dev: dist.std_dev(),
                p_more_than: dist.p_more_than(threshold),
            }),
            Err(DraftError::InvalidSampleSize { sample, population }) => {
                record(
                    &mut diagnostics,
                    Diagnostic::SampleSkipped { sample, population },
                );
            }
            Err(e) => log::error!("Sample n={sample}: error: {e}"),
        }
    }

    Outcome::with_diagnostics(estimates, diagnostics)
}

/// Human-readable report in the layout the CLI prints
pub fn format_ownership_report(
    stats: &OwnershipStats,
    estimates: &[SampleEstimate],
    skipped: &[Diagnostic],
    threshold: u64,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Population size (N): {}\n", stats.population));
    output.push_str(&format!("Owned (in owned.dek): {}\n", stats.owned));
    output.push_str(&format!("Not owned: {}\n", stats.not_owned));
    output.push_str(&format!("Percent owned: {:.2}%\n\n", stats.percent_owned()));

    for diagnostic in skipped {
        output.push_str(&format!("{diagnostic}\n"));
    }
    for estimate in estimates {
        output.push_str(&format!(
            "Sample n={}: expected non-owned = {:.2}, sd = {:.2}\n",
            estimate.sample, estimate.expected, estimate.std_dev
        ));
        output.push_str(&format!(
            "  P( > {threshold} non-owned ) = {:.6}\n",
            estimate.p_more_than
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned() -> Binder {
        Binder::from_pairs(
            "owned",
            [
                ("Island", "1"),
                ("Swamp", "3"),
                ("Minsc & Boo, Timeless Heroes", "9"),
            ],
        )
    }

    #[test]
    fn counts_case_insensitively() {
        let cards = ["island", "SWAMP", "Mountain", "Plains"];
        let stats = ownership_stats(&cards, &owned(), false).unwrap();

        assert_eq!(stats.population, 4);
        assert_eq!(stats.owned, 2);
        assert_eq!(stats.not_owned, 2);
        assert_eq!(stats.percent_owned(), 50.0);
    }

    #[test]
    fn ampersand_matches_and() {
        let stats = ownership_stats(&["minsc and boo, timeless heroes"], &owned(), false).unwrap();
        assert_eq!(stats.owned, 1);
    }

    #[test]
    fn duplicates_count_unless_unique() {
        let cards = ["Mountain", "Mountain", "mountain", "Island"];

        let all = ownership_stats(&cards, &owned(), false).unwrap();
        assert_eq!(all.population, 4);
        assert_eq!(all.not_owned, 3);

        let unique = ownership_stats(&cards, &owned(), true).unwrap();
        assert_eq!(unique.population, 2);
        assert_eq!(unique.not_owned, 1);
        assert_eq!(unique.missing.iter().collect::<Vec<_>>(), vec!["Mountain"]);
    }

    #[test]
    fn missing_keeps_first_spelling_only() {
        let cards = ["Mountain", "mountain", "Forest", "MOUNTAIN"];
        let stats = ownership_stats(&cards, &owned(), false).unwrap();

        assert_eq!(stats.not_owned, 4);
        let missing: Vec<&str> = stats.missing.iter().map(String::as_str).collect();
        assert_eq!(missing, vec!["Forest", "Mountain"]);
    }

    #[test]
    fn missing_names_are_sorted() {
        let stats = ownership_stats(&["Plains", "Forest", "Island"], &owned(), false).unwrap();
        let missing: Vec<&str> = stats.missing.iter().map(String::as_str).collect();
        assert_eq!(missing, vec!["Forest", "Plains"]);
    }

    #[test]
    fn empty_population_is_an_error() {
        let cards: [&str; 0] = [];
        assert!(matches!(
            ownership_stats(&cards, &owned(), false),
            Err(DraftError::EmptyPopulation)
        ));
    }

    #[test]
    fn oversized_samples_are_skipped_not_fatal() {
        let stats = OwnershipStats {
            population: 100,
            owned: 60,
            not_owned: 40,
            missing: BTreeSet::new(),
        };

        let outcome = estimate_samples(&stats, &[20, 180, 50], 8);

        let sizes: Vec<u64> = outcome.value.iter().map(|e| e.sample).collect();
        assert_eq!(sizes, vec![20, 50]);
        assert_eq!(outcome.value[0].expected, 8.0);
        assert!((outcome.value[0].p_more_than - 0.3958).abs() < 1e-4);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::SampleSkipped {
                sample: 180,
                population: 100
            }]
        );
    }

    #[test]
    fn report_lists_counts_and_samples() {
        let stats = OwnershipStats {
            population: 100,
            owned: 60,
            not_owned: 40,
            missing: BTreeSet::new(),
        };
        let outcome = estimate_samples(&stats, &[20, 180], 8);
        let report = format_ownership_report(&stats, &outcome.value, &outcome.diagnostics, 8);

        assert!(report.contains("Population size (N): 100\n"));
        assert!(report.contains("Percent owned: 60.00%\n"));
        assert!(report.contains("Sample n=20: expected non-owned = 8.00, sd = 1.97\n"));
        assert!(report.contains("  P( > 8 non-owned ) = 0.395"));
        assert!(report.contains("Sample n=180: sample size > population size (N=100), skipping\n"));
    }
}

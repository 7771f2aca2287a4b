//! Binder model: a named mapping from card name to MTGO catalog ID.
//!
//! Keys are stored exactly as they appeared in their source and keep
//! their insertion order, so a binder written back to a .dek file lists
//! cards in the order they were read. Binders are never changed after
//! construction; [`combine_binders`] and [`Binder::fuzzy_subset_match`]
//! return new ones.

use crate::card_matching::match_card;
use crate::diagnostics::{Diagnostic, Outcome};
use crate::error::{DraftError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Binder {
    name: String,
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Binder {
    /// Empty binder with the given label
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a binder from `(card name, CatID)` pairs.
    ///
    /// Pairs with an empty name or CatID are dropped. A repeated name
    /// keeps its first position and takes the later CatID.
    pub fn from_pairs<I, N, C>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut binder = Self::new(name);
        for (card_name, catid) in pairs {
            let (card_name, catid) = (card_name.into(), catid.into());
            if card_name.trim().is_empty() || catid.trim().is_empty() {
                log::debug!("Dropping incomplete entry '{card_name}' -> '{catid}'");
                continue;
            }
            binder.insert(card_name, catid);
        }
        binder
    }

    /// Insert or overwrite, returning the replaced CatID if any
    pub(crate) fn insert(&mut self, card_name: String, catid: String) -> Option<String> {
        match self.index.get(&card_name) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, catid)),
            None => {
                self.index.insert(card_name.clone(), self.entries.len());
                self.entries.push((card_name, catid));
                None
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// CatID stored under exactly this key
    pub fn get(&self, card_name: &str) -> Option<&str> {
        self.index
            .get(card_name)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Stored key and CatID for exactly this key
    pub fn get_key_value(&self, card_name: &str) -> Option<(&str, &str)> {
        self.index.get(card_name).map(|&pos| {
            let (name, catid) = &self.entries[pos];
            (name.as_str(), catid.as_str())
        })
    }

    /// True if `card_name` is a key verbatim
    pub fn contains(&self, card_name: &str) -> bool {
        self.index.contains_key(card_name)
    }

    /// Card names in insertion order
    pub fn card_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(card name, CatID)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, catid)| (name.as_str(), catid.as_str()))
    }

    /// Contents as a plain map, ignoring order and label
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.iter().cloned().collect()
    }

    /// Subset of this binder for the requested card names.
    ///
    /// Each name is resolved with the split-card fallbacks of
    /// [`match_card`] and stored under the name as requested, not the key
    /// it resolved to. Names that resolve to nothing are skipped and
    /// reported as [`Diagnostic::UnmatchedCard`].
    pub fn fuzzy_subset_match<S: AsRef<str>>(
        &self,
        wanted_names: &[S],
        subset_label: impl Into<String>,
    ) -> Outcome<Binder> {
        let mut subset = Binder::new(subset_label);
        let mut diagnostics = Vec::new();

        for wanted in wanted_names {
            let wanted = wanted.as_ref();
            match match_card(wanted, self) {
                Ok(found) => {
                    subset.insert(wanted.to_string(), found.catalog_id.to_string());
                }
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        log::info!(
            "Built binder '{}' with {} of {} requested cards from '{}'",
            subset.name,
            subset.len(),
            wanted_names.len(),
            self.name
        );
        Outcome::with_diagnostics(subset, diagnostics)
    }
}

/// Union of two binders.
///
/// A card present in both with the same CatID is kept once; with
/// different CatIDs the merge fails with [`DraftError::MergeConflict`]
/// naming `b1` first. The result is labelled `"<b1>+<b2>"`.
pub fn combine_binders(b1: &Binder, b2: &Binder) -> Result<Binder> {
    let mut merged = b1.clone();
    merged.name = format!("{}+{}", b1.name, b2.name);

    for (card_name, catid) in b2.iter() {
        if let Some(existing) = b1.get(card_name) {
            if existing != catid {
                return Err(DraftError::MergeConflict {
                    card: card_name.to_string(),
                    first: b1.name.clone(),
                    second: b2.name.clone(),
                    first_id: existing.to_string(),
                    second_id: catid.to_string(),
                });
            }
            continue;
        }
        merged.insert(card_name.to_string(), catid.to_string());
    }

    log::debug!(
        "Combined '{}' ({} cards) and '{}' ({} cards) into {} cards",
        b1.name,
        b1.len(),
        b2.name,
        b2.len(),
        merged.len()
    );
    Ok(merged)
}

/// Unmatched card names from a list of diagnostics
pub fn unmatched_cards(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::UnmatchedCard { card } => Some(card.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "binder_tests.rs"]
mod tests;

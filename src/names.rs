//! Card name comparison keys and export aliases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Comparison key for a card name.
///
/// Lower-cases, spells out `&` as `and` and trims surrounding whitespace.
/// Only ever used to compare names from different sources, never stored
/// as a binder key or shown to the user.
pub fn normalize_name(card_name: &str) -> String {
    card_name.to_lowercase().replace('&', "and").trim().to_string()
}

/// Known-truncated export names mapped to their canonical card names.
///
/// Some draft exports drop the second face of a split card (`Fire`
/// instead of `Fire // Ice`). Lookups are verbatim on the cleaned line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardAliases {
    aliases: BTreeMap<String, String>,
}

impl Default for CardAliases {
    fn default() -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert("Fire".to_string(), "Fire // Ice".to_string());
        Self { aliases }
    }
}

impl CardAliases {
    /// Alias table with no entries
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, exported: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(exported.into(), canonical.into());
    }

    /// Canonical name for `card_name`, or the name itself if it has no alias
    pub fn resolve<'a>(&'a self, card_name: &'a str) -> &'a str {
        self.aliases
            .get(card_name)
            .map(String::as_str)
            .unwrap_or(card_name)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

//! Plain-text card lists.
//!
//! Draft exports hold one card per line, optionally prefixed with a
//! quantity of `1 `. Some exports truncate split cards to their front
//! face; those are expanded through [`CardAliases`].

use crate::error::{DraftError, Result};
use crate::names::CardAliases;
use std::path::Path;

const QUANTITY_PREFIX: &str = "1 ";

/// Clean a single export line; `None` for blank lines
pub fn parse_drafted_line(line: &str, aliases: &CardAliases) -> Option<String> {
    let mut card = line.trim();
    if let Some(rest) = card.strip_prefix(QUANTITY_PREFIX) {
        card = rest.trim();
    }
    if card.is_empty() {
        return None;
    }
    Some(aliases.resolve(card).to_string())
}

/// Card names of a draft export, in file order
pub fn parse_drafted_list(content: &str, aliases: &CardAliases) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| parse_drafted_line(line, aliases))
        .collect()
}

pub fn read_drafted_list<P: AsRef<Path>>(path: P, aliases: &CardAliases) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| DraftError::io(path, e))?;
    let cards = parse_drafted_list(&content, aliases);
    log::debug!("Read {} drafted cards from {}", cards.len(), path.display());
    Ok(cards)
}

/// Card names of a hand-written list: blank lines and `#` comments are skipped
pub fn parse_card_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_card_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| DraftError::io(path, e))?;
    Ok(parse_card_list(&content))
}

/// Write names one per line
pub fn write_card_list<P: AsRef<Path>, S: AsRef<str>>(path: P, names: &[S]) -> Result<()> {
    let path = path.as_ref();
    let mut content = String::new();
    for name in names {
        content.push_str(name.as_ref());
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|e| DraftError::io(path, e))
}

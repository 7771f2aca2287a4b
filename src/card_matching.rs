use crate::binder::Binder;
use crate::diagnostics::Diagnostic;

/// Which lookup resolved a card name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// The name is a binder key verbatim
    Exact,
    /// The text before the first `/` is a key (`Fire // Ice` -> `Fire`)
    FrontFace,
    /// The name with ` // ` collapsed to `/` is a key (`Fire // Ice` -> `Fire/Ice`)
    SlashNormalized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMatch<'a> {
    /// Binder key the name resolved to
    pub key: &'a str,
    pub catalog_id: &'a str,
    pub rule: MatchRule,
}

/// Resolve a card name against a binder's keys.
///
/// Lookups run in a fixed order and the first hit wins: verbatim key,
/// then front face (text before the first `/`, trimmed), then ` // `
/// rewritten as `/`. The fallbacks only apply to names containing `/`.
pub fn find_catalog_id<'a>(card_name: &str, binder: &'a Binder) -> Option<CardMatch<'a>> {
    if let Some(found) = lookup(binder, card_name, MatchRule::Exact) {
        return Some(found);
    }

    if !card_name.contains('/') {
        return None;
    }

    let front_face = card_name.split('/').next().unwrap_or(card_name).trim();
    if let Some(found) = lookup(binder, front_face, MatchRule::FrontFace) {
        return Some(found);
    }

    let collapsed = card_name.replace(" // ", "/");
    lookup(binder, &collapsed, MatchRule::SlashNormalized)
}

/// Like [`find_catalog_id`], but an unresolved name becomes a logged
/// [`Diagnostic::UnmatchedCard`] the caller can keep or escalate.
pub fn match_card<'a>(card_name: &str, binder: &'a Binder) -> Result<CardMatch<'a>, Diagnostic> {
    match find_catalog_id(card_name, binder) {
        Some(found) => {
            if found.rule != MatchRule::Exact {
                log::debug!(
                    "Matched '{}' to '{}' ({:?})",
                    card_name,
                    found.key,
                    found.rule
                );
            }
            Ok(found)
        }
        None => {
            let diagnostic = Diagnostic::UnmatchedCard {
                card: card_name.to_string(),
            };
            log::warn!("{diagnostic}");
            Err(diagnostic)
        }
    }
}

fn lookup<'a>(binder: &'a Binder, key: &str, rule: MatchRule) -> Option<CardMatch<'a>> {
    binder
        .get_key_value(key)
        .map(|(key, catalog_id)| CardMatch {
            key,
            catalog_id,
            rule,
        })
}

#[cfg(test)]
#[path = "card_matching_tests.rs"]
mod tests;

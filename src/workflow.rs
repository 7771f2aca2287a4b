//! File-level steps of a draft: set up the directory, pull in the
//! exported deck lists, work out rentals and write trade binders.
//!
//! These are the only functions that touch the file system layout; all
//! paths come from the [`DraftConfig`] passed in.

use crate::binder::{combine_binders, Binder};
use crate::config::{DraftConfig, RENTALS_FILE};
use crate::dek::{binder_name_for, read_dek_file, write_dek_file};
use crate::diagnostics::Outcome;
use crate::draft_list::{read_drafted_list, write_card_list};
use crate::error::{DraftError, Result};
use crate::rentals::{enforce_rental_cap, exact_rental_check};
use std::path::{Path, PathBuf};

/// One exported deck list of a draft
#[derive(Debug, Clone, PartialEq)]
pub struct DraftedList {
    /// File stem, e.g. `Session_cube_Deck_1`
    pub name: String,
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RentalReport {
    /// Every drafted card across all lists, in file then line order
    pub drafted: Vec<String>,
    pub rentals: Vec<String>,
    pub rentals_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TradeBinderReport {
    /// Owned and rented cards together
    pub combined: Binder,
    /// Written trade binders and where they went
    pub binders: Vec<(PathBuf, Binder)>,
}

/// Create the directory for a new draft
pub fn setup_draft(config: &DraftConfig, draft_name: &str) -> Result<PathBuf> {
    let draft_name = draft_name.trim();
    if draft_name.is_empty() {
        return Err(DraftError::InvalidDraftName);
    }

    let dir = config.draft_dir(draft_name);
    if dir.exists() {
        return Err(DraftError::DraftExists { path: dir });
    }
    std::fs::create_dir_all(&dir).map_err(|e| DraftError::io(&dir, e))?;
    log::info!("Directory created at: {}", dir.display());
    Ok(dir)
}

/// Copy this draft's exported deck lists from the downloads folder into
/// the draft directory, returning the copies
pub fn import_draft_exports(config: &DraftConfig, draft_name: &str) -> Result<Vec<PathBuf>> {
    let draft_dir = config.draft_dir(draft_name);
    std::fs::create_dir_all(&draft_dir).map_err(|e| DraftError::io(&draft_dir, e))?;

    let downloads = &config.downloads_dir;
    if !downloads.is_dir() {
        log::warn!("Downloads folder not found: {}", downloads.display());
        return Ok(Vec::new());
    }

    let prefix = config.export_pattern_prefix(draft_name);
    let exports = files_in(downloads, |name| {
        name.starts_with(&prefix) && name.ends_with(".txt")
    })?;

    let mut copied = Vec::with_capacity(exports.len());
    for source in exports {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let dest = draft_dir.join(file_name);
        std::fs::copy(&source, &dest).map_err(|e| DraftError::io(&source, e))?;
        log::debug!("Copied {} -> {}", source.display(), dest.display());
        copied.push(dest);
    }

    log::info!("Imported {} deck lists into {}", copied.len(), draft_dir.display());
    Ok(copied)
}

/// Deck lists in a draft directory: every `.txt` except `rentals.txt`,
/// sorted by file name
pub fn drafted_list_files(draft_dir: &Path) -> Result<Vec<PathBuf>> {
    files_in(draft_dir, |name| name.ends_with(".txt") && name != RENTALS_FILE)
}

/// Read all deck lists of a draft, applying the configured aliases
pub fn read_draft_lists(config: &DraftConfig, draft_name: &str) -> Result<Vec<DraftedList>> {
    let draft_dir = config.draft_dir(draft_name);
    drafted_list_files(&draft_dir)?
        .into_iter()
        .map(|path| {
            let cards = read_drafted_list(&path, &config.aliases)?;
            Ok(DraftedList {
                name: binder_name_for(&path),
                cards,
            })
        })
        .collect()
}

/// Work out which drafted cards are not owned and write `rentals.txt`.
///
/// Nothing is written if the rentals exceed the configured cap.
pub fn find_rentals(config: &DraftConfig, draft_name: &str) -> Result<Outcome<RentalReport>> {
    let lists = read_draft_lists(config, draft_name)?;
    let drafted: Vec<String> = lists.into_iter().flat_map(|list| list.cards).collect();
    log::info!("DRAFTED ({}) = {:?}", drafted.len(), drafted);

    let (owned, diagnostics) = read_dek_file(config.owned_path())?.into_parts();
    let rentals = exact_rental_check(&drafted, &owned);
    log::info!("RENTALS ({}) = {:?}", rentals.len(), rentals);

    enforce_rental_cap(&rentals, config.rental_cap)?;

    let rentals_path = config.rentals_path(draft_name);
    write_card_list(&rentals_path, &rentals)?;
    log::info!("Wrote {} rentals to {}", rentals.len(), rentals_path.display());

    Ok(Outcome::with_diagnostics(
        RentalReport {
            drafted,
            rentals,
            rentals_path,
        },
        diagnostics,
    ))
}

/// Most recently modified `.dek` file in `dir`
pub fn latest_dek_file(dir: &Path) -> Result<PathBuf> {
    let candidates = if dir.is_dir() {
        files_in(dir, |name| name.ends_with(".dek"))?
    } else {
        Vec::new()
    };

    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    for path in candidates {
        let modified = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|e| DraftError::io(&path, e))?;
        if latest.as_ref().map_or(true, |(time, _)| modified > *time) {
            latest = Some((modified, path));
        }
    }

    latest
        .map(|(_, path)| path)
        .ok_or_else(|| DraftError::NoRentedBinder {
            dir: dir.to_path_buf(),
        })
}

/// Write one trade binder per deck list, drawn from owned + rented cards.
///
/// `rented` defaults to the newest `.dek` in the downloads folder; it is
/// kept in the draft directory as `rented.dek`. The draft directory must
/// already exist. A missing input or a card with different CatIDs in the
/// owned and rented binders aborts before anything is written. Cards that
/// cannot be found are reported, not fatal.
pub fn create_trade_binders(
    config: &DraftConfig,
    draft_name: &str,
    rented: Option<&Path>,
) -> Result<Outcome<TradeBinderReport>> {
    let draft_dir = config.draft_dir(draft_name);
    if !draft_dir.is_dir() {
        return Err(DraftError::DraftNotFound { path: draft_dir });
    }

    let rented_source = match rented {
        Some(path) => path.to_path_buf(),
        None => latest_dek_file(&config.downloads_dir)?,
    };
    log::info!("Using rented .dek file: {}", rented_source.display());

    let (owned, mut diagnostics) = read_dek_file(config.owned_path())?.into_parts();
    let (rented, rented_diagnostics) = read_dek_file(&rented_source)?.into_parts();
    diagnostics.extend(rented_diagnostics);
    log::info!("RENTED items: {}", rented.len());

    let combined = combine_binders(&owned, &rented)?;
    let lists = read_draft_lists(config, draft_name)?;

    let rented_copy = config.rented_dek_path(draft_name);
    if rented_source != rented_copy {
        std::fs::copy(&rented_source, &rented_copy)
            .map_err(|e| DraftError::io(&rented_source, e))?;
    }

    let mut binders = Vec::new();
    for list in lists {
        let (binder, unmatched) = combined.fuzzy_subset_match(&list.cards, &list.name).into_parts();
        diagnostics.extend(unmatched);

        let path = config.trade_binder_path(draft_name, &list.name);
        write_dek_file(&binder, &path)?;
        binders.push((path, binder));
    }

    log::info!(
        "Created {} trade binders from {} cards",
        binders.len(),
        combined.len()
    );
    Ok(Outcome::with_diagnostics(
        TradeBinderReport { combined, binders },
        diagnostics,
    ))
}

/// Regular files in `dir` whose file name passes `keep`, sorted by name
fn files_in(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DraftError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DraftError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if keep(&name.to_string_lossy()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

//! Draft Binders - MTGO draft rentals & trade binders
//!
//! Compares drafted card lists against an owned `.dek` collection to find
//! the cards that have to be rented, and builds per-player trade binders
//! from the owned and rented collections once the draft is over.

pub mod binder;
pub mod card_matching;
pub mod config;
pub mod dek;
pub mod diagnostics;
pub mod draft_list;
pub mod error;
pub mod hypergeometric;
pub mod names;
pub mod owned_csv;
pub mod ownership;
pub mod rentals;
pub mod workflow;

pub use binder::{combine_binders, Binder};
pub use card_matching::{find_catalog_id, match_card, CardMatch, MatchRule};
pub use config::DraftConfig;
pub use dek::{read_dek_file, to_dek_string, write_dek_file};
pub use diagnostics::{Diagnostic, Outcome};
pub use error::{DraftError, Result};
pub use hypergeometric::{hypergeom_p_more_than, Hypergeometric};
pub use names::{normalize_name, CardAliases};
pub use rentals::{compute_rentals, exact_rental_check};

//! Drafted cards that are not owned and have to be rented.
//!
//! Ownership here is decided by exact key lookup only. Trade binders
//! resolve names through the split-card fallbacks instead, see
//! [`crate::binder::Binder::fuzzy_subset_match`].

use crate::binder::Binder;
use crate::error::{DraftError, Result};

/// Rental services refuse orders above this many cards
pub const DEFAULT_RENTAL_CAP: usize = 100;

/// Drafted cards whose name is not a key of `owned`, in drafted order.
///
/// Duplicates are kept: two copies drafted means two rentals.
pub fn exact_rental_check<S: AsRef<str>>(drafted: &[S], owned: &Binder) -> Vec<String> {
    let rentals: Vec<String> = drafted
        .iter()
        .map(AsRef::as_ref)
        .filter(|card| !owned.contains(card))
        .map(str::to_string)
        .collect();

    log::info!(
        "{} of {} drafted cards are not in '{}'",
        rentals.len(),
        drafted.len(),
        owned.name()
    );
    rentals
}

/// Fail if more rentals are needed than the service allows
pub fn enforce_rental_cap(rentals: &[String], cap: usize) -> Result<()> {
    if rentals.len() > cap {
        log::error!("More than {cap} rentals required ({})", rentals.len());
        return Err(DraftError::ThresholdExceeded {
            count: rentals.len(),
            cap,
        });
    }
    Ok(())
}

/// [`exact_rental_check`] followed by [`enforce_rental_cap`]
pub fn compute_rentals<S: AsRef<str>>(
    drafted: &[S],
    owned: &Binder,
    cap: usize,
) -> Result<Vec<String>> {
    let rentals = exact_rental_check(drafted, owned);
    enforce_rental_cap(&rentals, cap)?;
    Ok(rentals)
}

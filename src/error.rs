//! Error types for draft_binders

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for draft_binders operations
#[derive(Debug, Error)]
pub enum DraftError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A .dek file is not well-formed XML
    #[error("Failed to parse {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// A .dek file is XML but not a deck
    #[error("Invalid .dek file {}: {reason}", path.display())]
    InvalidDek { path: PathBuf, reason: String },

    /// CSV export could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed
    #[error("Invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Same card name with different catalog IDs in two binders
    #[error(
        "Conflict for card '{card}' between binders '{first}' (CatID {first_id}) and '{second}' (CatID {second_id})"
    )]
    MergeConflict {
        card: String,
        first: String,
        second: String,
        first_id: String,
        second_id: String,
    },

    /// More rentals than the rental service allows
    #[error("{count} rentals required, more than the limit of {cap}")]
    ThresholdExceeded { count: usize, cap: usize },

    /// Sample size larger than the population it is drawn from
    #[error("Sample size {sample} cannot exceed population size {population}")]
    InvalidSampleSize { sample: u64, population: u64 },

    /// More successes than population members
    #[error("Success count {successes} cannot exceed population size {population}")]
    InvalidCounts { successes: u64, population: u64 },

    /// No rented .dek file could be found
    #[error("No .dek file found in {}", dir.display())]
    NoRentedBinder { dir: PathBuf },

    /// Draft directory already exists
    #[error("Draft directory already exists: {}", path.display())]
    DraftExists { path: PathBuf },

    /// Draft directory has not been set up
    #[error("Draft directory not found: {}", path.display())]
    DraftNotFound { path: PathBuf },

    /// Draft name is empty after trimming
    #[error("No draft name provided")]
    InvalidDraftName,

    /// Card list is empty after stripping blank lines and comments
    #[error("No cards in population (card list is empty)")]
    EmptyPopulation,
}

impl DraftError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DraftError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for draft_binders operations
pub type Result<T> = std::result::Result<T, DraftError>;

//! Recoverable problems collected while an operation keeps going.

use std::fmt;

/// A warning produced by a parse or match step that did not abort it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A requested card resolved to nothing in the binder
    UnmatchedCard { card: String },
    /// A .dek file listed the same name twice; the later CatID won
    DuplicateCard {
        card: String,
        previous: String,
        replacement: String,
    },
    /// A `Cards` element lacked `Name` or `CatID` and was skipped
    MissingAttribute {
        attribute: &'static str,
        element: String,
    },
    /// A sample size larger than the population was not evaluated
    SampleSkipped { sample: u64, population: u64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmatchedCard { card } => write!(f, "'{card}' not found in binder"),
            Diagnostic::DuplicateCard {
                card,
                previous,
                replacement,
            } => write!(
                f,
                "Duplicate card name '{card}' (existing CatID: {previous}, new CatID: {replacement})"
            ),
            Diagnostic::MissingAttribute { attribute, element } => {
                write!(f, "Missing {attribute} in card element: {element}")
            }
            Diagnostic::SampleSkipped { sample, population } => write!(
                f,
                "Sample n={sample}: sample size > population size (N={population}), skipping"
            ),
        }
    }
}

/// A value together with the warnings raised while producing it
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    /// Outcome without any warnings
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// True if nothing went wrong along the way
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}

/// Log a diagnostic as a warning and keep it
pub(crate) fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}

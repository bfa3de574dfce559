use thiserror::Error;

/// Boxed error produced by an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during Tessera classification.
///
/// [`TesseraError::NoMatch`] and [`TesseraError::Unmatched`] are control-flow
/// signals: cascades and dispatch loops recover them locally. Every other
/// variant aborts processing of the current torrent.
#[derive(Debug, Error)]
pub enum TesseraError {
    /// A parser or classifier recognised no structure in its input.
    #[error("no match")]
    NoMatch,

    /// An action's precondition on the accumulated classification was not met.
    #[error("unmatched")]
    Unmatched,

    /// The caller cancelled the run or the search deadline elapsed.
    #[error("operation cancelled")]
    Cancelled,

    /// A rule definition failed validation.
    #[error("compile error at {path}: {message}")]
    Compile {
        /// JSON-pointer-like location inside the rule definition.
        path: String,
        /// What was wrong at that location.
        message: String,
    },

    /// The search collaborator failed.
    #[error(transparent)]
    Search(BoxError),
}

impl TesseraError {
    /// Wraps a collaborator failure.
    pub fn search(err: impl Into<BoxError>) -> Self {
        Self::Search(err.into())
    }

    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::Unmatched)
    }
}

/// Result type alias for Tessera operations.
pub type Result<T> = std::result::Result<T, TesseraError>;

use thiserror::Error;

/// Failure modes of the evaluation pipeline.
///
/// Malformed CDR masks are deliberately not represented here: a chain whose
/// mask does not segment into the canonical regions is filtered out and
/// counted, never raised.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("row {row}: malformed record: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("row {row}: separator {separator:?} occurs {count} times in sequence, expected exactly once")]
    AmbiguousSeparator {
        row: usize,
        separator: String,
        count: usize,
    },

    #[error("unsupported task: {0}")]
    UnsupportedTask(String),

    #[error("no input files found in {0}")]
    NoInputFiles(String),

    #[error("internal consistency error: {0}")]
    Internal(String),
}

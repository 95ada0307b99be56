//! Error types for question bank loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that can occur while loading or validating a question bank.
///
/// Any single invalid entry rejects the whole document; a bank either loads
/// completely or not at all.
#[derive(Debug, Error)]
pub enum BankError {
    /// The bank file could not be read.
    #[error("failed to read question bank `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not the expected JSON shape.
    #[error("malformed question bank document")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    /// A category failed field validation (positions are 1-based).
    #[error("invalid category #{number}: {reason}")]
    InvalidCategory { number: usize, reason: String },
    /// Two categories share the same name.
    #[error("duplicate category name `{name}`")]
    DuplicateCategory { name: String },
    /// A question failed field validation (positions are 1-based).
    #[error("invalid question #{number} in category `{category}`: {reason}")]
    InvalidQuestion {
        category: String,
        number: usize,
        reason: String,
    },
    /// The marked correct answer does not point at an option.
    #[error(
        "correct answer index {index} out of range for question #{number} in category `{category}` ({options} options)"
    )]
    CorrectIndexOutOfRange {
        category: String,
        number: usize,
        index: usize,
        options: usize,
    },
}

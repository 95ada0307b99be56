//! Question bank: immutable quiz content loaded from a JSON document.
//!
//! The bank is validated exhaustively at load time and never mutated
//! afterwards. There is no load-level cache: [`QuestionBank::load`] is a
//! pure function, and the application state owns the single instance every
//! session reads from.

mod error;
mod loader;

pub use error::BankError;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

/// One multiple-choice question with its canonical option order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Question text shown to the player.
    pub text: String,
    /// Possible answers in document order.
    pub options: Vec<String>,
    /// Position of the correct answer within `options`. The loader
    /// guarantees it is in range.
    pub correct_index: usize,
}

/// A named group of questions played as one quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique display name, also the lookup key.
    pub name: String,
    /// Questions in document order.
    pub questions: Vec<Question>,
}

impl Category {
    /// Number of questions in the category.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the category has no questions at all.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Validated question bank, categories keyed by name in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    categories: IndexMap<String, Category>,
}

impl QuestionBank {
    /// Load and validate a bank document from disk.
    ///
    /// Fails fast on the first invalid entry; nothing is retained from a
    /// failed load, so fixing the document and loading again succeeds.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| BankError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    /// Validate a bank document already held in memory.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BankError> {
        loader::parse(bytes)
    }

    /// Look up a category by its unique name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Look up a category by its document-order position.
    pub fn category_at(&self, index: usize) -> Option<&Category> {
        self.categories
            .get_index(index)
            .map(|(_, category)| category)
    }

    /// Iterate categories in document order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Number of categories in the bank.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the bank holds no categories. Structurally valid but
    /// unplayable; the lint tool warns about it.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of questions across all categories.
    pub fn total_questions(&self) -> usize {
        self.categories.values().map(Category::len).sum()
    }
}

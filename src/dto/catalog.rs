use serde::Serialize;

use crate::bank::{Category, QuestionBank};

/// One category as shown in the selection menu.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryOverview {
    /// Unique category name, also the choice token transports send back.
    pub name: String,
    /// Number of questions a full run goes through.
    pub question_count: usize,
}

impl CategoryOverview {
    /// Menu label in the `<name> - <n> questions` form.
    pub fn label(&self) -> String {
        format!("{} - {} questions", self.name, self.question_count)
    }
}

impl From<&Category> for CategoryOverview {
    fn from(value: &Category) -> Self {
        Self {
            name: value.name.clone(),
            question_count: value.len(),
        }
    }
}

/// The full selection menu, categories in document order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BankOverview {
    pub categories: Vec<CategoryOverview>,
    pub total_questions: usize,
}

impl From<&QuestionBank> for BankOverview {
    fn from(value: &QuestionBank) -> Self {
        Self {
            categories: value.categories().map(CategoryOverview::from).collect(),
            total_questions: value.total_questions(),
        }
    }
}

use serde::Serialize;

use crate::state::state_machine::QuizPhase;

/// Publicly visible session phase exposed to transports.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisiblePhase {
    /// No category chosen yet.
    Idle,
    /// Between questions; the next one can be requested.
    CategoryChosen,
    /// A question is displayed and awaits an answer.
    QuestionPending,
    /// The run went through every question.
    Completed,
    /// The run was abandoned early.
    Cancelled,
}

impl VisiblePhase {
    /// Whether a quiz is in progress, which drives transport keyboards.
    pub fn in_progress(&self) -> bool {
        matches!(self, Self::CategoryChosen | Self::QuestionPending)
    }
}

impl From<&QuizPhase> for VisiblePhase {
    fn from(value: &QuizPhase) -> Self {
        match value {
            QuizPhase::Idle => VisiblePhase::Idle,
            QuizPhase::CategoryChosen => VisiblePhase::CategoryChosen,
            QuizPhase::QuestionPending => VisiblePhase::QuestionPending,
            QuizPhase::Completed => VisiblePhase::Completed,
            QuizPhase::Cancelled => VisiblePhase::Cancelled,
        }
    }
}

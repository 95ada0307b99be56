use serde::Serialize;

use crate::state::session::{AnswerOutcome, PresentedQuestion, QuizSession, SessionRecord};
use crate::state::state_machine::QuizPhase;

/// Acknowledgement returned when a category was chosen and a run begins.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuizStarted {
    pub category: String,
    pub total_questions: usize,
}

impl From<&QuizSession> for QuizStarted {
    fn from(value: &QuizSession) -> Self {
        Self {
            category: value.category_name().to_string(),
            total_questions: value.total_questions(),
        }
    }
}

/// A dealt question as shown to the player. Never carries the correct index.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionPrompt {
    pub category: String,
    /// 1-based position in the run.
    pub number: usize,
    pub total: usize,
    pub text: String,
    /// Options in dealt order; submitted answers refer to positions here.
    pub options: Vec<String>,
}

impl From<(&QuizSession, PresentedQuestion)> for QuestionPrompt {
    fn from((session, presented): (&QuizSession, PresentedQuestion)) -> Self {
        Self {
            category: session.category_name().to_string(),
            number: presented.number,
            total: presented.total,
            text: presented.text,
            options: presented.options,
        }
    }
}

/// Feedback for an evaluated answer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// Text of the correct option, present for incorrect answers too.
    pub correct_option: String,
    /// Score after this answer.
    pub score: u32,
}

impl AnswerFeedback {
    /// Canonical feedback line transports display as-is.
    pub fn message(&self) -> String {
        if self.correct {
            "✅ Correct!".to_string()
        } else {
            format!(
                "❌ Incorrect! The correct answer was: {}",
                self.correct_option
            )
        }
    }
}

impl From<AnswerOutcome> for AnswerFeedback {
    fn from(value: AnswerOutcome) -> Self {
        Self {
            correct: value.correct,
            correct_option: value.correct_option,
            score: value.score,
        }
    }
}

/// How a run reached its end.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every question was answered.
    Completed,
    /// The player abandoned the run early.
    Cancelled,
}

/// Closing summary of a run, produced however the session ended.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResultSummary {
    pub category: String,
    pub score: u32,
    pub total_questions: usize,
    /// Whole-number percentage; 0 when the category had no questions.
    pub percentage: u32,
    pub duration_seconds: u64,
    pub outcome: RunOutcome,
    /// False when the record could not be persisted. The score still
    /// stands; only the history entry is missing.
    pub saved: bool,
}

impl ResultSummary {
    /// Build the summary for a finished session and its record.
    pub fn new(session: &QuizSession, record: &SessionRecord, saved: bool) -> Self {
        let total = session.total_questions();
        let percentage = if total == 0 {
            0
        } else {
            record.score * 100 / total as u32
        };
        let outcome = match session.phase() {
            QuizPhase::Cancelled => RunOutcome::Cancelled,
            _ => RunOutcome::Completed,
        };

        Self {
            category: record.category_name.clone(),
            score: record.score,
            total_questions: total,
            percentage,
            duration_seconds: record.duration.as_secs(),
            outcome,
            saved,
        }
    }

    /// Canonical closing line transports display as-is.
    pub fn message(&self) -> String {
        match self.outcome {
            RunOutcome::Completed => format!(
                "Quiz finished! Your score: {}/{}",
                self.score, self.total_questions
            ),
            RunOutcome::Cancelled => format!(
                "Quiz cancelled. Your score so far: {}/{}",
                self.score, self.total_questions
            ),
        }
    }
}

/// Either the next prompt of the run or its closing summary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextPrompt {
    /// A question was dealt and awaits an answer.
    Question(QuestionPrompt),
    /// The run is over; no further questions exist.
    Finished(ResultSummary),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_messages_follow_the_canonical_form() {
        let correct = AnswerFeedback {
            correct: true,
            correct_option: "Mars".into(),
            score: 3,
        };
        assert_eq!(correct.message(), "✅ Correct!");

        let incorrect = AnswerFeedback {
            correct: false,
            correct_option: "Mars".into(),
            score: 3,
        };
        assert_eq!(
            incorrect.message(),
            "❌ Incorrect! The correct answer was: Mars"
        );
    }
}

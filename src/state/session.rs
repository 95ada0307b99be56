use std::time::{Duration, SystemTime};

use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::bank::{Category, Question};
use crate::dao::models::SessionRecordEntity;
use crate::state::shuffle::{self, ShuffledOptions};
use crate::state::state_machine::{
    InvalidTransition, QuizEvent, QuizPhase, QuizStateMachine, Snapshot,
};

/// Chat-level identifier of the player a session belongs to.
pub type UserId = i64;

/// Errors produced by quiz session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// An event was applied in a phase that does not accept it.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    /// An answer arrived while no question was pending.
    #[error("no question is awaiting an answer")]
    NoPendingQuestion,
    /// The submitted index does not address a dealt option.
    #[error("answer index {selected} out of range for {options} options")]
    AnswerOutOfRange { selected: usize, options: usize },
    /// The session has not reached a terminal phase yet.
    #[error("session is still in progress")]
    StillRunning,
    /// The session result was already turned into a record once.
    #[error("session result was already recorded")]
    AlreadyFinished,
}

/// Option order dealt for the question currently awaiting an answer.
///
/// Private on purpose: the correct index never leaves the session.
#[derive(Debug, Clone)]
struct PendingQuestion {
    options: Vec<String>,
    correct_index: usize,
}

/// A question as dealt to the player. Carries no correct-answer marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    /// 1-based position within the session's question order.
    pub number: usize,
    /// Total questions in the run.
    pub total: usize,
    /// Question text.
    pub text: String,
    /// Options in dealt order.
    pub options: Vec<String>,
}

/// Outcome of asking for the next question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextQuestion {
    /// A question was dealt and awaits an answer.
    Prompt(PresentedQuestion),
    /// The question order is exhausted; the run is complete.
    Exhausted,
}

/// Evaluation of a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the selected option was the correct one.
    pub correct: bool,
    /// Text of the correct option, echoed in feedback either way.
    pub correct_option: String,
    /// Score after this answer.
    pub score: u32,
}

/// Final result of a finished session, produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Fresh unique identifier allocated when the record is produced.
    pub id: Uuid,
    /// Player the session belonged to.
    pub user_id: UserId,
    /// Category that was played.
    pub category_name: String,
    /// Correctly answered questions.
    pub score: u32,
    /// Questions answered before the session ended.
    pub questions_answered: u32,
    /// When the category was chosen.
    pub started_at: SystemTime,
    /// When the record was produced.
    pub ended_at: SystemTime,
    /// Wall-clock time between start and end.
    pub duration: Duration,
}

/// Aggregated state for one player's quiz run.
///
/// All mutation goes through the operation methods; the embedded state
/// machine rejects out-of-order events, so inconsistent field combinations
/// cannot be reached from outside this module.
#[derive(Debug, Clone)]
pub struct QuizSession {
    user_id: UserId,
    category_name: String,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    pending: Option<PendingQuestion>,
    started_at: SystemTime,
    recorded: bool,
    machine: QuizStateMachine,
}

impl QuizSession {
    /// Start a fresh run over a category.
    ///
    /// The question order is shuffled once here and fixed for the lifetime
    /// of the session; replaying a category always starts a new session and
    /// therefore always draws a new order.
    pub fn begin<R>(user_id: UserId, category: &Category, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut machine = QuizStateMachine::new();
        machine
            .apply(QuizEvent::SelectCategory)
            .expect("fresh machine accepts SelectCategory");

        Self {
            user_id,
            category_name: category.name.clone(),
            questions: shuffle::shuffle_questions(category, rng),
            current_index: 0,
            score: 0,
            pending: None,
            started_at: SystemTime::now(),
            recorded: false,
            machine,
        }
    }

    /// Deal the next question, or report exhaustion.
    ///
    /// Every deal draws a fresh option order; a question dealt again (for
    /// example after a process restart) never reuses a previous order. On
    /// exhaustion the session moves to [`QuizPhase::Completed`]; a category
    /// with no questions gets there on the first call.
    pub fn present_next<R>(&mut self, rng: &mut R) -> Result<NextQuestion, SessionError>
    where
        R: Rng + ?Sized,
    {
        if self.current_index >= self.questions.len() {
            self.machine.apply(QuizEvent::ExhaustQuestions)?;
            return Ok(NextQuestion::Exhausted);
        }

        self.machine.apply(QuizEvent::PresentQuestion)?;

        let question = &self.questions[self.current_index];
        let ShuffledOptions {
            options,
            correct_index,
        } = shuffle::shuffle_options(question, rng);

        let presented = PresentedQuestion {
            number: self.current_index + 1,
            total: self.questions.len(),
            text: question.text.clone(),
            options: options.clone(),
        };

        self.pending = Some(PendingQuestion {
            options,
            correct_index,
        });

        Ok(NextQuestion::Prompt(presented))
    }

    /// Evaluate an answer against the pending question.
    ///
    /// Out-of-range indexes are rejected without consuming the question.
    /// A valid answer always advances the run, correct or not.
    pub fn submit_answer(&mut self, selected: usize) -> Result<AnswerOutcome, SessionError> {
        let options = match &self.pending {
            Some(pending) => pending.options.len(),
            None => return Err(SessionError::NoPendingQuestion),
        };
        if selected >= options {
            return Err(SessionError::AnswerOutOfRange { selected, options });
        }

        self.machine.apply(QuizEvent::SubmitAnswer)?;
        let mut pending = self.pending.take().ok_or(SessionError::NoPendingQuestion)?;

        let correct = selected == pending.correct_index;
        if correct {
            self.score += 1;
        }
        self.current_index += 1;
        let correct_option = pending.options.swap_remove(pending.correct_index);

        Ok(AnswerOutcome {
            correct,
            correct_option,
            score: self.score,
        })
    }

    /// Abandon the run, keeping the partial score for the record.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.machine.apply(QuizEvent::Cancel)?;
        self.pending = None;
        Ok(())
    }

    /// Produce the session's write-once record.
    ///
    /// Only valid once the run reached a terminal phase; a second call
    /// reports [`SessionError::AlreadyFinished`]. Each produced record gets
    /// a fresh unique identifier.
    pub fn finish(&mut self) -> Result<SessionRecord, SessionError> {
        if !self.machine.phase().is_terminal() {
            return Err(SessionError::StillRunning);
        }
        if self.recorded {
            return Err(SessionError::AlreadyFinished);
        }
        self.recorded = true;

        let ended_at = SystemTime::now();
        // The clock can step backwards under NTP adjustments; clamp to zero.
        let duration = ended_at
            .duration_since(self.started_at)
            .unwrap_or(Duration::ZERO);

        Ok(SessionRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            category_name: self.category_name.clone(),
            score: self.score,
            questions_answered: self.current_index as u32,
            started_at: self.started_at,
            ended_at,
            duration,
        })
    }

    /// Player this session belongs to.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Name of the category being played.
    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    /// Current phase of the embedded state machine.
    pub fn phase(&self) -> QuizPhase {
        self.machine.phase()
    }

    /// Correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Questions answered so far.
    pub fn answered(&self) -> usize {
        self.current_index
    }

    /// Number of questions in the run.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// When the category was chosen.
    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    /// Whether the result has already been turned into a record.
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Machine snapshot for logs and forensics.
    pub fn snapshot(&self) -> Snapshot {
        self.machine.snapshot()
    }
}

impl From<SessionRecord> for SessionRecordEntity {
    fn from(value: SessionRecord) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            category_name: value.category_name,
            score: value.score,
            questions_answered: value.questions_answered,
            started_at: value.started_at,
            ended_at: value.ended_at,
            duration: value.duration,
        }
    }
}

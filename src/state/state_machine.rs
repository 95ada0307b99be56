use thiserror::Error;

/// High-level phases a quiz session can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No category has been chosen yet; the session has no question order.
    Idle,
    /// A category is active and the next question can be dealt.
    CategoryChosen,
    /// A question is on the table and an answer is awaited.
    QuestionPending,
    /// Every question of the category has been answered.
    Completed,
    /// The session was abandoned before reaching the end.
    Cancelled,
}

impl QuizPhase {
    /// Whether the session can still accept gameplay events.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::CategoryChosen | Self::QuestionPending)
    }

    /// Whether the session has reached one of the two end states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// A category was picked; the question order is fixed from here on.
    SelectCategory,
    /// Deal the next question with a freshly shuffled option order.
    PresentQuestion,
    /// The pending question was answered, correctly or not.
    SubmitAnswer,
    /// No questions remain; the run is complete.
    ExhaustQuestions,
    /// Abandon the session before completion.
    Cancel,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: QuizPhase,
    /// The event that cannot be applied from this phase.
    pub event: QuizEvent,
}

/// Snapshot of the current state machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase of the state machine.
    pub phase: QuizPhase,
    /// Version number of the state machine (increments on each transition).
    pub version: usize,
}

/// State machine implementing the category -> question loop -> finish flow.
///
/// Transitions are validated against the current phase and applied in one
/// step; an event that does not fit the phase leaves the machine untouched
/// and reports [`InvalidTransition`].
#[derive(Debug, Clone)]
pub struct QuizStateMachine {
    phase: QuizPhase,
    version: usize,
}

impl Default for QuizStateMachine {
    fn default() -> Self {
        Self {
            phase: QuizPhase::Idle,
            version: 0,
        }
    }
}

impl QuizStateMachine {
    /// Create a new state machine initialised in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Create a snapshot of the current state machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            version: self.version,
        }
    }

    /// Apply an event, moving the state machine to the next phase.
    /// Returns the new phase after the transition.
    pub fn apply(&mut self, event: QuizEvent) -> Result<QuizPhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(self.phase)
    }

    /// Compute a transition from an event if the transition is valid.
    fn compute_transition(&self, event: QuizEvent) -> Result<QuizPhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (QuizPhase::Idle, QuizEvent::SelectCategory) => QuizPhase::CategoryChosen,
            (QuizPhase::CategoryChosen, QuizEvent::PresentQuestion) => QuizPhase::QuestionPending,
            (QuizPhase::QuestionPending, QuizEvent::SubmitAnswer) => QuizPhase::CategoryChosen,
            (QuizPhase::CategoryChosen, QuizEvent::ExhaustQuestions) => QuizPhase::Completed,
            (QuizPhase::CategoryChosen, QuizEvent::Cancel) => QuizPhase::Cancelled,
            (QuizPhase::QuestionPending, QuizEvent::Cancel) => QuizPhase::Cancelled,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(sm: &mut QuizStateMachine, event: QuizEvent) -> QuizPhase {
        sm.apply(event).unwrap()
    }

    #[test]
    fn initial_state_is_idle() {
        let sm = QuizStateMachine::new();
        assert_eq!(sm.phase(), QuizPhase::Idle);
        assert_eq!(sm.version(), 0);
    }

    #[test]
    fn full_happy_path_through_quiz() {
        let mut sm = QuizStateMachine::new();

        assert_eq!(
            apply(&mut sm, QuizEvent::SelectCategory),
            QuizPhase::CategoryChosen
        );
        assert_eq!(
            apply(&mut sm, QuizEvent::PresentQuestion),
            QuizPhase::QuestionPending
        );
        assert_eq!(
            apply(&mut sm, QuizEvent::SubmitAnswer),
            QuizPhase::CategoryChosen
        );
        assert_eq!(
            apply(&mut sm, QuizEvent::PresentQuestion),
            QuizPhase::QuestionPending
        );
        assert_eq!(
            apply(&mut sm, QuizEvent::SubmitAnswer),
            QuizPhase::CategoryChosen
        );
        assert_eq!(
            apply(&mut sm, QuizEvent::ExhaustQuestions),
            QuizPhase::Completed
        );
        assert_eq!(sm.version(), 6);
    }

    #[test]
    fn cancel_allowed_from_both_live_phases() {
        let mut sm = QuizStateMachine::new();
        apply(&mut sm, QuizEvent::SelectCategory);
        assert_eq!(apply(&mut sm, QuizEvent::Cancel), QuizPhase::Cancelled);

        let mut sm = QuizStateMachine::new();
        apply(&mut sm, QuizEvent::SelectCategory);
        apply(&mut sm, QuizEvent::PresentQuestion);
        assert_eq!(apply(&mut sm, QuizEvent::Cancel), QuizPhase::Cancelled);
    }

    #[test]
    fn invalid_transition_returns_error() {
        let mut sm = QuizStateMachine::new();
        let err = sm.apply(QuizEvent::SubmitAnswer).unwrap_err();
        assert_eq!(err.from, QuizPhase::Idle);
        assert_eq!(err.event, QuizEvent::SubmitAnswer);
        assert_eq!(sm.phase(), QuizPhase::Idle);
        assert_eq!(sm.version(), 0);
    }

    #[test]
    fn terminal_phases_reject_every_event() {
        for terminal in [QuizEvent::ExhaustQuestions, QuizEvent::Cancel] {
            let mut sm = QuizStateMachine::new();
            apply(&mut sm, QuizEvent::SelectCategory);
            apply(&mut sm, terminal);
            let reached = sm.phase();
            assert!(reached.is_terminal());

            for event in [
                QuizEvent::SelectCategory,
                QuizEvent::PresentQuestion,
                QuizEvent::SubmitAnswer,
                QuizEvent::ExhaustQuestions,
                QuizEvent::Cancel,
            ] {
                let err = sm.apply(event).unwrap_err();
                assert_eq!(err.from, reached);
                assert_eq!(sm.phase(), reached);
            }
        }
    }

    #[test]
    fn question_cannot_be_dealt_twice_without_an_answer() {
        let mut sm = QuizStateMachine::new();
        apply(&mut sm, QuizEvent::SelectCategory);
        apply(&mut sm, QuizEvent::PresentQuestion);

        let err = sm.apply(QuizEvent::PresentQuestion).unwrap_err();
        assert_eq!(err.from, QuizPhase::QuestionPending);
        assert_eq!(err.event, QuizEvent::PresentQuestion);
    }

    #[test]
    fn exhaustion_only_checked_between_questions() {
        let mut sm = QuizStateMachine::new();
        apply(&mut sm, QuizEvent::SelectCategory);
        apply(&mut sm, QuizEvent::PresentQuestion);

        let err = sm.apply(QuizEvent::ExhaustQuestions).unwrap_err();
        assert_eq!(err.from, QuizPhase::QuestionPending);
    }
}

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        catalog::BankOverview,
        events::{AddressedEvent, PhaseChangedEvent},
        phase::VisiblePhase,
        play::{AnswerFeedback, QuestionPrompt, ResultSummary},
    },
    state::{SharedState, session::UserId, state_machine::QuizPhase},
};

const EVENT_PHASE_CHANGED: &str = "phase_changed";
const EVENT_CATEGORIES_LISTED: &str = "categories_listed";
const EVENT_QUESTION_PRESENTED: &str = "question_presented";
const EVENT_ANSWER_EVALUATED: &str = "answer_evaluated";
const EVENT_QUIZ_FINISHED: &str = "quiz_finished";

/// Broadcast a quiz phase change for one player.
pub fn broadcast_phase_changed(state: &SharedState, user_id: UserId, phase: &QuizPhase) {
    let phase = VisiblePhase::from(phase);
    let payload = PhaseChangedEvent {
        phase,
        in_progress: phase.in_progress(),
    };
    send_event(state, user_id, EVENT_PHASE_CHANGED, &payload);
}

/// Broadcast the category catalog shown to one player.
pub fn broadcast_categories(state: &SharedState, user_id: UserId, overview: &BankOverview) {
    send_event(state, user_id, EVENT_CATEGORIES_LISTED, overview);
}

/// Broadcast a freshly dealt question prompt.
pub fn broadcast_question(state: &SharedState, user_id: UserId, prompt: &QuestionPrompt) {
    send_event(state, user_id, EVENT_QUESTION_PRESENTED, prompt);
}

/// Broadcast the evaluation of a submitted answer.
pub fn broadcast_feedback(state: &SharedState, user_id: UserId, feedback: &AnswerFeedback) {
    send_event(state, user_id, EVENT_ANSWER_EVALUATED, feedback);
}

/// Broadcast the final summary of a finished run.
pub fn broadcast_result(state: &SharedState, user_id: UserId, summary: &ResultSummary) {
    send_event(state, user_id, EVENT_QUIZ_FINISHED, summary);
}

fn send_event(state: &SharedState, user_id: UserId, event: &str, payload: &impl Serialize) {
    match AddressedEvent::json(user_id, event.to_string(), payload) {
        Ok(event) => state.events().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize presentation event payload"),
    }
}

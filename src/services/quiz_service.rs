use tracing::{debug, error, info, warn};

use crate::{
    dto::{
        catalog::BankOverview,
        play::{AnswerFeedback, NextPrompt, QuestionPrompt, QuizStarted, ResultSummary},
    },
    error::ServiceError,
    services::events,
    state::{
        SharedState,
        session::{NextQuestion, QuizSession, SessionRecord, UserId},
    },
};

/// Return the category catalog offered to a player.
pub fn list_categories(state: &SharedState, user_id: UserId) -> BankOverview {
    let overview = BankOverview::from(state.bank());
    events::broadcast_categories(state, user_id, &overview);
    overview
}

/// Start a fresh quiz run for the player in the named category.
///
/// A session already running for the player is abandoned first and its
/// partial result recorded, so picking a new category mid-run behaves the
/// same as ending the quiz and starting over.
pub async fn choose_category(
    state: &SharedState,
    user_id: UserId,
    category_name: &str,
) -> Result<QuizStarted, ServiceError> {
    let category = state
        .bank()
        .category(category_name)
        .ok_or_else(|| ServiceError::CategoryNotFound(category_name.to_string()))?;

    if let Some((_, previous)) = state.sessions().remove(&user_id) {
        info!(
            user = user_id,
            category = previous.category_name(),
            "abandoning active session before a new run"
        );
        finalize_session(state, previous).await?;
    }

    let session = {
        let mut rng = rand::rng();
        QuizSession::begin(user_id, category, &mut rng)
    };
    let started = QuizStarted::from(&session);
    let phase = session.phase();
    state.sessions().insert(user_id, session);

    info!(user = user_id, category = category_name, "quiz started");
    events::broadcast_phase_changed(state, user_id, &phase);
    Ok(started)
}

/// Deal the next question, or finish the run once the category is exhausted.
///
/// Exhaustion removes the session from the registry; the returned summary is
/// the last the caller hears of it. A deal rejected by the session (for
/// example a duplicate request while a question is pending) is logged with
/// the machine snapshot and leaves the session untouched.
pub async fn next_question(
    state: &SharedState,
    user_id: UserId,
) -> Result<NextPrompt, ServiceError> {
    let dealt = {
        let Some(mut session) = state.sessions().get_mut(&user_id) else {
            return Err(ServiceError::NoSession(user_id));
        };
        let mut rng = rand::rng();
        match session.present_next(&mut rng) {
            Ok(NextQuestion::Prompt(question)) => {
                let prompt = QuestionPrompt::from((&*session, question));
                Some((prompt, session.phase()))
            }
            Ok(NextQuestion::Exhausted) => None,
            Err(err) => {
                warn!(
                    user = user_id,
                    state = ?session.snapshot(),
                    error = %err,
                    "question deal rejected"
                );
                return Err(err.into());
            }
        }
    };

    match dealt {
        Some((prompt, phase)) => {
            events::broadcast_question(state, user_id, &prompt);
            events::broadcast_phase_changed(state, user_id, &phase);
            Ok(NextPrompt::Question(prompt))
        }
        None => {
            let Some((_, session)) = state.sessions().remove(&user_id) else {
                return Err(ServiceError::NoSession(user_id));
            };
            let summary = finalize_session(state, session).await?;
            Ok(NextPrompt::Finished(summary))
        }
    }
}

/// Evaluate a submitted answer against the pending question.
///
/// Rejected submissions (nothing pending, index out of range) are logged
/// with the machine snapshot and leave the session untouched.
pub fn submit_answer(
    state: &SharedState,
    user_id: UserId,
    selected: usize,
) -> Result<AnswerFeedback, ServiceError> {
    let (feedback, phase) = {
        let Some(mut session) = state.sessions().get_mut(&user_id) else {
            return Err(ServiceError::NoSession(user_id));
        };
        match session.submit_answer(selected) {
            Ok(outcome) => (AnswerFeedback::from(outcome), session.phase()),
            Err(err) => {
                warn!(
                    user = user_id,
                    state = ?session.snapshot(),
                    selected,
                    error = %err,
                    "answer rejected"
                );
                return Err(err.into());
            }
        }
    };

    info!(
        user = user_id,
        correct = feedback.correct,
        score = feedback.score,
        "answer evaluated"
    );
    events::broadcast_feedback(state, user_id, &feedback);
    events::broadcast_phase_changed(state, user_id, &phase);
    Ok(feedback)
}

/// Abandon the player's active run, recording the partial result.
pub async fn end_session(
    state: &SharedState,
    user_id: UserId,
) -> Result<ResultSummary, ServiceError> {
    let Some((_, session)) = state.sessions().remove(&user_id) else {
        return Err(ServiceError::NoSession(user_id));
    };
    info!(
        user = user_id,
        category = session.category_name(),
        answered = session.answered(),
        "quiz abandoned"
    );
    finalize_session(state, session).await
}

/// Drive a session removed from the registry to its recorded end.
async fn finalize_session(
    state: &SharedState,
    mut session: QuizSession,
) -> Result<ResultSummary, ServiceError> {
    if session.phase().is_live() {
        session.cancel()?;
    }
    let record = session.finish()?;
    let saved = persist_record(state, &record).await;
    let summary = ResultSummary::new(&session, &record, saved);

    events::broadcast_result(state, session.user_id(), &summary);
    events::broadcast_phase_changed(state, session.user_id(), &session.phase());
    Ok(summary)
}

/// Persist a finished run, reporting failure through the return value only.
async fn persist_record(state: &SharedState, record: &SessionRecord) -> bool {
    let Some(store) = state.session_store().await else {
        warn!(
            user = record.user_id,
            "no session store installed; quiz result not recorded"
        );
        return false;
    };

    match store.record(record.clone().into()).await {
        Ok(record_id) => {
            debug!(user = record.user_id, record = %record_id, "quiz result recorded");
            true
        }
        Err(err) => {
            error!(
                user = record.user_id,
                category = %record.category_name,
                error = %err,
                "failed to record quiz result"
            );
            false
        }
    }
}

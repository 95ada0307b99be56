//! End-to-end quiz flows driven through the service layer, the way a
//! transport adapter would drive them.

use std::io;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio_stream::StreamExt;

use trivia_back::bank::QuestionBank;
use trivia_back::config::AppConfig;
use trivia_back::dao::models::SessionRecordEntity;
use trivia_back::dao::session_store::{MemorySessionStore, RecordId, SessionStore};
use trivia_back::dao::storage::{StorageError, StorageResult};
use trivia_back::dto::play::{NextPrompt, QuestionPrompt, RunOutcome};
use trivia_back::error::{ServiceError, UserError};
use trivia_back::services::{history_service, quiz_service};
use trivia_back::state::{AppState, SharedState};

const PLAYER: i64 = 1001;

const BANK: &[u8] = br#"{
    "categories": [
        {
            "name": "Science",
            "questions": [
                {
                    "question": "What planet is known as the Red Planet?",
                    "options": ["Venus", "Mars", "Jupiter", "Saturn"],
                    "correct_answer_index": 1
                },
                {
                    "question": "What is H2O better known as?",
                    "options": ["Salt", "Water", "Steam"],
                    "correct_answer_index": 1
                }
            ]
        },
        {
            "name": "Empty",
            "questions": []
        }
    ]
}"#;

async fn state_with_store() -> (SharedState, Arc<MemorySessionStore>) {
    let bank = QuestionBank::from_slice(BANK).unwrap();
    let state = AppState::new(AppConfig::default(), bank);
    let store = Arc::new(MemorySessionStore::new());
    state.install_session_store(store.clone()).await;
    (state, store)
}

/// Option orders are freshly shuffled per deal, so the correct position is
/// located by text, never assumed.
fn correct_position(prompt: &QuestionPrompt) -> usize {
    let answer = match prompt.text.as_str() {
        "What planet is known as the Red Planet?" => "Mars",
        "What is H2O better known as?" => "Water",
        other => panic!("unexpected question: {other}"),
    };
    prompt
        .options
        .iter()
        .position(|option| option == answer)
        .unwrap()
}

fn wrong_position(prompt: &QuestionPrompt) -> usize {
    (correct_position(prompt) + 1) % prompt.options.len()
}

async fn deal(state: &SharedState) -> QuestionPrompt {
    match quiz_service::next_question(state, PLAYER).await.unwrap() {
        NextPrompt::Question(prompt) => prompt,
        NextPrompt::Finished(summary) => panic!("run ended early: {summary:?}"),
    }
}

#[tokio::test]
async fn science_run_scores_one_of_two_and_is_recorded() {
    let (state, _store) = state_with_store().await;

    let overview = quiz_service::list_categories(&state, PLAYER);
    assert_eq!(overview.categories.len(), 2);
    assert_eq!(overview.categories[0].label(), "Science - 2 questions");

    let started = quiz_service::choose_category(&state, PLAYER, "Science")
        .await
        .unwrap();
    assert_eq!(started.category, "Science");
    assert_eq!(started.total_questions, 2);

    let first = deal(&state).await;
    assert_eq!(first.number, 1);
    assert_eq!(first.total, 2);
    let feedback = quiz_service::submit_answer(&state, PLAYER, correct_position(&first)).unwrap();
    assert!(feedback.correct);
    assert_eq!(feedback.score, 1);
    assert_eq!(feedback.message(), "✅ Correct!");

    let second = deal(&state).await;
    assert_eq!(second.number, 2);
    let feedback = quiz_service::submit_answer(&state, PLAYER, wrong_position(&second)).unwrap();
    assert!(!feedback.correct);
    assert_eq!(feedback.score, 1);
    assert!(feedback.message().starts_with("❌ Incorrect!"));

    let NextPrompt::Finished(summary) = quiz_service::next_question(&state, PLAYER).await.unwrap()
    else {
        panic!("expected the run to finish");
    };
    assert_eq!(summary.score, 1);
    assert_eq!(summary.total_questions, 2);
    assert_eq!(summary.percentage, 50);
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert!(summary.saved);
    assert_eq!(summary.message(), "Quiz finished! Your score: 1/2");

    let entries = history_service::history(&state, PLAYER).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, "Science");
    assert_eq!(entries[0].score, 1);
    assert_eq!(entries[0].questions_answered, 2);

    let best = history_service::high_score(&state, PLAYER, "Science")
        .await
        .unwrap();
    assert_eq!(best.best_score, 1);
}

#[tokio::test]
async fn empty_category_completes_at_zero_of_zero() {
    let (state, store) = state_with_store().await;
    assert!(state.bank().category("Empty").unwrap().is_empty());

    quiz_service::choose_category(&state, PLAYER, "Empty")
        .await
        .unwrap();
    let NextPrompt::Finished(summary) = quiz_service::next_question(&state, PLAYER).await.unwrap()
    else {
        panic!("expected an immediate finish");
    };

    assert_eq!(summary.score, 0);
    assert_eq!(summary.total_questions, 0);
    assert_eq!(summary.percentage, 0);
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.message(), "Quiz finished! Your score: 0/0");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn abandoning_mid_run_keeps_the_partial_record() {
    let (state, _store) = state_with_store().await;

    quiz_service::choose_category(&state, PLAYER, "Science")
        .await
        .unwrap();
    let prompt = deal(&state).await;
    quiz_service::submit_answer(&state, PLAYER, correct_position(&prompt)).unwrap();

    let summary = quiz_service::end_session(&state, PLAYER).await.unwrap();
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(summary.score, 1);
    assert!(summary.saved);
    assert_eq!(summary.message(), "Quiz cancelled. Your score so far: 1/2");

    let entries = history_service::history(&state, PLAYER).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].questions_answered, 1);

    // Replaying the category starts over with nothing carried across.
    let started = quiz_service::choose_category(&state, PLAYER, "Science")
        .await
        .unwrap();
    assert_eq!(started.total_questions, 2);
    let prompt = deal(&state).await;
    assert_eq!(prompt.number, 1);
}

struct FailingStore;

fn backend_down(operation: &str) -> StorageError {
    StorageError::unavailable(operation, io::Error::other("backend down"))
}

impl SessionStore for FailingStore {
    fn record(&self, _record: SessionRecordEntity) -> BoxFuture<'static, StorageResult<RecordId>> {
        Box::pin(async { Err(backend_down("record")) })
    }

    fn history(
        &self,
        _user_id: i64,
        _limit: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<SessionRecordEntity>>> {
        Box::pin(async { Err(backend_down("history")) })
    }

    fn high_score(
        &self,
        _user_id: i64,
        _category: &str,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>> {
        Box::pin(async { Err(backend_down("high_score")) })
    }
}

#[tokio::test]
async fn storage_failure_never_hides_the_score() {
    let bank = QuestionBank::from_slice(BANK).unwrap();
    let state = AppState::new(AppConfig::default(), bank);
    state.install_session_store(Arc::new(FailingStore)).await;

    quiz_service::choose_category(&state, PLAYER, "Science")
        .await
        .unwrap();
    for _ in 0..2 {
        let prompt = deal(&state).await;
        quiz_service::submit_answer(&state, PLAYER, correct_position(&prompt)).unwrap();
    }

    let NextPrompt::Finished(summary) = quiz_service::next_question(&state, PLAYER).await.unwrap()
    else {
        panic!("expected the run to finish");
    };
    assert_eq!(summary.score, 2);
    assert_eq!(summary.percentage, 100);
    assert!(!summary.saved);

    // History queries fail hard by contrast, surfaced as the generic apology.
    let err = history_service::history(&state, PLAYER).await.unwrap_err();
    assert!(matches!(err, ServiceError::Unavailable(_)));
    assert_eq!(UserError::from(err), UserError::Apology);
}

#[tokio::test]
async fn the_event_stream_carries_the_whole_run() {
    let (state, _store) = state_with_store().await;
    let mut stream = state.events().stream();

    quiz_service::choose_category(&state, PLAYER, "Science")
        .await
        .unwrap();
    let prompt = deal(&state).await;
    quiz_service::submit_answer(&state, PLAYER, correct_position(&prompt)).unwrap();

    let mut names = Vec::new();
    for _ in 0..5 {
        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.user_id, PLAYER);
        names.push(event.event.unwrap());
    }
    assert_eq!(
        names,
        [
            "phase_changed",
            "question_presented",
            "phase_changed",
            "answer_evaluated",
            "phase_changed",
        ]
    );
}

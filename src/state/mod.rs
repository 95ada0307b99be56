mod events;
pub mod session;
pub mod shuffle;
pub mod state_machine;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{RwLock, watch};

use crate::{
    bank::QuestionBank,
    config::AppConfig,
    dao::session_store::SessionStore,
    state::session::{QuizSession, UserId},
};

pub use self::events::EventHub;
pub use self::state_machine::Snapshot;

pub type SharedState = Arc<AppState>;

/// Central application state owning the question bank, the per-user session
/// registry and database handles.
pub struct AppState {
    config: AppConfig,
    bank: QuestionBank,
    session_store: RwLock<Option<Arc<dyn SessionStore>>>,
    sessions: DashMap<UserId, QuizSession>,
    events: EventHub,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is
    /// installed. Quizzes run fine without one; finished sessions simply go
    /// unrecorded and history queries are refused.
    pub fn new(config: AppConfig, bank: QuestionBank) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        let events = EventHub::new(config.event_capacity);
        Arc::new(Self {
            config,
            bank,
            session_store: RwLock::new(None),
            sessions: DashMap::new(),
            events,
            degraded: degraded_tx,
        })
    }

    /// Runtime configuration the state was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The immutable question bank shared by every session.
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Obtain a handle to the current session store, if one is installed.
    pub async fn session_store(&self) -> Option<Arc<dyn SessionStore>> {
        let guard = self.session_store.read().await;
        guard.as_ref().cloned()
    }

    /// Install a new session store implementation and leave degraded mode.
    pub async fn install_session_store(&self, store: Arc<dyn SessionStore>) {
        {
            let mut guard = self.session_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current session store and enter degraded mode.
    pub async fn clear_session_store(&self) {
        {
            let mut guard = self.session_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.session_store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Registry of live quiz sessions keyed by player. The map entry lock
    /// serialises operations on one player's session.
    pub fn sessions(&self) -> &DashMap<UserId, QuizSession> {
        &self.sessions
    }

    /// Broadcast hub carrying presentation events to transports.
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// Update the degraded flag, notifying watchers only on a change.
    fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }
}

use serde::Serialize;

use crate::dto::phase::VisiblePhase;

#[derive(Clone, Debug)]
/// Dispatched payload carried across the presentation event channel.
///
/// Events are addressed: a transport dispatcher routes each one to the chat
/// identified by `user_id`.
pub struct AddressedEvent {
    pub user_id: i64,
    pub event: Option<String>,
    pub data: String,
}

impl AddressedEvent {
    /// Convenience wrapper that serialises `payload` into the data field.
    pub fn json<E, T>(user_id: i64, event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            user_id,
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize)]
/// Broadcast whenever a session's phase changes.
pub struct PhaseChangedEvent {
    pub phase: VisiblePhase,
    /// Drives the in-progress keyboard switching on transports.
    pub in_progress: bool,
}

/// Presentation event message generation.
pub mod events;
/// Recorded history and high score queries.
pub mod history_service;
/// Core quiz logic over the session registry.
pub mod quiz_service;

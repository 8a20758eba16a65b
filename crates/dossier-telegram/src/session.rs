//! Per-chat conversation state.

/// What the next message from a chat means.
///
/// Transitions happen only via `/start` and the menu callbacks; a handled
/// upload or answered query keeps its state, so consecutive files and
/// follow-up questions work without reopening the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingFile,
    AwaitingQuery,
}

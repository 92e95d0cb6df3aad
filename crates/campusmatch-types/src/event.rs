//! State-change notifications published by the core components.
//!
//! Presentation adapters subscribe to these instead of being called back
//! from inside navigation handlers, which keeps state transitions
//! decoupled from rendering.

use crate::user::UserId;

/// Notification that a core component's state changed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The candidate set was wholesale-replaced and the cursor reset.
    MatchesRefreshed { count: usize },

    /// The cursor moved over an unchanged candidate set.
    CursorMoved { position: usize, total: usize },

    /// A conversation became the active one. Any prior thread was
    /// discarded.
    ChatOpened { partner: UserId },

    /// The active thread was wholesale-replaced from the server.
    ThreadRefreshed { partner: UserId, count: usize },

    /// An outgoing message was accepted by the server.
    MessageSent { partner: UserId },
}

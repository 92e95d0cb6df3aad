use thiserror::Error;

/// Unified failure surface for remote calls.
///
/// Transport failures and server rejections deliberately share this one
/// `Err` path so callers have a single failure branch to handle. None of
/// these are fatal: the affected component keeps its last-known-good
/// state and the caller surfaces the message.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never completed (unreachable host, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `message` is the
    /// server-provided `detail` field when present, else a generic
    /// fallback, and is shown to the user verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body could not be decoded.
    #[error("unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the server rejected the call for a missing or expired
    /// token. Interactive flows clear the session when they see this.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }
}

/// Errors from conversation operations.
///
/// The precondition variants are caught locally, before any network call
/// is made.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("no chat is open")]
    NoActiveChat,

    #[error("message text is empty")]
    EmptyMessage,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ChatError {
    /// Whether this error was raised before any request went out.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ChatError::NoActiveChat | ChatError::EmptyMessage)
    }
}

//! MatchmakerApi trait definition.
//!
//! This is the seam between the state machines and the network: the
//! browser and conversation controller call the service only through
//! this trait. The reqwest implementation lives in campusmatch-infra;
//! tests substitute in-memory fakes.

use campusmatch_types::error::ApiError;
use campusmatch_types::matching::MatchCandidate;
use campusmatch_types::message::{ChatHelper, ChatMessage, NewMessage};
use campusmatch_types::user::UserId;

/// Authenticated calls the core components need from the service.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Every
/// method resolves to a single `Result` -- transport failures and server
/// rejections share the `ApiError` path, so callers have exactly one
/// failure branch.
pub trait MatchmakerApi: Send + Sync {
    /// Fetch the ranked candidate list for the caller.
    fn fetch_matches(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MatchCandidate>, ApiError>> + Send;

    /// Fetch the full two-person thread with `other`, oldest first.
    fn fetch_thread(
        &self,
        other: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, ApiError>> + Send;

    /// Send one message. The returned record is the server's copy; the
    /// conversation controller ignores it and re-fetches the thread for
    /// the authoritative post-send state.
    fn send_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, ApiError>> + Send;

    /// Fetch the AI summary and suggested openers for the thread with
    /// `other`.
    fn chat_helper(
        &self,
        other: UserId,
    ) -> impl std::future::Future<Output = Result<ChatHelper, ApiError>> + Send;
}

//! Conversation controller: which chat is open and its message thread.
//!
//! A state machine over the active partner: Idle (no partner) until
//! `open` selects one, then Active until the surrounding flow drops the
//! controller. `refresh_thread`, `send`, and `fetch_suggestions` never
//! change which partner is active. The thread is only ever replaced
//! wholesale from the server -- there is no optimistic local append.

use std::sync::Arc;

use campusmatch_types::error::{ApiError, ChatError};
use campusmatch_types::event::SessionEvent;
use campusmatch_types::message::{Authorship, ChatHelper, ChatMessage, NewMessage};
use campusmatch_types::user::UserId;

use crate::api::MatchmakerApi;
use crate::event::EventBus;
use crate::token::TokenStore;

/// Owns the active chat partner and the message thread for that chat.
///
/// The thread is meaningful only while a partner is set; switching
/// partners discards it and fetches fresh.
pub struct ConversationController<A> {
    api: Arc<A>,
    tokens: Arc<TokenStore>,
    events: EventBus,
    partner: Option<UserId>,
    thread: Vec<ChatMessage>,
}

impl<A: MatchmakerApi> ConversationController<A> {
    /// Create an Idle controller (no chat open).
    pub fn new(api: Arc<A>, tokens: Arc<TokenStore>, events: EventBus) -> Self {
        Self {
            api,
            tokens,
            events,
            partner: None,
            thread: Vec::new(),
        }
    }

    /// The active partner, or `None` while Idle.
    pub fn partner(&self) -> Option<UserId> {
        self.partner
    }

    /// The current thread, oldest first.
    pub fn thread(&self) -> &[ChatMessage] {
        &self.thread
    }

    /// Open the conversation with `partner`.
    ///
    /// Discards any prior thread, then fetches this one. The controller
    /// is Active(partner) even if the initial fetch fails -- the thread
    /// simply stays empty until a later refresh succeeds.
    pub async fn open(&mut self, partner: UserId) -> Result<(), ApiError> {
        self.partner = Some(partner);
        self.thread.clear();
        self.events.publish(SessionEvent::ChatOpened { partner });
        self.refresh_thread().await
    }

    /// Re-fetch the active thread from the server.
    ///
    /// A no-op while Idle. On success the thread is wholesale-replaced
    /// in server order (trusted as-is, not re-sorted); on failure the
    /// thread is left unchanged and the error surfaces to the caller.
    pub async fn refresh_thread(&mut self) -> Result<(), ApiError> {
        let Some(partner) = self.partner else {
            return Ok(());
        };

        let fetched = self.api.fetch_thread(partner).await?;
        tracing::debug!(%partner, count = fetched.len(), "replaced chat thread");
        self.thread = fetched;
        self.events.publish(SessionEvent::ThreadRefreshed {
            partner,
            count: self.thread.len(),
        });
        Ok(())
    }

    /// Send `text` to the active partner.
    ///
    /// Precondition failures (no chat open, empty trimmed text) are
    /// reported without any network call. On success the thread is
    /// re-fetched once for the authoritative post-send state; the local
    /// thread is never optimistically appended to. On failure the thread
    /// is left unchanged.
    pub async fn send(&mut self, text: &str) -> Result<(), ChatError> {
        let partner = self.partner.ok_or(ChatError::NoActiveChat)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = NewMessage {
            to_user_id: partner,
            text: text.to_string(),
        };
        self.api.send_message(&message).await?;
        self.events.publish(SessionEvent::MessageSent { partner });

        self.refresh_thread().await?;
        Ok(())
    }

    /// Fetch the AI summary and suggested openers for the active chat.
    ///
    /// Precondition failure while Idle, with no network call.
    pub async fn fetch_suggestions(&self) -> Result<ChatHelper, ChatError> {
        let partner = self.partner.ok_or(ChatError::NoActiveChat)?;
        let helper = self.api.chat_helper(partner).await?;
        Ok(helper)
    }

    /// Classify a thread message as mine or theirs.
    ///
    /// "Mine" requires the sender id to equal the token-derived own
    /// identity. When own identity is unknown every message is theirs --
    /// that fallback is part of the contract, not an edge case.
    pub fn classify(&self, message: &ChatMessage) -> Authorship {
        match self.tokens.own_identity() {
            Some(me) if message.from_user_id == me => Authorship::Mine,
            _ => Authorship::Theirs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Utc;

    use campusmatch_types::matching::MatchCandidate;

    /// Fake port with queued thread responses and call counters.
    #[derive(Default)]
    struct FakeApi {
        threads: Mutex<VecDeque<Result<Vec<ChatMessage>, ApiError>>>,
        helpers: Mutex<VecDeque<Result<ChatHelper, ApiError>>>,
        send_result: Mutex<Option<ApiError>>,
        thread_calls: AtomicUsize,
        send_calls: AtomicUsize,
        helper_calls: AtomicUsize,
    }

    impl FakeApi {
        fn queue_thread(&self, response: Result<Vec<ChatMessage>, ApiError>) {
            self.threads.lock().unwrap().push_back(response);
        }

        fn queue_helper(&self, response: Result<ChatHelper, ApiError>) {
            self.helpers.lock().unwrap().push_back(response);
        }

        fn fail_next_send(&self, err: ApiError) {
            *self.send_result.lock().unwrap() = Some(err);
        }
    }

    impl MatchmakerApi for FakeApi {
        async fn fetch_matches(&self) -> Result<Vec<MatchCandidate>, ApiError> {
            panic!("not used by the conversation controller")
        }

        async fn fetch_thread(&self, _other: UserId) -> Result<Vec<ChatMessage>, ApiError> {
            self.thread_calls.fetch_add(1, Ordering::SeqCst);
            self.threads
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch_thread call")
        }

        async fn send_message(&self, message: &NewMessage) -> Result<ChatMessage, ApiError> {
            self.send_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.send_result.lock().unwrap().take() {
                return Err(err);
            }
            Ok(ChatMessage {
                id: 1,
                from_user_id: UserId::new(999),
                to_user_id: message.to_user_id,
                text: message.text.clone(),
                created_at: Utc::now(),
            })
        }

        async fn chat_helper(&self, _other: UserId) -> Result<ChatHelper, ApiError> {
            self.helper_calls.fetch_add(1, Ordering::SeqCst);
            self.helpers
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected chat_helper call")
        }
    }

    fn message(id: i64, from: i64, to: i64, text: &str) -> ChatMessage {
        ChatMessage {
            id,
            from_user_id: UserId::new(from),
            to_user_id: UserId::new(to),
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    fn token_for_user(id: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::json!({ "sub": id.to_string() }).to_string());
        format!("header.{payload}.signature")
    }

    fn controller(api: Arc<FakeApi>) -> (ConversationController<FakeApi>, Arc<TokenStore>) {
        let tokens = Arc::new(TokenStore::new());
        let controller = ConversationController::new(api, Arc::clone(&tokens), EventBus::new(16));
        (controller, tokens)
    }

    #[tokio::test]
    async fn open_fetches_the_thread() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(vec![message(1, 42, 7, "hi"), message(2, 7, 42, "hey")]));
        let (mut chat, _) = controller(Arc::clone(&api));

        chat.open(UserId::new(42)).await.unwrap();
        assert_eq!(chat.partner(), Some(UserId::new(42)));
        assert_eq!(chat.thread().len(), 2);
        assert_eq!(api.thread_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn open_with_failed_fetch_leaves_thread_empty_but_active() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Err(ApiError::Transport("unreachable".to_string())));
        let (mut chat, _) = controller(Arc::clone(&api));

        let err = chat.open(UserId::new(42)).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(chat.partner(), Some(UserId::new(42)));
        assert!(chat.thread().is_empty());
    }

    #[tokio::test]
    async fn switching_partner_discards_previous_thread() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(vec![message(1, 5, 7, "old")]));
        api.queue_thread(Err(ApiError::Transport("down".to_string())));
        let (mut chat, _) = controller(Arc::clone(&api));

        chat.open(UserId::new(5)).await.unwrap();
        assert_eq!(chat.thread().len(), 1);

        // Opening another partner drops the old thread even though the
        // fresh fetch fails.
        let _ = chat.open(UserId::new(6)).await;
        assert_eq!(chat.partner(), Some(UserId::new(6)));
        assert!(chat.thread().is_empty());
    }

    #[tokio::test]
    async fn refresh_while_idle_is_a_noop() {
        let api = Arc::new(FakeApi::default());
        let (mut chat, _) = controller(Arc::clone(&api));

        chat.refresh_thread().await.unwrap();
        assert_eq!(api.thread_calls.load(Ordering::SeqCst), 0);
        assert!(chat.thread().is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_thread() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(vec![message(1, 5, 7, "kept")]));
        api.queue_thread(Err(ApiError::Rejected {
            status: 500,
            message: "boom".to_string(),
        }));
        let (mut chat, _) = controller(Arc::clone(&api));

        chat.open(UserId::new(5)).await.unwrap();
        let err = chat.refresh_thread().await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
        assert_eq!(chat.thread().len(), 1);
        assert_eq!(chat.thread()[0].text, "kept");
    }

    #[tokio::test]
    async fn send_triggers_exactly_one_refresh() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(Vec::new()));
        api.queue_thread(Ok(vec![message(1, 9, 5, "hello")]));
        let (mut chat, _) = controller(Arc::clone(&api));

        chat.open(UserId::new(5)).await.unwrap();
        chat.send("hello").await.unwrap();

        assert_eq!(api.send_calls.load(Ordering::SeqCst), 1);
        // One fetch from open, exactly one more from send.
        assert_eq!(api.thread_calls.load(Ordering::SeqCst), 2);
        assert_eq!(chat.thread().len(), 1);
    }

    #[tokio::test]
    async fn send_while_idle_makes_no_network_call() {
        let api = Arc::new(FakeApi::default());
        let (mut chat, _) = controller(Arc::clone(&api));

        let err = chat.send("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::NoActiveChat));
        assert_eq!(api.send_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.thread_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn send_empty_text_makes_no_network_call() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(Vec::new()));
        let (mut chat, _) = controller(Arc::clone(&api));
        chat.open(UserId::new(5)).await.unwrap();

        for text in ["", "   ", "\n\t"] {
            let err = chat.send(text).await.unwrap_err();
            assert!(matches!(err, ChatError::EmptyMessage), "text: {text:?}");
        }
        assert_eq!(api.send_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn send_trims_before_sending() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(Vec::new()));
        api.queue_thread(Ok(Vec::new()));
        let (mut chat, _) = controller(Arc::clone(&api));
        chat.open(UserId::new(5)).await.unwrap();

        chat.send("  hi there  ").await.unwrap();
        assert_eq!(api.send_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_send_leaves_thread_unchanged() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(vec![message(1, 5, 9, "before")]));
        let (mut chat, _) = controller(Arc::clone(&api));
        chat.open(UserId::new(5)).await.unwrap();

        api.fail_next_send(ApiError::Rejected {
            status: 404,
            message: "Recipient not found".to_string(),
        });
        let err = chat.send("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Recipient not found");

        // The failed send must not refresh or mutate the thread.
        assert_eq!(api.thread_calls.load(Ordering::SeqCst), 1);
        assert_eq!(chat.thread().len(), 1);
        assert_eq!(chat.thread()[0].text, "before");
    }

    #[tokio::test]
    async fn suggestions_require_an_active_chat() {
        let api = Arc::new(FakeApi::default());
        let (chat, _) = controller(Arc::clone(&api));

        let err = chat.fetch_suggestions().await.unwrap_err();
        assert!(matches!(err, ChatError::NoActiveChat));
        assert_eq!(api.helper_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn suggestions_pass_through_the_helper_payload() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(Vec::new()));
        api.queue_helper(Ok(ChatHelper {
            summary: "Loves film.".to_string(),
            openers: vec!["Seen anything good lately?".to_string()],
        }));
        let (mut chat, _) = controller(Arc::clone(&api));
        chat.open(UserId::new(5)).await.unwrap();

        let helper = chat.fetch_suggestions().await.unwrap();
        assert_eq!(helper.summary, "Loves film.");
        assert_eq!(helper.openers.len(), 1);
    }

    #[tokio::test]
    async fn classify_attributes_by_own_identity() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(Vec::new()));
        let (mut chat, tokens) = controller(Arc::clone(&api));
        chat.open(UserId::new(5)).await.unwrap();

        tokens.set_token(token_for_user(9));
        assert_eq!(chat.classify(&message(1, 9, 5, "mine")), Authorship::Mine);
        assert_eq!(chat.classify(&message(2, 5, 9, "theirs")), Authorship::Theirs);
    }

    #[tokio::test]
    async fn classify_without_identity_is_always_theirs() {
        let api = Arc::new(FakeApi::default());
        api.queue_thread(Ok(Vec::new()));
        let (mut chat, tokens) = controller(Arc::clone(&api));
        chat.open(UserId::new(5)).await.unwrap();

        // No token at all.
        assert_eq!(chat.classify(&message(1, 9, 5, "x")), Authorship::Theirs);

        // Malformed token: identity unknown, everything is theirs.
        tokens.set_token("not-a-jwt");
        assert_eq!(chat.classify(&message(2, 9, 5, "y")), Authorship::Theirs);
    }
}

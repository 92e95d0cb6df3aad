//! ApiClient -- the authenticated HTTP client for the CampusMatch service.
//!
//! Wraps reqwest with a uniform success/failure surface: every call
//! resolves to `Result<T, ApiError>`, where transport failures and
//! non-2xx responses share the single error path. The bearer token is
//! read from the injected [`TokenStore`] at request time and is exposed
//! only while the Authorization header is built.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use campusmatch_core::api::MatchmakerApi;
use campusmatch_core::token::TokenStore;
use campusmatch_types::auth::{LoginResponse, RegisterRequest};
use campusmatch_types::error::ApiError;
use campusmatch_types::matching::MatchCandidate;
use campusmatch_types::message::{ChatHelper, ChatMessage, NewMessage};
use campusmatch_types::profile::{Profile, ProfileForm};
use campusmatch_types::user::{Account, UserId};

use crate::config::ClientConfig;

/// HTTP client for the CampusMatch service.
///
/// Implements [`MatchmakerApi`] for the calls the core state machines
/// make; the auth and profile endpoints are inherent methods used
/// directly by the presentation layer.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Create a new client against the configured base URL.
    pub fn new(config: &ClientConfig, tokens: Arc<TokenStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Build the full URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach `Authorization: Bearer <token>` when a token is set.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Send a prepared request and fold the outcome into `ApiError`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "request rejected: {body}");
            return Err(rejection(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// `POST /auth/register` -- create an account. Unauthenticated.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Account, ApiError> {
        self.execute(self.http.post(self.url("/auth/register")).json(request))
            .await
    }

    /// `POST /auth/login` -- exchange credentials for a bearer token.
    ///
    /// Form-encoded (OAuth2 password-grant convention): the email is
    /// sent as the `username` field. The caller stores the returned
    /// token in the [`TokenStore`]; this method has no side effects.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let form = [("username", email), ("password", password)];
        self.execute(self.http.post(self.url("/auth/login")).form(&form))
            .await
    }

    /// `POST /profile` -- create or replace the caller's profile.
    pub async fn save_profile(&self, form: &ProfileForm) -> Result<Profile, ApiError> {
        self.execute(self.authorize(self.http.post(self.url("/profile")).json(form)))
            .await
    }

    /// `GET /profile/me` -- the caller's saved profile.
    pub async fn my_profile(&self) -> Result<Profile, ApiError> {
        self.execute(self.authorize(self.http.get(self.url("/profile/me"))))
            .await
    }

    /// `GET /users/me` -- the caller's account record.
    pub async fn me(&self) -> Result<Account, ApiError> {
        self.execute(self.authorize(self.http.get(self.url("/users/me"))))
            .await
    }
}

impl MatchmakerApi for ApiClient {
    async fn fetch_matches(&self) -> Result<Vec<MatchCandidate>, ApiError> {
        self.execute(self.authorize(self.http.get(self.url("/matches"))))
            .await
    }

    async fn fetch_thread(&self, other: UserId) -> Result<Vec<ChatMessage>, ApiError> {
        self.execute(self.authorize(self.http.get(self.url(&format!("/messages/thread/{other}")))))
            .await
    }

    async fn send_message(&self, message: &NewMessage) -> Result<ChatMessage, ApiError> {
        self.execute(self.authorize(self.http.post(self.url("/messages")).json(message)))
            .await
    }

    async fn chat_helper(&self, other: UserId) -> Result<ChatHelper, ApiError> {
        self.execute(self.authorize(self.http.get(self.url(&format!("/ai/chat-helper/{other}")))))
            .await
    }
}

/// Map a non-2xx response body to a `Rejected` error.
///
/// The service reports errors as `{"detail": "..."}`; that string is
/// shown to the user verbatim. Anything else gets a generic fallback.
fn rejection(status: u16, body: &str) -> ApiError {
    let message =
        detail_message(body).unwrap_or_else(|| format!("request failed with status {status}"));
    ApiError::Rejected { status, message }
}

fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    Some(value.get("detail")?.as_str()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client(base_url: &str) -> ApiClient {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        };
        ApiClient::new(&config, Arc::new(TokenStore::new()))
    }

    #[test]
    fn test_url_joining() {
        let client = make_client("http://localhost:8000");
        assert_eq!(client.url("/matches"), "http://localhost:8000/matches");
        assert_eq!(
            client.url(&format!("/messages/thread/{}", UserId::new(7))),
            "http://localhost:8000/messages/thread/7"
        );
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = make_client("http://localhost:8000/");
        assert_eq!(client.url("/matches"), "http://localhost:8000/matches");
    }

    #[test]
    fn test_rejection_uses_server_detail() {
        let err = rejection(400, r#"{"detail": "Email already registered"}"#);
        assert_eq!(err.to_string(), "Email already registered");
        assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    }

    #[test]
    fn test_rejection_falls_back_on_missing_detail() {
        for body in ["", "<html>502</html>", r#"{"error": "nope"}"#, r#"{"detail": 5}"#] {
            let err = rejection(502, body);
            assert_eq!(err.to_string(), "request failed with status 502", "body: {body:?}");
        }
    }

    #[test]
    fn test_login_body_is_form_encoded() {
        // The login endpoint follows the OAuth2 password-grant form
        // convention: email travels as `username`, urlencoded.
        let client = make_client("http://localhost:8000");
        let request = client
            .http
            .post(client.url("/auth/login"))
            .form(&[("username", "a@cmu.edu"), ("password", "hunter2")])
            .build()
            .unwrap();

        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().unwrap().as_bytes().unwrap();
        assert_eq!(body, b"username=a%40cmu.edu&password=hunter2");
    }

    #[tokio::test]
    async fn test_transport_failure_is_one_error_path() {
        // Nothing listens on this port; the call must fold into
        // ApiError::Transport rather than panic or bubble reqwest types.
        let client = make_client("http://127.0.0.1:1");
        let err = client.fetch_matches().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}

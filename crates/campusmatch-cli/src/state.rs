//! Shared application state for CLI commands.
//!
//! The token store is created empty on every launch -- the session is
//! deliberately not persisted across restarts. Each authenticated
//! command logs in on demand and owns its session for the life of the
//! process.

use std::path::PathBuf;
use std::sync::Arc;

use campusmatch_core::token::TokenStore;
use campusmatch_infra::client::ApiClient;
use campusmatch_infra::config::{ClientConfig, default_config_dir, load_client_config};

/// Everything a command handler needs: config, session, client.
pub struct AppState {
    pub config: ClientConfig,
    pub tokens: Arc<TokenStore>,
    pub client: Arc<ApiClient>,
}

impl AppState {
    /// Load configuration and build the client.
    pub async fn init() -> Self {
        let config_dir = default_config_dir().unwrap_or_else(|| PathBuf::from("."));
        let config = load_client_config(&config_dir).await;
        tracing::debug!(base_url = %config.base_url, "client configured");

        let tokens = Arc::new(TokenStore::new());
        let client = Arc::new(ApiClient::new(&config, Arc::clone(&tokens)));

        Self {
            config,
            tokens,
            client,
        }
    }
}

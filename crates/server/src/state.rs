//! Application state shared across handlers.

use std::sync::Arc;

use chrono::Duration;
use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::{AdminStore, EnquiryStore, PgStore};
use crate::services::auth::{AuthService, TokenSigner};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers the stores,
/// the token signer and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    enquiries: Arc<dyn EnquiryStore>,
    admins: Arc<dyn AdminStore>,
    tokens: TokenSigner,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::with_stores(config, store.clone(), store)
    }

    /// Create application state over arbitrary store implementations.
    #[must_use]
    pub fn with_stores(
        config: ServerConfig,
        enquiries: Arc<dyn EnquiryStore>,
        admins: Arc<dyn AdminStore>,
    ) -> Self {
        let tokens = TokenSigner::new(
            &config.jwt_secret,
            Duration::hours(config.token_ttl_hours),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                enquiries,
                admins,
                tokens,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn enquiries(&self) -> &dyn EnquiryStore {
        self.inner.enquiries.as_ref()
    }

    #[must_use]
    pub fn admins(&self) -> &dyn AdminStore {
        self.inner.admins.as_ref()
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenSigner {
        &self.inner.tokens
    }

    /// Authentication service over this state's admin store and signer.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.admins(), self.tokens())
    }
}

//! # Openwhyd Integration Module
//!
//! This module is the caller-facing surface of the crate. It exposes one
//! operation per upstream capability (search, track/playlist/user reads,
//! authenticated posting and social actions) and composes the lower layers
//! for each call:
//!
//! ```text
//! Caller
//!   ↓
//! OpenwhydClient (this module)
//!   ├── Authentication (password / federated login, session cookies)
//!   ├── Search (users, tracks, playlists)
//!   ├── Tracks (stream, hot charts, profile tracks, posting)
//!   ├── Playlists (listing, create / rename / delete)
//!   └── Follows (followers, following, follow / unfollow)
//!   ↓
//! ApiClient (request construction, fixed header set)
//!   ↓
//! Openwhyd web API
//! ```
//!
//! ## Operation shape
//!
//! Every operation is one stateless request/response cycle returning
//! `Result<T, OpenwhydError>`. No operation retries, caches, or spawns
//! parallel requests; `search` fans its three result buckets out of a single
//! response. Failures are logged and surfaced as the explicit error variant,
//! so an `Ok` with empty data means the upstream really returned nothing.
//!
//! ## Sessions
//!
//! The upstream authenticates with a session cookie obtained at login and
//! attached as a `Cookie` header on protected calls. Login persists the
//! cookie through the injected [`SessionStore`]; authenticated operations
//! take the cookie explicitly so callers control lookup policy. The upstream
//! gives no expiry signal beyond the cookie attributes; a stored credential
//! is presumed live until a call fails or its recorded expiry passes.
//!
//! ## Submodules
//!
//! - [`auth`] - credential exchange against `/login` and `/facebookLogin`
//! - [`search`] - keyword search across users, tracks and playlists
//! - [`tracks`] - track feeds, hot charts and track mutations
//! - [`playlists`] - playlist listing and mutations
//! - [`users`] - profile reads and the session-bound identity
//! - [`follows`] - follower/following reads and follow mutations

pub mod auth;
pub mod follows;
pub mod playlists;
pub mod search;
pub mod tracks;
pub mod users;

use std::sync::Arc;

use chrono::Utc;

use crate::{
    config::ApiConfig,
    convert::ProviderMap,
    error::Result,
    request::ApiClient,
    session::SessionStore,
};

/// Typed facade over the Openwhyd web API.
pub struct OpenwhydClient {
    http: ApiClient,
    providers: ProviderMap,
    store: Arc<dyn SessionStore>,
}

impl OpenwhydClient {
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        Ok(Self {
            http: ApiClient::new(config)?,
            providers: ProviderMap::default(),
            store,
        })
    }

    /// Replaces the default provider mapping, e.g. to register additional
    /// media providers.
    pub fn with_providers(mut self, providers: ProviderMap) -> Self {
        self.providers = providers;
        self
    }

    pub fn providers(&self) -> &ProviderMap {
        &self.providers
    }

    pub(crate) fn http(&self) -> &ApiClient {
        &self.http
    }

    pub(crate) fn api_url(&self) -> &str {
        &self.http.config().api_url
    }

    pub(crate) fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Checks whether a stored session credential exists for `account_id`
    /// and has not passed its recorded expiry. Store failures propagate;
    /// a caller cannot assume validity when the store is unreachable.
    pub async fn session_valid(&self, account_id: &str) -> Result<bool> {
        let Some(record) = self.store.get(account_id).await? else {
            return Ok(false);
        };
        Ok(record.expires_at.is_none_or(|expiry| expiry > Utc::now()))
    }
}

//! Session lifecycle: login, logout, and the cached current account.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiResult};
use crate::cache::{keys, QueryCache, QueryResult};
use crate::domain::account::{Account, Credentials};

use super::gate::{self, AuthSnapshot, GateOutcome};

/// Successful login payload from the backend.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    account: Account,
}

/// One authenticated client lifetime.
///
/// Holds the bearer token (inside the shared [`ApiClient`]) and the
/// snapshot the auth gate reads. A fresh session starts in the loading
/// state until [`Session::current_account`] resolves the restore.
#[derive(Clone)]
pub struct Session {
    api: ApiClient,
    cache: QueryCache,
    snapshot: Arc<RwLock<AuthSnapshot>>,
}

impl Session {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self {
            api,
            cache,
            snapshot: Arc::new(RwLock::new(AuthSnapshot::loading())),
        }
    }

    /// Current auth snapshot, as read by the gate.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.snapshot.read().clone()
    }

    /// Evaluate the auth gate against the current snapshot.
    pub fn gate(&self) -> GateOutcome {
        gate::evaluate(&self.snapshot())
    }

    /// Sign in with credentials.
    ///
    /// On success the bearer token is installed on the shared client and
    /// the cached account subtree is dropped so the new identity is
    /// fetched fresh.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Account> {
        *self.snapshot.write() = AuthSnapshot::loading();

        let response: LoginResponse = match self.api.post("auth/login", credentials).await {
            Ok(response) => response,
            Err(err) => {
                *self.snapshot.write() = AuthSnapshot::anonymous();
                return Err(err);
            }
        };

        self.api.set_token(response.token);
        self.cache.invalidate_prefix(&keys::account::all());
        *self.snapshot.write() = AuthSnapshot::authenticated(response.account.clone());
        debug!("signed in as {}", response.account.email);

        Ok(response.account)
    }

    /// Sign out.
    ///
    /// The server-side session is ended best-effort; local state is
    /// always cleared, including the whole query cache; cached data
    /// belongs to the session that fetched it.
    pub async fn logout(&self) {
        if let Err(err) = self.api.delete("auth/session").await {
            warn!("server-side logout failed: {err}");
        }

        self.api.clear_token();
        self.cache.invalidate_all();
        *self.snapshot.write() = AuthSnapshot::anonymous();
        debug!("signed out");
    }

    /// The signed-in account, read through the cache.
    ///
    /// Also drives session restore: the snapshot leaves the loading
    /// state when this resolves, so the gate can settle.
    pub async fn current_account(&self) -> QueryResult<Account> {
        let result = self
            .cache
            .fetch(keys::account::me(), || async move {
                self.api.get::<Account>("auth/me").await
            })
            .await;

        match &result {
            Ok(account) => {
                *self.snapshot.write() = AuthSnapshot::authenticated(account.as_ref().clone());
            }
            Err(err) => {
                warn!("session restore failed: {err}");
                *self.snapshot.write() = AuthSnapshot::anonymous();
            }
        }

        result
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("Session")
            .field("authenticated", &snapshot.account.is_some())
            .field("is_loading", &snapshot.is_loading)
            .finish()
    }
}

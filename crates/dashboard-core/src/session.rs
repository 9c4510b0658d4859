//! Mock authentication session
//!
//! There is no real identity check: any username is accepted together with
//! the configured demo password, and the "token" is an opaque string stamped
//! with the login time. The session survives reloads through a key-value
//! store (browser localStorage in the web app, a map in tests).

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};

/// Storage key holding the session token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key holding the signed-in username
pub const USERNAME_KEY: &str = "username";

const TOKEN_PREFIX: &str = "mock-jwt-token-";

/// Persistent string storage the session is written to
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, used by tests and non-browser hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Build the opaque token for a login at `issued_at_ms` (Unix millis)
pub fn mock_token(issued_at_ms: u64) -> String {
    format!("{}{}", TOKEN_PREFIX, issued_at_ms)
}

pub struct SessionManager<S> {
    store: S,
    demo_password: String,
    session: Option<Session>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Starts unauthenticated; call [`restore`](Self::restore) to pick up a
    /// persisted session.
    pub fn new(store: S, demo_password: impl Into<String>) -> Self {
        Self {
            store,
            demo_password: demo_password.into(),
            session: None,
        }
    }

    /// Load the persisted session. Both the token and the username must be
    /// present; a half-written pair leaves the manager unauthenticated.
    pub fn restore(&mut self) -> Result<bool> {
        let token = self.store.get(AUTH_TOKEN_KEY)?;
        let username = self.store.get(USERNAME_KEY)?;

        self.session = match (token, username) {
            (Some(token), Some(username)) => {
                debug!(username = %username, "session restored");
                Some(Session { username, token })
            }
            _ => None,
        };
        Ok(self.session.is_some())
    }

    /// Sign in. Fails with [`DashboardError::AuthenticationFailed`] on a wrong
    /// password, in which case nothing is written and any current session
    /// is kept.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        issued_at_ms: u64,
    ) -> Result<&Session> {
        if password != self.demo_password {
            warn!(username, "login rejected");
            return Err(DashboardError::AuthenticationFailed);
        }

        let token = mock_token(issued_at_ms);
        self.store.set(AUTH_TOKEN_KEY, &token)?;
        if let Err(err) = self.store.set(USERNAME_KEY, username) {
            // Never leave a token without its username behind
            if let Err(cleanup) = self.store.remove(AUTH_TOKEN_KEY) {
                warn!(error = %cleanup, "could not remove partial session");
            }
            warn!(username, error = %err, "login could not be saved");
            return Err(err);
        }
        info!(username, "signed in");

        Ok(self.session.insert(Session {
            username: username.to_string(),
            token,
        }))
    }

    /// Clear the session and both persisted keys
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USERNAME_KEY)?;
        if let Some(session) = self.session.take() {
            info!(username = %session.username, "signed out");
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

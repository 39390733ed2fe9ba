use crate::input::events::AuthEvent;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Identity-provider user id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the currently authenticated user
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;

    fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Process-wide sign-in state, fed by the identity provider's auth events
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<UserId>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// Track an auth state change
    pub fn apply(&self, event: &AuthEvent) {
        let next = event.user().cloned();
        log::info!("auth state changed: {} user={:?}", event.name(), next);
        if let Ok(mut user) = self.user.write() {
            *user = next;
        }
    }
}

impl IdentityProvider for Session {
    fn current_user(&self) -> Option<UserId> {
        self.user.read().ok()?.clone()
    }
}

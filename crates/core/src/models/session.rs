use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    #[serde(default)]
    pub email: Option<String>,
}

/// An issued session. Tokens are opaque to this library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Absolute expiry; `None` means the provider did not report one
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    pub user: User,
}

impl Session {
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// `true` once `now` is at or past the expiry time.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// What changed when subscribers are notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

impl std::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthEvent::SignedIn => write!(f, "SIGNED_IN"),
            AuthEvent::SignedOut => write!(f, "SIGNED_OUT"),
            AuthEvent::TokenRefreshed => write!(f, "TOKEN_REFRESHED"),
        }
    }
}

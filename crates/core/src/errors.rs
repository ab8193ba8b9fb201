use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the entire finance-visualiser-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── User Input ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Authentication ──────────────────────────────────────────────
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not signed in")]
    Unauthenticated,

    // ── Persistence ─────────────────────────────────────────────────
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("No finance information found for user {0}")]
    SnapshotNotFound(Uuid),

    /// The ledger entry was recorded but the finance totals were not updated.
    #[error("Transaction {transaction_id} was recorded but finance totals were not updated: {reason}")]
    SnapshotStale {
        transaction_id: Uuid,
        reason: String,
    },

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({service}): {message}")]
    Api {
        service: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Configuration / Encoding ────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    /// `true` for failures caused by user input that the user can correct.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::ValidationError(_) | CoreError::Auth(_) | CoreError::Unauthenticated
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<rust_decimal::Error> for CoreError {
    fn from(e: rust_decimal::Error) -> Self {
        CoreError::ValidationError(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; filter values in the query
        // string can contain user ids and tokens.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::finance::{FinanceSnapshot, SnapshotPatch};
use crate::models::session::Session;
use crate::models::transaction::TransactionEntry;

/// The hosted authentication service.
///
/// Implementations own the current session (storage, refresh). The rest of
/// the library only asks for it through this trait.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// The current session, refreshed if it had expired. `None` when signed out.
    async fn get_session(&self) -> Result<Option<Session>, CoreError>;

    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<Session, CoreError>;

    /// Drop the current session. Signing out while signed out is not an error.
    async fn sign_out(&self) -> Result<(), CoreError>;

    /// Re-send the sign-up confirmation email.
    async fn resend_confirmation(&self, email: &str) -> Result<(), CoreError>;

    /// Trade the one-time `code` from a confirmation link for a session.
    async fn exchange_code_for_session(&self, code: &str) -> Result<Session, CoreError>;
}

/// The hosted relational store holding the `finance` and `transactions` tables.
///
/// Calls are expected to be read-your-writes within one session. No
/// transaction spans the two tables.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FinanceStore: Send + Sync {
    fn name(&self) -> &str;

    /// The user's snapshot row, or `None` if finance setup was never completed.
    async fn get_snapshot(&self, user_id: Uuid) -> Result<Option<FinanceSnapshot>, CoreError>;

    /// Insert or replace the user's snapshot row (conflict on `user_id`).
    async fn upsert_snapshot(
        &self,
        user_id: Uuid,
        snapshot: &FinanceSnapshot,
    ) -> Result<(), CoreError>;

    /// Write only the fields present in `patch`.
    async fn update_snapshot(&self, user_id: Uuid, patch: &SnapshotPatch)
        -> Result<(), CoreError>;

    /// All of the user's ledger entries, newest first.
    async fn list_transactions(&self, user_id: Uuid) -> Result<Vec<TransactionEntry>, CoreError>;

    async fn append_transaction(&self, entry: &TransactionEntry) -> Result<(), CoreError>;
}

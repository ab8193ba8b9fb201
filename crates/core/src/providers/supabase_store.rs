use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::finance::{FinanceSnapshot, SnapshotPatch};
use crate::models::settings::Settings;
use crate::models::transaction::TransactionEntry;
use super::http::{build_client, error_message};
use super::traits::{AuthProvider, FinanceStore};

const SERVICE: &str = "Supabase REST";

pub const FINANCE_TABLE: &str = "finance";
pub const TRANSACTIONS_TABLE: &str = "transactions";

/// Hosted tables behind PostgREST-style `/rest/v1` endpoints.
///
/// Requests carry the signed-in user's access token so row-level security
/// scopes every query to that user. Without a session the anon key is used
/// and the backend will return nothing.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
    auth: Arc<dyn AuthProvider>,
}

#[derive(Serialize)]
struct FinanceRow<'a> {
    user_id: Uuid,
    #[serde(flatten)]
    snapshot: &'a FinanceSnapshot,
}

impl SupabaseStore {
    pub fn new(settings: &Settings, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            client: build_client(settings.request_timeout_secs),
            base_url: format!("{}/rest/v1", settings.backend_url.trim_end_matches('/')),
            anon_key: settings.anon_key.clone(),
            auth,
        }
    }

    /// Full URL for a table with a raw PostgREST query string.
    #[must_use]
    pub fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{table}", self.base_url)
        } else {
            format!("{}/{table}?{query}", self.base_url)
        }
    }

    async fn bearer(&self) -> Result<String, CoreError> {
        Ok(self
            .auth
            .get_session()
            .await?
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.anon_key.clone()))
    }

    async fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, CoreError> {
        let token = self.bearer().await?;
        Ok(builder.header("apikey", &self.anon_key).bearer_auth(token))
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<reqwest::Response, CoreError> {
        let resp = self.authorized(builder).await?.send().await?;
        if !resp.status().is_success() {
            return Err(CoreError::Persistence(format!(
                "{what} failed: {}",
                error_message(resp).await
            )));
        }
        Ok(resp)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FinanceStore for SupabaseStore {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn get_snapshot(&self, user_id: Uuid) -> Result<Option<FinanceSnapshot>, CoreError> {
        let url = self.table_url(
            FINANCE_TABLE,
            &format!("select=income,expenditures,savings&user_id=eq.{user_id}&limit=1"),
        );
        let resp = self.send(self.client.get(&url), "Finance fetch").await?;

        let rows: Vec<FinanceSnapshot> = resp.json().await.map_err(|e| CoreError::Api {
            service: SERVICE.into(),
            message: format!("Failed to parse finance row: {e}"),
        })?;
        Ok(rows.into_iter().next())
    }

    async fn upsert_snapshot(
        &self,
        user_id: Uuid,
        snapshot: &FinanceSnapshot,
    ) -> Result<(), CoreError> {
        let url = self.table_url(FINANCE_TABLE, "on_conflict=user_id");
        let request = self
            .client
            .post(&url)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&FinanceRow { user_id, snapshot });
        self.send(request, "Finance upsert").await?;
        debug!("{SERVICE}: upserted finance row for {user_id}");
        Ok(())
    }

    async fn update_snapshot(
        &self,
        user_id: Uuid,
        patch: &SnapshotPatch,
    ) -> Result<(), CoreError> {
        if patch.is_empty() {
            return Ok(());
        }
        let url = self.table_url(FINANCE_TABLE, &format!("user_id=eq.{user_id}"));
        let request = self
            .client
            .patch(&url)
            .header("Prefer", "return=minimal")
            .json(patch);
        self.send(request, "Finance update").await?;
        Ok(())
    }

    async fn list_transactions(&self, user_id: Uuid) -> Result<Vec<TransactionEntry>, CoreError> {
        let url = self.table_url(
            TRANSACTIONS_TABLE,
            &format!("select=*&user_id=eq.{user_id}&order=date.desc,id.desc"),
        );
        let resp = self.send(self.client.get(&url), "Transaction fetch").await?;

        resp.json().await.map_err(|e| CoreError::Api {
            service: SERVICE.into(),
            message: format!("Failed to parse transactions: {e}"),
        })
    }

    async fn append_transaction(&self, entry: &TransactionEntry) -> Result<(), CoreError> {
        let url = self.table_url(TRANSACTIONS_TABLE, "");
        let request = self
            .client
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&[entry]);
        self.send(request, "Transaction insert").await?;
        debug!("{SERVICE}: inserted transaction {}", entry.id);
        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, RwLock};

use crate::errors::CoreError;
use crate::models::session::{Session, User};
use crate::models::settings::Settings;
use super::http::{build_client, error_message};
use super::traits::AuthProvider;

const SERVICE: &str = "Supabase Auth";

/// Hosted auth (GoTrue-compatible `/auth/v1` endpoints).
///
/// - **Sign-in**: `POST /token?grant_type=password`
/// - **Refresh**: `POST /token?grant_type=refresh_token`
/// - **Confirmation links**: `POST /token?grant_type=pkce`
/// - **Sign-out / resend**: `POST /logout`, `POST /resend`
///
/// Keeps the current session in memory and refreshes it on read once it
/// has expired.
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
    code_verifier: Mutex<Option<String>>,
}

impl SupabaseAuth {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: build_client(settings.request_timeout_secs),
            base_url: format!("{}/auth/v1", settings.backend_url.trim_end_matches('/')),
            anon_key: settings.anon_key.clone(),
            session: RwLock::new(None),
            code_verifier: Mutex::new(None),
        }
    }

    /// Restore a previously persisted session (e.g. from browser storage).
    pub fn with_session(self, session: Session) -> Self {
        self.store_session(Some(session));
        self
    }

    /// Set the PKCE verifier that matches the code in the next confirmation link.
    pub fn set_code_verifier(&self, verifier: impl Into<String>) {
        if let Ok(mut slot) = self.code_verifier.lock() {
            *slot = Some(verifier.into());
        }
    }

    /// Full URL of an auth endpoint, e.g. `token?grant_type=password`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn current_session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    fn store_session(&self, session: Option<Session>) {
        if let Ok(mut slot) = self.session.write() {
            *slot = session;
        }
    }

    async fn token_request<B: Serialize + ?Sized>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<Session, CoreError> {
        let url = self.endpoint(&format!("token?grant_type={grant_type}"));
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CoreError::Auth(error_message(resp).await));
        }

        let token: TokenResponse = resp.json().await.map_err(|e| CoreError::Api {
            service: SERVICE.into(),
            message: format!("Failed to parse {grant_type} token response: {e}"),
        })?;
        let session = token.into_session(Utc::now());
        self.store_session(Some(session.clone()));
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, CoreError> {
        debug!("{SERVICE}: refreshing expired session");
        self.token_request(
            "refresh_token",
            &RefreshRequest {
                refresh_token,
            },
        )
        .await
    }
}

// ── GoTrue request / response types ─────────────────────────────────

#[derive(Serialize)]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct PkceRequest<'a> {
    auth_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code_verifier: Option<String>,
}

#[derive(Serialize)]
struct ResendRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    /// `expires_at` (unix seconds) wins over `expires_in` when both are sent.
    pub(crate) fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthProvider for SupabaseAuth {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn get_session(&self) -> Result<Option<Session>, CoreError> {
        let session = match self.current_session() {
            Some(s) => s,
            None => return Ok(None),
        };

        if !session.is_expired(Utc::now()) {
            return Ok(Some(session));
        }

        match session.refresh_token.as_deref() {
            Some(token) => match self.refresh(token).await {
                Ok(fresh) => Ok(Some(fresh)),
                Err(e) => {
                    warn!("{SERVICE}: session refresh failed, signing out locally: {e}");
                    self.store_session(None);
                    Ok(None)
                }
            },
            None => {
                self.store_session(None);
                Ok(None)
            }
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, CoreError> {
        self.token_request("password", &PasswordRequest { email, password })
            .await
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        let session = self.current_session();
        self.store_session(None);

        let Some(session) = session else {
            return Ok(());
        };

        let result = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await;

        // The local session is already gone; a failed revoke only means the
        // token lives until it expires.
        match result {
            Ok(resp) if !resp.status().is_success() => {
                warn!("{SERVICE}: remote sign-out failed: {}", error_message(resp).await);
            }
            Err(e) => warn!("{SERVICE}: remote sign-out failed: {}", CoreError::from(e)),
            Ok(_) => {}
        }
        Ok(())
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), CoreError> {
        let resp = self
            .client
            .post(self.endpoint("resend"))
            .header("apikey", &self.anon_key)
            .json(&ResendRequest {
                kind: "signup",
                email,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CoreError::Auth(error_message(resp).await));
        }
        Ok(())
    }

    async fn exchange_code_for_session(&self, code: &str) -> Result<Session, CoreError> {
        let code_verifier = self.code_verifier.lock().ok().and_then(|mut v| v.take());
        self.token_request(
            "pkce",
            &PkceRequest {
                auth_code: code,
                code_verifier,
            },
        )
        .await
    }
}

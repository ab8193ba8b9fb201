pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::Utc;
use std::sync::Arc;

use errors::CoreError;
use models::{
    chart::DashboardCharts,
    finance::FinanceSnapshot,
    session::{AuthEvent, Session},
    settings::Settings,
    transaction::{TransactionCategory, TransactionEntry},
    view::{NavItem, RouteDecision, View},
};
use providers::{
    supabase_auth::SupabaseAuth,
    supabase_store::SupabaseStore,
    traits::{AuthProvider, FinanceStore},
};
use services::{
    chart_service::ChartService,
    navigation_service,
    session_service::{SessionGate, Subscription},
    setup_service::SetupService,
    transaction_service::TransactionService,
};

/// Main entry point for the Finance Visualiser core library.
///
/// Owns the one [`SessionGate`] of the application and the backend
/// collaborators. Every private operation resolves the session first and
/// scopes its reads and writes to the signed-in user.
#[must_use]
pub struct FinanceVisualiser {
    settings: Settings,
    gate: SessionGate,
    store: Arc<dyn FinanceStore>,
    transaction_service: TransactionService,
    setup_service: SetupService,
    chart_service: ChartService,
}

impl std::fmt::Debug for FinanceVisualiser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceVisualiser")
            .field("backend_url", &self.settings.backend_url)
            .field("store", &self.store.name())
            .field("subscribers", &self.gate.subscriber_count())
            .finish()
    }
}

impl FinanceVisualiser {
    /// Build with explicit collaborators (tests, alternative backends).
    pub fn new(
        settings: Settings,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn FinanceStore>,
    ) -> Self {
        Self {
            settings,
            gate: SessionGate::new(auth),
            store,
            transaction_service: TransactionService::new(),
            setup_service: SetupService::new(),
            chart_service: ChartService::new(),
        }
    }

    /// Build against the hosted backend described by `settings`.
    pub fn connect(settings: Settings) -> Self {
        let auth: Arc<dyn AuthProvider> = Arc::new(SupabaseAuth::new(&settings));
        let store: Arc<dyn FinanceStore> =
            Arc::new(SupabaseStore::new(&settings, Arc::clone(&auth)));
        Self::new(settings, auth, store)
    }

    /// Load settings from the environment and connect.
    pub fn from_env() -> Result<Self, CoreError> {
        Ok(Self::connect(Settings::from_env()?))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Session ─────────────────────────────────────────────────────

    /// The shared session gate.
    #[must_use]
    pub fn session_gate(&self) -> &SessionGate {
        &self.gate
    }

    pub async fn resolve_session(&self) -> Result<Option<Session>, CoreError> {
        self.gate.resolve_session().await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        self.gate.sign_in(email, password).await
    }

    pub async fn sign_out(&self) -> Result<(), CoreError> {
        self.gate.sign_out().await
    }

    pub async fn resend_confirmation(&self, email: &str) -> Result<(), CoreError> {
        self.gate.resend_confirmation(email).await
    }

    /// Finish sign-up from the `code` query parameter of a confirmation link.
    pub async fn confirm_email(&self, code: Option<&str>) -> Result<Session, CoreError> {
        self.gate.confirm_email(code).await
    }

    /// Subscribe to sign-in / sign-out / refresh events. Drop the returned
    /// subscription when the view goes away.
    pub fn on_session_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(AuthEvent, Option<&Session>) + Send + Sync + 'static,
    {
        self.gate.on_session_change(callback)
    }

    // ── Routing & Navigation ────────────────────────────────────────

    /// Render-or-redirect decision for `view` given the current session.
    pub async fn route(&self, view: View) -> Result<RouteDecision, CoreError> {
        let signed_in = self.gate.resolve_session().await?.is_some();
        Ok(navigation_service::route(view, signed_in))
    }

    /// Navigation entries for the current session state.
    pub async fn nav_items(&self, current: View) -> Result<Vec<NavItem>, CoreError> {
        let signed_in = self.gate.resolve_session().await?.is_some();
        Ok(navigation_service::nav_items(signed_in, current == View::Settings))
    }

    // ── Finance Setup ───────────────────────────────────────────────

    /// The signed-in user's baseline figures, if set up.
    pub async fn load_finance(&self) -> Result<Option<FinanceSnapshot>, CoreError> {
        let session = self.gate.require_session().await?;
        self.setup_service
            .load_snapshot(self.store.as_ref(), session.user_id())
            .await
    }

    /// Validate and save the finance setup form.
    pub async fn save_finance(
        &self,
        raw_income: &str,
        raw_expenditures: &str,
        raw_savings: &str,
    ) -> Result<FinanceSnapshot, CoreError> {
        let session = self.gate.require_session().await?;
        self.setup_service
            .save_snapshot(
                self.store.as_ref(),
                session.user_id(),
                raw_income,
                raw_expenditures,
                raw_savings,
            )
            .await
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction for the signed-in user, dated now.
    ///
    /// On success the caller should clear its form and reload the dashboard.
    pub async fn add_transaction(
        &self,
        description: &str,
        raw_amount: &str,
        category: TransactionCategory,
    ) -> Result<TransactionEntry, CoreError> {
        let session = self.gate.require_session().await?;
        self.transaction_service
            .add_transaction(
                self.store.as_ref(),
                session.user_id(),
                description,
                raw_amount,
                category,
                Utc::now(),
            )
            .await
    }

    /// The signed-in user's ledger, newest first.
    pub async fn list_transactions(&self) -> Result<Vec<TransactionEntry>, CoreError> {
        let session = self.gate.require_session().await?;
        self.store.list_transactions(session.user_id()).await
    }

    // ── Dashboard ───────────────────────────────────────────────────

    /// Fetch snapshot and ledger and derive every chart data set.
    pub async fn load_dashboard(&self) -> Result<DashboardCharts, CoreError> {
        let session = self.gate.require_session().await?;
        let user_id = session.user_id();

        let snapshot = self.store.get_snapshot(user_id).await?;
        let ledger = self.store.list_transactions(user_id).await?;

        Ok(self
            .chart_service
            .build(snapshot.as_ref(), &ledger, Utc::now()))
    }
}

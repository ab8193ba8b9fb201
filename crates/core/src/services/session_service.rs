use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::errors::CoreError;
use crate::models::session::{AuthEvent, Session};
use crate::providers::traits::AuthProvider;

type Listener = Arc<dyn Fn(AuthEvent, Option<&Session>) + Send + Sync>;

/// What the gate last saw. The first resolve only records; it never notifies.
#[derive(Default)]
struct Observed {
    initialized: bool,
    token: Option<String>,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Single source of truth for "is the caller signed in".
///
/// One gate is created at the application boundary and shared by every
/// view. Sign-in and sign-out go through the gate, so every subscriber
/// hears about them without polling.
pub struct SessionGate {
    auth: Arc<dyn AuthProvider>,
    listeners: Arc<Mutex<Listeners>>,
    observed: Mutex<Observed>,
}

impl SessionGate {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            auth,
            listeners: Arc::new(Mutex::new(Listeners::default())),
            observed: Mutex::new(Observed::default()),
        }
    }

    /// The current session, or `None` when the caller must be sent to login.
    ///
    /// If the session appeared, was refreshed or was dropped outside the gate
    /// since the last call, subscribers are told. The first call only
    /// records what it finds.
    pub async fn resolve_session(&self) -> Result<Option<Session>, CoreError> {
        let session = self.auth.get_session().await?;
        let token = session.as_ref().map(|s| s.access_token.clone());

        let (initialized, previous) = match self.observed.lock() {
            Ok(mut observed) => (
                std::mem::replace(&mut observed.initialized, true),
                std::mem::replace(&mut observed.token, token.clone()),
            ),
            Err(_) => (false, None),
        };

        match (previous, token) {
            (Some(old), Some(new)) if old != new => {
                self.notify(AuthEvent::TokenRefreshed, session.as_ref());
            }
            (Some(_), None) => self.notify(AuthEvent::SignedOut, None),
            (None, Some(_)) if initialized => {
                self.notify(AuthEvent::SignedIn, session.as_ref());
            }
            _ => {}
        }

        Ok(session)
    }

    /// Like [`resolve_session`](Self::resolve_session), but a missing session is an error.
    pub async fn require_session(&self) -> Result<Session, CoreError> {
        self.resolve_session()
            .await?
            .ok_or(CoreError::Unauthenticated)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CoreError::ValidationError(
                "Email and password are required".into(),
            ));
        }
        let session = self.auth.sign_in_with_password(email, password).await?;
        self.remember(Some(&session));
        self.notify(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    pub async fn sign_out(&self) -> Result<(), CoreError> {
        self.auth.sign_out().await?;
        self.remember(None);
        self.notify(AuthEvent::SignedOut, None);
        Ok(())
    }

    pub async fn resend_confirmation(&self, email: &str) -> Result<(), CoreError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CoreError::ValidationError("Please enter your email.".into()));
        }
        self.auth.resend_confirmation(email).await
    }

    /// Complete sign-up from a confirmation link. `code` is the link's
    /// `code` query parameter and is consumed once.
    pub async fn confirm_email(&self, code: Option<&str>) -> Result<Session, CoreError> {
        let code = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| CoreError::Auth("No confirmation code found.".into()))?;

        let session = self.auth.exchange_code_for_session(code).await?;
        self.remember(Some(&session));
        self.notify(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    /// Register a callback for every sign-in, sign-out and token refresh.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn on_session_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(AuthEvent, Option<&Session>) + Send + Sync + 'static,
    {
        let id = match self.listeners.lock() {
            Ok(mut listeners) => {
                let id = listeners.next_id;
                listeners.next_id += 1;
                listeners.entries.push((id, Arc::new(callback)));
                id
            }
            Err(_) => u64::MAX,
        };

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().map(|l| l.entries.len()).unwrap_or(0)
    }

    fn remember(&self, session: Option<&Session>) {
        if let Ok(mut observed) = self.observed.lock() {
            observed.initialized = true;
            observed.token = session.map(|s| s.access_token.clone());
        }
    }

    fn notify(&self, event: AuthEvent, session: Option<&Session>) {
        // Callbacks run without the lock held so they may drop subscriptions.
        let callbacks: Vec<Listener> = match self.listeners.lock() {
            Ok(listeners) => listeners.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            Err(_) => return,
        };
        debug!("Auth event {event} -> {} subscriber(s)", callbacks.len());
        for callback in callbacks {
            callback(event, session);
        }
    }
}

/// A live registration made with [`SessionGate::on_session_change`].
///
/// Dropping it unregisters the callback, so a view that subscribes when it
/// is mounted is unsubscribed on every exit path.
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
    active: Arc<AtomicBool>,
}

impl Subscription {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// A cheap handle that async continuations can hold to check whether the
    /// view that started them is still mounted.
    #[must_use]
    pub fn token(&self) -> ActiveToken {
        ActiveToken(Arc::clone(&self.active))
    }

    /// Explicit form of dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// See [`Subscription::token`].
#[derive(Debug, Clone)]
pub struct ActiveToken(Arc<AtomicBool>);

impl ActiveToken {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

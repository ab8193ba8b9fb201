use serde::{Deserialize, Serialize};

/// Every named screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Home,
    Login,
    Register,
    VerifyEmail,
    ConfirmEmail,
    Dashboard,
    FinanceSetup,
    Settings,
}

impl View {
    pub const ALL: [View; 8] = [
        View::Home,
        View::Login,
        View::Register,
        View::VerifyEmail,
        View::ConfirmEmail,
        View::Dashboard,
        View::FinanceSetup,
        View::Settings,
    ];

    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/login",
            View::Register => "/login/register",
            View::VerifyEmail => "/login/register/verify",
            View::ConfirmEmail => "/auth/Confirm",
            View::Dashboard => "/dashboard",
            View::FinanceSetup => "/userSetup",
            View::Settings => "/settings",
        }
    }

    /// Look up a view by path. A trailing slash and query string are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<View> {
        let path = path.split('?').next().unwrap_or(path);
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        View::ALL.into_iter().find(|v| v.path() == trimmed)
    }

    /// Views that need a session.
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, View::Dashboard | View::FinanceSetup)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// What to do when a view is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render(View),
    Redirect(View),
}

/// What a navigation entry does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Navigate(View),
    SignOut,
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub action: NavAction,
    /// Rendered as a button rather than a plain link
    pub is_button: bool,
}

/// Result of fitting navigation items into the available width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavLayout {
    /// Indices shown inline
    pub visible: Vec<usize>,
    /// Indices moved to the overflow menu
    pub overflow: Vec<usize>,
}

impl NavLayout {
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        !self.overflow.is_empty()
    }
}

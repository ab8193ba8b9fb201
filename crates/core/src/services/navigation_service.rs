use crate::models::view::{NavAction, NavItem, NavLayout, RouteDecision, View};

/// Viewport width at and above which every navigation item is shown inline.
pub const NAV_BREAKPOINT_PX: f64 = 768.0;

/// Width kept free for the overflow menu button.
pub const OVERFLOW_RESERVE_PX: f64 = 50.0;

/// Decide whether a view renders or redirects, given session presence.
///
/// - Private views without a session go to login
/// - Login with a session goes to the dashboard
#[must_use]
pub fn route(view: View, signed_in: bool) -> RouteDecision {
    match (view, signed_in) {
        (v, false) if v.is_private() => RouteDecision::Redirect(View::Login),
        (View::Login, true) => RouteDecision::Redirect(View::Dashboard),
        (v, _) => RouteDecision::Render(v),
    }
}

/// Navigation entries for the current state.
///
/// On the settings page the Settings button is replaced by Logout.
#[must_use]
pub fn nav_items(signed_in: bool, on_settings: bool) -> Vec<NavItem> {
    let link = |label, view| NavItem {
        label,
        action: NavAction::Navigate(view),
        is_button: false,
    };

    let mut items = vec![link("Home", View::Home)];
    if signed_in {
        items.push(link("Dashboard", View::Dashboard));
        items.push(link("Finance Information", View::FinanceSetup));
        items.push(if on_settings {
            NavItem {
                label: "Logout",
                action: NavAction::SignOut,
                is_button: true,
            }
        } else {
            NavItem {
                label: "Settings",
                action: NavAction::Navigate(View::Settings),
                is_button: true,
            }
        });
    } else {
        items.push(link("Login", View::Login));
        items.push(link("Register", View::Register));
    }
    items
}

/// Split navigation items into inline and overflow sets.
///
/// Items are placed greedily in order. One that would push the used width
/// past `container_width - OVERFLOW_RESERVE_PX` moves to the overflow menu;
/// a later, narrower item may still fit inline.
#[must_use]
pub fn partition_nav(container_width: f64, viewport_width: f64, item_widths: &[f64]) -> NavLayout {
    if viewport_width >= NAV_BREAKPOINT_PX {
        return NavLayout {
            visible: (0..item_widths.len()).collect(),
            overflow: Vec::new(),
        };
    }

    let budget = container_width - OVERFLOW_RESERVE_PX;
    let mut used = 0.0;
    let mut layout = NavLayout::default();

    for (idx, width) in item_widths.iter().enumerate() {
        if used + width > budget {
            layout.overflow.push(idx);
        } else {
            used += width;
            layout.visible.push(idx);
        }
    }
    layout
}

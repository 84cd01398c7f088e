//! Client-side routes and the guard that decides what each one shows.

use shared::models::Permission;
use strum::EnumIter;

use crate::session::Session;

pub const HOME_PATH: &str = "/";

/// Every screen the dashboard can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Screen {
    Login,
    Dashboard,
    Users,
    Employees,
    AdminConfig,
    OtEntry,
    OtLogs,
    TripleOt,
    Audit,
    OtReason,
}

impl Screen {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Users => "/users",
            Self::Employees => "/employees",
            Self::AdminConfig => "/admin/config",
            Self::OtEntry => "/ot/entry",
            Self::OtLogs => "/ot/logs",
            Self::TripleOt => "/triple-ot",
            Self::Audit => "/audit",
            Self::OtReason => "/ot-reason",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Employees => "Employees",
            Self::AdminConfig => "Roles & Permissions",
            Self::OtEntry => "OT Entry",
            Self::OtLogs => "OT Logs",
            Self::TripleOt => "Triple OT",
            Self::Audit => "Audit Logs",
            Self::OtReason => "Decision Reasons",
        }
    }

    /// Match a location path, ignoring any query string or trailing slash.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => HOME_PATH,
            trimmed => trimmed,
        };
        <Self as strum::IntoEnumIterator>::iter().find(|screen| screen.path() == path)
    }

    /// Only the login screen is reachable without a session.
    pub fn is_protected(self) -> bool {
        self != Self::Login
    }

    /// Permission the screen needs before it fetches anything. Screens without
    /// one render for every signed-in user.
    pub fn read_permission(self) -> Option<Permission> {
        match self {
            Self::Login | Self::Dashboard => None,
            Self::Users => Some(Permission::USERS_READ),
            Self::Employees => Some(Permission::EMPLOYEES_READ),
            Self::AdminConfig => Some(Permission::ROLES_READ),
            Self::OtEntry | Self::OtLogs => Some(Permission::OT_READ),
            Self::TripleOt => Some(Permission::TRIPLE_OT_READ),
            Self::Audit => Some(Permission::AUDIT_READ),
            Self::OtReason => Some(Permission::REASONS_READ),
        }
    }

    /// Whether the session may see this screen's content.
    pub fn is_readable(self, session: &Session) -> bool {
        self.read_permission()
            .is_none_or(|permission| session.has(permission))
    }
}

/// Outcome of [`guard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Bootstrap has not settled; show the loading screen.
    Loading,
    Render(Screen),
    Redirect(&'static str),
}

/// Decide what a location shows for the given session.
pub fn guard(path: &str, session: &Session) -> RouteDecision {
    let trimmed = path.split(['?', '#']).next().unwrap_or_default();
    if trimmed.trim_end_matches('/').is_empty() {
        return RouteDecision::Redirect(Screen::Dashboard.path());
    }

    let Some(screen) = Screen::from_path(path) else {
        return RouteDecision::Redirect(HOME_PATH);
    };

    if !screen.is_protected() {
        return if session.is_authenticated() {
            RouteDecision::Redirect(Screen::Dashboard.path())
        } else {
            RouteDecision::Render(screen)
        };
    }

    if session.is_loading() {
        RouteDecision::Loading
    } else if session.user().is_none() {
        RouteDecision::Redirect(Screen::Login.path())
    } else {
        RouteDecision::Render(screen)
    }
}

/// Follow redirects until the guard settles on something to show.
pub fn resolve(path: &str, session: &Session) -> RouteDecision {
    let mut current = path;
    for _ in 0..4 {
        match guard(current, session) {
            RouteDecision::Redirect(next) => current = next,
            settled => return settled,
        }
    }
    RouteDecision::Redirect(HOME_PATH)
}

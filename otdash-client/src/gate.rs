//! Permission Gate: what the signed-in role may see and do.
//!
//! Every function here is a pure lookup over a [`Session`] snapshot. The server
//! enforces permissions on its own; this only decides what the UI offers.

use shared::models::Permission;

use crate::navigation::Screen;
use crate::session::Session;

/// A sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub screen: Screen,
    pub label: &'static str,
}

/// A titled sidebar section with its visible links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGroup {
    pub label: &'static str,
    pub items: Vec<NavItem>,
}

const SIDEBAR: &[(&str, &[(Screen, &str)])] = &[
    ("Overview", &[(Screen::Dashboard, "Dashboard")]),
    (
        "Management",
        &[(Screen::Users, "Users"), (Screen::Employees, "Employees")],
    ),
    (
        "Overtime",
        &[(Screen::OtEntry, "OT Entry"), (Screen::OtLogs, "OT Logs")],
    ),
    ("Audit", &[(Screen::Audit, "Audit Logs")]),
    (
        "Settings",
        &[
            (Screen::TripleOt, "Triple OT"),
            (Screen::OtReason, "Decision Reasons"),
            (Screen::AdminConfig, "Roles & Permissions"),
        ],
    ),
];

/// Sidebar groups for `session`. A group with no visible item is omitted.
pub fn navigation(session: &Session) -> Vec<NavGroup> {
    SIDEBAR
        .iter()
        .filter_map(|&(label, entries)| {
            let items: Vec<NavItem> = entries
                .iter()
                .filter(|(screen, _)| screen.is_readable(session))
                .map(|&(screen, label)| NavItem { screen, label })
                .collect();
            (!items.is_empty()).then(|| NavGroup { label, items })
        })
        .collect()
}

/// The pending-approval bell is for approvers only.
pub fn shows_notification_bell(session: &Session) -> bool {
    session.has(Permission::OT_APPROVE)
}

macro_rules! capabilities {
    ($(
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $permission:ident),+ $(,)? }
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name {
                $(
                    #[doc = concat!("Granted `", stringify!($permission), "`.")]
                    pub $field: bool,
                )+
            }

            impl $name {
                pub fn of(session: &Session) -> Self {
                    Self {
                        $($field: session.has(Permission::$permission),)+
                    }
                }
            }
        )+
    };
}

capabilities! {
    /// Dashboard cards.
    DashboardCapabilities {
        users => USERS_READ,
        employees => EMPLOYEES_READ,
        stats => OT_STATS_READ,
        audit => AUDIT_READ,
    }

    /// Employees screen.
    EmployeeCapabilities {
        read => EMPLOYEES_READ,
        create => EMPLOYEES_CREATE,
        update => EMPLOYEES_UPDATE,
        delete => EMPLOYEES_DELETE,
        restore => EMPLOYEES_RESTORE,
    }

    /// Users screen.
    UserCapabilities {
        read => USERS_READ,
        create => USERS_CREATE,
        update => USERS_UPDATE,
        disable => USERS_DISABLE,
        reset_password => USERS_RESET_PASSWORD,
    }

    /// OT entry and OT logs screens.
    OtCapabilities {
        read => OT_READ,
        create => OT_CREATE,
        update => OT_UPDATE,
        approve => OT_APPROVE,
        reject => OT_REJECT,
        stats => OT_STATS_READ,
        audit => AUDIT_READ,
    }

    /// Triple OT dates screen.
    TripleOtCapabilities {
        read => TRIPLE_OT_READ,
        create => TRIPLE_OT_CREATE,
        delete => TRIPLE_OT_DELETE,
    }

    /// Decision reasons screen.
    ReasonCapabilities {
        read => REASONS_READ,
        create => REASONS_CREATE,
        update => REASONS_UPDATE,
        delete => REASONS_DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::user_with;

    fn labels(groups: &[NavGroup]) -> Vec<&'static str> {
        groups.iter().map(|group| group.label).collect()
    }

    #[test]
    fn bare_role_sees_only_the_dashboard() {
        let session = Session::signed_in("tok", user_with(&[]));
        let groups = navigation(&session);
        assert_eq!(labels(&groups), vec!["Overview"]);
        assert!(!shows_notification_bell(&session));
    }

    #[test]
    fn management_group_shows_only_granted_items() {
        let session = Session::signed_in("tok", user_with(&["employees.read"]));
        let groups = navigation(&session);
        let management = groups
            .iter()
            .find(|group| group.label == "Management")
            .unwrap();
        assert_eq!(management.items.len(), 1);
        assert_eq!(management.items[0].screen, Screen::Employees);
    }

    #[test]
    fn ot_read_reveals_entry_and_logs() {
        let session = Session::signed_in("tok", user_with(&["ot.read", "ot.approve"]));
        let groups = navigation(&session);
        let overtime = groups.iter().find(|group| group.label == "Overtime").unwrap();
        let screens: Vec<Screen> = overtime.items.iter().map(|item| item.screen).collect();
        assert_eq!(screens, vec![Screen::OtEntry, Screen::OtLogs]);
        assert!(shows_notification_bell(&session));
    }

    #[test]
    fn signed_out_session_has_no_capabilities() {
        let session = Session::signed_out();
        assert_eq!(OtCapabilities::of(&session), OtCapabilities::default());
        assert_eq!(labels(&navigation(&session)), vec!["Overview"]);
    }

    #[test]
    fn capabilities_follow_role_tokens() {
        let session = Session::signed_in(
            "tok",
            user_with(&["employees.read", "employees.update", "employees.restore"]),
        );
        let caps = EmployeeCapabilities::of(&session);
        assert!(caps.read && caps.update && caps.restore);
        assert!(!caps.create && !caps.delete);
    }
}

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Dot-namespaced capability token attached to a role, e.g. `ot.approve`.
///
/// The server may introduce tokens the dashboard has never heard of, so this is a
/// string newtype rather than a closed enum. The associated constants cover every
/// token the dashboard itself checks, which keeps call sites free of string typos.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

macro_rules! known_permissions {
    ($($name:ident => $token:literal),+ $(,)?) => {
        impl Permission {
            $(
                #[doc = concat!("`", $token, "`")]
                pub const $name: Permission = Permission(Cow::Borrowed($token));
            )+

            /// Every token the dashboard checks somewhere.
            pub const KNOWN: &'static [Permission] = &[$(Self::$name),+];
        }
    };
}

known_permissions! {
    USERS_READ => "users.read",
    USERS_CREATE => "users.create",
    USERS_UPDATE => "users.update",
    USERS_DISABLE => "users.disable",
    USERS_RESET_PASSWORD => "users.resetPassword",
    EMPLOYEES_READ => "employees.read",
    EMPLOYEES_CREATE => "employees.create",
    EMPLOYEES_UPDATE => "employees.update",
    EMPLOYEES_DELETE => "employees.delete",
    EMPLOYEES_RESTORE => "employees.restore",
    OT_READ => "ot.read",
    OT_CREATE => "ot.create",
    OT_UPDATE => "ot.update",
    OT_APPROVE => "ot.approve",
    OT_REJECT => "ot.reject",
    OT_STATS_READ => "ot.stats.read",
    AUDIT_READ => "audit.read",
    TRIPLE_OT_READ => "tripleOt.read",
    TRIPLE_OT_CREATE => "tripleOt.create",
    TRIPLE_OT_DELETE => "tripleOt.delete",
    REASONS_READ => "reasons.read",
    REASONS_CREATE => "reasons.create",
    REASONS_UPDATE => "reasons.update",
    REASONS_DELETE => "reasons.delete",
    ROLES_READ => "roles.read",
}

impl Permission {
    /// Wrap an arbitrary token, typically one received from the server.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Cow::Owned(token.into()))
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this token is one the dashboard knows how to gate on.
    #[must_use]
    pub fn is_known(&self) -> bool {
        Self::KNOWN.iter().any(|known| known.as_str() == self.as_str())
    }

    /// The namespace before the first dot (`ot` for `ot.stats.read`).
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.as_str()
            .split_once('.')
            .map_or(self.as_str(), |(namespace, _)| namespace)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn known_constant_matches_server_token() {
        assert_eq!(Permission::OT_APPROVE.as_str(), "ot.approve");
        assert_eq!(Permission::from("ot.approve"), Permission::OT_APPROVE);
        assert!(Permission::USERS_RESET_PASSWORD.is_known());
    }

    #[test]
    fn unknown_tokens_survive_deserialization() {
        let tokens: Vec<Permission> =
            serde_json::from_str(r#"["ot.read","payroll.export"]"#).unwrap();
        assert_eq!(tokens[0], Permission::OT_READ);
        assert_eq!(tokens[1].as_str(), "payroll.export");
        assert!(!tokens[1].is_known());
    }

    #[test]
    fn set_lookup_by_plain_str() {
        let set: BTreeSet<Permission> = [Permission::AUDIT_READ, Permission::new("x.y")]
            .into_iter()
            .collect();
        assert!(set.contains("audit.read"));
        assert!(set.contains("x.y"));
        assert!(!set.contains("audit"));
    }

    #[test]
    fn namespace_is_prefix_before_first_dot() {
        assert_eq!(Permission::OT_STATS_READ.namespace(), "ot");
        assert_eq!(Permission::new("standalone").namespace(), "standalone");
    }

    #[test]
    fn serializes_as_bare_string() {
        let json = serde_json::to_string(&Permission::TRIPLE_OT_DELETE).unwrap();
        assert_eq!(json, r#""tripleOt.delete""#);
    }
}

//! The role registry's vocabulary.
//!
//! `user_roles` rows are (user, role) pairs and a user may hold several
//! roles at once. The `Role` enum maps to the `app_role` Postgres enum and
//! carries the fixed dashboard priority used after login.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "app_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Student,
}

impl Role {
    /// Redirect priority after login: a user holding several roles lands on
    /// the highest-priority dashboard.
    pub const DASHBOARD_PRIORITY: [Role; 4] =
        [Role::Admin, Role::Teacher, Role::Parent, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Teacher => "/teacher",
            Role::Parent => "/parent",
            Role::Student => "/student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            "student" => Ok(Role::Student),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// The role whose dashboard a multi-role user is sent to, or `None` when
/// the user holds no roles at all.
pub fn primary_role(roles: &[Role]) -> Option<Role> {
    Role::DASHBOARD_PRIORITY
        .iter()
        .copied()
        .find(|role| roles.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_prefers_admin_over_everything() {
        let roles = [Role::Student, Role::Parent, Role::Admin];
        assert_eq!(primary_role(&roles), Some(Role::Admin));
    }

    #[test]
    fn priority_teacher_beats_parent_and_student() {
        let roles = [Role::Parent, Role::Teacher, Role::Student];
        assert_eq!(primary_role(&roles), Some(Role::Teacher));
    }

    #[test]
    fn priority_parent_beats_student() {
        assert_eq!(
            primary_role(&[Role::Student, Role::Parent]),
            Some(Role::Parent)
        );
    }

    #[test]
    fn no_roles_means_no_dashboard() {
        assert_eq!(primary_role(&[]), None);
    }

    #[test]
    fn dashboard_paths() {
        assert_eq!(Role::Admin.dashboard_path(), "/admin");
        assert_eq!(Role::Student.dashboard_path(), "/student");
    }

    #[test]
    fn parse_roundtrip() {
        for role in Role::DASHBOARD_PRIORITY {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), r#""teacher""#);
        let parsed: Role = serde_json::from_str(r#""parent""#).unwrap();
        assert_eq!(parsed, Role::Parent);
    }
}

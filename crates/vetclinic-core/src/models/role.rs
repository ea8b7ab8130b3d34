use serde::{Deserialize, Serialize};

/// Staff roles recognized by the clinic backend's `user_roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Receptionist,
    Accountant,
}

impl Role {
    /// Dashboard shown when an account has no recognized role assignment.
    pub const DEFAULT: Role = Role::Doctor;

    /// Parse a role label as stored in the `user_roles.role` column.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "admin" => Some(Role::Admin),
            "doctor" => Some(Role::Doctor),
            "receptionist" => Some(Role::Receptionist),
            "accountant" => Some(Role::Accountant),
            _ => None,
        }
    }

    /// Column value for this role.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Receptionist => "receptionist",
            Role::Accountant => "accountant",
        }
    }

    /// Human-readable title for badges and headers.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Doctor => "Veterinarian",
            Role::Receptionist => "Receptionist",
            Role::Accountant => "Accountant",
        }
    }

    /// Resolve the primary role from an ordered role set.
    /// The first assigned role wins; an empty set falls back to [`Role::DEFAULT`].
    pub fn primary(roles: &[Role]) -> Role {
        roles.first().copied().unwrap_or(Role::DEFAULT)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_labels() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("doctor"), Some(Role::Doctor));
        assert_eq!(Role::parse("receptionist"), Some(Role::Receptionist));
        assert_eq!(Role::parse("accountant"), Some(Role::Accountant));
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("Admin"), None); // labels are lowercase
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_primary_is_first_role() {
        let roles = vec![Role::Accountant, Role::Admin];
        assert_eq!(Role::primary(&roles), Role::Accountant);
    }

    #[test]
    fn test_primary_defaults_when_empty() {
        assert_eq!(Role::primary(&[]), Role::DEFAULT);
        assert_eq!(Role::DEFAULT, Role::Doctor);
    }

    #[test]
    fn test_serde_roundtrip_matches_column_labels() {
        let json = serde_json::to_string(&Role::Receptionist).unwrap();
        assert_eq!(json, "\"receptionist\"");
        let role: Role = serde_json::from_str("\"accountant\"").unwrap();
        assert_eq!(role, Role::Accountant);
    }
}

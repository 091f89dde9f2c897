use serde::{Deserialize, Serialize};

/// Coarse authorization category derived from a credential's role claim.
///
/// The enumeration is closed: an absent claim and an unrecognized value both
/// collapse to `Unknown`. `Unknown` is a value, not an error; it simply never
/// satisfies a non-empty role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Reader,
    Unknown,
}

impl Role {
    /// Map a raw role claim value to a role.
    pub fn from_claim(value: Option<&str>) -> Self {
        match value {
            Some("Admin") => Role::Admin,
            Some("Reader") => Role::Reader,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Reader => "Reader",
            Role::Unknown => "Unknown",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_map_exactly() {
        assert_eq!(Role::from_claim(Some("Admin")), Role::Admin);
        assert_eq!(Role::from_claim(Some("Reader")), Role::Reader);
    }

    #[test]
    fn absent_and_unrecognized_collapse_to_unknown() {
        assert_eq!(Role::from_claim(None), Role::Unknown);
        assert_eq!(Role::from_claim(Some("admin")), Role::Unknown);
        assert_eq!(Role::from_claim(Some("Moderator")), Role::Unknown);
        assert_eq!(Role::from_claim(Some("")), Role::Unknown);
    }
}

//! The authenticated caller, resolved once at the request boundary.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Vendor,
    Customer,
}

/// An authenticated caller.
///
/// Handlers resolve the principal once at the boundary and pass it by
/// value into visibility decisions; nothing downstream re-fetches the
/// user mid-request. A caller that cannot be resolved should be given
/// [`Role::Customer`], which sees only public products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
}

impl Principal {
    /// Create a new principal.
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether this principal may see non-public products.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        assert!(Principal::new(1, Role::Admin).is_admin());
        assert!(!Principal::new(2, Role::Vendor).is_admin());
        assert!(!Principal::new(3, Role::Customer).is_admin());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(Role::Vendor).unwrap(), "vendor");
        assert_eq!(serde_json::to_value(Role::Customer).unwrap(), "customer");
    }
}

//! Role definitions and the role registry.
//!
//! Exactly 15 roles exist. The set is closed: a principal has exactly one
//! role, roles are never combined, and no role inherits from another. The
//! four marketing-staff sub-roles carry identical permission rows today but
//! remain independent entries so they can diverge without a schema change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of roles the registry must contain.
pub const ROLE_COUNT: usize = 15;

/// Role in the access control system.
///
/// Wire names are the exact strings the profile service emits; matching is
/// case-sensitive with no trimming or normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access to every menu, including destructive operations.
    SuperAdmin,

    /// Read-only oversight across every menu and every sub-scope.
    ///
    /// The Director sees everything and may change nothing; any mutating
    /// request under this role is rejected regardless of menu.
    Director,

    /// Manages the sales team: team-scoped KPI visibility, full CRM write.
    SalesManager,

    /// Individual seller: own records only in CRM and KPI.
    SalesExecutive,

    /// Back-office assistant for sales: CRM/ticketing assist access with no
    /// ownership restriction and no destructive operations.
    SalesSupport,

    /// Manages the marketing team.
    MarketingManager,

    /// Marketing staff, content desk.
    MarketingContent,

    /// Marketing staff, campaign desk.
    MarketingCampaign,

    /// Marketing staff, digital desk.
    MarketingDigital,

    /// Marketing staff, events desk.
    MarketingEvents,

    /// Accounts receivable / DSO owner. No ticketing access.
    Finance,

    /// Front-line ticket handling plus customer-scoped CRM reads.
    CustomerService,

    /// Export/import operations desk (department-scoped, masked).
    EximOps,

    /// Domestic freight operations desk (department-scoped, masked).
    DomesticOps,

    /// Warehouse operations desk (department-scoped, masked).
    WarehouseOps,
}

impl Role {
    /// Canonical enumeration of every role, in registry order.
    pub const ALL: [Role; ROLE_COUNT] = [
        Role::SuperAdmin,
        Role::Director,
        Role::SalesManager,
        Role::SalesExecutive,
        Role::SalesSupport,
        Role::MarketingManager,
        Role::MarketingContent,
        Role::MarketingCampaign,
        Role::MarketingDigital,
        Role::MarketingEvents,
        Role::Finance,
        Role::CustomerService,
        Role::EximOps,
        Role::DomesticOps,
        Role::WarehouseOps,
    ];

    /// Returns the wire name of this role.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super admin",
            Role::Director => "Director",
            Role::SalesManager => "sales manager",
            Role::SalesExecutive => "sales executive",
            Role::SalesSupport => "sales support",
            Role::MarketingManager => "marketing manager",
            Role::MarketingContent => "marketing staff (content)",
            Role::MarketingCampaign => "marketing staff (campaign)",
            Role::MarketingDigital => "marketing staff (digital)",
            Role::MarketingEvents => "marketing staff (events)",
            Role::Finance => "finance",
            Role::CustomerService => "customer service",
            Role::EximOps => "EXIM Ops (operation)",
            Role::DomesticOps => "Domestic Ops (operation)",
            Role::WarehouseOps => "Warehouse Ops (operation)",
        }
    }

    /// Parses a wire name into a role.
    ///
    /// Matching is exact and case-sensitive: `"Finance"` does not resolve,
    /// `"finance"` does. No trimming is applied.
    pub fn from_wire(candidate: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.wire_name() == candidate)
    }

    /// Returns whether this is one of the three department-scoped
    /// operations roles.
    pub fn is_operations(&self) -> bool {
        matches!(self, Role::EximOps | Role::DomesticOps | Role::WarehouseOps)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Error raised when the role registry fails its startup invariants.
///
/// These are configuration invariant violations: fatal, startup-time only,
/// never recoverable per-request. A process holding a malformed registry
/// must not begin serving traffic.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry does not contain exactly [`ROLE_COUNT`] roles.
    #[error("role registry must contain exactly {expected} roles, found {actual}")]
    Cardinality { expected: usize, actual: usize },

    /// The same role appears more than once.
    #[error("role '{role}' appears more than once in the registry")]
    Duplicate { role: Role },
}

/// The closed set of valid role identifiers.
///
/// Constructed once at process start and injected by reference; there is no
/// runtime role editing anywhere in the system. Construction fails fast if
/// the cardinality invariant does not hold, so a miscount is caught at boot
/// rather than surfacing as an authorization gap in production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    roles: Vec<Role>,
}

impl RoleRegistry {
    /// Builds the production registry from [`Role::ALL`].
    ///
    /// # Panics
    ///
    /// Panics if `Role::ALL` violates the cardinality invariant, which is
    /// unreachable for the canonical array.
    pub fn standard() -> Self {
        Self::from_roles(Role::ALL.to_vec()).expect("canonical role set satisfies invariants")
    }

    /// Builds a registry from an explicit role list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Cardinality`] unless exactly [`ROLE_COUNT`]
    /// roles are supplied, and [`RegistryError::Duplicate`] if any role
    /// appears twice.
    pub fn from_roles(roles: Vec<Role>) -> Result<Self, RegistryError> {
        if roles.len() != ROLE_COUNT {
            return Err(RegistryError::Cardinality {
                expected: ROLE_COUNT,
                actual: roles.len(),
            });
        }
        for (i, role) in roles.iter().enumerate() {
            if roles[..i].contains(role) {
                return Err(RegistryError::Duplicate { role: *role });
            }
        }
        Ok(Self { roles })
    }

    /// Returns true iff the candidate exactly matches a registered role's
    /// wire name (case-sensitive, no trimming).
    pub fn is_valid_role(&self, candidate: &str) -> bool {
        self.roles.iter().any(|r| r.wire_name() == candidate)
    }

    /// Returns the registered roles.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Number of registered roles. Always [`ROLE_COUNT`] for a constructed
    /// registry.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// A constructed registry is never empty.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_cardinality() {
        let registry = RoleRegistry::standard();
        assert_eq!(registry.len(), ROLE_COUNT);
        assert_eq!(registry.len(), 15);
    }

    #[test]
    fn test_registry_rejects_fourteen_roles() {
        // Removing one role must fail construction, never reach serving.
        let mut roles = Role::ALL.to_vec();
        roles.pop();

        let err = RoleRegistry::from_roles(roles).unwrap_err();
        match err {
            RegistryError::Cardinality { expected, actual } => {
                assert_eq!(expected, 15);
                assert_eq!(actual, 14);
            }
            RegistryError::Duplicate { .. } => panic!("expected cardinality error"),
        }
    }

    #[test]
    fn test_registry_rejects_sixteen_roles() {
        let mut roles = Role::ALL.to_vec();
        roles.push(Role::Finance);
        let err = RoleRegistry::from_roles(roles).unwrap_err();
        assert!(matches!(err, RegistryError::Cardinality { actual: 16, .. }));
    }

    #[test]
    fn test_registry_rejects_duplicate() {
        let mut roles = Role::ALL.to_vec();
        roles.pop();
        roles.push(Role::Finance); // Finance now appears twice
        let err = RoleRegistry::from_roles(roles).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { role: Role::Finance }));
    }

    #[test]
    fn test_is_valid_role_exact_match() {
        let registry = RoleRegistry::standard();

        assert!(registry.is_valid_role("finance"));
        assert!(registry.is_valid_role("Director"));
        assert!(registry.is_valid_role("EXIM Ops (operation)"));

        // Case-sensitive, no trimming, no normalization
        assert!(!registry.is_valid_role("Finance"));
        assert!(!registry.is_valid_role("director"));
        assert!(!registry.is_valid_role(" finance"));
        assert!(!registry.is_valid_role("finance "));
        assert!(!registry.is_valid_role("exim ops (operation)"));
        assert!(!registry.is_valid_role(""));
    }

    #[test]
    fn test_wire_name_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_wire(role.wire_name()), Some(role));
        }
        assert_eq!(Role::from_wire("no such role"), None);
    }

    #[test]
    fn test_wire_names_unique() {
        for (i, a) in Role::ALL.iter().enumerate() {
            for b in &Role::ALL[i + 1..] {
                assert_ne!(a.wire_name(), b.wire_name());
            }
        }
    }

    #[test]
    fn test_operations_roles() {
        assert!(Role::EximOps.is_operations());
        assert!(Role::DomesticOps.is_operations());
        assert!(Role::WarehouseOps.is_operations());
        assert!(!Role::Finance.is_operations());
        assert!(!Role::SuperAdmin.is_operations());
    }
}

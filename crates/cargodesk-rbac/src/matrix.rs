//! The permission matrix: a total lookup table from (role, menu) to an
//! access level.
//!
//! Permissions are an explicit enumerated table rather than inherited or
//! computed rules. That trades verbosity for auditability: every role's
//! access to every menu is independently visible and independently
//! testable, with no hidden interaction between roles.
//!
//! The matrix is process-wide static configuration: constructed once at
//! startup, validated for totality, and never mutated. Changing access is a
//! code change and redeploy, not a runtime operation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::AccessLevel;
use crate::menus::Menu;
use crate::roles::{Role, RoleRegistry};

/// One cell of the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    pub role: Role,
    pub menu: Menu,
    pub level: AccessLevel,
}

/// Error raised when the matrix fails its startup invariants.
///
/// Like registry errors, these are fatal configuration invariant
/// violations: an authorization table with an undefined cell must crash the
/// process rather than fall through to an implicit deny (or worse, an
/// implicit allow).
#[derive(Debug, Error)]
pub enum MatrixError {
    /// A (role, menu) pair has no entry.
    #[error("permission matrix has no entry for ({role}, {menu})")]
    MissingEntry { role: Role, menu: Menu },

    /// A (role, menu) pair has more than one entry.
    #[error("permission matrix has duplicate entries for ({role}, {menu})")]
    DuplicateEntry { role: Role, menu: Menu },
}

/// Total mapping from (role, menu) to access level.
///
/// Immutable after construction; share by reference. Concurrent reads need
/// no coordination because there are no writers after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    registry: RoleRegistry,
    cells: BTreeMap<(Role, Menu), AccessLevel>,
}

impl PermissionMatrix {
    /// Builds the embedded production matrix.
    ///
    /// The table itself lives in [`standard_access`], an exhaustive match
    /// that the compiler keeps total; validation still runs so the startup
    /// invariant has a single enforcement path for both the standard and
    /// any substituted matrix.
    ///
    /// # Panics
    ///
    /// Panics if the embedded table fails validation, which is unreachable
    /// for an exhaustive match over closed enums.
    pub fn standard() -> Self {
        let registry = RoleRegistry::standard();
        let entries: Vec<PermissionEntry> = registry
            .roles()
            .iter()
            .flat_map(|&role| {
                Menu::ALL.iter().map(move |&menu| PermissionEntry {
                    role,
                    menu,
                    level: standard_access(role, menu),
                })
            })
            .collect();

        Self::from_entries(registry, entries).expect("embedded matrix is total by construction")
    }

    /// Builds a matrix from an explicit entry list.
    ///
    /// Intended for tests substituting alternate tables; production code
    /// uses [`PermissionMatrix::standard`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::MissingEntry`] unless every (role, menu) pair
    /// of the registry crossed with the 5 menus has an entry, and
    /// [`MatrixError::DuplicateEntry`] if any pair has two.
    pub fn from_entries(
        registry: RoleRegistry,
        entries: Vec<PermissionEntry>,
    ) -> Result<Self, MatrixError> {
        let mut cells = BTreeMap::new();
        for entry in entries {
            if cells.insert((entry.role, entry.menu), entry.level).is_some() {
                return Err(MatrixError::DuplicateEntry {
                    role: entry.role,
                    menu: entry.menu,
                });
            }
        }

        for &role in registry.roles() {
            for menu in Menu::ALL {
                if !cells.contains_key(&(role, menu)) {
                    return Err(MatrixError::MissingEntry { role, menu });
                }
            }
        }

        Ok(Self { registry, cells })
    }

    /// Returns the access level for a (role, menu) pair.
    ///
    /// Pure and total: every valid pair has a defined answer because
    /// construction validated totality.
    pub fn access_level(&self, role: Role, menu: Menu) -> AccessLevel {
        *self
            .cells
            .get(&(role, menu))
            .expect("matrix is total over (role, menu); validated at construction")
    }

    /// Returns every menu the role can see at all.
    ///
    /// This is the sole authority for menu visibility: navigation surfaces
    /// must derive from it and never hardcode a role-to-menu mapping of
    /// their own, so enforcement and presentation cannot drift apart.
    pub fn allowed_menus(&self, role: Role) -> Vec<Menu> {
        Menu::ALL
            .into_iter()
            .filter(|&menu| self.access_level(role, menu) != AccessLevel::NoAccess)
            .collect()
    }

    /// Returns whether the role may mutate rows in the menu.
    pub fn can_write(&self, role: Role, menu: Menu) -> bool {
        self.access_level(role, menu).can_write()
    }

    /// Returns whether the role may delete rows in the menu.
    pub fn can_delete(&self, role: Role, menu: Menu) -> bool {
        self.access_level(role, menu).can_delete()
    }

    /// Returns the role registry backing this matrix.
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Iterates every cell, for permission-review exports.
    pub fn entries(&self) -> impl Iterator<Item = PermissionEntry> + '_ {
        self.cells
            .iter()
            .map(|(&(role, menu), &level)| PermissionEntry { role, menu, level })
    }
}

/// The embedded production table.
///
/// Exhaustive over both enums, so a new role or menu fails compilation
/// until its row or column is decided here.
fn standard_access(role: Role, menu: Menu) -> AccessLevel {
    use AccessLevel as L;
    use Menu as M;

    match role {
        Role::SuperAdmin => L::Admin,

        Role::Director => L::ReadAll,

        Role::SalesManager => match menu {
            M::Dashboard => L::Read,
            M::Kpi => L::ReadTeam,
            M::Crm => L::ReadWrite,
            M::Ticketing => L::ReadScoped,
            M::Dso => L::ReadArDsoSummary,
        },

        Role::SalesExecutive => match menu {
            M::Dashboard => L::ReadOwn,
            M::Kpi => L::ReadOwn,
            M::Crm => L::ReadWriteOwn,
            M::Ticketing => L::ReadScoped,
            M::Dso => L::ReadArDsoSummary,
        },

        Role::SalesSupport => match menu {
            M::Dashboard => L::NoAccess,
            M::Kpi => L::NoAccess,
            M::Crm => L::ReadWriteAssist,
            M::Ticketing => L::ReadWriteAssist,
            M::Dso => L::NoAccess,
        },

        Role::MarketingManager => match menu {
            M::Dashboard => L::Read,
            M::Kpi => L::ReadTeam,
            M::Crm => L::ReadWrite,
            M::Ticketing => L::NoAccess,
            M::Dso => L::NoAccess,
        },

        // The four marketing desks carry identical rows today. They stay
        // independent entries; collapse only if they must move in lockstep.
        Role::MarketingContent
        | Role::MarketingCampaign
        | Role::MarketingDigital
        | Role::MarketingEvents => match menu {
            M::Dashboard => L::NoAccess,
            M::Kpi => L::ReadOwn,
            M::Crm => L::ReadWriteOwn,
            M::Ticketing => L::NoAccess,
            M::Dso => L::NoAccess,
        },

        Role::Finance => match menu {
            M::Dashboard => L::Read,
            M::Kpi => L::Read,
            M::Crm => L::Read,
            M::Ticketing => L::NoAccess,
            M::Dso => L::ReadWrite,
        },

        Role::CustomerService => match menu {
            M::Dashboard => L::ReadSlaOnly,
            M::Kpi => L::ReadOwn,
            M::Crm => L::ReadScoped,
            M::Ticketing => L::ReadWrite,
            M::Dso => L::NoAccess,
        },

        Role::EximOps | Role::DomesticOps => match menu {
            M::Dashboard => L::ReadSlaOnly,
            M::Kpi => L::ReadOwn,
            M::Crm => L::NoAccess,
            M::Ticketing => L::ReadWriteDeptMasked,
            M::Dso => L::NoAccess,
        },

        Role::WarehouseOps => match menu {
            M::Dashboard => L::ReadSlaOnly,
            M::Kpi => L::NoAccess,
            M::Crm => L::NoAccess,
            M::Ticketing => L::ReadWriteDeptMasked,
            M::Dso => L::NoAccess,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totality() {
        let matrix = PermissionMatrix::standard();
        for role in Role::ALL {
            for menu in Menu::ALL {
                // Must not panic for any valid pair.
                let _ = matrix.access_level(role, menu);
            }
        }
    }

    #[test]
    fn test_missing_entry_is_fatal() {
        let registry = RoleRegistry::standard();
        let mut entries: Vec<PermissionEntry> = PermissionMatrix::standard().entries().collect();
        entries.retain(|e| !(e.role == Role::Finance && e.menu == Menu::Dso));

        let err = PermissionMatrix::from_entries(registry, entries).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::MissingEntry {
                role: Role::Finance,
                menu: Menu::Dso
            }
        ));
    }

    #[test]
    fn test_duplicate_entry_is_fatal() {
        let registry = RoleRegistry::standard();
        let mut entries: Vec<PermissionEntry> = PermissionMatrix::standard().entries().collect();
        entries.push(PermissionEntry {
            role: Role::Finance,
            menu: Menu::Dso,
            level: AccessLevel::NoAccess,
        });

        let err = PermissionMatrix::from_entries(registry, entries).unwrap_err();
        assert!(matches!(err, MatrixError::DuplicateEntry { .. }));
    }

    #[test]
    fn test_finance_row() {
        let matrix = PermissionMatrix::standard();
        assert_eq!(
            matrix.access_level(Role::Finance, Menu::Ticketing),
            AccessLevel::NoAccess
        );
        assert_eq!(
            matrix.access_level(Role::Finance, Menu::Dso),
            AccessLevel::ReadWrite
        );
    }

    #[test]
    fn test_sales_support_dashboard_denied() {
        let matrix = PermissionMatrix::standard();
        assert_eq!(
            matrix.access_level(Role::SalesSupport, Menu::Dashboard),
            AccessLevel::NoAccess
        );
    }

    #[test]
    fn test_director_sees_all_menus_read_only() {
        let matrix = PermissionMatrix::standard();
        assert_eq!(matrix.allowed_menus(Role::Director), Menu::ALL.to_vec());
        for menu in Menu::ALL {
            assert!(!matrix.can_write(Role::Director, menu));
            assert_eq!(
                matrix.access_level(Role::Director, menu),
                AccessLevel::ReadAll
            );
        }
    }

    #[test]
    fn test_super_admin_supremacy() {
        let matrix = PermissionMatrix::standard();
        for menu in Menu::ALL {
            assert_ne!(
                matrix.access_level(Role::SuperAdmin, menu),
                AccessLevel::NoAccess
            );
            assert!(matrix.can_write(Role::SuperAdmin, menu));
            assert!(matrix.can_delete(Role::SuperAdmin, menu));
        }
    }

    #[test]
    fn test_exim_ops_write_capability() {
        let matrix = PermissionMatrix::standard();
        // RW_DEPT_MASKED writes; R_SLA does not.
        assert!(matrix.can_write(Role::EximOps, Menu::Ticketing));
        assert!(!matrix.can_write(Role::EximOps, Menu::Dashboard));
    }

    #[test]
    fn test_allowed_menus_matches_non_no_access() {
        let matrix = PermissionMatrix::standard();
        for role in Role::ALL {
            let allowed = matrix.allowed_menus(role);
            for menu in Menu::ALL {
                let visible = allowed.contains(&menu);
                let granted = matrix.access_level(role, menu) != AccessLevel::NoAccess;
                assert_eq!(visible, granted, "drift for ({role}, {menu})");
            }
        }
    }

    #[test]
    fn test_marketing_desks_share_rows() {
        let matrix = PermissionMatrix::standard();
        let desks = [
            Role::MarketingContent,
            Role::MarketingCampaign,
            Role::MarketingDigital,
            Role::MarketingEvents,
        ];
        for menu in Menu::ALL {
            let level = matrix.access_level(desks[0], menu);
            for desk in &desks[1..] {
                assert_eq!(matrix.access_level(*desk, menu), level);
            }
        }
    }

    #[test]
    fn test_every_tag_appears_in_table() {
        // The embedded table exercises the full access-level vocabulary;
        // an unused tag usually means a row was edited by mistake.
        let matrix = PermissionMatrix::standard();
        for level in AccessLevel::ALL {
            assert!(
                matrix.entries().any(|e| e.level == level),
                "tag {level} unused in standard matrix"
            );
        }
    }
}

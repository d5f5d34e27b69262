//! Scope predicates: the row-filtering rule derived from an access level
//! plus the requesting identity.
//!
//! A predicate is structured data, never a bare boolean. Callers receive it
//! inside an `Allowed` decision and must thread it into every query they
//! issue for the request; the store layer refuses to build a query without
//! one.

use cargodesk_types::{DeptCode, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::AccessLevel;
use crate::identity::Identity;
use crate::masking::MASKED_CUSTOMER_COLUMNS;

/// Aggregate view exposed to aggregate-only access levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateView {
    /// SLA and response-time aggregates.
    SlaMetrics,

    /// Accounts-receivable / DSO summary aggregates.
    ArDsoSummary,
}

/// Row-filtering rule applied to every read and write of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopePredicate {
    /// Every row in the menu's domain.
    Unrestricted,

    /// Rows owned by the given user.
    OwnerEquals { user_id: UserId },

    /// Rows owned by the leader or any of the leader's subordinates.
    OwnerInTeam { leader: UserId },

    /// Rows whose related customer is owned by or assigned to the user.
    CustomerAssignedTo { user_id: UserId },

    /// Rows of one department, with the named columns masked in every
    /// response payload.
    DepartmentEquals {
        dept: DeptCode,
        masked_columns: Vec<String>,
    },

    /// No row access at all: only the named aggregate view.
    AggregateOnly { view: AggregateView },
}

impl ScopePredicate {
    /// Short tag naming the scope shape, for audit serialization.
    pub fn kind(&self) -> &'static str {
        match self {
            ScopePredicate::Unrestricted => "unrestricted",
            ScopePredicate::OwnerEquals { .. } => "owner",
            ScopePredicate::OwnerInTeam { .. } => "team",
            ScopePredicate::CustomerAssignedTo { .. } => "customer",
            ScopePredicate::DepartmentEquals { .. } => "department-masked",
            ScopePredicate::AggregateOnly { .. } => "aggregate",
        }
    }

    /// Columns that must be masked in response payloads under this scope.
    ///
    /// Empty for every scope except the department-masked one.
    pub fn masked_columns(&self) -> &[String] {
        match self {
            ScopePredicate::DepartmentEquals { masked_columns, .. } => masked_columns,
            _ => &[],
        }
    }
}

/// Error deriving a scope predicate from an access level and identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// `NoAccess` has no scope; the gate must deny before derivation.
    #[error("no scope exists for a NoAccess level")]
    NoAccess,

    /// A department-scoped level was granted to an identity with no
    /// department code. The profile resolver broke its contract; the gate
    /// fails closed.
    #[error("identity {user_id} has a department-scoped level but no department code")]
    MissingDepartment { user_id: UserId },
}

impl AccessLevel {
    /// Derives the scope predicate for this level, parameterized with the
    /// requesting identity.
    ///
    /// # Errors
    ///
    /// - [`ScopeError::NoAccess`] for `NoAccess` (callers deny first).
    /// - [`ScopeError::MissingDepartment`] when a dept-masked level meets an
    ///   identity without a department code.
    pub fn scope_for(&self, identity: &Identity) -> Result<ScopePredicate, ScopeError> {
        match self {
            AccessLevel::NoAccess => Err(ScopeError::NoAccess),

            AccessLevel::Read
            | AccessLevel::ReadAll
            | AccessLevel::ReadWrite
            | AccessLevel::ReadWriteAssist
            | AccessLevel::Admin => Ok(ScopePredicate::Unrestricted),

            AccessLevel::ReadOwn | AccessLevel::ReadWriteOwn => Ok(ScopePredicate::OwnerEquals {
                user_id: identity.user_id,
            }),

            // Team scope: the requester is the leader; subordinate
            // expansion happens in the store layer.
            AccessLevel::ReadTeam => Ok(ScopePredicate::OwnerInTeam {
                leader: identity.user_id,
            }),

            AccessLevel::ReadScoped => Ok(ScopePredicate::CustomerAssignedTo {
                user_id: identity.user_id,
            }),

            AccessLevel::ReadWriteDeptMasked => {
                let dept = identity
                    .dept_code
                    .clone()
                    .ok_or(ScopeError::MissingDepartment {
                        user_id: identity.user_id,
                    })?;
                Ok(ScopePredicate::DepartmentEquals {
                    dept,
                    masked_columns: MASKED_CUSTOMER_COLUMNS
                        .iter()
                        .map(|c| (*c).to_string())
                        .collect(),
                })
            }

            AccessLevel::ReadSlaOnly => Ok(ScopePredicate::AggregateOnly {
                view: AggregateView::SlaMetrics,
            }),

            AccessLevel::ReadArDsoSummary => Ok(ScopePredicate::AggregateOnly {
                view: AggregateView::ArDsoSummary,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    fn identity(role: Role) -> Identity {
        Identity::new(role, UserId::new(42))
    }

    #[test]
    fn test_unrestricted_levels() {
        let id = identity(Role::SuperAdmin);
        for level in [
            AccessLevel::Read,
            AccessLevel::ReadAll,
            AccessLevel::ReadWrite,
            AccessLevel::ReadWriteAssist,
            AccessLevel::Admin,
        ] {
            assert_eq!(level.scope_for(&id).unwrap(), ScopePredicate::Unrestricted);
        }
    }

    #[test]
    fn test_owner_scope_carries_user_id() {
        let id = identity(Role::SalesExecutive);
        let scope = AccessLevel::ReadWriteOwn.scope_for(&id).unwrap();
        assert_eq!(
            scope,
            ScopePredicate::OwnerEquals {
                user_id: UserId::new(42)
            }
        );
    }

    #[test]
    fn test_team_scope_leader_is_requester() {
        let id = identity(Role::SalesManager).with_manager(UserId::new(1));
        let scope = AccessLevel::ReadTeam.scope_for(&id).unwrap();
        // The team filter hangs off the requester, not their own manager.
        assert_eq!(
            scope,
            ScopePredicate::OwnerInTeam {
                leader: UserId::new(42)
            }
        );
    }

    #[test]
    fn test_dept_masked_scope_carries_mask_list() {
        let id = identity(Role::EximOps).with_dept(DeptCode::new("EXIM").unwrap());
        let scope = AccessLevel::ReadWriteDeptMasked.scope_for(&id).unwrap();

        match &scope {
            ScopePredicate::DepartmentEquals {
                dept,
                masked_columns,
            } => {
                assert_eq!(dept.as_str(), "EXIM");
                assert!(!masked_columns.is_empty());
                assert!(masked_columns.iter().any(|c| c == "customer_name"));
            }
            other => panic!("expected department scope, got {other:?}"),
        }
        assert!(!scope.masked_columns().is_empty());
    }

    #[test]
    fn test_dept_masked_without_dept_fails_closed() {
        let id = identity(Role::EximOps); // resolver forgot the dept code
        let err = AccessLevel::ReadWriteDeptMasked.scope_for(&id).unwrap_err();
        assert_eq!(
            err,
            ScopeError::MissingDepartment {
                user_id: UserId::new(42)
            }
        );
    }

    #[test]
    fn test_aggregate_views() {
        let id = identity(Role::EximOps);
        assert_eq!(
            AccessLevel::ReadSlaOnly.scope_for(&id).unwrap(),
            ScopePredicate::AggregateOnly {
                view: AggregateView::SlaMetrics
            }
        );
        assert_eq!(
            AccessLevel::ReadArDsoSummary.scope_for(&id).unwrap(),
            ScopePredicate::AggregateOnly {
                view: AggregateView::ArDsoSummary
            }
        );
    }

    #[test]
    fn test_no_access_has_no_scope() {
        let id = identity(Role::Finance);
        assert_eq!(
            AccessLevel::NoAccess.scope_for(&id).unwrap_err(),
            ScopeError::NoAccess
        );
    }

    #[test]
    fn test_masked_columns_empty_outside_dept_scope() {
        assert!(ScopePredicate::Unrestricted.masked_columns().is_empty());
        assert!(
            ScopePredicate::OwnerEquals {
                user_id: UserId::new(1)
            }
            .masked_columns()
            .is_empty()
        );
    }

    #[test]
    fn test_scope_kind_tags() {
        assert_eq!(ScopePredicate::Unrestricted.kind(), "unrestricted");
        assert_eq!(
            ScopePredicate::AggregateOnly {
                view: AggregateView::SlaMetrics
            }
            .kind(),
            "aggregate"
        );
    }
}

//! Resolved request identity and the profile resolver seam.
//!
//! Identity is produced once per authenticated request by an external
//! profile service and treated as immutable input for the rest of the
//! request. The core never caches or persists it.

use cargodesk_types::{DeptCode, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::Role;

/// Opaque session token handed to the profile resolver.
///
/// The core never inspects the token; it only forwards it to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A fully resolved principal for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The principal's single role.
    pub role: Role,

    /// The principal's user id.
    pub user_id: UserId,

    /// Department code, set for department-scoped operations roles.
    pub dept_code: Option<DeptCode>,

    /// The principal's manager, set for team-member roles.
    pub manager_id: Option<UserId>,
}

impl Identity {
    /// Creates an identity with no department or manager attributes.
    pub fn new(role: Role, user_id: UserId) -> Self {
        Self {
            role,
            user_id,
            dept_code: None,
            manager_id: None,
        }
    }

    /// Sets the department code.
    pub fn with_dept(mut self, dept_code: DeptCode) -> Self {
        self.dept_code = Some(dept_code);
        self
    }

    /// Sets the manager id.
    pub fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }
}

/// Error from identity resolution.
///
/// `Unauthenticated` is a distinct failure kind from any authorization
/// denial: it is surfaced before any role or menu lookup is attempted, so
/// clients can distinguish "log in" from "you don't have access".
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No resolvable identity for the session.
    #[error("unauthenticated: no resolvable identity for session")]
    Unauthenticated,

    /// The profile service failed.
    #[error("profile service unavailable: {0}")]
    Unavailable(String),
}

/// External collaborator that maps an authenticated session to an identity.
///
/// Implementations must return a fully resolved identity (role plus the
/// attributes that role's scoping needs) before the authorization gate is
/// consulted. The gate performs no authentication of its own.
pub trait ProfileResolver {
    fn resolve(&self, token: &SessionToken) -> Result<Identity, ResolveError>;
}

//! The authorization gate: the single enforcement point every
//! request-handling code path calls before touching data.
//!
//! The gate is purely a function of its inputs against the immutable
//! permission matrix: no shared mutable state, no locks, no I/O. Any number
//! of requests may evaluate it concurrently without coordination.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::access::AccessLevel;
use crate::identity::Identity;
use crate::matrix::PermissionMatrix;
use crate::menus::Menu;
use crate::scope::ScopePredicate;

/// Kind of mutating operation a caller intends to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MutationKind {
    Create,
    Update,
    /// Destructive removal. Requires delete capability, not just write.
    Delete,
}

/// Outcome of an authorization check.
///
/// An `Allowed` decision carries the scope predicate callers must apply to
/// every read and write issued for the request. The predicate is a
/// pre-built filter object, not an advisory flag: the store layer requires
/// one to construct a query at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Access denied. The caller responds with a generic forbidden outcome
    /// and performs no data access. The response must not reveal whether
    /// the underlying resource exists.
    Denied,

    /// Access granted at the given level, constrained to the given scope.
    Allowed {
        level: AccessLevel,
        scope: ScopePredicate,
    },
}

impl Decision {
    /// Returns whether this decision grants access.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }

    /// Serializable summary for audit logging.
    pub fn summary(&self) -> DecisionSummary {
        match self {
            Decision::Denied => DecisionSummary {
                allowed: false,
                access_level: AccessLevel::NoAccess.wire_name(),
                scope_kind: "none",
            },
            Decision::Allowed { level, scope } => DecisionSummary {
                allowed: true,
                access_level: level.wire_name(),
                scope_kind: scope.kind(),
            },
        }
    }
}

/// Flat, serializable form of a decision for audit trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecisionSummary {
    pub allowed: bool,
    pub access_level: &'static str,
    pub scope_kind: &'static str,
}

/// The enforcement point.
///
/// Holds the immutable matrix by value and is shared by reference across
/// request handlers. Stateless per request: identical inputs against an
/// unchanged matrix always yield identical decisions.
pub struct AuthorizationGate {
    matrix: PermissionMatrix,
    audit_enabled: bool,
}

impl AuthorizationGate {
    /// Creates a gate over a validated matrix.
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self {
            matrix,
            audit_enabled: true,
        }
    }

    /// Disables audit logging (for tests).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Authorizes read access to a menu for a resolved identity.
    ///
    /// Returns `Denied` when the matrix grants `NoAccess`, or when scope
    /// derivation fails because the identity is missing an attribute its
    /// level requires (the gate fails closed on a resolver contract
    /// breach).
    pub fn authorize(&self, identity: &Identity, menu: Menu) -> Decision {
        let level = self.matrix.access_level(identity.role, menu);

        if level == AccessLevel::NoAccess {
            if self.audit_enabled {
                warn!(
                    role = %identity.role,
                    menu = %menu,
                    "menu access denied"
                );
            }
            return Decision::Denied;
        }

        match level.scope_for(identity) {
            Ok(scope) => {
                if self.audit_enabled {
                    info!(
                        role = %identity.role,
                        menu = %menu,
                        level = %level,
                        scope = scope.kind(),
                        "menu access granted"
                    );
                }
                Decision::Allowed { level, scope }
            }
            Err(err) => {
                // Fail closed: a grant we cannot scope is not a grant.
                if self.audit_enabled {
                    error!(
                        role = %identity.role,
                        menu = %menu,
                        level = %level,
                        error = %err,
                        "scope derivation failed; denying"
                    );
                }
                Decision::Denied
            }
        }
    }

    /// Authorizes a mutating operation on a menu.
    ///
    /// Checked independently of the read decision: a read-only level is
    /// denied here even where its menu entry allows reads, and `Delete`
    /// additionally requires delete capability.
    pub fn authorize_mutation(
        &self,
        identity: &Identity,
        menu: Menu,
        kind: MutationKind,
    ) -> Decision {
        let level = self.matrix.access_level(identity.role, menu);

        let permitted = match kind {
            MutationKind::Create | MutationKind::Update => level.can_write(),
            MutationKind::Delete => level.can_delete(),
        };

        if !permitted {
            if self.audit_enabled {
                warn!(
                    role = %identity.role,
                    menu = %menu,
                    level = %level,
                    kind = ?kind,
                    "mutation denied"
                );
            }
            return Decision::Denied;
        }

        // Write scope equals read scope for every write-capable level.
        self.authorize(identity, menu)
    }

    /// Certifies that the identity may invoke a named data-store workflow
    /// owned by the given menu.
    ///
    /// Workflows mutate several entities atomically inside the store; the
    /// gate only certifies write access beforehand. Callers pass a fresh
    /// idempotency key per logical action so retries are safe; the gate
    /// itself neither executes nor retries.
    pub fn authorize_workflow(&self, identity: &Identity, menu: Menu) -> Decision {
        self.authorize_mutation(identity, menu, MutationKind::Update)
    }

    /// Returns the matrix backing this gate.
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }
}

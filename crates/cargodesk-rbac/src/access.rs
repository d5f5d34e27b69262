#![allow(clippy::match_same_arms)]
//! Access level tags.
//!
//! An access level is not just a label: each tag is a contract about which
//! rows a principal may see and mutate in a menu's domain. The full scope
//! rule is derived per request in [`crate::scope`]; this module defines the
//! tag set and its capability queries.

use serde::{Deserialize, Serialize};

/// Number of access level tags.
pub const ACCESS_LEVEL_COUNT: usize = 13;

/// Access level granted to a (role, menu) pair.
///
/// Read scope per tag:
/// - `NoAccess` — nothing
/// - `Read` — all rows in the menu's domain
/// - `ReadAll` — all rows, all sub-scopes (director oversight)
/// - `ReadOwn` — rows owned by the requesting user
/// - `ReadTeam` — rows owned by the user or their subordinates
/// - `ReadSlaOnly` — SLA/response-time aggregates only, never full records
/// - `ReadArDsoSummary` — aggregate AR/DSO summary fields only
/// - `ReadScoped` — rows whose customer is owned/assigned to the user
/// - `ReadWrite`, `ReadWriteOwn`, `ReadWriteAssist`, `ReadWriteDeptMasked`,
///   `Admin` — as their read counterparts, plus write capability (see
///   [`AccessLevel::can_write`] and [`AccessLevel::can_delete`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    /// No access to the menu at all.
    NoAccess,

    /// Read every row in the menu's domain.
    Read,

    /// Read every row across every sub-scope (oversight).
    ReadAll,

    /// Read rows owned by the requesting user.
    ReadOwn,

    /// Read rows owned by the user or any of their subordinates.
    ReadTeam,

    /// Read only SLA/response-time aggregate fields.
    ReadSlaOnly,

    /// Read only aggregate AR/DSO summary fields.
    ReadArDsoSummary,

    /// Read rows whose related customer is assigned to the user.
    ReadScoped,

    /// Read and write every row (no delete).
    ReadWrite,

    /// Read and write rows owned by the requesting user.
    ReadWriteOwn,

    /// Read and write every row in assist capacity; destructive and
    /// administrative operations are excluded.
    ReadWriteAssist,

    /// Read and write rows of the user's department; sensitive customer
    /// fields are masked in every response payload.
    ReadWriteDeptMasked,

    /// All rows, all operations, including destructive delete.
    Admin,
}

impl AccessLevel {
    /// Canonical enumeration of every tag.
    pub const ALL: [AccessLevel; ACCESS_LEVEL_COUNT] = [
        AccessLevel::NoAccess,
        AccessLevel::Read,
        AccessLevel::ReadAll,
        AccessLevel::ReadOwn,
        AccessLevel::ReadTeam,
        AccessLevel::ReadSlaOnly,
        AccessLevel::ReadArDsoSummary,
        AccessLevel::ReadScoped,
        AccessLevel::ReadWrite,
        AccessLevel::ReadWriteOwn,
        AccessLevel::ReadWriteAssist,
        AccessLevel::ReadWriteDeptMasked,
        AccessLevel::Admin,
    ];

    /// Returns whether this level grants any read access.
    pub fn can_read(&self) -> bool {
        !matches!(self, AccessLevel::NoAccess)
    }

    /// Returns whether this level grants write access.
    ///
    /// True iff the tag is one of the `ReadWrite*` family or `Admin`.
    /// Read-only oversight levels (`ReadAll` included) never write.
    pub fn can_write(&self) -> bool {
        matches!(
            self,
            AccessLevel::ReadWrite
                | AccessLevel::ReadWriteOwn
                | AccessLevel::ReadWriteAssist
                | AccessLevel::ReadWriteDeptMasked
                | AccessLevel::Admin
        )
    }

    /// Returns whether this level grants destructive delete.
    ///
    /// Only `Admin` deletes. The assist level excludes destructive
    /// operations outright; the remaining write levels create and update
    /// but leave deletion to administrators.
    pub fn can_delete(&self) -> bool {
        matches!(self, AccessLevel::Admin)
    }

    /// Returns whether this level exposes only aggregate views, never full
    /// records.
    pub fn is_aggregate_only(&self) -> bool {
        matches!(self, AccessLevel::ReadSlaOnly | AccessLevel::ReadArDsoSummary)
    }

    /// Returns whether response payloads under this level must have
    /// sensitive fields masked.
    pub fn requires_masking(&self) -> bool {
        matches!(self, AccessLevel::ReadWriteDeptMasked)
    }

    /// Short audit tag for this level, as written in permission reviews.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AccessLevel::NoAccess => "NA",
            AccessLevel::Read => "R",
            AccessLevel::ReadAll => "R_ALL",
            AccessLevel::ReadOwn => "R_OWN",
            AccessLevel::ReadTeam => "R_TEAM",
            AccessLevel::ReadSlaOnly => "R_SLA",
            AccessLevel::ReadArDsoSummary => "R_AR_DSO",
            AccessLevel::ReadScoped => "R_SCOPED",
            AccessLevel::ReadWrite => "RW",
            AccessLevel::ReadWriteOwn => "RW_OWN",
            AccessLevel::ReadWriteAssist => "RW_ASSIST",
            AccessLevel::ReadWriteDeptMasked => "RW_DEPT_MASKED",
            AccessLevel::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

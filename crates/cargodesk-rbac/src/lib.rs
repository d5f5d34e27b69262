//! # cargodesk-rbac: Role-Based Access Control
//!
//! The authorization core of the Cargodesk dashboard:
//! - **Role registry** (15 closed roles, fail-fast cardinality check)
//! - **Permission matrix** (total 15 x 5 role/menu table)
//! - **Access-level semantics** (13 tags, each a scope contract)
//! - **Authorization gate** (single enforcement point, scope predicates as
//!   data)
//! - **Field masking** (customer identity redaction for department-scoped
//!   responses)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Request + resolved Identity                 │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AuthorizationGate                           │
//! │  ├─ Matrix lookup: (role, menu) → level      │
//! │  ├─ NoAccess → Denied                        │
//! │  └─ Scope derivation: level + identity       │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Decision                                    │
//! │  - Denied, or                                │
//! │  - Allowed { level, scope predicate }        │
//! │    (scope is required to build any query)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//!
//! ### Authorizing a request
//!
//! ```
//! use cargodesk_rbac::gate::{AuthorizationGate, Decision};
//! use cargodesk_rbac::identity::Identity;
//! use cargodesk_rbac::matrix::PermissionMatrix;
//! use cargodesk_rbac::menus::Menu;
//! use cargodesk_rbac::roles::Role;
//! use cargodesk_types::UserId;
//!
//! let gate = AuthorizationGate::new(PermissionMatrix::standard());
//! let identity = Identity::new(Role::Finance, UserId::new(17));
//!
//! // Finance owns DSO...
//! assert!(gate.authorize(&identity, Menu::Dso).is_allowed());
//!
//! // ...and never sees ticketing.
//! assert_eq!(gate.authorize(&identity, Menu::Ticketing), Decision::Denied);
//! ```
//!
//! ### Rendering navigation
//!
//! ```
//! use cargodesk_rbac::matrix::PermissionMatrix;
//! use cargodesk_rbac::roles::Role;
//!
//! let matrix = PermissionMatrix::standard();
//! // The matrix is the sole authority for menu visibility.
//! let menus = matrix.allowed_menus(Role::Director);
//! assert_eq!(menus.len(), 5);
//! ```
//!
//! ## Design constraints
//!
//! - The registry and matrix are embedded static data, constructed once at
//!   startup and injected by reference. There is no runtime permission
//!   editing and no configuration file to drift.
//! - Construction fails fast on any cardinality or totality violation; a
//!   process holding a malformed table must not serve traffic.
//! - `Allowed` decisions carry a structured scope predicate. Query layers
//!   take the predicate as a required argument, so an unscoped query is
//!   unrepresentable rather than merely discouraged.
//! - Identity is request-scoped input from the profile resolver; the core
//!   never caches or persists it.

pub mod access;
pub mod gate;
pub mod identity;
pub mod masking;
pub mod matrix;
pub mod menus;
pub mod roles;
pub mod scope;

// Re-export commonly used types
pub use access::AccessLevel;
pub use gate::{AuthorizationGate, Decision, DecisionSummary, MutationKind};
pub use identity::{Identity, ProfileResolver, ResolveError, SessionToken};
pub use masking::{ColumnMask, MaskStrategy, MaskingError, MaskingPolicy};
pub use matrix::{MatrixError, PermissionEntry, PermissionMatrix};
pub use menus::Menu;
pub use roles::{RegistryError, Role, RoleRegistry};
pub use scope::{AggregateView, ScopeError, ScopePredicate};

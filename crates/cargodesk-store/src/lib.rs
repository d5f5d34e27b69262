//! # cargodesk-store: Data store collaborator contract
//!
//! The relational store behind the dashboard is an external system: it
//! holds the schema, the row-level data, and the stored-procedure business
//! logic. This crate pins down the contract the authorization core holds it
//! to:
//!
//! - **Scoped queries** ([`ScopedQuery`]) — constructed only from a scope
//!   predicate, so every read arrives pre-filtered. Rendering validates
//!   literals before they reach SQL text.
//! - **Named workflows** ([`Workflow`]) — atomic multi-entity mutations
//!   invoked with a caller-generated [`cargodesk_types::IdempotencyKey`];
//!   retries with the same key are applied at most once.
//! - **Structured errors** ([`StoreError`]) — propagated as-is; callers
//!   decide whether to retry.
//!
//! An empty [`RecordSet`] from an authorized query is indistinguishable in
//! shape from any other result; denial is always surfaced by the gate
//! before a query exists, never encoded as emptiness.

pub mod query;
pub mod workflow;

// Re-export commonly used types
pub use query::{QueryError, ScopedQuery, render_filter};
pub use workflow::{
    DataStore, PaymentDetails, RecordSet, StoreError, Workflow, WorkflowReceipt,
};

//! Named atomic workflows and the data-store trait.
//!
//! Multi-step business mutations (lead conversion, invoice posting,
//! cadence seeding) run as single atomic operations inside the external
//! store. The core never sees their internals; it invokes them by name with
//! an idempotency key and interprets the structured result. Duplicate keys
//! are deduplicated by the store, so callers may retry transient failures
//! with the same key and never double-apply.

use cargodesk_rbac::menus::Menu;
use cargodesk_types::{CustomerId, IdempotencyKey, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::ScopedQuery;

/// Payment details attached to an invoice posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Amount received, in minor currency units.
    pub amount_cents: i64,
    /// Settlement reference from the bank feed.
    pub reference: String,
}

/// A named atomic operation executed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Workflow {
    /// Converts a lead into an opportunity, reassigning activities.
    ConvertLead {
        lead_id: u64,
        owner_id: UserId,
    },

    /// Creates an invoice, optionally posting a payment against it in the
    /// same transaction.
    PostInvoice {
        customer_id: CustomerId,
        amount_cents: i64,
        payment: Option<PaymentDetails>,
    },

    /// Seeds the follow-up activity cadence for a customer.
    SeedActivityCadence {
        customer_id: CustomerId,
        owner_id: UserId,
        cadence_days: Vec<u16>,
    },
}

impl Workflow {
    /// The menu that owns this workflow.
    ///
    /// Callers must hold a write-capable level on the owning menu (checked
    /// via the authorization gate) before invoking the workflow.
    pub fn owning_menu(&self) -> Menu {
        match self {
            Workflow::ConvertLead { .. } | Workflow::SeedActivityCadence { .. } => Menu::Crm,
            Workflow::PostInvoice { .. } => Menu::Dso,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Workflow::ConvertLead { .. } => "convert_lead",
            Workflow::PostInvoice { .. } => "post_invoice",
            Workflow::SeedActivityCadence { .. } => "seed_activity_cadence",
        }
    }
}

/// Result of a workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowReceipt {
    /// False when the idempotency key was already committed and the store
    /// returned the original result instead of re-applying.
    pub applied: bool,

    /// Store-assigned reference for the created/affected entity.
    pub reference: String,
}

/// Error from the external data store.
///
/// Propagated to callers as-is; the gate and this contract layer never
/// retry automatically. Idempotency keys exist precisely so callers can
/// retry `Unavailable` outcomes safely.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transient failure (network, timeout, failover). Safe to retry with
    /// the same idempotency key.
    #[error("data store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the operation with structured detail.
    #[error("workflow rejected [{code}]: {message}")]
    Rejected { code: String, message: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Tabular result of a scoped fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordSet {
    /// An authorized-but-empty result. Identical in shape to any other
    /// result set; emptiness never encodes a denial.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }
}

/// The external relational store, as seen by the core.
///
/// Implementations translate scope predicates into real query filters and
/// execute named workflows atomically with idempotency-key deduplication.
pub trait DataStore {
    /// Runs a scoped read.
    fn fetch(&self, query: &ScopedQuery) -> Result<RecordSet>;

    /// Executes a named workflow atomically.
    ///
    /// A key seen before must return the original receipt with
    /// `applied: false` rather than re-running the workflow.
    fn execute(&self, key: IdempotencyKey, workflow: Workflow) -> Result<WorkflowReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargodesk_rbac::scope::ScopePredicate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store double with idempotency-key deduplication.
    struct MemoryStore {
        committed: Mutex<HashMap<IdempotencyKey, WorkflowReceipt>>,
        sequence: Mutex<u64>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                committed: Mutex::new(HashMap::new()),
                sequence: Mutex::new(0),
            }
        }
    }

    impl DataStore for MemoryStore {
        fn fetch(&self, query: &ScopedQuery) -> Result<RecordSet> {
            // The double only proves the contract shape; it returns an
            // empty set with the requested columns.
            Ok(RecordSet::empty(query.columns().to_vec()))
        }

        fn execute(&self, key: IdempotencyKey, workflow: Workflow) -> Result<WorkflowReceipt> {
            let mut committed = self.committed.lock().unwrap();
            if let Some(original) = committed.get(&key) {
                return Ok(WorkflowReceipt {
                    applied: false,
                    reference: original.reference.clone(),
                });
            }

            let mut seq = self.sequence.lock().unwrap();
            *seq += 1;
            let receipt = WorkflowReceipt {
                applied: true,
                reference: format!("{}-{}", workflow.name(), *seq),
            };
            committed.insert(key, receipt.clone());
            Ok(receipt)
        }
    }

    #[test]
    fn test_workflow_owning_menus() {
        let convert = Workflow::ConvertLead {
            lead_id: 1,
            owner_id: UserId::new(2),
        };
        assert_eq!(convert.owning_menu(), Menu::Crm);

        let invoice = Workflow::PostInvoice {
            customer_id: CustomerId::new(5),
            amount_cents: 125_000,
            payment: None,
        };
        assert_eq!(invoice.owning_menu(), Menu::Dso);

        let cadence = Workflow::SeedActivityCadence {
            customer_id: CustomerId::new(5),
            owner_id: UserId::new(2),
            cadence_days: vec![1, 7, 30],
        };
        assert_eq!(cadence.owning_menu(), Menu::Crm);
    }

    #[test]
    fn test_retry_with_same_key_is_deduplicated() {
        let store = MemoryStore::new();
        let key = IdempotencyKey::generate();
        let workflow = Workflow::PostInvoice {
            customer_id: CustomerId::new(7),
            amount_cents: 990_000,
            payment: Some(PaymentDetails {
                amount_cents: 990_000,
                reference: "BANK-2291".to_string(),
            }),
        };

        let first = store.execute(key, workflow.clone()).unwrap();
        assert!(first.applied);

        // Simulated retry after a network failure: same key, same payload.
        let second = store.execute(key, workflow).unwrap();
        assert!(!second.applied);
        assert_eq!(second.reference, first.reference);
    }

    #[test]
    fn test_distinct_actions_use_distinct_keys() {
        let store = MemoryStore::new();
        let workflow = Workflow::ConvertLead {
            lead_id: 11,
            owner_id: UserId::new(3),
        };

        // A new logical action generates a new key, so both apply.
        let first = store
            .execute(IdempotencyKey::generate(), workflow.clone())
            .unwrap();
        let second = store.execute(IdempotencyKey::generate(), workflow).unwrap();
        assert!(first.applied);
        assert!(second.applied);
        assert_ne!(first.reference, second.reference);
    }

    #[test]
    fn test_fetch_preserves_requested_columns() {
        let store = MemoryStore::new();
        let query = ScopedQuery::new(
            "invoices",
            vec!["invoice_id".to_string(), "amount".to_string()],
            ScopePredicate::Unrestricted,
        );

        let records = store.fetch(&query).unwrap();
        assert_eq!(records.columns, query.columns());
        assert!(records.rows.is_empty());
    }

    #[test]
    fn test_workflow_wire_shape() {
        // The workflow payload is the RPC contract with the store; pin the
        // JSON shape so a rename does not silently break the procedure
        // dispatch on the other side.
        let workflow = Workflow::PostInvoice {
            customer_id: CustomerId::new(7),
            amount_cents: 990_000,
            payment: None,
        };

        let json = serde_json::to_value(&workflow).unwrap();
        assert_eq!(json["PostInvoice"]["amount_cents"], 990_000);
        assert!(json["PostInvoice"]["payment"].is_null());

        let back: Workflow = serde_json::from_value(json).unwrap();
        assert_eq!(back, workflow);
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Rejected {
            code: "LEAD_ALREADY_CONVERTED".to_string(),
            message: "lead 11 is already an opportunity".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "workflow rejected [LEAD_ALREADY_CONVERTED]: lead 11 is already an opportunity"
        );
    }
}

//! Scoped queries and row-filter rendering.
//!
//! A query cannot be built without a scope predicate: the constructor takes
//! one as a required argument, so "forgot to apply the filter" is not a
//! representable state. Rendering validates every literal before it reaches
//! SQL text.

use cargodesk_rbac::scope::{AggregateView, ScopePredicate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for query construction and rendering.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A filter literal failed validation (e.g. an injection attempt).
    #[error("invalid SQL literal in scope filter: {value:?}")]
    InvalidLiteral { value: String },

    /// An aggregate-only scope has no row filter; callers must query the
    /// aggregate view instead.
    #[error("aggregate-only scope exposes no row-level data")]
    AggregateOnlyScope,
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// A read request against one table of a menu's domain, carrying the scope
/// predicate from the authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedQuery {
    table: String,
    columns: Vec<String>,
    scope: ScopePredicate,
}

impl ScopedQuery {
    /// Builds a query. The scope argument is deliberately not optional.
    pub fn new(
        table: impl Into<String>,
        columns: Vec<String>,
        scope: ScopePredicate,
    ) -> Self {
        Self {
            table: table.into(),
            columns,
            scope,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn scope(&self) -> &ScopePredicate {
        &self.scope
    }

    /// The aggregate view this query must target, if the scope is
    /// aggregate-only.
    ///
    /// Aggregate scopes never touch base tables: the store substitutes the
    /// named summary view for the requested table.
    pub fn aggregate_view(&self) -> Option<&'static str> {
        match self.scope {
            ScopePredicate::AggregateOnly { view } => Some(view_name(view)),
            _ => None,
        }
    }

    /// Renders the scope as a SQL WHERE fragment (without the `WHERE`
    /// keyword). Empty string means no row restriction.
    ///
    /// # Errors
    ///
    /// - [`QueryError::AggregateOnlyScope`] for aggregate scopes (use
    ///   [`ScopedQuery::aggregate_view`] instead).
    /// - [`QueryError::InvalidLiteral`] if a department code fails literal
    ///   validation.
    pub fn filter_sql(&self) -> Result<String> {
        render_filter(&self.scope)
    }

    /// Columns that must be masked in the response payload, per the scope.
    pub fn masked_columns(&self) -> &[String] {
        self.scope.masked_columns()
    }
}

/// Maps an aggregate view to its database view name.
fn view_name(view: AggregateView) -> &'static str {
    match view {
        AggregateView::SlaMetrics => "v_sla_metrics",
        AggregateView::ArDsoSummary => "v_ar_dso_summary",
    }
}

/// Renders a scope predicate as a SQL WHERE fragment.
pub fn render_filter(scope: &ScopePredicate) -> Result<String> {
    match scope {
        ScopePredicate::Unrestricted => Ok(String::new()),

        ScopePredicate::OwnerEquals { user_id } => Ok(format!("owner_id = {user_id}")),

        // The leader sees their own rows plus direct reports' rows. The
        // store maintains owner_manager_id as a denormalized column.
        ScopePredicate::OwnerInTeam { leader } => Ok(format!(
            "(owner_id = {leader} OR owner_manager_id = {leader})"
        )),

        ScopePredicate::CustomerAssignedTo { user_id } => {
            Ok(format!("customer_owner_id = {user_id}"))
        }

        ScopePredicate::DepartmentEquals { dept, .. } => {
            let code = dept.as_str();
            validate_string_literal(code)?;
            Ok(format!("dept_code = '{code}'"))
        }

        ScopePredicate::AggregateOnly { .. } => Err(QueryError::AggregateOnlyScope),
    }
}

/// Validates that a value is safe to embed as a single-quoted SQL string.
///
/// Accepts non-empty ASCII alphanumerics, space, dash, underscore, and dot.
/// Rejects everything else, closing off injection through department codes
/// sourced from the profile service.
fn validate_string_literal(value: &str) -> Result<()> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'));

    if ok {
        Ok(())
    } else {
        Err(QueryError::InvalidLiteral {
            value: value.to_string(),
        })
    }
}

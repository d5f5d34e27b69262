//! Field-level masking for department-scoped responses.
//!
//! Department-masked access grants full row visibility within one
//! department while redacting the customer's identity from every response
//! payload. The masked-column list travels inside the scope predicate, so
//! the query layer cannot return a dept-scoped row without knowing which
//! columns to mask.
//!
//! ## Strategies
//!
//! | Strategy   | Description                          | Reversible |
//! |------------|--------------------------------------|------------|
//! | Redact     | Pattern-aware partial redaction       | No         |
//! | Hash       | SHA-256 one-way hash                  | No         |
//! | Tokenize   | Deterministic BLAKE3 token            | No         |
//! | Truncate   | Keep first N characters               | No         |
//! | Null       | Replace with the empty string         | No         |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Columns redacted from department-masked ticketing rows.
///
/// These identify the customer behind a shipment ticket; operations desks
/// work the ticket without seeing who the customer is.
pub const MASKED_CUSTOMER_COLUMNS: [&str; 4] = [
    "customer_name",
    "customer_tax_id",
    "contact_email",
    "contact_phone",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during masking operations.
#[derive(Debug, Error)]
pub enum MaskingError {
    /// The value does not match the expected pattern for the redact
    /// strategy.
    #[error("value does not match expected pattern for {pattern:?}: {reason}")]
    PatternMismatch {
        pattern: RedactPattern,
        reason: String,
    },

    /// Row length does not match column count.
    #[error("row has {row_len} values but {col_len} columns were provided")]
    ColumnCountMismatch { row_len: usize, col_len: usize },
}

/// Result type for masking operations.
pub type Result<T> = std::result::Result<T, MaskingError>;

// ---------------------------------------------------------------------------
// Strategy types
// ---------------------------------------------------------------------------

/// Pattern for partial redaction of known data formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedactPattern {
    /// Tax registration number: `****6789` (last 4 visible).
    TaxId,
    /// Phone: `***-***-4567` (last 4 visible).
    Phone,
    /// Email: `j***@example.com` (first char + domain visible).
    Email,
    /// Custom pattern with a fixed replacement string.
    Custom {
        /// The replacement string (applied verbatim).
        replacement: String,
    },
}

/// Strategy used to mask a field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaskStrategy {
    /// Pattern-aware partial redaction.
    Redact(RedactPattern),
    /// SHA-256 one-way hash, hex-encoded.
    Hash,
    /// Deterministic BLAKE3 token prefixed with `cst_` (first 16 hex chars).
    Tokenize,
    /// Keep first `keep` characters, pad with `"..."`.
    Truncate { keep: usize },
    /// Replace with the empty string.
    Null,
}

// ---------------------------------------------------------------------------
// ColumnMask & MaskingPolicy
// ---------------------------------------------------------------------------

/// Describes how a single column is masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMask {
    /// Column name this mask applies to.
    pub column: String,
    /// The masking strategy to apply.
    pub strategy: MaskStrategy,
}

impl ColumnMask {
    /// Creates a mask for the given column and strategy.
    pub fn new(column: &str, strategy: MaskStrategy) -> Self {
        assert!(!column.is_empty(), "column name must not be empty");
        Self {
            column: column.to_string(),
            strategy,
        }
    }
}

/// A collection of column masks forming a complete masking policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingPolicy {
    masks: Vec<ColumnMask>,
}

impl MaskingPolicy {
    /// Creates an empty masking policy.
    pub fn new() -> Self {
        Self { masks: Vec::new() }
    }

    /// Adds a column mask to the policy.
    pub fn with_mask(mut self, mask: ColumnMask) -> Self {
        self.masks.push(mask);
        self
    }

    /// Returns the mask for the given column, if any.
    pub fn mask_for_column(&self, column: &str) -> Option<&ColumnMask> {
        self.masks.iter().find(|m| m.column == column)
    }

    /// Returns all masks.
    pub fn masks(&self) -> &[ColumnMask] {
        &self.masks
    }

    /// The production policy for department-masked rows.
    ///
    /// Customer name tokenizes (so a desk can tell two tickets belong to
    /// the same customer without learning who it is); the remaining
    /// identity fields redact partially.
    pub fn standard_customer_masking() -> Self {
        Self::new()
            .with_mask(ColumnMask::new("customer_name", MaskStrategy::Tokenize))
            .with_mask(ColumnMask::new(
                "customer_tax_id",
                MaskStrategy::Redact(RedactPattern::TaxId),
            ))
            .with_mask(ColumnMask::new(
                "contact_email",
                MaskStrategy::Redact(RedactPattern::Email),
            ))
            .with_mask(ColumnMask::new(
                "contact_phone",
                MaskStrategy::Redact(RedactPattern::Phone),
            ))
    }
}

// ---------------------------------------------------------------------------
// Core masking functions
// ---------------------------------------------------------------------------

/// Applies a masking strategy to a single value.
///
/// # Errors
///
/// Returns [`MaskingError::PatternMismatch`] when using `Redact` and the
/// value does not match the expected format.
pub fn apply_strategy(value: &str, strategy: &MaskStrategy) -> Result<String> {
    let result = match strategy {
        MaskStrategy::Redact(pattern) => apply_redact(value, pattern)?,
        MaskStrategy::Hash => apply_hash(value),
        MaskStrategy::Tokenize => apply_tokenize(value),
        MaskStrategy::Truncate { keep } => apply_truncate(value, *keep),
        MaskStrategy::Null => String::new(),
    };

    debug_assert!(
        matches!(strategy, MaskStrategy::Null) || !result.is_empty() || value.is_empty(),
        "non-null strategy should produce non-empty output for non-empty input"
    );

    Ok(result)
}

/// Applies a policy to an entire row of values.
///
/// Each element in `row` corresponds to the column at the same index in
/// `columns`. Columns without a matching mask pass through unchanged.
///
/// # Errors
///
/// Returns [`MaskingError::ColumnCountMismatch`] if `row.len() !=
/// columns.len()`, or [`MaskingError::PatternMismatch`] if a redaction
/// pattern fails.
pub fn apply_policy_to_row(
    row: &[String],
    columns: &[String],
    policy: &MaskingPolicy,
) -> Result<Vec<String>> {
    if row.len() != columns.len() {
        return Err(MaskingError::ColumnCountMismatch {
            row_len: row.len(),
            col_len: columns.len(),
        });
    }

    let masked: Vec<String> = row
        .iter()
        .zip(columns.iter())
        .map(|(value, col)| match policy.mask_for_column(col) {
            Some(mask) => apply_strategy(value, &mask.strategy),
            None => Ok(value.clone()),
        })
        .collect::<Result<Vec<_>>>()?;

    debug_assert_eq!(
        masked.len(),
        row.len(),
        "masked row must have same column count as input"
    );

    Ok(masked)
}

// ---------------------------------------------------------------------------
// Strategy implementations
// ---------------------------------------------------------------------------

fn apply_redact(value: &str, pattern: &RedactPattern) -> Result<String> {
    match pattern {
        RedactPattern::TaxId => redact_tax_id(value, pattern),
        RedactPattern::Phone => redact_phone(value, pattern),
        RedactPattern::Email => redact_email(value, pattern),
        RedactPattern::Custom { replacement } => Ok(replacement.clone()),
    }
}

/// Redacts a tax registration number: `01.234.567.8-901.000` -> `****1000`.
fn redact_tax_id(text: &str, pattern: &RedactPattern) -> Result<String> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < 8 {
        return Err(MaskingError::PatternMismatch {
            pattern: pattern.clone(),
            reason: format!(
                "expected at least 8 digits for tax id, found {} in '{text}'",
                digits.len(),
            ),
        });
    }

    let last_four = &digits[digits.len() - 4..];
    Ok(format!("****{last_four}"))
}

/// Redacts a phone number: `+62 811-234-4567` -> `***-***-4567`.
fn redact_phone(text: &str, pattern: &RedactPattern) -> Result<String> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < 8 {
        return Err(MaskingError::PatternMismatch {
            pattern: pattern.clone(),
            reason: format!(
                "expected at least 8 digits for phone, found {} in '{text}'",
                digits.len(),
            ),
        });
    }

    let last_four = &digits[digits.len() - 4..];
    Ok(format!("***-***-{last_four}"))
}

/// Redacts an email: `john@example.com` -> `j***@example.com`.
fn redact_email(text: &str, pattern: &RedactPattern) -> Result<String> {
    let parts: Vec<&str> = text.splitn(2, '@').collect();

    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(MaskingError::PatternMismatch {
            pattern: pattern.clone(),
            reason: format!("invalid email format: '{text}'"),
        });
    }

    let first_char = &parts[0][..parts[0]
        .char_indices()
        .nth(1)
        .map_or(parts[0].len(), |(i, _)| i)];
    Ok(format!("{first_char}***@{}", parts[1]))
}

/// SHA-256 one-way hash, hex-encoded.
fn apply_hash(value: &str) -> String {
    use sha2::Digest;
    use std::fmt::Write;

    let hash = sha2::Sha256::digest(value.as_bytes());
    let mut hex = String::with_capacity(hash.len() * 2);
    for byte in hash {
        write!(hex, "{byte:02x}").expect("writing to String should not fail");
    }

    debug_assert_eq!(hex.len(), 64, "SHA-256 hex must be 64 characters");
    hex
}

/// Deterministic BLAKE3 tokenization.
///
/// Returns `cst_` followed by the first 16 hex characters of the hash, so
/// equal inputs map to equal tokens within and across responses.
fn apply_tokenize(value: &str) -> String {
    let hash = blake3::hash(value.as_bytes());
    let hex = hash.to_hex();
    let token = format!("cst_{}", &hex[..16]);

    debug_assert_eq!(token.len(), 20, "token must be exactly 20 characters");
    token
}

/// Truncates to `keep` characters, padding with `"..."`.
fn apply_truncate(value: &str, keep: usize) -> String {
    if value.chars().count() <= keep {
        return value.to_string();
    }
    let truncated: String = value.chars().take(keep).collect();
    format!("{truncated}...")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

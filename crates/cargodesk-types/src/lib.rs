//! # cargodesk-types: Core types for Cargodesk
//!
//! This crate contains shared types used across the Cargodesk system:
//! - Entity IDs ([`UserId`], [`CustomerId`])
//! - Department codes ([`DeptCode`])
//! - Idempotency ([`IdempotencyKey`])
//!
//! All ID types are cheap `Copy` newtypes. `DeptCode` owns its string but is
//! small and clones freely.

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

// ============================================================================
// Entity IDs - All Copy (cheap 8-byte values)
// ============================================================================

/// Unique identifier for a user (a dashboard principal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Unique identifier for a customer account (CRM/DSO subject).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(u64);

impl CustomerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CustomerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<CustomerId> for u64 {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

// ============================================================================
// Department codes
// ============================================================================

/// Short department code identifying an operations unit.
///
/// Codes are uppercase ASCII mnemonics assigned by HR at onboarding,
/// e.g. `"EXIM"`, `"DOM"`, `"WHS"`. Comparison is exact; codes are never
/// normalized after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeptCode(String);

impl DeptCode {
    /// Creates a department code.
    ///
    /// Returns `None` for an empty or whitespace-only candidate; a blank
    /// department code can never identify an operations unit.
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return None;
        }
        Some(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DeptCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Idempotency - Copy (16-byte token for duplicate prevention)
// ============================================================================

/// Length of idempotency keys in bytes.
pub const IDEMPOTENCY_KEY_LENGTH: usize = 16;

/// Caller-generated token ensuring a retried mutating call applies at most
/// once.
///
/// A key is generated once per *logical user action* (not per attempt). If
/// the call must be retried after a transient failure, the caller re-sends
/// the same key; the data store tracks committed keys and returns the
/// original result for duplicates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey([u8; IDEMPOTENCY_KEY_LENGTH]);

impl IdempotencyKey {
    /// Restoration from stored bytes (pure).
    ///
    /// Use this when loading a key from storage or a wire request.
    pub fn from_bytes(bytes: [u8; IDEMPOTENCY_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8; IDEMPOTENCY_KEY_LENGTH] {
        &self.0
    }

    /// Generates a new random key using the OS CSPRNG.
    ///
    /// # Panics
    ///
    /// Panics if the OS CSPRNG fails, which indicates a catastrophic system
    /// error (e.g. no entropy source available).
    pub fn generate() -> Self {
        let mut bytes = [0u8; IDEMPOTENCY_KEY_LENGTH];
        getrandom::fill(&mut bytes).expect("CSPRNG failure is catastrophic");
        debug_assert!(
            bytes.iter().any(|&b| b != 0),
            "idempotency key bytes are all zeros"
        );
        Self(bytes)
    }
}

impl Debug for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Full hex for debugging (keys are meant to be logged)
        write!(f, "IdempotencyKey(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; IDEMPOTENCY_KEY_LENGTH]> for IdempotencyKey {
    fn from(bytes: [u8; IDEMPOTENCY_KEY_LENGTH]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<IdempotencyKey> for [u8; IDEMPOTENCY_KEY_LENGTH] {
    fn from(key: IdempotencyKey) -> Self {
        key.0
    }
}

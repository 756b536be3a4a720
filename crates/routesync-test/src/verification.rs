//! Verification helpers for recorded provider calls

use crate::fake::{ProviderCall, ProviderOperation};
use thiserror::Error;

/// Verification error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Expected no mutating calls, found {count}: {calls:?}")]
    UnexpectedMutations {
        count: usize,
        calls: Vec<ProviderCall>,
    },

    #[error("Expected {expected} {operation:?} call(s), found {actual}")]
    CallCountMismatch {
        operation: ProviderOperation,
        expected: usize,
        actual: usize,
    },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Mutating calls only, in order.
pub fn mutations(calls: &[ProviderCall]) -> Vec<ProviderCall> {
    calls
        .iter()
        .filter(|call| call.is_mutating())
        .cloned()
        .collect()
}

/// Calls of one operation, in order.
pub fn calls_of(calls: &[ProviderCall], operation: ProviderOperation) -> Vec<ProviderCall> {
    calls
        .iter()
        .filter(|call| call.operation() == operation)
        .cloned()
        .collect()
}

/// Fails if any call mutated provider state.
pub fn assert_no_mutations(calls: &[ProviderCall]) -> VerifyResult<()> {
    let mutating = mutations(calls);
    if mutating.is_empty() {
        return Ok(());
    }
    Err(VerificationError::UnexpectedMutations {
        count: mutating.len(),
        calls: mutating,
    })
}

/// Fails unless `operation` was called exactly `expected` times.
pub fn assert_call_count(
    calls: &[ProviderCall],
    operation: ProviderOperation,
    expected: usize,
) -> VerifyResult<()> {
    let actual = calls_of(calls, operation).len();
    if actual != expected {
        return Err(VerificationError::CallCountMismatch {
            operation,
            expected,
            actual,
        });
    }
    Ok(())
}

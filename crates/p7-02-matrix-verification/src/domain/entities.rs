//! # Domain Entities
//!
//! Core data structures for matrix verification.

use serde::{Deserialize, Serialize};
use shared_types::{MatrixId, MessageMatrix, VerificationKey};

pub use shared_types::VerifiedMatrix;

// =============================================================================
// Verification Request/Result Types
// =============================================================================

/// Request to verify a single matrix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Correlation id assigned by the encoder.
    pub matrix_id: MatrixId,
    /// The matrix to verify, including auxiliary fields.
    pub matrix: MessageMatrix,
    /// The shared key.
    pub key: VerificationKey,
}

/// Result of matrix verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the matrix passed all three checks.
    pub valid: bool,
    /// The first failing check (if verification failed).
    pub error: Option<super::errors::VerificationError>,
}

impl VerificationResult {
    /// Create a successful verification result.
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// Create a failed verification result.
    #[must_use]
    pub fn rejected(error: super::errors::VerificationError) -> Self {
        Self {
            valid: false,
            error: Some(error),
        }
    }
}

/// Request for batch matrix verification.
#[derive(Clone, Debug)]
pub struct BatchVerificationRequest {
    /// The verification requests to process.
    pub requests: Vec<VerificationRequest>,
}

/// Result of batch verification.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    /// Individual results, in request order.
    pub results: Vec<VerificationResult>,
    /// Whether all verifications passed.
    pub all_valid: bool,
    /// Count of valid matrices.
    pub valid_count: usize,
    /// Count of invalid matrices.
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;
        let all_valid = invalid_count == 0;

        Self {
            results,
            all_valid,
            valid_count,
            invalid_count,
        }
    }
}

//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{
    BatchVerificationRequest, BatchVerificationResult, VerificationRequest, VerificationResult,
    VerifiedMatrix,
};
use crate::domain::errors::VerificationError;
use shared_types::{MessageMatrix, VerificationKey};

/// Primary Matrix Verification API.
///
/// This is the main entry point for matrix verification operations.
/// Implementations must be thread-safe (`Send + Sync`).
pub trait MatrixVerificationApi: Send + Sync {
    // =========================================================================
    // Single-Matrix Operations
    // =========================================================================

    /// Verify a matrix against all three integrity checks.
    ///
    /// Returns `true` only if the row parities, column parities, and
    /// harmonic checksum all match their recomputed values.
    fn verify(&self, matrix: &MessageMatrix, key: VerificationKey) -> bool;

    /// Verify a matrix and report which check failed.
    ///
    /// Checks run in a fixed order (rows, then columns, then checksum);
    /// the result carries the first mismatch encountered.
    fn verify_detailed(&self, matrix: &MessageMatrix, key: VerificationKey) -> VerificationResult;

    // =========================================================================
    // Batch Operations
    // =========================================================================

    /// Batch verify multiple matrices in parallel.
    ///
    /// # Performance
    /// Uses parallel processing for improved throughput.
    fn batch_verify(&self, request: &BatchVerificationRequest) -> BatchVerificationResult;

    // =========================================================================
    // Request Verification
    // =========================================================================

    /// Verify a request and prepare the matrix for Dispatch submission.
    ///
    /// This is the primary entry point for matrices arriving from the
    /// encoder over the event bus.
    fn verify_request(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerifiedMatrix, VerificationError>;
}

//! # Matrix Verification Service
//!
//! Application service layer that implements the `MatrixVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`MatrixVerificationApi`)
//! - Uses the outbound port (`DispatchGateway`) for forwarding verified matrices
//! - Delegates check computation to the domain layer

use crate::domain::checks;
use crate::domain::entities::{
    BatchVerificationRequest, BatchVerificationResult, VerificationRequest, VerificationResult,
    VerifiedMatrix,
};
use crate::domain::errors::VerificationError;
use crate::ports::inbound::MatrixVerificationApi;
use crate::ports::outbound::DispatchGateway;
use shared_types::{MessageMatrix, VerificationKey};
use tracing::{debug, warn};

/// Matrix Verification Service.
///
/// This service implements `MatrixVerificationApi` and delegates the
/// parity and checksum computations to the domain layer.
///
/// The dispatch gateway is used for the async `verify_and_dispatch` flow
/// that forwards accepted matrices to Subsystem 3.
pub struct MatrixVerificationService<D: DispatchGateway> {
    dispatch: D,
}

impl<D: DispatchGateway> MatrixVerificationService<D> {
    /// Create a new matrix verification service.
    ///
    /// # Arguments
    /// * `dispatch` - The dispatch gateway for forwarding verified matrices
    pub fn new(dispatch: D) -> Self {
        Self { dispatch }
    }

    /// Verify a request and forward the matrix to Dispatch if valid.
    ///
    /// This is the async entry point that combines verification with
    /// submission to the dispatch subsystem. Gateway failures surface as
    /// `VerificationError::DispatchFailed`; the matrix itself was valid.
    pub async fn verify_and_dispatch(
        &self,
        request: VerificationRequest,
    ) -> Result<(), VerificationError> {
        let verified = self.verify_request(&request)?;
        debug!(matrix_id = %verified.matrix_id, "matrix accepted, forwarding to dispatch");

        self.dispatch
            .submit_verified_matrix(verified)
            .await
            .map_err(|e| {
                warn!(matrix_id = %request.matrix_id, error = %e, "dispatch submission failed");
                VerificationError::DispatchFailed(e.to_string())
            })?;

        Ok(())
    }
}

impl<D: DispatchGateway> MatrixVerificationApi for MatrixVerificationService<D> {
    fn verify(&self, matrix: &MessageMatrix, key: VerificationKey) -> bool {
        checks::verify(matrix, key)
    }

    fn verify_detailed(&self, matrix: &MessageMatrix, key: VerificationKey) -> VerificationResult {
        checks::verify_detailed(matrix, key)
    }

    fn batch_verify(&self, request: &BatchVerificationRequest) -> BatchVerificationResult {
        checks::batch_verify(&request.requests)
    }

    fn verify_request(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerifiedMatrix, VerificationError> {
        let result = checks::verify_detailed(&request.matrix, request.key);

        match result.error {
            None => Ok(VerifiedMatrix {
                matrix_id: request.matrix_id,
                matrix: request.matrix.clone(),
            }),
            Some(error) => {
                debug!(matrix_id = %request.matrix_id, error = %error, "matrix rejected");
                Err(error)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

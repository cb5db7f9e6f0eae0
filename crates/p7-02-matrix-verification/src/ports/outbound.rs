//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this subsystem needs.

use crate::domain::entities::VerifiedMatrix;
use thiserror::Error;

/// Error from Dispatch operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The dispatch queue is full
    #[error("Dispatch queue is full")]
    Full,

    /// Matrix was rejected
    #[error("Matrix rejected: {reason}")]
    Rejected { reason: String },

    /// Communication error
    #[error("Communication error: {0}")]
    CommunicationError(String),
}

/// Gateway to the Dispatch subsystem.
///
/// This port allows forwarding verified matrices to Dispatch (Subsystem 3).
#[async_trait::async_trait]
pub trait DispatchGateway: Send + Sync {
    /// Submit a verified matrix to Dispatch.
    ///
    /// # Arguments
    /// * `matrix` - The verified matrix to submit
    ///
    /// # Errors
    /// * `DispatchError::Full` - Dispatch queue has reached capacity
    /// * `DispatchError::Rejected` - Matrix was rejected by Dispatch
    async fn submit_verified_matrix(&self, matrix: VerifiedMatrix) -> Result<(), DispatchError>;
}

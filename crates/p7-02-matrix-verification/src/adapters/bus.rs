//! # Event Bus Adapter
//!
//! Wires Subsystem 2 to the shared event bus for choreography.
//!
//! ## Event Flow
//!
//! ```text
//! Encoder (1) ──MatrixSubmitted──→ [Matrix Verification (2)]
//!                                             │
//!                     ┌───────────────────────┴───────────────────────┐
//!                     ↓                                               ↓
//!              [matrix valid]                                  [matrix invalid]
//!                     │                                               │
//!                     ↓                                               ↓
//!      MatrixAccepted ──→ [Event Bus]              MatrixRejected ──→ [Event Bus]
//!                     │                                               │
//!                     ↓                                               │
//!              [Dispatch (3)]                                  [Logged/DLQ]
//! ```

use crate::domain::entities::{VerificationRequest, VerificationResult, VerifiedMatrix};
use crate::ports::inbound::MatrixVerificationApi;
use async_trait::async_trait;
use shared_bus::events::MatrixEvent;
use shared_bus::publisher::EventPublisher;
use shared_types::MatrixId;
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// BUS ADAPTER TRAIT
// =============================================================================

/// Adapter for publishing matrix verification events to the event bus.
///
/// This is the outbound adapter for event-driven communication with the
/// other Protocol-7 subsystems.
#[async_trait]
pub trait MatrixVerificationBusAdapter: Send + Sync {
    /// Verify a matrix and publish the outcome to the event bus.
    ///
    /// Emits `MatrixAccepted` when all three checks pass and
    /// `MatrixRejected` with the failing check's message otherwise.
    ///
    /// # Returns
    ///
    /// The verification result and number of subscribers that received the event.
    async fn verify_and_publish_result(
        &self,
        request: &VerificationRequest,
    ) -> (VerificationResult, usize);

    /// Publish a MatrixAccepted event to the bus.
    ///
    /// Called when a matrix passes all integrity checks.
    async fn publish_accepted(&self, matrix: VerifiedMatrix) -> usize;

    /// Publish a MatrixRejected event to the bus.
    ///
    /// Called when a matrix fails one of the integrity checks.
    async fn publish_rejected(&self, matrix_id: MatrixId, reason: String) -> usize;
}

// =============================================================================
// BUS ADAPTER IMPLEMENTATION
// =============================================================================

/// Event bus adapter for Subsystem 2.
///
/// Wires the matrix verification service to the shared event bus,
/// enabling choreography-based communication with other subsystems.
pub struct EventBusAdapter<S, P>
where
    S: MatrixVerificationApi,
    P: EventPublisher,
{
    /// The matrix verification service
    service: Arc<S>,

    /// The event publisher (shared bus)
    publisher: Arc<P>,
}

impl<S, P> EventBusAdapter<S, P>
where
    S: MatrixVerificationApi,
    P: EventPublisher,
{
    /// Create a new event bus adapter.
    ///
    /// # Arguments
    ///
    /// * `service` - The matrix verification service
    /// * `publisher` - The event publisher (shared bus)
    pub fn new(service: Arc<S>, publisher: Arc<P>) -> Self {
        Self { service, publisher }
    }

    /// Get a reference to the underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Get a reference to the event publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

#[async_trait]
impl<S, P> MatrixVerificationBusAdapter for EventBusAdapter<S, P>
where
    S: MatrixVerificationApi + Send + Sync,
    P: EventPublisher + Send + Sync,
{
    async fn verify_and_publish_result(
        &self,
        request: &VerificationRequest,
    ) -> (VerificationResult, usize) {
        let result = self.service.verify_detailed(&request.matrix, request.key);

        let receivers = if result.valid {
            debug!(
                matrix_id = %request.matrix_id,
                "Matrix passed all integrity checks"
            );

            self.publish_accepted(VerifiedMatrix {
                matrix_id: request.matrix_id,
                matrix: request.matrix.clone(),
            })
            .await
        } else {
            let reason = result
                .error
                .as_ref()
                .map_or_else(|| "Unknown error".to_string(), ToString::to_string);

            warn!(
                matrix_id = %request.matrix_id,
                reason = %reason,
                "Matrix failed integrity check"
            );

            self.publish_rejected(request.matrix_id, reason).await
        };

        (result, receivers)
    }

    async fn publish_accepted(&self, matrix: VerifiedMatrix) -> usize {
        let event = MatrixEvent::MatrixAccepted(matrix.clone());

        info!(
            matrix_id = %matrix.matrix_id,
            "Publishing MatrixAccepted event"
        );

        self.publisher.publish(event).await
    }

    async fn publish_rejected(&self, matrix_id: MatrixId, reason: String) -> usize {
        let event = MatrixEvent::MatrixRejected {
            matrix_id,
            reason: reason.clone(),
        };

        info!(
            matrix_id = %matrix_id,
            reason = %reason,
            "Publishing MatrixRejected event"
        );

        self.publisher.publish(event).await
    }
}

// =============================================================================
// TESTS
// =============================================================================

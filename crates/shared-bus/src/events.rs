//! # Protocol-7 Events
//!
//! Defines all event types that flow through the shared bus.
//! Payload types live in `shared-types`.

use serde::{Deserialize, Serialize};
use shared_types::entities::{MatrixId, MessageMatrix, VerifiedMatrix};

/// All events that can be published to the event bus.
///
/// These are the choreography events that drive a matrix from encoding
/// through verification to dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatrixEvent {
    // =========================================================================
    // SUBSYSTEM 1: ENCODER
    // =========================================================================
    /// A matrix was encoded and submitted for verification.
    /// Source: Subsystem 1 | Target: Subsystem 2
    MatrixSubmitted {
        /// Correlation id assigned by the encoder.
        matrix_id: MatrixId,
        /// The encoded matrix including auxiliary fields.
        matrix: MessageMatrix,
    },

    // =========================================================================
    // SUBSYSTEM 2: MATRIX VERIFICATION
    // =========================================================================
    /// A matrix passed all three checks and is cleared for dispatch.
    /// Source: Subsystem 2 | Target: Subsystem 3
    MatrixAccepted(VerifiedMatrix),

    /// A matrix failed verification and was rejected.
    MatrixRejected {
        /// Correlation id of the rejected matrix.
        matrix_id: MatrixId,
        /// Reason for rejection.
        reason: String,
    },

    // =========================================================================
    // SUBSYSTEM 3: DISPATCH
    // =========================================================================
    /// A verified matrix was forwarded to its destination.
    MatrixDispatched {
        /// Correlation id of the dispatched matrix.
        matrix_id: MatrixId,
    },

    // =========================================================================
    // CRITICAL EVENTS (DLQ)
    // =========================================================================
    /// Critical error requiring operator attention.
    CriticalError {
        /// The subsystem that encountered the error.
        subsystem_id: u8,
        /// Error description.
        error: String,
    },
}

impl MatrixEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::MatrixSubmitted { .. } => EventTopic::Encoding,
            Self::MatrixAccepted(_) | Self::MatrixRejected { .. } => {
                EventTopic::MatrixVerification
            }
            Self::MatrixDispatched { .. } => EventTopic::Dispatch,
            Self::CriticalError { .. } => EventTopic::DeadLetterQueue,
        }
    }

    /// Get the originating subsystem ID.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self {
            Self::MatrixSubmitted { .. } => 1,
            Self::MatrixAccepted(_) | Self::MatrixRejected { .. } => 2,
            Self::MatrixDispatched { .. } => 3,
            Self::CriticalError { subsystem_id, .. } => *subsystem_id,
        }
    }

    /// Get the correlation id carried by this event, if any.
    #[must_use]
    pub fn matrix_id(&self) -> Option<MatrixId> {
        match self {
            Self::MatrixSubmitted { matrix_id, .. }
            | Self::MatrixRejected { matrix_id, .. }
            | Self::MatrixDispatched { matrix_id } => Some(*matrix_id),
            Self::MatrixAccepted(verified) => Some(verified.matrix_id),
            Self::CriticalError { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Subsystem 1 events.
    Encoding,
    /// Subsystem 2 events.
    MatrixVerification,
    /// Subsystem 3 events.
    Dispatch,
    /// Dead Letter Queue for critical errors.
    DeadLetterQueue,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source subsystems to include. Empty means all sources.
    pub source_subsystems: Vec<u8>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_subsystems: Vec::new(),
        }
    }

    /// Create a filter for events from specific subsystems.
    #[must_use]
    pub fn from_subsystems(subsystems: Vec<u8>) -> Self {
        Self {
            topics: Vec::new(),
            source_subsystems: subsystems,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &MatrixEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match = self.source_subsystems.is_empty()
            || self.source_subsystems.contains(&event.source_subsystem());

        topic_match && source_match
    }
}

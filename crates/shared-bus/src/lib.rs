//! # Shared Bus - Event Bus for Inter-Subsystem Communication
//!
//! Implements the choreography pattern that connects the Protocol-7
//! subsystems: the Encoder (01) publishes matrices, Matrix Verification
//! (02) publishes accept/reject outcomes, and Dispatch (03) publishes
//! forwarding confirmations.
//!
//! ## Architecture Rules
//!
//! - All inter-subsystem communication goes via the Shared Bus ONLY
//! - Direct calls between subsystems are FORBIDDEN
//!
//! ## Choreography Pattern
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Subsystem A  │                    │ Subsystem B  │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Dead Letter Queue
//!
//! Critical failures are published as `CriticalError` events on the
//! [`events::EventTopic::DeadLetterQueue`] topic for operator attention.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, MatrixEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Current protocol version for event bus messages.
pub const PROTOCOL_VERSION: u16 = 1;

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

//! # Shared Types Crate
//!
//! This crate contains the domain entities shared across Protocol-7
//! subsystems: the message matrix, its verification key, and the
//! correlation id used on the event bus.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Plain Values**: Entities are serde-friendly value types with no
//!   behavior beyond simple accessors; subsystem logic lives in the
//!   subsystem crates.
//! - **No Redundant Identity**: The matrix value itself carries no identity;
//!   correlation on the bus uses `MatrixId` assigned by the encoder.

pub mod entities;

pub use entities::*;

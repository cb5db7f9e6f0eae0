//! # Matrix Verification Subsystem (P7-02)
//!
//! Verifies the integrity of Protocol-7 message matrices.
//!
//! A message arrives as a 7x5 grid of bit cells plus three auxiliary
//! structures computed by the encoder: permuted row parities, column
//! parities, and a harmonic checksum. Verification recomputes all three
//! from the data cells and the shared key and accepts the matrix only if
//! every structure matches.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure verification logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//! - **Adapters** (`adapters/`): Event bus wiring for choreography
//!
//! ## Integrity Notes
//!
//! - Verification is a pure function of `(matrix, key)`; repeated calls
//!   always return the same answer
//! - Only the key residue modulo 13 participates in any check
//! - The column check is key-independent by construction

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::checks::{
    batch_verify, harmonic_weight, permuted_row_slot, verify, verify_detailed, MatrixVerifier,
};
pub use domain::entities::{
    BatchVerificationRequest, BatchVerificationResult, VerificationRequest, VerificationResult,
    VerifiedMatrix,
};
pub use domain::errors::VerificationError;
pub use ports::inbound::MatrixVerificationApi;
pub use ports::outbound::{DispatchError, DispatchGateway};
pub use service::MatrixVerificationService;

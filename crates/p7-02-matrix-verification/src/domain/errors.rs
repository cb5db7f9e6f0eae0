//! # Verification Errors
//!
//! Error types for matrix verification operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during matrix verification.
///
/// The baseline verification contract is a single boolean; these errors
/// are diagnostics carried inside a `VerificationResult` naming the first
/// check that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationError {
    /// A row parity bit did not match its recomputed value.
    ///
    /// `row` is the physical row whose data cells were summed; `slot` is
    /// the permuted position in `row_verification` it was checked against.
    #[error("Row parity mismatch: row {row} (slot {slot})")]
    RowParityMismatch { row: usize, slot: usize },

    /// A column parity bit did not match its recomputed value.
    #[error("Column parity mismatch: column {column}")]
    ColumnParityMismatch { column: usize },

    /// The harmonic checksum did not match the recomputed accumulator.
    #[error("Harmonic checksum mismatch: claimed {claimed}, computed {computed}")]
    ChecksumMismatch { claimed: u8, computed: u8 },

    /// Failed to forward a verified matrix to the dispatcher.
    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),
}

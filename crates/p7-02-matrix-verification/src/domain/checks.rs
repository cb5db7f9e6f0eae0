//! # Matrix Integrity Checks
//!
//! Pure domain logic for Protocol-7 matrix verification.
//!
//! A matrix passes verification when all three checks hold:
//!
//! 1. **Row parity** (permuted, key-offset): the parity of each physical
//!    row must equal its stored parity bit, read from the harmonically
//!    permuted slot and offset by the key residue.
//! 2. **Column parity** (direct): the parity of each column must equal
//!    the stored column bit in natural order. No key involvement.
//! 3. **Harmonic checksum**: the weighted sum over all set cells, taken
//!    modulo 13, must equal the stored checksum.
//!
//! Checks are evaluated in row, column, harmonic order and the first
//! mismatch is reported.
//!
//! ## Caller Contract
//!
//! Cell values outside `{0, 1}` and checksums of 13 or more are not
//! validated; the arithmetic consumes the literal values and the result
//! is deterministic but unspecified by the protocol.

use super::entities::{BatchVerificationResult, VerificationRequest, VerificationResult};
use super::errors::VerificationError;
use shared_types::{
    MessageMatrix, VerificationKey, CHECKSUM_MODULUS, MATRIX_COLS, MATRIX_ROWS,
};

// =============================================================================
// MATRIX VERIFIER
// =============================================================================

/// Matrix integrity verifier.
///
/// Stateless handle around the free verification functions, for callers
/// that want an injectable object rather than bare functions.
#[derive(Debug, Clone, Default)]
pub struct MatrixVerifier;

impl MatrixVerifier {
    /// Create a new matrix verifier.
    pub fn new() -> Self {
        Self
    }

    /// Verify a matrix against a key.
    pub fn verify(&self, matrix: &MessageMatrix, key: VerificationKey) -> bool {
        verify(matrix, key)
    }

    /// Verify a matrix and report which check failed first.
    pub fn verify_detailed(
        &self,
        matrix: &MessageMatrix,
        key: VerificationKey,
    ) -> VerificationResult {
        verify_detailed(matrix, key)
    }

    /// Batch verify multiple matrices in parallel.
    pub fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult {
        batch_verify(requests)
    }
}

// =============================================================================
// CORE VERIFICATION FUNCTIONS
// =============================================================================

/// Verify a matrix against a key.
///
/// This is the baseline contract: a pure boolean predicate over
/// `(matrix, key)`. All three checks must pass.
pub fn verify(matrix: &MessageMatrix, key: VerificationKey) -> bool {
    run_checks(matrix, key).is_ok()
}

/// Verify a matrix and report which check failed first.
///
/// Checks run in row, column, harmonic order, so the reported error is
/// always the earliest mismatch in that order.
pub fn verify_detailed(matrix: &MessageMatrix, key: VerificationKey) -> VerificationResult {
    match run_checks(matrix, key) {
        Ok(()) => VerificationResult::accepted(),
        Err(e) => VerificationResult::rejected(e),
    }
}

/// Batch verify multiple matrices in parallel.
///
/// Matrices are independent, so requests are verified concurrently with
/// no coordination between them. Result order matches request order.
pub fn batch_verify(requests: &[VerificationRequest]) -> BatchVerificationResult {
    use rayon::prelude::*;

    let results: Vec<VerificationResult> = requests
        .par_iter()
        .map(|req| verify_detailed(&req.matrix, req.key))
        .collect();

    BatchVerificationResult::from_results(results)
}

/// Run all three checks in order, returning the first mismatch.
fn run_checks(matrix: &MessageMatrix, key: VerificationKey) -> Result<(), VerificationError> {
    check_rows(matrix, key)?;
    check_columns(matrix)?;
    check_harmonic(matrix)
}

/// Check 1: row parity, permuted slots, key offset.
///
/// For each physical row `r`, the data parity must equal
/// `(row_verification[(r*5) mod 7] + key mod 13) mod 2`.
fn check_rows(matrix: &MessageMatrix, key: VerificationKey) -> Result<(), VerificationError> {
    let key_residue = key.reduced();

    for row in 0..MATRIX_ROWS {
        let slot = permuted_row_slot(row);
        let row_sum: u64 = matrix.values[row].iter().map(|&b| u64::from(b)).sum();
        let expected = (u64::from(matrix.row_verification[slot]) + key_residue) % 2;

        if row_sum % 2 != expected {
            return Err(VerificationError::RowParityMismatch { row, slot });
        }
    }

    Ok(())
}

/// Check 2: column parity, natural order, no key involvement.
fn check_columns(matrix: &MessageMatrix) -> Result<(), VerificationError> {
    for column in 0..MATRIX_COLS {
        let col_sum: u64 = (0..MATRIX_ROWS)
            .map(|row| u64::from(matrix.values[row][column]))
            .sum();

        if col_sum % 2 != u64::from(matrix.col_verification[column]) {
            return Err(VerificationError::ColumnParityMismatch { column });
        }
    }

    Ok(())
}

/// Check 3: harmonic checksum over set cells, modulo 13.
///
/// Cells are flattened row-major (`i = r*5 + c`); every non-zero cell
/// contributes `(i*5) mod 13` to the accumulator.
fn check_harmonic(matrix: &MessageMatrix) -> Result<(), VerificationError> {
    let mut acc: u64 = 0;

    for row in 0..MATRIX_ROWS {
        for column in 0..MATRIX_COLS {
            if matrix.values[row][column] != 0 {
                let index = row * MATRIX_COLS + column;
                acc = (acc + harmonic_weight(index)) % CHECKSUM_MODULUS;
            }
        }
    }

    if u64::from(matrix.harmonic_checksum) != acc {
        return Err(VerificationError::ChecksumMismatch {
            claimed: matrix.harmonic_checksum,
            computed: acc as u8,
        });
    }

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Harmonic row permutation: physical row `r` reads its parity bit from
/// slot `(r*5) mod 7`.
///
/// 5 and 7 are coprime, so this is a bijection on `{0..6}`.
#[must_use]
pub fn permuted_row_slot(row: usize) -> usize {
    (row * 5) % 7
}

/// Harmonic weight of the flattened cell index `i`: `(i*5) mod 13`.
#[must_use]
pub fn harmonic_weight(index: usize) -> u64 {
    (index as u64 * 5) % CHECKSUM_MODULUS
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================

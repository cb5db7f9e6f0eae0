//! # Core Domain Entities
//!
//! Defines the Protocol-7 entities shared between the encoder, the matrix
//! verification subsystem, and the dispatcher.
//!
//! ## Clusters
//!
//! - **Matrix**: `MessageMatrix`, `VerifiedMatrix`, `Bit`, dimension and
//!   modulus constants
//! - **Keys**: `VerificationKey`
//! - **Correlation**: `MatrixId`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// CLUSTER A: THE MATRIX
// =============================================================================

/// Number of rows in a Protocol-7 message matrix.
pub const MATRIX_ROWS: usize = 7;

/// Number of columns in a Protocol-7 message matrix.
pub const MATRIX_COLS: usize = 5;

/// Total number of data cells in a matrix.
pub const MATRIX_CELLS: usize = MATRIX_ROWS * MATRIX_COLS;

/// Modulus for the harmonic checksum and for key reduction.
pub const CHECKSUM_MODULUS: u64 = 13;

/// A single matrix cell.
///
/// Cells are bytes rather than booleans: the verification arithmetic is
/// defined over whatever value the cell holds, and an out-of-range cell
/// contributes its literal value to every sum. Producing cells outside
/// `{0, 1}` is a caller contract violation, not a checked error.
pub type Bit = u8;

/// Correlation identifier for a matrix travelling through the pipeline.
///
/// Assigned by the encoder when the matrix is created. The matrix value
/// itself carries no identity; this id exists so bus events about the
/// same matrix can be correlated across subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct MatrixId(pub Uuid);

impl MatrixId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for MatrixId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A Protocol-7 message matrix: 7x5 data cells plus the three auxiliary
/// structures the verifier checks against.
///
/// This is the output of the Encoder subsystem and the input to the
/// Matrix Verification subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MessageMatrix {
    /// Data cells, indexed `values[row][col]`.
    pub values: [[Bit; MATRIX_COLS]; MATRIX_ROWS],
    /// One parity bit per row, stored at harmonically permuted slots.
    pub row_verification: [Bit; MATRIX_ROWS],
    /// One parity bit per column, stored in natural order.
    pub col_verification: [Bit; MATRIX_COLS],
    /// Harmonic checksum over all set cells, modulo [`CHECKSUM_MODULUS`].
    pub harmonic_checksum: u8,
}

impl MessageMatrix {
    /// Read a single data cell.
    #[must_use]
    pub fn bit(&self, row: usize, col: usize) -> Bit {
        self.values[row][col]
    }
}

/// A matrix that passed all three verification checks.
///
/// This is the output of the Matrix Verification subsystem and the input
/// to the Dispatch subsystem via the choreographed pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VerifiedMatrix {
    /// Correlation id assigned by the encoder.
    pub matrix_id: MatrixId,
    /// The verified matrix.
    pub matrix: MessageMatrix,
}

// =============================================================================
// CLUSTER B: KEYS
// =============================================================================

/// The shared secret key both endpoints of a Protocol-7 exchange hold.
///
/// Only the residue modulo [`CHECKSUM_MODULUS`] ever participates in
/// verification, so callers holding signed or wider keys reduce them
/// before constructing the newtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct VerificationKey(pub u64);

impl VerificationKey {
    /// The key residue consumed by the row and checksum arithmetic.
    #[must_use]
    pub fn reduced(self) -> u64 {
        self.0 % CHECKSUM_MODULUS
    }
}

//! Gate table: from a [`GateKind`] to the 2×2 matrix the state engine applies
//!
//! Fixed gates resolve to their constant matrix; rotations resolve to a
//! generator that still needs an angle. Controlled kinds resolve to the
//! matrix applied to their target. SWAP and MEASURE have no 2×2 form.
//!
//! Angle defaults are not applied here; callers bind the angle first.
//!
//! # Example
//!
//! ```
//! use qcirc_core::GateKind;
//! use qcirc_gates::lookup::{matrix_for, GateMatrix};
//! use qcirc_gates::matrices;
//!
//! assert_eq!(matrix_for(GateKind::Cnot, 0.0), Some(matrices::PAULI_X));
//! assert!(matches!(GateMatrix::of(GateKind::Ry), Some(GateMatrix::Rotation(_))));
//! assert_eq!(matrix_for(GateKind::Swap, 0.0), None);
//! ```

use crate::matrices;
use qcirc_core::{GateKind, Matrix2};

/// A gate's matrix before angle binding
#[derive(Clone, Copy)]
pub enum GateMatrix {
    /// Constant matrix
    Fixed(&'static Matrix2),
    /// Generator over one real angle
    Rotation(fn(f64) -> Matrix2),
}

impl GateMatrix {
    /// Table entry for `kind`, or `None` for SWAP / MEASURE
    pub fn of(kind: GateKind) -> Option<Self> {
        let kind = kind.target_kind().unwrap_or(kind);
        let entry = match kind {
            GateKind::H => GateMatrix::Fixed(&matrices::HADAMARD),
            GateKind::X => GateMatrix::Fixed(&matrices::PAULI_X),
            GateKind::Y => GateMatrix::Fixed(&matrices::PAULI_Y),
            GateKind::Z => GateMatrix::Fixed(&matrices::PAULI_Z),
            GateKind::S => GateMatrix::Fixed(&matrices::S_GATE),
            GateKind::T => GateMatrix::Fixed(&matrices::T_GATE),
            GateKind::Rx => GateMatrix::Rotation(matrices::rotation_x),
            GateKind::Ry => GateMatrix::Rotation(matrices::rotation_y),
            GateKind::Rz => GateMatrix::Rotation(matrices::rotation_z),
            _ => return None,
        };
        Some(entry)
    }

    /// Bind the angle; fixed matrices ignore it
    #[inline]
    pub fn resolve(&self, angle: f64) -> Matrix2 {
        match self {
            GateMatrix::Fixed(m) => **m,
            GateMatrix::Rotation(generator) => generator(angle),
        }
    }
}

impl std::fmt::Debug for GateMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateMatrix::Fixed(m) => f.debug_tuple("Fixed").field(m).finish(),
            GateMatrix::Rotation(_) => f.write_str("Rotation(<generator>)"),
        }
    }
}

/// Resolved 2×2 matrix for `kind` at `angle`
#[inline]
pub fn matrix_for(kind: GateKind, angle: f64) -> Option<Matrix2> {
    GateMatrix::of(kind).map(|entry| entry.resolve(angle))
}

//! Gate table for qcirc
//!
//! Pre-computed matrices for the fixed single-qubit gates (H, X, Y, Z, S, T),
//! generators for the rotations RX(θ), RY(θ), RZ(θ), and the lookup from a
//! [`qcirc_core::GateKind`] to the matrix the state engine applies.
//!
//! # Example
//!
//! ```
//! use qcirc_gates::matrices;
//! use std::f64::consts::PI;
//!
//! let h = &matrices::HADAMARD;
//! let rz = matrices::rotation_z(PI / 2.0);
//! assert!(matrices::is_unitary(h, 1e-12));
//! assert!(matrices::is_unitary(&rz, 1e-12));
//! ```

pub mod lookup;
pub mod matrices;

pub use lookup::{matrix_for, GateMatrix};

//! Core types for the qcirc statevector simulator
//!
//! This crate provides the fundamental types shared by the gate table, the
//! state engine and the simulator driver:
//! - [`complex`]: amplitude arithmetic helpers over [`Complex64`]
//! - [`QubitId`]: type-safe qubit addressing with the little-endian bit convention
//! - [`GateKind`] / [`GateOp`]: the tagged gate vocabulary
//! - [`Circuit`]: an ordered, validated sequence of gate operations
//! - [`BlochVector`]: single-qubit Bloch coordinates
//!
//! # Example
//! ```
//! use qcirc_core::{Circuit, GateKind};
//!
//! let mut circuit = Circuit::new(3).unwrap();
//! circuit.h(0).unwrap().ccx(0, 1, 2).unwrap();
//! assert_eq!(circuit.count_kind(GateKind::Ccx), 1);
//! ```

pub mod bloch_sphere;
pub mod circuit;
pub mod complex;
pub mod error;
pub mod gate;
pub mod qubit;

pub use bloch_sphere::{BlochAngles, BlochVector};
pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{GateKind, GateOp};
pub use num_complex::Complex64;
pub use qubit::QubitId;

/// 2×2 complex matrix in row-major order
pub type Matrix2 = [[Complex64; 2]; 2];

/// Result type for circuit construction
pub type Result<T> = std::result::Result<T, QuantumError>;

//! Dense quantum state vector engine
//!
//! This crate owns the `2^n` complex amplitudes of an `n`-qubit register and
//! evolves them with explicit bit-indexed kernels:
//!
//! - single-qubit gates on any target
//! - controlled gates with any number of controls
//! - SWAP as an amplitude permutation
//!
//! It also samples measurement outcomes and derives per-basis records and
//! per-qubit Bloch vectors. Basis index bit `k` is qubit `k`; bitstring labels
//! print qubit `n - 1` leftmost.
//!
//! Kernels write into a fresh output vector and switch to `rayon` once the
//! register reaches the configured parallel threshold.
//!
//! # Example
//!
//! ```
//! use qcirc_state::DenseState;
//! use num_complex::Complex64;
//!
//! let x = [
//!     [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
//!     [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
//! ];
//! let mut state = DenseState::new(3).unwrap();
//! state.apply_gate(&x, 2).unwrap();
//!
//! let labels: Vec<_> = state
//!     .state_vector()
//!     .filter(|r| r.probability > 0.5)
//!     .map(|r| r.label)
//!     .collect();
//! assert_eq!(labels, vec!["100".to_string()]);
//! ```

pub mod basis;
pub mod dense_state;
pub mod error;
pub mod kernels;
pub mod measurement;
pub mod state_vector;

pub use basis::{BasisAmplitude, BasisStates};
pub use dense_state::{DenseState, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{Result, StateError};
pub use measurement::{to_bitstring, CumulativeTable, SamplingResult};
pub use state_vector::{StateVector, MAX_QUBITS};

//! Statevector circuit simulator
//!
//! This crate drives the qcirc state engine end to end: it takes a
//! [`qcirc_core::Circuit`] (built directly or decoded from an editor
//! [`CircuitLayout`]), evolves |0...0⟩ through every operation, samples the
//! final state and reports counts, per-basis amplitudes and per-qubit Bloch
//! vectors.
//!
//! # Features
//!
//! - **Typed gate vocabulary**: rotations without an angle run at the
//!   configured default (π/2)
//! - **Reproducible sampling**: seed the run through [`SimulatorConfig`]
//! - **Parallel kernels**: large registers switch to rayon
//! - **Editor state**: [`CircuitLayout`] keeps multi-cell gates linked
//!
//! Progress is reported through `tracing`; install a subscriber to see it.
//!
//! # Example
//!
//! ```
//! use qcirc_core::GateKind;
//! use qcirc_sim::{CircuitLayout, Simulator, SimulatorConfig};
//!
//! let mut layout = CircuitLayout::default();
//! layout.place_gate(0, 0, GateKind::H, None).unwrap();
//! layout.place_controlled(1, GateKind::Cnot, &[0], 1).unwrap();
//!
//! let simulator = Simulator::new(SimulatorConfig::default().with_seed(3)).unwrap();
//! let result = simulator.run(&layout.to_circuit().unwrap()).unwrap();
//!
//! assert_eq!(result.counts.get("01") + result.counts.get("10"), 0);
//! println!("{}", result);
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod result;
pub mod simulator;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use layout::{Cell, CircuitLayout};
pub use result::{MeasurementCounts, SimulationResult};
pub use simulator::Simulator;

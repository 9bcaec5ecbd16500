//! Error types for the simulator

use qcirc_core::QuantumError;
use qcirc_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Circuit is invalid or malformed
    #[error("Invalid circuit: {0}")]
    Circuit(#[from] QuantumError),

    /// State engine rejected an operation
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Too many qubits for the configured limit
    #[error("Too many qubits: circuit has {num_qubits}, max supported is {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: usize },

    /// Editor layout cannot be edited or decoded as requested
    #[error("Invalid layout: {0}")]
    Layout(String),

    /// Norm drifted past tolerance after an operation
    #[error("Norm drift after operation {gate_index}: norm = {norm}")]
    NormDrift { gate_index: usize, norm: f64 },
}

impl SimulatorError {
    pub(crate) fn layout(message: impl Into<String>) -> Self {
        SimulatorError::Layout(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcirc_core::QubitId;

    #[test]
    fn test_conversions() {
        let err: SimulatorError = QuantumError::DuplicateQubit(QubitId::new(1)).into();
        assert!(matches!(err, SimulatorError::Circuit(_)));
        assert!(err.to_string().starts_with("Invalid circuit:"));

        let err: SimulatorError = StateError::NotNormalized { norm: 0.5 }.into();
        assert!(matches!(err, SimulatorError::State(_)));
    }

    #[test]
    fn test_messages() {
        let err = SimulatorError::NormDrift {
            gate_index: 3,
            norm: 1.5,
        };
        assert_eq!(err.to_string(), "Norm drift after operation 3: norm = 1.5");

        let err = SimulatorError::layout("cell occupied");
        assert_eq!(err.to_string(), "Invalid layout: cell occupied");
    }
}

//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur during state vector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Same qubit used twice in one operation
    #[error("Qubit {index} used more than once in one operation")]
    DuplicateQubit { index: usize },

    /// Invalid state dimension
    #[error("Invalid state dimension {dimension}, expected power of 2 up to 2^{max_qubits}")]
    InvalidDimension { dimension: usize, max_qubits: usize },

    /// State not normalized
    #[error("State vector not normalized, norm = {norm}")]
    NotNormalized { norm: f64 },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Basis index out of range
    #[error("Basis state {index} out of range for dimension {dimension}")]
    InvalidBasisState { index: usize, dimension: usize },
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = StateError::InvalidQubitIndex {
            index: 4,
            num_qubits: 2,
        };
        assert_eq!(err.to_string(), "Invalid qubit index 4 for 2-qubit state");

        let err = StateError::DimensionMismatch {
            expected: 8,
            actual: 6,
        };
        assert!(err.to_string().contains("expected 8, got 6"));
    }
}

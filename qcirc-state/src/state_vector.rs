//! Amplitude storage for a fixed number of qubits

use crate::error::{Result, StateError};
use num_complex::Complex64;
use qcirc_core::complex::{ONE, ZERO};

/// Largest register the dense representation accepts
pub const MAX_QUBITS: usize = 30;

/// Owned vector of `2^num_qubits` complex amplitudes
///
/// # Example
///
/// ```
/// use qcirc_state::StateVector;
///
/// let state = StateVector::new(2).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// assert_eq!(state.dimension(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Create a state vector initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` is 0 or above [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dimension = Self::dimension_for(num_qubits)?;

        let mut amplitudes = vec![ZERO; dimension];
        amplitudes[0] = ONE;

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Create a state vector from raw amplitudes
    ///
    /// The amplitudes are taken as given; callers that need a normalized
    /// state check [`StateVector::is_normalized`].
    ///
    /// # Errors
    /// Returns error if the length is not `2^num_qubits`
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> Result<Self> {
        let dimension = Self::dimension_for(num_qubits)?;

        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    fn dimension_for(num_qubits: usize) -> Result<usize> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(StateError::InvalidDimension {
                dimension: 1usize.checked_shl(num_qubits as u32).unwrap_or(usize::MAX),
                max_qubits: MAX_QUBITS,
            });
        }
        Ok(1 << num_qubits)
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Swap in a new amplitude vector of the same dimension
    pub(crate) fn replace(&mut self, amplitudes: Vec<Complex64>) {
        debug_assert_eq!(amplitudes.len(), self.amplitudes.len());
        self.amplitudes = amplitudes;
    }

    /// L2 norm, `sqrt(Σ|a_i|²)`
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Check if |norm - 1| < epsilon
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Scale all amplitudes so the norm equals 1
    ///
    /// # Errors
    /// Returns error for the zero vector
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.norm();
        if norm < 1e-10 {
            return Err(StateError::NotNormalized { norm });
        }
        let inv_norm = 1.0 / norm;
        for amplitude in &mut self.amplitudes {
            *amplitude *= inv_norm;
        }
        Ok(())
    }

    /// Reset the state to |0...0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let state = StateVector::new(3).unwrap();
        let amplitudes = state.amplitudes();

        assert_eq!(amplitudes[0], ONE);
        for amp in &amplitudes[1..] {
            assert_eq!(*amp, ZERO);
        }
        assert!(state.is_normalized(1e-12));
    }

    #[test]
    fn test_from_amplitudes() {
        let amplitudes = vec![Complex64::new(0.5, 0.0); 4];
        let state = StateVector::from_amplitudes(2, amplitudes.clone()).unwrap();
        assert_eq!(state.amplitudes(), amplitudes.as_slice());
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = StateVector::from_amplitudes(2, vec![ONE; 3]);
        assert_eq!(
            result,
            Err(StateError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_qubit_count_limits() {
        assert!(matches!(
            StateVector::new(0),
            Err(StateError::InvalidDimension { .. })
        ));
        assert!(matches!(
            StateVector::new(MAX_QUBITS + 1),
            Err(StateError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_normalize_and_reset() {
        let mut state = StateVector::from_amplitudes(1, vec![ONE, ONE]).unwrap();
        assert_relative_eq!(state.norm(), 2.0_f64.sqrt(), epsilon = 1e-12);
        state.normalize().unwrap();
        assert!(state.is_normalized(1e-12));

        state.reset();
        assert_eq!(state.amplitudes(), &[ONE, ZERO]);

        let mut zero = StateVector::from_amplitudes(1, vec![ZERO, ZERO]).unwrap();
        assert!(zero.normalize().is_err());
    }
}

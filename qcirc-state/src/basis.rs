//! Per-basis-state records derived from a state vector

use crate::measurement::to_bitstring;
use num_complex::Complex64;
use qcirc_core::complex;
use serde::Serialize;
use std::fmt;
use std::iter::FusedIterator;

/// One computational basis state and its amplitude
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasisAmplitude {
    /// Binary label, qubit `n - 1` leftmost
    pub label: String,
    /// Basis index
    pub index: usize,
    /// Complex amplitude
    pub amplitude: Complex64,
    /// `|amplitude|²`
    pub probability: f64,
    /// `atan2(im, re)` in radians
    pub phase: f64,
}

impl BasisAmplitude {
    /// Build the record for `index` of an `num_qubits`-qubit state
    pub fn new(index: usize, num_qubits: usize, amplitude: Complex64) -> Self {
        Self {
            label: to_bitstring(index, num_qubits),
            index,
            amplitude,
            probability: complex::magnitude_squared(amplitude),
            phase: complex::phase(amplitude),
        }
    }
}

impl fmt::Display for BasisAmplitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{}⟩: {:.4}{:+.4}i (p = {:.4}, φ = {:.4})",
            self.label, self.amplitude.re, self.amplitude.im, self.probability, self.phase
        )
    }
}

/// Read-only iterator over the basis records of a state
///
/// Returned by `DenseState::state_vector`; each call starts a fresh pass.
#[derive(Debug, Clone)]
pub struct BasisStates<'a> {
    amplitudes: std::iter::Enumerate<std::slice::Iter<'a, Complex64>>,
    num_qubits: usize,
}

impl<'a> BasisStates<'a> {
    pub(crate) fn new(amplitudes: &'a [Complex64], num_qubits: usize) -> Self {
        Self {
            amplitudes: amplitudes.iter().enumerate(),
            num_qubits,
        }
    }
}

impl Iterator for BasisStates<'_> {
    type Item = BasisAmplitude;

    fn next(&mut self) -> Option<Self::Item> {
        self.amplitudes
            .next()
            .map(|(index, &amp)| BasisAmplitude::new(index, self.num_qubits, amp))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.amplitudes.size_hint()
    }
}

impl ExactSizeIterator for BasisStates<'_> {}

impl FusedIterator for BasisStates<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_record_fields() {
        let record = BasisAmplitude::new(2, 3, Complex64::new(0.0, 0.5));
        assert_eq!(record.label, "010");
        assert_eq!(record.index, 2);
        assert_relative_eq!(record.probability, 0.25);
        assert_relative_eq!(record.phase, FRAC_PI_2);
    }

    #[test]
    fn test_display() {
        let record = BasisAmplitude::new(1, 2, Complex64::new(0.5, -0.5));
        assert_eq!(
            record.to_string(),
            "|01⟩: 0.5000-0.5000i (p = 0.5000, φ = -0.7854)"
        );
    }

    #[test]
    fn test_iterator_len() {
        let amps = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
        let mut iter = BasisStates::new(&amps, 1);
        assert_eq!(iter.len(), 2);
        iter.next();
        assert_eq!(iter.len(), 1);
        iter.next();
        assert!(iter.next().is_none());
    }
}

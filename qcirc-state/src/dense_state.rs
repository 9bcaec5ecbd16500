//! Dense state vector simulator
//!
//! [`DenseState`] owns the `2^n` amplitudes of one circuit evaluation and
//! exposes gate application, sampling and the derived views (probabilities,
//! per-basis records, per-qubit Bloch vectors). Every mutation goes through a
//! kernel in [`crate::kernels`] that writes a fresh output vector.

use crate::basis::BasisStates;
use crate::error::{Result, StateError};
use crate::kernels;
use crate::measurement::{CumulativeTable, SamplingResult};
use crate::state_vector::StateVector;
use num_complex::Complex64;
use qcirc_core::{BlochVector, Matrix2};
use rand::Rng;
use std::fmt;
use tracing::trace;

/// Qubit count at which kernels switch to the rayon path
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 14;

/// Dense quantum state of `n` qubits
///
/// Basis index `i` encodes qubit `k` in bit `k`.
///
/// # Example
///
/// ```
/// use qcirc_state::DenseState;
/// use num_complex::Complex64;
///
/// let h = 0.7071067811865476;
/// let hadamard = [
///     [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
///     [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
/// ];
/// let x = [
///     [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
///     [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
/// ];
///
/// let mut state = DenseState::new(2).unwrap();
/// state.apply_gate(&hadamard, 0).unwrap();
/// state.apply_controlled_gate(&x, &[0], 1).unwrap();
///
/// assert!((state.probability(0b00).unwrap() - 0.5).abs() < 1e-12);
/// assert!((state.probability(0b11).unwrap() - 0.5).abs() < 1e-12);
/// assert!(state.is_normalized(1e-10));
/// ```
#[derive(Clone, PartialEq)]
pub struct DenseState {
    vector: StateVector,
    parallel_threshold: usize,
}

impl DenseState {
    /// Create a new dense state initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` is 0 or too large
    ///
    /// # Example
    /// ```
    /// use qcirc_state::DenseState;
    ///
    /// let state = DenseState::new(3).unwrap();
    /// assert_eq!(state.num_qubits(), 3);
    /// assert_eq!(state.dimension(), 8);
    /// ```
    pub fn new(num_qubits: usize) -> Result<Self> {
        Ok(Self {
            vector: StateVector::new(num_qubits)?,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Create a dense state from amplitude data
    ///
    /// # Errors
    /// Returns error if the length is not `2^num_qubits` or the amplitudes
    /// are not normalized to within `1e-10`
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> Result<Self> {
        let vector = StateVector::from_amplitudes(num_qubits, amplitudes)?;
        if !vector.is_normalized(1e-10) {
            return Err(StateError::NotNormalized {
                norm: vector.norm(),
            });
        }
        Ok(Self {
            vector,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    /// Use the parallel kernels from `num_qubits` qubits upwards
    pub fn with_parallel_threshold(mut self, num_qubits: usize) -> Self {
        self.parallel_threshold = num_qubits;
        self
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.vector.num_qubits()
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.vector.dimension()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        self.vector.amplitudes()
    }

    /// Get a reference to the underlying state vector
    #[inline]
    pub fn vector(&self) -> &StateVector {
        &self.vector
    }

    /// Whether kernels run on the rayon pool for this state
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.num_qubits() >= self.parallel_threshold
    }

    /// L2 norm of the amplitudes
    pub fn norm(&self) -> f64 {
        self.vector.norm()
    }

    /// Check if the state is normalized (|norm - 1| < epsilon)
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        self.vector.is_normalized(epsilon)
    }

    /// Reset to |0...0⟩
    pub fn reset(&mut self) {
        self.vector.reset();
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(StateError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits(),
            });
        }
        Ok(())
    }

    fn parallel_for(&self, op: &'static str) -> bool {
        let parallel = self.is_parallel();
        if parallel {
            trace!(op, num_qubits = self.num_qubits(), "parallel kernel");
        }
        parallel
    }

    /// Apply a 2×2 unitary to `target`
    ///
    /// # Errors
    /// Returns error if `target` is out of range
    pub fn apply_gate(&mut self, matrix: &Matrix2, target: usize) -> Result<()> {
        self.check_qubit(target)?;
        let parallel = self.parallel_for("single");
        let out = kernels::apply_single_qubit(self.amplitudes(), matrix, target, parallel);
        self.vector.replace(out);
        Ok(())
    }

    /// Apply a 2×2 unitary to `target` conditioned on all `controls` being 1
    ///
    /// # Errors
    /// Returns error if any qubit is out of range, a control equals the
    /// target, or a control is repeated
    pub fn apply_controlled_gate(
        &mut self,
        matrix: &Matrix2,
        controls: &[usize],
        target: usize,
    ) -> Result<()> {
        self.check_qubit(target)?;

        let mut control_mask = 0usize;
        for &control in controls {
            self.check_qubit(control)?;
            let bit = 1usize << control;
            if control == target || control_mask & bit != 0 {
                return Err(StateError::DuplicateQubit { index: control });
            }
            control_mask |= bit;
        }

        let parallel = self.parallel_for("controlled");
        let out =
            kernels::apply_controlled(self.amplitudes(), matrix, control_mask, target, parallel);
        self.vector.replace(out);
        Ok(())
    }

    /// Exchange the states of `q1` and `q2`; a no-op when they are equal
    ///
    /// # Errors
    /// Returns error if either qubit is out of range
    pub fn apply_swap(&mut self, q1: usize, q2: usize) -> Result<()> {
        self.check_qubit(q1)?;
        self.check_qubit(q2)?;
        if q1 == q2 {
            return Ok(());
        }

        let parallel = self.parallel_for("swap");
        let out = kernels::apply_swap(self.amplitudes(), q1, q2, parallel);
        self.vector.replace(out);
        Ok(())
    }

    /// Probability of one basis state
    ///
    /// # Errors
    /// Returns error if `index` is out of range
    pub fn probability(&self, index: usize) -> Result<f64> {
        self.amplitudes()
            .get(index)
            .map(|amp| amp.norm_sqr())
            .ok_or(StateError::InvalidBasisState {
                index,
                dimension: self.dimension(),
            })
    }

    /// `|ψ_i|²` for every basis state, in index order
    pub fn probabilities(&self) -> Vec<f64> {
        kernels::probabilities(self.amplitudes(), self.is_parallel())
    }

    /// Marginal probability of measuring `qubit` as 1
    ///
    /// # Errors
    /// Returns error if `qubit` is out of range
    pub fn qubit_probability_one(&self, qubit: usize) -> Result<f64> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        Ok(self
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum())
    }

    /// Sample `shots` outcomes in the computational basis
    ///
    /// The state is not modified. `rng` must yield uniform values in [0, 1).
    ///
    /// # Example
    /// ```
    /// use qcirc_state::DenseState;
    ///
    /// let state = DenseState::new(2).unwrap();
    /// let mut draw = || 0.5;
    /// let result = state.measure(10, &mut draw);
    /// assert_eq!(result.get_count(0), 10);
    /// ```
    pub fn measure(&self, shots: usize, rng: &mut dyn FnMut() -> f64) -> SamplingResult {
        if shots == 0 {
            return SamplingResult::new(0);
        }
        CumulativeTable::new(&self.probabilities()).sample(shots, rng)
    }

    /// [`DenseState::measure`] driven by a `rand` generator
    pub fn measure_with<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> SamplingResult {
        self.measure(shots, &mut || rng.gen::<f64>())
    }

    /// Per-basis records (label, amplitude, probability, phase) in index order
    pub fn state_vector(&self) -> BasisStates<'_> {
        BasisStates::new(self.amplitudes(), self.num_qubits())
    }

    /// Reduced Bloch vector of one qubit
    ///
    /// For a qubit entangled with others the vector lies inside the sphere.
    ///
    /// # Errors
    /// Returns error if `qubit` is out of range
    pub fn bloch_vector(&self, qubit: usize) -> Result<BlochVector> {
        self.check_qubit(qubit)?;
        Ok(self.bloch_marginal(qubit))
    }

    /// Bloch vectors of every qubit, qubit 0 first
    pub fn bloch_vectors(&self) -> Vec<BlochVector> {
        (0..self.num_qubits()).map(|q| self.bloch_marginal(q)).collect()
    }

    /// Single-qubit marginal; `qubit` must already be in range
    fn bloch_marginal(&self, qubit: usize) -> BlochVector {
        let mask = 1usize << qubit;
        let amps = self.amplitudes();
        let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);

        for (i, a) in amps.iter().enumerate() {
            if i & mask != 0 {
                z -= a.norm_sqr();
                continue;
            }
            z += a.norm_sqr();

            let cross = *a * amps[i | mask].conj();
            x += 2.0 * cross.re;
            y -= 2.0 * cross.im;
        }

        BlochVector::new(x, y, z)
    }
}

impl fmt::Debug for DenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseState")
            .field("num_qubits", &self.num_qubits())
            .field("dimension", &self.dimension())
            .field("norm", &self.norm())
            .finish()
    }
}

impl fmt::Display for DenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DenseState ({} qubits):", self.num_qubits())?;
        for record in self.state_vector().filter(|r| r.probability > 1e-10) {
            writeln!(f, "  {}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qcirc_core::complex::{ONE, ZERO};
    use qcirc_gates::matrices;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    // Simple linear congruential generator for testing
    struct TestRng {
        state: u64,
    }

    impl TestRng {
        fn new(seed: u64) -> Self {
            Self { state: seed }
        }

        fn next(&mut self) -> f64 {
            self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
            ((self.state / 65536) % 32768) as f64 / 32768.0
        }
    }

    fn basis_state(num_qubits: usize, index: usize) -> DenseState {
        let mut amps = vec![ZERO; 1 << num_qubits];
        amps[index] = ONE;
        DenseState::from_amplitudes(num_qubits, amps).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = DenseState::new(3).unwrap();
        assert_eq!(state.amplitudes()[0], ONE);
        assert!(state.amplitudes()[1..].iter().all(|a| *a == ZERO));
        assert!(!state.is_parallel());
    }

    #[test]
    fn test_from_amplitudes_rejects_unnormalized() {
        let result = DenseState::from_amplitudes(1, vec![ONE, ONE]);
        assert!(matches!(result, Err(StateError::NotNormalized { .. })));

        let result = DenseState::from_amplitudes(2, vec![ONE, ZERO]);
        assert!(matches!(result, Err(StateError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_hadamard_gate() {
        let mut state = DenseState::new(1).unwrap();
        state.apply_gate(&matrices::HADAMARD, 0).unwrap();

        for amp in state.amplitudes() {
            assert_relative_eq!(amp.re, FRAC_1_SQRT_2, epsilon = 1e-12);
            assert_relative_eq!(amp.im, 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(state.probability(0).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(state.probability(1).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_qubit_index() {
        let mut state = DenseState::new(2).unwrap();
        assert_eq!(
            state.apply_gate(&matrices::PAULI_X, 2),
            Err(StateError::InvalidQubitIndex {
                index: 2,
                num_qubits: 2
            })
        );
        assert!(state.apply_controlled_gate(&matrices::PAULI_X, &[5], 0).is_err());
        assert!(state.apply_swap(0, 3).is_err());
        assert!(state.bloch_vector(2).is_err());
        assert!(state.qubit_probability_one(9).is_err());
        assert!(matches!(
            state.probability(4),
            Err(StateError::InvalidBasisState { .. })
        ));
    }

    #[test]
    fn test_controlled_rejects_overlap() {
        let mut state = DenseState::new(3).unwrap();
        assert_eq!(
            state.apply_controlled_gate(&matrices::PAULI_X, &[1], 1),
            Err(StateError::DuplicateQubit { index: 1 })
        );
        assert_eq!(
            state.apply_controlled_gate(&matrices::PAULI_X, &[0, 0], 2),
            Err(StateError::DuplicateQubit { index: 0 })
        );
        // failed calls leave the state untouched
        assert_eq!(state, DenseState::new(3).unwrap());
    }

    #[test]
    fn test_cnot_truth_table() {
        for (input, expected) in [(0b00, 0b00), (0b01, 0b11), (0b10, 0b10), (0b11, 0b01)] {
            let mut state = basis_state(2, input);
            state
                .apply_controlled_gate(&matrices::PAULI_X, &[0], 1)
                .unwrap();
            assert_eq!(state, basis_state(2, expected), "input {:02b}", input);
        }
    }

    #[test]
    fn test_swap_equal_qubits_is_identity() {
        let mut state = DenseState::new(2).unwrap();
        state.apply_gate(&matrices::HADAMARD, 1).unwrap();
        let before = state.clone();
        state.apply_swap(1, 1).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_swap_moves_excitation() {
        let mut state = basis_state(2, 0b01);
        state.apply_swap(0, 1).unwrap();
        assert_eq!(state, basis_state(2, 0b10));
    }

    #[test]
    fn test_qubit_probability_one() {
        let mut state = DenseState::new(2).unwrap();
        state.apply_gate(&matrices::rotation_y(1.0), 1).unwrap();
        let expected = (0.5_f64).sin().powi(2);
        assert_relative_eq!(state.qubit_probability_one(1).unwrap(), expected, epsilon = 1e-12);
        assert_relative_eq!(state.qubit_probability_one(0).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_deterministic_state() {
        let state = basis_state(3, 0b101);
        let mut rng = TestRng::new(42);
        let result = state.measure(200, &mut || rng.next());

        assert_eq!(result.shots, 200);
        assert_eq!(result.get_count(0b101), 200);
        assert_eq!(result.to_bitstring_counts(3).get("101"), Some(&200));
    }

    #[test]
    fn test_measure_zero_shots() {
        let state = DenseState::new(1).unwrap();
        let mut draw = || 0.3;
        let result = state.measure(0, &mut draw);
        assert!(result.counts.is_empty());
    }

    #[test]
    fn test_measure_with_seeded_rng_is_reproducible() {
        let mut state = DenseState::new(2).unwrap();
        state.apply_gate(&matrices::HADAMARD, 0).unwrap();
        state.apply_gate(&matrices::HADAMARD, 1).unwrap();

        let a = state.measure_with(500, &mut StdRng::seed_from_u64(9));
        let b = state.measure_with(500, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.total(), 500);
    }

    #[test]
    fn test_state_vector_records() {
        let mut state = DenseState::new(2).unwrap();
        state.apply_gate(&matrices::PAULI_X, 1).unwrap();

        let records: Vec<_> = state.state_vector().collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[2].label, "10");
        assert_relative_eq!(records[2].probability, 1.0);

        // a second pass sees the same records
        assert_eq!(state.state_vector().collect::<Vec<_>>(), records);
    }

    #[test]
    fn test_bloch_vectors() {
        let mut state = DenseState::new(1).unwrap();
        assert!(state
            .bloch_vector(0)
            .unwrap()
            .approx_eq(&BlochVector::new(0.0, 0.0, 1.0), 1e-12));

        state.apply_gate(&matrices::HADAMARD, 0).unwrap();
        assert!(state
            .bloch_vector(0)
            .unwrap()
            .approx_eq(&BlochVector::new(1.0, 0.0, 0.0), 1e-12));

        // S·H|0⟩ = |+i⟩
        state.apply_gate(&matrices::S_GATE, 0).unwrap();
        assert!(state
            .bloch_vector(0)
            .unwrap()
            .approx_eq(&BlochVector::new(0.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_bloch_vectors_cover_every_qubit() {
        let mut state = DenseState::new(3).unwrap();
        state.apply_gate(&matrices::HADAMARD, 0).unwrap();
        state.apply_gate(&matrices::PAULI_X, 2).unwrap();

        let all = state.bloch_vectors();
        assert_eq!(all.len(), 3);
        for (q, bloch) in all.iter().enumerate() {
            assert!(bloch.approx_eq(&state.bloch_vector(q).unwrap(), 1e-15));
        }
        assert!(all[0].approx_eq(&BlochVector::new(1.0, 0.0, 0.0), 1e-12));
        assert!(all[1].approx_eq(&BlochVector::new(0.0, 0.0, 1.0), 1e-12));
        assert!(all[2].approx_eq(&BlochVector::new(0.0, 0.0, -1.0), 1e-12));

        assert!(matches!(
            state.bloch_vector(3),
            Err(StateError::InvalidQubitIndex { index: 3, .. })
        ));
    }

    #[test]
    fn test_bloch_vector_of_entangled_qubit_is_mixed() {
        let mut state = DenseState::new(2).unwrap();
        state.apply_gate(&matrices::HADAMARD, 0).unwrap();
        state
            .apply_controlled_gate(&matrices::PAULI_X, &[0], 1)
            .unwrap();

        for bloch in state.bloch_vectors() {
            assert_relative_eq!(bloch.magnitude(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parallel_threshold_gives_same_result() {
        let run = |threshold: usize| {
            let mut state = DenseState::new(4).unwrap().with_parallel_threshold(threshold);
            state.apply_gate(&matrices::HADAMARD, 0).unwrap();
            state.apply_gate(&matrices::rotation_x(0.3), 2).unwrap();
            state
                .apply_controlled_gate(&matrices::PAULI_Y, &[0, 2], 3)
                .unwrap();
            state.apply_swap(1, 3).unwrap();
            state
        };

        let sequential = run(DEFAULT_PARALLEL_THRESHOLD);
        let parallel = run(1);
        assert!(parallel.is_parallel());
        assert_eq!(sequential.amplitudes(), parallel.amplitudes());
        assert_eq!(sequential.probabilities(), parallel.probabilities());
    }

    #[test]
    fn test_display_lists_nonzero_states() {
        let mut state = DenseState::new(2).unwrap();
        state.apply_gate(&matrices::PAULI_X, 0).unwrap();
        let text = state.to_string();
        assert!(text.starts_with("DenseState (2 qubits):"));
        assert!(text.contains("|01⟩"));
        assert!(!text.contains("|00⟩"));
    }
}

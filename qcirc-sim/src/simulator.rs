//! Core simulator implementation

use qcirc_core::{Circuit, GateOp, QuantumError};
use qcirc_gates::matrix_for;
use qcirc_state::DenseState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::{
    config::SimulatorConfig,
    error::{Result, SimulatorError},
    result::{MeasurementCounts, SimulationResult},
};

/// Statevector circuit simulator
///
/// Runs a [`Circuit`] from |0...0⟩, applying every operation in order, then
/// samples the final state and derives its per-basis and per-qubit views.
///
/// # Example
///
/// ```
/// use qcirc_core::Circuit;
/// use qcirc_sim::{Simulator, SimulatorConfig};
///
/// let simulator = Simulator::new(SimulatorConfig::default().with_seed(7)).unwrap();
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.h(0).unwrap().cnot(0, 1).unwrap();
///
/// let result = simulator.run(&circuit).unwrap();
/// assert_eq!(result.counts.get("00") + result.counts.get("11"), 1024);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run a circuit and sample `config.shots` outcomes
    ///
    /// The random source is `StdRng`, seeded from `config.seed` when set and
    /// from OS entropy otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The circuit is invalid
    /// - The circuit has more qubits than `config.max_qubits`
    /// - Norm checks are enabled and the state drifts
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(circuit, &mut rng)
    }

    /// [`Simulator::run`] with a caller-supplied random source
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        rng: &mut R,
    ) -> Result<SimulationResult> {
        info!(
            num_qubits = circuit.num_qubits(),
            operations = circuit.len(),
            shots = self.config.shots,
            "running circuit"
        );

        let state = self.execute(circuit)?;
        let num_qubits = state.num_qubits();

        let sampling = state.measure_with(self.config.shots, rng);
        let counts = MeasurementCounts::from_sampling(&sampling, num_qubits);

        Ok(SimulationResult::new(
            num_qubits,
            counts,
            state.state_vector().collect(),
            state.bloch_vectors(),
            self.config.probability_threshold,
        ))
    }

    /// Apply every operation of `circuit` to a fresh |0...0⟩ and return the
    /// final state without sampling
    ///
    /// # Errors
    ///
    /// Same conditions as [`Simulator::run`].
    pub fn execute(&self, circuit: &Circuit) -> Result<DenseState> {
        circuit.validate()?;

        let num_qubits = circuit.num_qubits();
        if num_qubits > self.config.max_qubits {
            return Err(SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits: self.config.max_qubits,
            });
        }

        let mut state =
            DenseState::new(num_qubits)?.with_parallel_threshold(self.config.parallel_threshold);

        for (index, op) in circuit.operations().enumerate() {
            debug!(index, kind = %op.kind(), "applying operation");
            self.apply_op(&mut state, op)?;

            if self.config.check_normalization {
                self.check_norm(&state, index)?;
            }
        }

        Ok(state)
    }

    /// Apply one operation, binding unset rotation angles to the default
    fn apply_op(&self, state: &mut DenseState, op: &GateOp) -> Result<()> {
        match op {
            GateOp::Single {
                kind,
                target,
                angle,
            } => {
                let angle = angle.unwrap_or(self.config.default_angle);
                let matrix = matrix_for(*kind, angle)
                    .ok_or_else(|| QuantumError::invalid_gate_kind(kind.name(), "single-qubit"))?;
                state.apply_gate(&matrix, target.index())?;
            }
            GateOp::Controlled {
                kind,
                controls,
                target,
            } => {
                let matrix = matrix_for(*kind, self.config.default_angle)
                    .ok_or_else(|| QuantumError::invalid_gate_kind(kind.name(), "controlled"))?;
                let controls: SmallVec<[usize; 2]> = controls.iter().map(|q| q.index()).collect();
                state.apply_controlled_gate(&matrix, &controls, target.index())?;
            }
            GateOp::Swap { a, b } => {
                state.apply_swap(a.index(), b.index())?;
            }
            GateOp::Measure { .. } => {}
        }
        Ok(())
    }

    fn check_norm(&self, state: &DenseState, gate_index: usize) -> Result<()> {
        let norm = state.norm();
        if (norm - 1.0).abs() > self.config.norm_tolerance {
            warn!(gate_index, norm, "state norm drifted");
            return Err(SimulatorError::NormDrift { gate_index, norm });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qcirc_core::{GateKind, QubitId};
    use std::f64::consts::PI;

    fn seeded(seed: u64) -> Simulator {
        Simulator::new(SimulatorConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_simulator_creation() {
        let sim = Simulator::default();
        assert_eq!(sim.config().shots, 1024);

        let err = Simulator::new(SimulatorConfig::default().with_shots(0)).unwrap_err();
        assert!(matches!(err, SimulatorError::InvalidConfig(_)));
    }

    #[test]
    fn test_bell_circuit() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(0).unwrap().cnot(0, 1).unwrap();

        let result = seeded(1).run(&circuit).unwrap();
        assert_eq!(result.num_qubits, 2);
        assert_eq!(result.total_shots(), 1024);
        assert_eq!(result.counts.get("00") + result.counts.get("11"), 1024);
        assert_eq!(result.state.len(), 4);
        assert_eq!(result.bloch.len(), 2);
    }

    #[test]
    fn test_empty_circuit_stays_in_ground_state() {
        let circuit = Circuit::new(3).unwrap();
        let result = seeded(0).run(&circuit).unwrap();
        assert_eq!(result.counts.get("000"), 1024);
    }

    #[test]
    fn test_same_seed_same_counts() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.h(0).unwrap().h(1).unwrap().ry(2, 1.1).unwrap();

        let a = seeded(99).run(&circuit).unwrap();
        let b = seeded(99).run(&circuit).unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_rotation_without_angle_uses_default() {
        let mut circuit = Circuit::new(1).unwrap();
        circuit.gate(GateKind::Ry, 0).unwrap();

        let sim = Simulator::new(SimulatorConfig::default().with_default_angle(PI)).unwrap();
        let state = sim.execute(&circuit).unwrap();
        assert_relative_eq!(state.probability(1).unwrap(), 1.0, epsilon = 1e-12);

        // π/2 by default: equal superposition
        let state = Simulator::default().execute(&circuit).unwrap();
        assert_relative_eq!(state.probability(1).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_marker_leaves_state() {
        let mut with_marker = Circuit::new(2).unwrap();
        with_marker.h(0).unwrap().measure(0).unwrap().x(1).unwrap();

        let mut without = Circuit::new(2).unwrap();
        without.h(0).unwrap().x(1).unwrap();

        let sim = Simulator::default();
        assert_eq!(
            sim.execute(&with_marker).unwrap(),
            sim.execute(&without).unwrap()
        );
    }

    #[test]
    fn test_too_many_qubits() {
        let circuit = Circuit::new(5).unwrap();
        let sim = Simulator::new(SimulatorConfig::default().with_max_qubits(4)).unwrap();
        assert_eq!(
            sim.execute(&circuit).unwrap_err(),
            SimulatorError::TooManyQubits {
                num_qubits: 5,
                max_qubits: 4
            }
        );
    }

    #[test]
    fn test_invalid_deserialized_circuit_is_rejected() {
        let json = r#"{"num_qubits":2,"operations":[{"op":"single","kind":"H","target":3}]}"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        let err = Simulator::default().execute(&circuit).unwrap_err();
        assert!(matches!(err, SimulatorError::Circuit(_)));
    }

    #[test]
    fn test_norm_check_passes_for_unitary_circuit() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit
            .h(0)
            .unwrap()
            .ccx(0, 1, 2)
            .unwrap()
            .rx(1, 0.3)
            .unwrap()
            .swap(0, 2)
            .unwrap();

        let sim = Simulator::new(SimulatorConfig::debug()).unwrap();
        let state = sim.execute(&circuit).unwrap();
        assert!(state.is_normalized(1e-9));
    }

    #[test]
    fn test_norm_drift_fails_run_at_first_offending_gate() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.h(0).unwrap().t(0).unwrap().ccx(0, 1, 2).unwrap();

        // H|0⟩ squares back to exactly 1.0; the T phase picks up one ulp
        let config = SimulatorConfig::debug().with_norm_tolerance(1e-300);
        let sim = Simulator::new(config.clone()).unwrap();

        match sim.execute(&circuit) {
            Err(SimulatorError::NormDrift { gate_index, norm }) => {
                assert_eq!(gate_index, 1);
                assert!(norm != 1.0);
                assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
            }
            other => panic!("expected NormDrift, got {:?}", other),
        }

        // same circuit passes once the check is off
        let relaxed = config.with_normalization_check(false);
        assert!(Simulator::new(relaxed).unwrap().execute(&circuit).is_ok());
        assert!(matches!(
            sim.run(&circuit),
            Err(SimulatorError::NormDrift { gate_index: 1, .. })
        ));
    }

    #[test]
    fn test_controlled_kinds_dispatch() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.x(0).unwrap().cy(0, 1).unwrap();
        let state = Simulator::default().execute(&circuit).unwrap();
        // CY|01⟩ = i|11⟩
        let amp = state.amplitudes()[0b11];
        assert_relative_eq!(amp.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(amp.im, 1.0, epsilon = 1e-12);

        let op = GateOp::controlled(GateKind::Cz, &[QubitId::new(1)], QubitId::new(0)).unwrap();
        let mut circuit = Circuit::new(2).unwrap();
        circuit.x(0).unwrap().x(1).unwrap().push(op).unwrap();
        let state = Simulator::default().execute(&circuit).unwrap();
        assert_relative_eq!(state.amplitudes()[0b11].re, -1.0, epsilon = 1e-12);
    }
}

//! Simulator configuration

use crate::error::{Result, SimulatorError};
use std::f64::consts::FRAC_PI_2;

/// Configuration for the circuit simulator
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Number of measurement shots for sampling
    ///
    /// Default: 1024
    pub shots: usize,

    /// Random number generator seed for reproducibility
    ///
    /// If None, the generator is seeded from OS entropy. Set to Some(seed)
    /// for deterministic counts.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Angle bound to rotation gates that carry none
    ///
    /// Default: π/2
    pub default_angle: f64,

    /// Minimum number of qubits to run kernels on the rayon pool
    ///
    /// Smaller states use a sequential loop to avoid scheduling overhead.
    ///
    /// Default: 14
    pub parallel_threshold: usize,

    /// Check the state norm after every operation
    ///
    /// Default: false
    pub check_normalization: bool,

    /// Allowed |norm - 1| when `check_normalization` is set
    ///
    /// Default: 1e-9
    pub norm_tolerance: f64,

    /// Basis states at or below this probability are left out of
    /// `SimulationResult::significant_states`
    ///
    /// Default: 1e-4
    pub probability_threshold: f64,

    /// Largest circuit the simulator accepts
    ///
    /// Default: 24
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            default_angle: FRAC_PI_2,
            parallel_threshold: 14,
            check_normalization: false,
            norm_tolerance: 1e-9,
            probability_threshold: 1e-4,
            max_qubits: 24,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for debugging
    ///
    /// - Deterministic seed
    /// - Norm checked after every operation
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            check_normalization: true,
            ..Default::default()
        }
    }

    /// Set the number of measurement shots
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the angle used by rotations without one
    pub fn with_default_angle(mut self, angle: f64) -> Self {
        self.default_angle = angle;
        self
    }

    /// Set the qubit count at which kernels go parallel
    pub fn with_parallel_threshold(mut self, num_qubits: usize) -> Self {
        self.parallel_threshold = num_qubits;
        self
    }

    /// Enable or disable per-operation norm checks
    pub fn with_normalization_check(mut self, enabled: bool) -> Self {
        self.check_normalization = enabled;
        self
    }

    /// Set the norm drift tolerance
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Set the display cutoff for basis state records
    pub fn with_probability_threshold(mut self, threshold: f64) -> Self {
        self.probability_threshold = threshold;
        self
    }

    /// Set the largest accepted qubit count
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(SimulatorError::InvalidConfig(
                "shots must be > 0".to_string(),
            ));
        }

        if self.norm_tolerance.is_nan() || self.norm_tolerance <= 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "norm_tolerance must be positive, got {}",
                self.norm_tolerance
            )));
        }

        if self.probability_threshold.is_nan() || self.probability_threshold < 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "probability_threshold must be non-negative, got {}",
                self.probability_threshold
            )));
        }

        if !self.default_angle.is_finite() {
            return Err(SimulatorError::InvalidConfig(format!(
                "default_angle must be finite, got {}",
                self.default_angle
            )));
        }

        if self.max_qubits == 0 || self.max_qubits > qcirc_state::MAX_QUBITS {
            return Err(SimulatorError::InvalidConfig(format!(
                "max_qubits must be in 1..={}, got {}",
                qcirc_state::MAX_QUBITS,
                self.max_qubits
            )));
        }

        Ok(())
    }
}

//! Simulation result types

use qcirc_core::BlochVector;
use qcirc_state::{BasisAmplitude, SamplingResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Result of one circuit run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Register width
    pub num_qubits: usize,

    /// Sampled measurement counts
    pub counts: MeasurementCounts,

    /// Every basis state of the final state, in index order
    pub state: Vec<BasisAmplitude>,

    /// Reduced Bloch vector of each qubit, qubit 0 first
    pub bloch: Vec<BlochVector>,

    #[serde(skip)]
    probability_threshold: f64,
}

impl SimulationResult {
    /// Assemble a result; `probability_threshold` drives
    /// [`SimulationResult::significant_states`]
    pub fn new(
        num_qubits: usize,
        counts: MeasurementCounts,
        state: Vec<BasisAmplitude>,
        bloch: Vec<BlochVector>,
        probability_threshold: f64,
    ) -> Self {
        Self {
            num_qubits,
            counts,
            state,
            bloch,
            probability_threshold,
        }
    }

    /// Get the total number of measurement shots
    pub fn total_shots(&self) -> usize {
        self.counts.total_shots()
    }

    /// Basis states with probability above the configured threshold
    pub fn significant_states(&self) -> impl Iterator<Item = &BasisAmplitude> {
        let threshold = self.probability_threshold;
        self.state.iter().filter(move |r| r.probability > threshold)
    }

    /// Bloch vector of one qubit, if it exists
    pub fn bloch_vector(&self, qubit: usize) -> Option<&BlochVector> {
        self.bloch.get(qubit)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Result ({} qubits)", self.num_qubits)?;
        write!(f, "{}", self.counts)?;

        writeln!(f, "State Vector:")?;
        for record in self.significant_states() {
            writeln!(f, "  {}", record)?;
        }

        writeln!(f, "Bloch Vectors:")?;
        for (qubit, bloch) in self.bloch.iter().enumerate() {
            writeln!(f, "  q{}: {}", qubit, bloch)?;
        }
        Ok(())
    }
}

/// Measurement outcome counts
///
/// Maps bitstrings (qubit `n - 1` leftmost) to the number of times they were
/// observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementCounts {
    /// Map from bitstring to count
    counts: HashMap<String, usize>,
    /// Total number of shots
    total_shots: usize,
}

impl MeasurementCounts {
    /// Create a new measurement counts object
    pub fn new(total_shots: usize) -> Self {
        Self {
            counts: HashMap::new(),
            total_shots,
        }
    }

    /// Create from a counts map
    pub fn from_counts(counts: HashMap<String, usize>) -> Self {
        let total_shots = counts.values().sum();
        Self {
            counts,
            total_shots,
        }
    }

    /// Label the outcomes of a sampling run
    pub fn from_sampling(sampling: &SamplingResult, num_qubits: usize) -> Self {
        Self {
            counts: sampling.to_bitstring_counts(num_qubits),
            total_shots: sampling.shots,
        }
    }

    /// Add a measurement outcome
    pub fn add(&mut self, bitstring: String, count: usize) {
        *self.counts.entry(bitstring).or_insert(0) += count;
    }

    /// Get the count for a specific bitstring
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Get the probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    /// Get all bitstrings that were observed
    pub fn bitstrings(&self) -> impl Iterator<Item = &String> {
        self.counts.keys()
    }

    /// Get all counts
    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    /// Get total number of shots
    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Get number of unique outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// Get the most common outcome; ties go to the smaller bitstring
    pub fn most_common(&self) -> Option<(&String, usize)> {
        self.sorted().into_iter().next()
    }

    /// Outcomes sorted by count descending, ties by bitstring ascending
    pub fn sorted(&self) -> Vec<(&String, usize)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(bs, &count)| (bs, count)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    /// Convert to a probability distribution
    pub fn to_probabilities(&self) -> HashMap<String, f64> {
        self.counts
            .keys()
            .map(|bs| (bs.clone(), self.probability(bs)))
            .collect()
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total_shots)?;

        for (bitstring, count) in self.sorted() {
            writeln!(
                f,
                "  {}: {} ({:.1}%)",
                bitstring,
                count,
                self.probability(bitstring) * 100.0
            )?;
        }

        Ok(())
    }
}

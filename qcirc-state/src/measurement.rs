//! Computational basis sampling
//!
//! Sampling never collapses the state: every shot draws independently from
//! the same Born-rule distribution `|ψ_i|²`.

use std::collections::HashMap;

/// Counts from repeated sampling, keyed by basis state index
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingResult {
    /// Map from basis state index to count
    pub counts: HashMap<usize, usize>,

    /// Total number of shots
    pub shots: usize,
}

impl SamplingResult {
    /// Create an empty result that expects `shots` outcomes
    pub fn new(shots: usize) -> Self {
        Self {
            counts: HashMap::new(),
            shots,
        }
    }

    /// Record one outcome
    pub fn add_outcome(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Get the count for a specific outcome
    pub fn get_count(&self, outcome: usize) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Observed frequency of an outcome (count / shots)
    pub fn get_probability(&self, outcome: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get_count(outcome) as f64 / self.shots as f64
    }

    /// Sum of all counts; equals `shots` for a completed run
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Outcomes sorted by count descending, ties by ascending index
    pub fn sorted_outcomes(&self) -> Vec<(usize, usize)> {
        let mut outcomes: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        outcomes
    }

    /// Convert counts to bitstring keys, qubit `num_qubits - 1` leftmost
    pub fn to_bitstring_counts(&self, num_qubits: usize) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(&outcome, &count)| (to_bitstring(outcome, num_qubits), count))
            .collect()
    }
}

/// Format a basis index as a zero-padded binary label of `num_qubits` digits
///
/// The leftmost character is qubit `num_qubits - 1`, the rightmost qubit 0.
#[inline]
pub fn to_bitstring(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}

/// Prefix sums of a probability distribution for inverse-CDF sampling
///
/// A uniform draw `r` selects the first index whose running sum exceeds `r`.
/// When rounding leaves the total slightly below 1 and `r` lands in the gap,
/// the draw falls back to the last index with non-zero probability, so every
/// shot is counted.
#[derive(Debug, Clone)]
pub struct CumulativeTable {
    cumulative: Vec<f64>,
    fallback: usize,
}

impl CumulativeTable {
    /// Build the table in ascending index order
    pub fn new(probabilities: &[f64]) -> Self {
        let mut running = 0.0;
        let cumulative = probabilities
            .iter()
            .map(|&p| {
                running += p;
                running
            })
            .collect();

        let fallback = probabilities
            .iter()
            .rposition(|&p| p > 0.0)
            .unwrap_or(probabilities.len().saturating_sub(1));

        Self {
            cumulative,
            fallback,
        }
    }

    /// Total probability mass; 1 up to rounding for a normalized state
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Map a uniform draw in [0, 1) to an index
    #[inline]
    pub fn select(&self, r: f64) -> usize {
        let index = self.cumulative.partition_point(|&c| c <= r);
        if index < self.cumulative.len() {
            index
        } else {
            self.fallback
        }
    }

    /// Draw `shots` independent outcomes
    pub fn sample(&self, shots: usize, rng: &mut dyn FnMut() -> f64) -> SamplingResult {
        let mut result = SamplingResult::new(shots);
        for _ in 0..shots {
            result.add_outcome(self.select(rng()));
        }
        result
    }
}

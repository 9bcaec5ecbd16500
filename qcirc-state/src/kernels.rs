//! Gate application kernels
//!
//! Each kernel reads the current amplitudes and returns a freshly allocated
//! output vector. Writing in place would let later indices read amplitudes
//! that were already updated. Every output entry depends on at most two
//! input entries and is written exactly once, so the parallel path is a plain
//! `par_iter_mut().enumerate()` over the output.
//!
//! Indices are little-endian per qubit: bit `k` of an index is qubit `k`.

use num_complex::Complex64;
use qcirc_core::complex::ZERO;
use qcirc_core::Matrix2;
use rayon::prelude::*;

/// Fill a fresh vector of length `dimension` with `entry(i)` for every index
#[inline]
fn fill<F>(dimension: usize, parallel: bool, entry: F) -> Vec<Complex64>
where
    F: Fn(usize) -> Complex64 + Sync,
{
    let mut out = vec![ZERO; dimension];
    if parallel {
        out.par_iter_mut()
            .enumerate()
            .for_each(|(i, amp)| *amp = entry(i));
    } else {
        for (i, amp) in out.iter_mut().enumerate() {
            *amp = entry(i);
        }
    }
    out
}

/// Two-term combination for index `i` on the `target` subspace:
/// `m[bit][0]·ψ[i with bit=0] + m[bit][1]·ψ[i with bit=1]`
#[inline(always)]
fn combine(state: &[Complex64], matrix: &Matrix2, target: usize, i: usize) -> Complex64 {
    let mask = 1usize << target;
    let bit = (i >> target) & 1;
    let row = &matrix[bit];
    row[0] * state[i & !mask] + row[1] * state[i | mask]
}

/// Apply a 2×2 gate to `target`
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use qcirc_state::kernels::apply_single_qubit;
///
/// let x = [
///     [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
///     [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
/// ];
/// let state = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
/// let out = apply_single_qubit(&state, &x, 0, false);
/// assert_eq!(out[1], Complex64::new(1.0, 0.0));
/// ```
pub fn apply_single_qubit(
    state: &[Complex64],
    matrix: &Matrix2,
    target: usize,
    parallel: bool,
) -> Vec<Complex64> {
    fill(state.len(), parallel, |i| combine(state, matrix, target, i))
}

/// Apply a 2×2 gate to `target` on the indices where every bit in
/// `control_mask` is set; other amplitudes pass through unchanged.
///
/// The target bit is never part of `control_mask`, so an index and its
/// target-flipped partner always agree on the control condition.
pub fn apply_controlled(
    state: &[Complex64],
    matrix: &Matrix2,
    control_mask: usize,
    target: usize,
    parallel: bool,
) -> Vec<Complex64> {
    debug_assert_eq!(control_mask & (1 << target), 0);

    fill(state.len(), parallel, |i| {
        if i & control_mask == control_mask {
            combine(state, matrix, target, i)
        } else {
            state[i]
        }
    })
}

/// Exchange qubits `q1` and `q2`
///
/// A permutation of amplitudes: indices whose two bits differ take the
/// amplitude of the index with both bits flipped. The permutation is its own
/// inverse, so gathering from it equals scattering through it.
pub fn apply_swap(state: &[Complex64], q1: usize, q2: usize, parallel: bool) -> Vec<Complex64> {
    let flip = (1usize << q1) | (1usize << q2);

    fill(state.len(), parallel, |i| {
        let b1 = (i >> q1) & 1;
        let b2 = (i >> q2) & 1;
        if b1 != b2 {
            state[i ^ flip]
        } else {
            state[i]
        }
    })
}

/// `|ψ_i|²` for every index
pub fn probabilities(state: &[Complex64], parallel: bool) -> Vec<f64> {
    if parallel {
        state.par_iter().map(|amp| amp.norm_sqr()).collect()
    } else {
        state.iter().map(|amp| amp.norm_sqr()).collect()
    }
}

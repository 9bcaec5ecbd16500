//! Qubit addressing
//!
//! Basis-state indices are little-endian per qubit: bit `k` of an index is the
//! value of qubit `k`. [`QubitId`] carries that convention in `mask` and
//! `bit_of`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe identifier for a qubit
///
/// # Example
/// ```
/// use qcirc_core::QubitId;
///
/// let q2 = QubitId::new(2);
/// assert_eq!(q2.mask(), 0b100);
/// assert_eq!(q2.bit_of(0b101), 1);
/// assert_eq!(q2.bit_of(0b011), 0);
/// ```
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Single-bit mask selecting this qubit in a basis index
    #[inline]
    pub const fn mask(&self) -> usize {
        1 << self.0
    }

    /// Value (0 or 1) of this qubit in the given basis index
    #[inline]
    pub const fn bit_of(&self, basis_index: usize) -> usize {
        (basis_index >> self.0) & 1
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_ordering() {
        let q0 = QubitId::new(0);
        let q1 = QubitId::new(1);
        assert!(q0 < q1);
        assert_eq!(q0, QubitId::from(0));
    }

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId::new(5)), "q5");
    }

    #[test]
    fn test_mask_and_bits() {
        let q0 = QubitId::new(0);
        let q3 = QubitId::new(3);
        assert_eq!(q0.mask(), 1);
        assert_eq!(q3.mask(), 8);

        for index in 0..16usize {
            assert_eq!(q0.bit_of(index), index & 1);
            assert_eq!(q3.bit_of(index), usize::from(index >= 8));
        }
    }

    #[test]
    fn test_usize_roundtrip() {
        let i: usize = QubitId::new(7).into();
        assert_eq!(i, 7);
    }
}

//! Bloch sphere coordinates for single-qubit states
//!
//! Any pure single-qubit state can be written as
//!
//! |ψ⟩ = cos(θ/2)|0⟩ + e^(iφ)sin(θ/2)|1⟩
//!
//! where θ ∈ [0, π] and φ ∈ [0, 2π) define a point on the unit sphere. The
//! reduced state of one qubit inside an entangled register lies inside the
//! sphere; its vector is shorter than 1.
//!
//! # Example
//!
//! ```
//! use qcirc_core::BlochVector;
//! use num_complex::Complex64;
//!
//! // |+⟩ state points along +x
//! let plus = [
//!     Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0),
//!     Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0),
//! ];
//! let bloch = BlochVector::from_state(&plus);
//! assert!((bloch.x - 1.0).abs() < 1e-10);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A point on (or inside) the Bloch sphere in Cartesian coordinates
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BlochVector {
    /// ⟨σx⟩
    pub x: f64,
    /// ⟨σy⟩
    pub y: f64,
    /// ⟨σz⟩; +1 is |0⟩, -1 is |1⟩
    pub z: f64,
}

/// Bloch sphere angles (spherical coordinates)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlochAngles {
    /// Polar angle θ ∈ [0, π]
    pub theta: f64,
    /// Azimuthal angle φ ∈ [0, 2π)
    pub phi: f64,
}

impl BlochVector {
    /// Create a Bloch vector from Cartesian coordinates
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// North pole, the |0⟩ state
    pub const fn zero_state() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Bloch vector of an isolated qubit state `[α, β]`
    pub fn from_state(state: &[Complex64; 2]) -> Self {
        let alpha = state[0];
        let beta = state[1];

        // x = 2Re(ᾱβ), y = 2Im(ᾱβ), z = |α|² - |β|²
        let alpha_conj_beta = alpha.conj() * beta;

        Self {
            x: 2.0 * alpha_conj_beta.re,
            y: 2.0 * alpha_conj_beta.im,
            z: alpha.norm_sqr() - beta.norm_sqr(),
        }
    }

    /// Convert to spherical coordinates
    pub fn to_angles(&self) -> BlochAngles {
        let r = self.magnitude();

        if r < 1e-10 {
            return BlochAngles {
                theta: 0.0,
                phi: 0.0,
            };
        }

        let theta = (self.z / r).clamp(-1.0, 1.0).acos();
        let phi = self.y.atan2(self.x);
        let phi = if phi < 0.0 { phi + 2.0 * PI } else { phi };

        BlochAngles { theta, phi }
    }

    /// Length of the vector; 1 for pure states, less for mixed ones
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Check if this represents a pure state (magnitude ≈ 1.0)
    pub fn is_pure(&self, tolerance: f64) -> bool {
        (self.magnitude() - 1.0).abs() < tolerance
    }

    /// Probability of reading |0⟩, `(1 + z) / 2`
    pub fn probability_zero(&self) -> f64 {
        (1.0 + self.z) / 2.0
    }

    /// Probability of reading |1⟩, `(1 - z) / 2`
    pub fn probability_one(&self) -> f64 {
        (1.0 - self.z) / 2.0
    }

    /// Component-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &BlochVector, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Multi-line readout: coordinates, angles and basis probabilities
    pub fn describe(&self) -> String {
        let angles = self.to_angles();

        let mut desc = String::new();
        desc.push_str(&format!(
            "x = {:.3}, y = {:.3}, z = {:.3}\n",
            self.x, self.y, self.z
        ));
        desc.push_str(&format!(
            "θ = {:.3} rad, φ = {:.3} rad\n",
            angles.theta, angles.phi
        ));
        desc.push_str(&format!(
            "|0⟩: {:.1}%, |1⟩: {:.1}%\n",
            self.probability_zero() * 100.0,
            self.probability_one() * 100.0
        ));
        if self.magnitude() < 0.9 {
            desc.push_str("Mixed (entangled with other qubits)\n");
        }

        desc
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

impl BlochAngles {
    /// Convert spherical coordinates to a Bloch vector
    pub fn to_vector(&self) -> BlochVector {
        BlochVector {
            x: self.theta.sin() * self.phi.cos(),
            y: self.theta.sin() * self.phi.sin(),
            z: self.theta.cos(),
        }
    }

    /// Convert to state coefficients `[α, β]` with real α
    pub fn to_state(&self) -> [Complex64; 2] {
        let alpha = Complex64::new((self.theta / 2.0).cos(), 0.0);
        let beta = Complex64::from_polar((self.theta / 2.0).sin(), self.phi);
        [alpha, beta]
    }
}

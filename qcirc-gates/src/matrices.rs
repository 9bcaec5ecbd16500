//! Gate matrices
//!
//! Fixed gates are compile-time constants; rotations are generated from the
//! angle on demand.

use num_complex::Complex64;
use qcirc_core::complex::{I, NEG_I, NEG_ONE, ONE, ZERO};
use qcirc_core::Matrix2;

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: Matrix2 = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X gate matrix (NOT gate)
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y gate matrix
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: Matrix2 = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z gate matrix
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Identity
pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];

/// S gate matrix (√Z)
/// S = [[1, 0],
///      [0, i]]
pub const S_GATE: Matrix2 = [[ONE, ZERO], [ZERO, I]];

/// T gate matrix (π/8 gate, √S)
/// T = [[1, 0],
///      [0, e^(iπ/4)]]
pub const T_GATE: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)], // e^(iπ/4) = (1+i)/√2
];

/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_x(theta: f64) -> Matrix2 {
    let (sin_val, cos_val) = (theta / 2.0).sin_cos();

    [
        [Complex64::new(cos_val, 0.0), Complex64::new(0.0, -sin_val)],
        [Complex64::new(0.0, -sin_val), Complex64::new(cos_val, 0.0)],
    ]
}

/// RY(θ) = [[cos(θ/2),  -sin(θ/2)],
///          [sin(θ/2),   cos(θ/2)]]
#[inline]
pub fn rotation_y(theta: f64) -> Matrix2 {
    let (sin_val, cos_val) = (theta / 2.0).sin_cos();

    [
        [Complex64::new(cos_val, 0.0), Complex64::new(-sin_val, 0.0)],
        [Complex64::new(sin_val, 0.0), Complex64::new(cos_val, 0.0)],
    ]
}

/// RZ(θ) = [[e^(-iθ/2),  0       ],
///          [0,          e^(iθ/2)]]
#[inline]
pub fn rotation_z(theta: f64) -> Matrix2 {
    let (sin_val, cos_val) = (theta / 2.0).sin_cos();

    [
        [Complex64::new(cos_val, -sin_val), ZERO],
        [ZERO, Complex64::new(cos_val, sin_val)],
    ]
}

/// Conjugate transpose
pub fn adjoint(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Matrix product `a · b`
pub fn multiply(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut result = [[ZERO; 2]; 2];
    for (i, row) in result.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    result
}

/// Entry-wise comparison within `epsilon`
pub fn approx_eq(a: &Matrix2, b: &Matrix2, epsilon: f64) -> bool {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .all(|(x, y)| (x - y).norm() < epsilon)
}

/// Check U†U = I within `epsilon`
pub fn is_unitary(m: &Matrix2, epsilon: f64) -> bool {
    approx_eq(&multiply(&adjoint(m), m), &IDENTITY, epsilon)
}

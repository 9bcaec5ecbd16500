//! Complex amplitude helpers
//!
//! Amplitudes are plain [`Complex64`] values. The functions here name the
//! handful of operations the state engine relies on so call sites read the
//! same way the math does; they are thin wrappers over `num_complex`.

use num_complex::Complex64;

/// 0 + 0i
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);
/// 1 + 0i
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);
/// 0 + 1i
pub const I: Complex64 = Complex64::new(0.0, 1.0);
/// -1 + 0i
pub const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);
/// 0 - 1i
pub const NEG_I: Complex64 = Complex64::new(0.0, -1.0);

/// Complex addition
#[inline]
pub fn add(a: Complex64, b: Complex64) -> Complex64 {
    a + b
}

/// Complex multiplication, `(ac - bd, ad + bc)`
#[inline]
pub fn multiply(a: Complex64, b: Complex64) -> Complex64 {
    a * b
}

/// Multiply by a real scalar
#[inline]
pub fn scale(s: f64, a: Complex64) -> Complex64 {
    a * s
}

/// `re² + im²`, the probability weight of an amplitude
#[inline]
pub fn magnitude_squared(a: Complex64) -> f64 {
    a.norm_sqr()
}

/// `sqrt(re² + im²)`
#[inline]
pub fn magnitude(a: Complex64) -> f64 {
    a.norm()
}

/// `(re, -im)`
#[inline]
pub fn conjugate(a: Complex64) -> Complex64 {
    a.conj()
}

/// `atan2(im, re)`; the zero amplitude has phase 0
#[inline]
pub fn phase(a: Complex64) -> f64 {
    a.im.atan2(a.re)
}

/// `e^{iθ}`
#[inline]
pub fn from_phase(theta: f64) -> Complex64 {
    Complex64::new(theta.cos(), theta.sin())
}

// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dense univariate polynomial with `f64` coefficients.

use smallvec::SmallVec;

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// A univariate polynomial of dynamic (run-time) degree.
///
/// Coefficients are stored in increasing order of degree, so `coeffs[0]` is
/// the constant term and `coeffs[i]` is the coefficient of `x^i`. The length
/// of the buffer is fixed at construction: a polynomial constructed with
/// `order + 1` coefficients keeps that many, even if the high ones are zero.
/// [`Poly::degree`] reports the *effective* degree, ignoring zero high-order
/// coefficients.
///
/// This is a value type. All operations return new polynomials.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poly {
    /// Coefficients in increasing order of degree.
    coeffs: SmallVec<[f64; 8]>,
}

impl Poly {
    /// Constructs a new polynomial from coefficients.
    ///
    /// The first coefficient provided will be the constant term, the second
    /// will be the linear term, and so on. Providing no coefficients gives
    /// the zero polynomial of order 0.
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Self {
        let mut coeffs: SmallVec<[f64; 8]> = coeffs.into_iter().collect();
        if coeffs.is_empty() {
            coeffs.push(0.0);
        }
        Poly { coeffs }
    }

    /// The coefficients of this polynomial.
    ///
    /// In the returned slice, the coefficient of `x^i` is at index `i`.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// The stored order of this polynomial: one less than the number of
    /// coefficients, whether or not the high ones are zero.
    pub fn order(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// The effective degree: the largest power with a nonzero coefficient.
    ///
    /// The zero polynomial reports degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|&c| c != 0.0)
            .unwrap_or(0)
    }

    /// Is every coefficient zero?
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }

    /// Are all the coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }

    /// Returns the largest absolute value of any coefficient.
    ///
    /// Always returns a non-negative number, or NaN if some coefficient is NaN.
    pub fn magnitude(&self) -> f64 {
        let mut max = 0.0_f64;
        for c in &self.coeffs {
            max = max.max(c.abs());
        }
        max
    }

    /// Evaluates this polynomial at a point, by Horner's method.
    ///
    /// Infinite arguments are legal: the result is the appropriately signed
    /// infinity determined by the highest-order nonzero coefficient and the
    /// parity of the degree. This is what makes unbounded intervals work in
    /// [`SturmChain::roots`](crate::SturmChain::roots).
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_infinite() {
            return self.eval_at_infinity(x);
        }
        let mut acc = 0.0;
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    fn eval_at_infinity(&self, x: f64) -> f64 {
        let d = self.degree();
        let lead = self.coeffs[d];
        if d == 0 {
            // Constants (including the zero polynomial) evaluate to themselves.
            return lead;
        }
        let mut sign = lead.signum();
        if x < 0.0 && d % 2 == 1 {
            sign = -sign;
        }
        sign * f64::INFINITY
    }

    /// An upper bound on the rounding error accumulated by [`Poly::eval`] at `x`.
    ///
    /// The bound is `Σ (2i + 1)·|aᵢ|·|x|ⁱ · ε`, the standard running error
    /// bound for Horner's method. A value with `|self.eval(x)|` below a small
    /// multiple of this is numerically indistinguishable from zero.
    pub fn precision(&self, x: f64) -> f64 {
        let ax = x.abs();
        let mut sum = 0.0;
        let mut xp = 1.0;
        for (i, c) in self.coeffs.iter().enumerate() {
            sum += (2 * i + 1) as f64 * c.abs() * xp;
            xp *= ax;
        }
        sum * f64::EPSILON
    }

    /// Evaluate this polynomial and its first two derivatives at the same
    /// time, sharing the Horner recurrence.
    ///
    /// Returns `(f(x), f'(x), f''(x))`. This is what Halley's method uses.
    pub fn eval_with_derivs(&self, x: f64) -> (f64, f64, f64) {
        let mut p = 0.0;
        let mut d1 = 0.0;
        let mut d2 = 0.0;
        for c in self.coeffs.iter().rev() {
            d2 = d2 * x + d1;
            d1 = d1 * x + p;
            p = p * x + c;
        }
        (p, d1, 2.0 * d2)
    }

    /// Returns the polynomial that's the derivative of this polynomial.
    ///
    /// The result has one less coefficient, except that the derivative of a
    /// constant is the zero polynomial of order 0.
    pub fn derivative(&self) -> Poly {
        if self.coeffs.len() == 1 {
            return Poly::new([0.0]);
        }
        Poly::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * i as f64),
        )
    }

    /// Taylor shift: returns `g` with `g(x) = f(x + t)`.
    ///
    /// Computed by the generalized Horner recurrence (repeated synthetic
    /// division by `x - t`), which is backward stable.
    pub fn shift(&self, t: f64) -> Poly {
        let mut c = self.coeffs.clone();
        let n = c.len();
        for k in 0..n {
            for i in (k..n - 1).rev() {
                c[i] = c[i] + t * c[i + 1];
            }
        }
        Poly { coeffs: c }
    }

    /// Returns `g` with `g(x) = f(a·x)`.
    pub fn scale(&self, a: f64) -> Poly {
        let mut c = self.coeffs.clone();
        let mut ap = 1.0;
        for coeff in c.iter_mut() {
            *coeff *= ap;
            ap *= a;
        }
        Poly { coeffs: c }
    }

    /// Returns `g` with `g(x) = f(-x)`: the odd coefficients are negated.
    ///
    /// The positive roots of the result are the negated negative roots of
    /// `self`, which is how the solver reduces the negative axis to the
    /// positive one.
    pub fn reflect(&self) -> Poly {
        let mut c = self.coeffs.clone();
        for coeff in c.iter_mut().skip(1).step_by(2) {
            *coeff = -*coeff;
        }
        Poly { coeffs: c }
    }

    /// Returns `(x + 1)^order · f(1/(x + 1))`.
    ///
    /// The roots of the result in `(0, ∞)` correspond to the roots of `f` in
    /// `(0, 1)`, which is the transform behind Budan's 0-1 test and the VAS
    /// search. Computed by reversing the coefficients and Taylor-shifting
    /// by 1.
    pub fn invert_taylor_shift(&self) -> Poly {
        let mut c = self.coeffs.clone();
        c.reverse();
        Poly { coeffs: c }.shift(1.0)
    }

    /// Drops the highest-order coefficient, reducing the stored order by one.
    ///
    /// # Panics
    ///
    /// Panics if the polynomial is a bare constant.
    pub(crate) fn reduce_order(&self) -> Poly {
        assert!(
            self.coeffs.len() > 1,
            "cannot reduce the order of a constant"
        );
        Poly::new(self.coeffs[..self.coeffs.len() - 1].iter().copied())
    }
}

impl core::ops::Add<&Poly> for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        let (long, short) = if self.coeffs.len() >= rhs.coeffs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let mut c = long.coeffs.clone();
        for (a, b) in c.iter_mut().zip(&short.coeffs) {
            *a += b;
        }
        Poly { coeffs: c }
    }
}

impl core::ops::Sub<&Poly> for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        let mut c = self.coeffs.clone();
        if c.len() < rhs.coeffs.len() {
            c.resize(rhs.coeffs.len(), 0.0);
        }
        for (a, b) in c.iter_mut().zip(&rhs.coeffs) {
            *a -= b;
        }
        Poly { coeffs: c }
    }
}

impl core::ops::Mul<&Poly> for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        let mut c = SmallVec::<[f64; 8]>::new();
        c.resize(self.coeffs.len() + rhs.coeffs.len() - 1, 0.0);
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                c[i + j] += a * b;
            }
        }
        Poly { coeffs: c }
    }
}

impl core::ops::Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly::new(self.coeffs.iter().map(|c| -c))
    }
}

impl core::ops::Mul<f64> for Poly {
    type Output = Poly;

    fn mul(mut self, scale: f64) -> Poly {
        self *= scale;
        self
    }
}

impl core::ops::MulAssign<f64> for Poly {
    fn mul_assign(&mut self, scale: f64) {
        for c in &mut self.coeffs {
            *c *= scale;
        }
    }
}

impl core::ops::Div<f64> for Poly {
    type Output = Poly;

    fn div(mut self, scale: f64) -> Poly {
        self /= scale;
        self
    }
}

impl core::ops::DivAssign<f64> for Poly {
    fn div_assign(&mut self, scale: f64) {
        for c in &mut self.coeffs {
            *c /= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_matches_expanded_form() {
        // 2 - 3x + x²
        let p = Poly::new([2.0, -3.0, 1.0]);
        assert_eq!(p.eval(0.0), 2.0);
        assert_eq!(p.eval(1.0), 0.0);
        assert_eq!(p.eval(2.0), 0.0);
        assert_eq!(p.eval(10.0), 72.0);
    }

    #[test]
    fn eval_at_infinity() {
        // x³ - x
        let p = Poly::new([0.0, -1.0, 0.0, 1.0]);
        assert_eq!(p.eval(f64::INFINITY), f64::INFINITY);
        assert_eq!(p.eval(f64::NEG_INFINITY), f64::NEG_INFINITY);

        // -x² + 1: both tails go to -∞.
        let p = Poly::new([1.0, 0.0, -1.0]);
        assert_eq!(p.eval(f64::INFINITY), f64::NEG_INFINITY);
        assert_eq!(p.eval(f64::NEG_INFINITY), f64::NEG_INFINITY);

        // Zero high coefficients don't confuse the sign: this is 2x + 1
        // stored with order 3.
        let p = Poly::new([1.0, 2.0, 0.0, 0.0]);
        assert_eq!(p.eval(f64::NEG_INFINITY), f64::NEG_INFINITY);

        // Constants evaluate to themselves.
        let p = Poly::new([-4.0]);
        assert_eq!(p.eval(f64::INFINITY), -4.0);
    }

    #[test]
    fn degree_ignores_zero_high_coeffs() {
        let p = Poly::new([1.0, 2.0, 0.0, 0.0]);
        assert_eq!(p.order(), 3);
        assert_eq!(p.degree(), 1);
        assert!(Poly::new([0.0, 0.0]).is_zero());
    }

    #[test]
    fn taylor_shift() {
        // (x + 1)² = x² + 2x + 1
        let p = Poly::new([0.0, 0.0, 1.0]);
        assert_eq!(p.shift(1.0).coeffs(), &[1.0, 2.0, 1.0]);

        // Shift and shift back.
        let p = Poly::new([3.0, -2.5, 0.75, 1.0]);
        let q = p.shift(1.75).shift(-1.75);
        for (a, b) in p.coeffs().iter().zip(q.coeffs()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn scale_and_reflect() {
        let p = Poly::new([1.0, 1.0, 1.0]);
        let q = p.scale(2.0);
        assert_eq!(q.coeffs(), &[1.0, 2.0, 4.0]);
        let r = p.reflect();
        assert_eq!(r.coeffs(), &[1.0, -1.0, 1.0]);
        assert_eq!(r.eval(-3.0), p.eval(3.0));
    }

    #[test]
    fn invert_taylor_shift_maps_unit_interval() {
        // f has a root at 1/4; (x+1)^n f(1/(x+1)) must have one at 3.
        let p = Poly::new([-0.25, 1.0, 0.5]);
        let q = p.invert_taylor_shift();
        assert!(q.eval(3.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_and_joint_eval() {
        let p = Poly::new([5.0, -4.0, 3.0, 2.0]);
        let d1 = p.derivative();
        let d2 = d1.derivative();
        assert_eq!(d1.coeffs(), &[-4.0, 6.0, 6.0]);
        for x in [-2.0, -0.5, 0.0, 0.3, 1.7] {
            let (f, fp, fpp) = p.eval_with_derivs(x);
            assert!((f - p.eval(x)).abs() < 1e-12);
            assert!((fp - d1.eval(x)).abs() < 1e-12);
            assert!((fpp - d2.eval(x)).abs() < 1e-12);
        }
    }

    #[test]
    fn precision_scales_with_magnitude() {
        let p = Poly::new([1.0, 1.0, 1.0]);
        let q = Poly::new([1e100, 1e100, 1e100]);
        assert!(p.precision(2.0) < 1e-13);
        assert!(q.precision(2.0) > 1e85);
    }

    #[test]
    fn ring_ops() {
        let p = Poly::new([1.0, 2.0]);
        let q = Poly::new([3.0, 0.0, 1.0]);
        assert_eq!((&p + &q).coeffs(), &[4.0, 2.0, 1.0]);
        assert_eq!((&q - &p).coeffs(), &[2.0, -2.0, 1.0]);
        assert_eq!((&p * &q).coeffs(), &[3.0, 6.0, 1.0, 2.0]);
        assert_eq!((-&p).coeffs(), &[-1.0, -2.0]);
        assert_eq!((q.clone() * 2.0).coeffs(), &[6.0, 0.0, 2.0]);
        assert_eq!((q / 2.0).coeffs(), &[1.5, 0.0, 0.5]);
    }
}

// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomial long division, GCD, and root deflation.

use alloc::vec;
use alloc::vec::Vec;

use crate::Poly;

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// Polynomial long division: returns `(q, r)` with `f = g·q + r` and the
/// order of `r` less than the order of `g`.
///
/// If the stored leading coefficient of `g` is zero, the division recurses
/// with the order of `g` reduced by one, so callers don't need to normalize.
///
/// # Panics
///
/// Panics if `g` is the zero polynomial.
pub fn divide(f: &Poly, g: &Poly) -> (Poly, Poly) {
    assert!(!g.is_zero(), "division by the zero polynomial");
    let m = g.order();
    if g.coeffs()[m] == 0.0 {
        return divide(f, &g.reduce_order());
    }
    let n = f.order();
    if n < m {
        return (Poly::new([0.0]), f.clone());
    }

    let gc = g.coeffs();
    let glead = gc[m];
    let mut rem: Vec<f64> = f.coeffs().to_vec();
    let mut quot = vec![0.0; n - m + 1];
    for k in (0..=n - m).rev() {
        let factor = rem[m + k] / glead;
        quot[k] = factor;
        for i in 0..=m {
            rem[i + k] -= factor * gc[i];
        }
    }
    let r = if m == 0 {
        Poly::new([0.0])
    } else {
        Poly::new(rem[..m].iter().copied())
    };
    (Poly::new(quot), r)
}

/// The monic greatest common divisor of `f` and `g`, by Euclidean
/// remainders.
///
/// Exact arithmetic would make this straightforward; with floats a
/// remainder whose coefficients are rounding residue must be treated as
/// zero, so each remainder is trimmed against a tolerance relative to the
/// magnitude of the polynomials that produced it. Coprime inputs give the
/// constant 1. The main internal use is computing the squarefree part
/// `f / gcd(f, f')` that the VCA and VAS isolators require.
pub fn gcd(f: &Poly, g: &Poly) -> Poly {
    if f.is_zero() {
        return make_monic(g);
    }
    if g.is_zero() {
        return make_monic(f);
    }
    let mut a = make_monic(f);
    let mut b = make_monic(g);
    while !b.is_zero() {
        if b.degree() == 0 {
            return Poly::new([1.0]);
        }
        let (_, r) = divide(&a, &b);
        let r = trim_residue(&r, a.magnitude().max(b.magnitude()));
        a = b;
        b = if r.is_zero() { r } else { make_monic(&r) };
    }
    a
}

// Remainder coefficients far below the magnitude of the polynomials that
// produced them are rounding residue, not real structure.
fn trim_residue(r: &Poly, input_magnitude: f64) -> Poly {
    // A couple of decades above rounding noise, but well below the
    // smallest genuine remainder that near-coprime inputs produce.
    let tol = input_magnitude * 1e-14;
    Poly::new(r.coeffs().iter().map(|&c| if c.abs() <= tol { 0.0 } else { c }))
}

fn make_monic(p: &Poly) -> Poly {
    let lead = p.coeffs()[p.degree()];
    if lead == 0.0 || lead == 1.0 {
        return p.clone();
    }
    Poly::new(p.coeffs().iter().map(|c| c / lead))
}

/// Divides `f` by `(x - root)`, returning the quotient and discarding the
/// remainder.
///
/// If `root` is in fact a root of `f` the remainder is zero and the
/// quotient carries the remaining roots. The quotient's highest and lowest
/// coefficients are computed directly (both are stable), and the interior
/// is filled inward from both ends at once, at each step extending
/// whichever end currently suffers less catastrophic cancellation. A zero
/// root is a pure coefficient shift with no arithmetic at all.
///
/// # Panics
///
/// Panics if `f` is a bare constant.
pub fn deflate(f: &Poly, root: f64) -> Poly {
    let n = f.order();
    assert!(n > 0, "cannot deflate a constant");
    let fc = f.coeffs();

    if root == 0.0 {
        return Poly::new(fc[1..].iter().copied());
    }

    let mut q = vec![0.0; n];
    let mut hi = n - 1;
    let mut lo = 0;
    q[hi] = fc[n];
    if n == 1 {
        return Poly::new(q);
    }
    q[lo] = -fc[0] / root;

    // Forward recurrence q[i] = f[i+1] + root·q[i+1] walks down from the
    // leading coefficient; backward recurrence q[i] = (q[i-1] - f[i])/root
    // walks up from the constant term. Either can blow up when the terms
    // cancel, so pick the direction with the smaller relative rounding
    // error at each step.
    while hi - lo > 1 {
        let top = fc[hi] + root * q[hi];
        let top_cancel = cancellation(fc[hi].abs() + (root * q[hi]).abs(), top);
        let bot = (q[lo] - fc[lo + 1]) / root;
        let bot_cancel = cancellation(q[lo].abs() + fc[lo + 1].abs(), bot * root);
        if top_cancel <= bot_cancel {
            hi -= 1;
            q[hi] = top;
        } else {
            lo += 1;
            q[lo] = bot;
        }
    }
    Poly::new(q)
}

// Ratio of the magnitudes entering a sum to the magnitude surviving it;
// large values mean the digits cancelled.
fn cancellation(sum_abs: f64, value: f64) -> f64 {
    if value == 0.0 {
        if sum_abs == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        sum_abs / value.abs()
    }
}

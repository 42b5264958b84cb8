// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sharpening an isolated root bracket to full precision.

use crate::{different_signs, Poly};

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// How many Halley iterations to attempt before giving up. Third-order
/// convergence from inside an isolating bracket settles in a handful of
/// steps; anything still moving after this many is not converging.
const MAX_HALLEY_ITERS: u32 = 20;

/// A residual within this multiple of the Horner rounding bound counts as
/// zero for root acceptance.
const RESIDUAL_FACTOR: f64 = 4.0;

/// Sign-bracketed bisection, refined all the way to adjacent floats.
///
/// Returns `None` only if `[lo, hi]` does not actually straddle a sign
/// change (or an endpoint is not finite). An endpoint that evaluates to
/// exactly zero is returned as the root.
pub fn bisection(f: &Poly, mut lo: f64, mut hi: f64) -> Option<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let mut flo = f.eval(lo);
    if flo == 0.0 {
        return Some(lo);
    }
    let fhi = f.eval(hi);
    if fhi == 0.0 {
        return Some(hi);
    }
    if !different_signs(flo, fhi) {
        return None;
    }
    loop {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            // lo and hi are adjacent floats; this is as sharp as it gets.
            return Some(mid.clamp(lo, hi));
        }
        let fmid = f.eval(mid);
        if fmid == 0.0 {
            return Some(mid);
        }
        if different_signs(flo, fmid) {
            hi = mid;
        } else {
            lo = mid;
            flo = fmid;
        }
    }
}

/// One run of Halley's method from `x0`, confined to `[lo, hi]`.
///
/// Each step evaluates `f`, `f'`, and `f''` together in a single Horner
/// pass and moves by `2ff' / (2f'² - ff'')`. A step that would leave the
/// bracket is clamped to it. Returns `None` instead of diverging: on a
/// non-finite evaluation, a vanishing denominator, or failure to settle
/// within the iteration budget. The caller keeps its unpolished estimate
/// in that case.
pub fn halley(f: &Poly, x0: f64, lo: f64, hi: f64) -> Option<f64> {
    let mut x = x0;
    for _ in 0..MAX_HALLEY_ITERS {
        let (p, d1, d2) = f.eval_with_derivs(x);
        if !p.is_finite() {
            return None;
        }
        if p.abs() <= RESIDUAL_FACTOR * f.precision(x) {
            return Some(x);
        }
        let denom = 2.0 * d1 * d1 - p * d2;
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }
        let step = 2.0 * p * d1 / denom;
        if !step.is_finite() {
            return None;
        }
        let next = (x - step).clamp(lo, hi);
        if next == x {
            // Stuck on a bracket wall or below float resolution; accept
            // only if the residual is already at noise level.
            return (p.abs() <= RESIDUAL_FACTOR * f.precision(x)).then_some(x);
        }
        x = next;
    }
    let (p, _, _) = f.eval_with_derivs(x);
    (p.is_finite() && p.abs() <= RESIDUAL_FACTOR * f.precision(x)).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisection_sqrt2() {
        let p = Poly::new([-2.0, 0.0, 1.0]);
        let r = bisection(&p, 1.0, 2.0).unwrap();
        assert!((r - 2.0_f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn bisection_needs_a_sign_change() {
        let p = Poly::new([1.0, 0.0, 1.0]);
        assert!(bisection(&p, -1.0, 1.0).is_none());
    }

    #[test]
    fn bisection_descending_bracket_value() {
        // f decreasing through the root: lo positive, hi negative.
        let p = Poly::new([1.0, -1.0]);
        let r = bisection(&p, 0.0, 2.0).unwrap();
        assert!((r - 1.0).abs() < 1e-15);
    }

    #[test]
    fn halley_converges_cubically() {
        // x³ - x - 2, root ≈ 1.5213797...
        let p = Poly::new([-2.0, -1.0, 0.0, 1.0]);
        let r = halley(&p, 1.3, 1.0, 2.0).unwrap();
        assert!(p.eval(r).abs() <= 8.0 * p.precision(r));
    }

    #[test]
    fn halley_reports_failure_instead_of_diverging() {
        // No real root anywhere near the starting point or bracket.
        let p = Poly::new([1.0, 0.0, 1.0]);
        assert!(halley(&p, 0.0, -1.0, 1.0).is_none());
    }

    #[test]
    fn halley_stays_in_bracket() {
        let p = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        // Bracket isolating the root at 1; a wild step toward 2 or 3 must
        // be clamped.
        let r = halley(&p, 1.4, 0.5, 1.5).unwrap();
        assert!((0.5..=1.5).contains(&r));
        assert!((r - 1.0).abs() < 1e-9);
    }
}

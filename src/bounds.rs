// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root-count and root-magnitude bound estimators.
//!
//! Everything in this module is an *estimate*: Descartes' rule and its
//! derivatives bound the number of roots from above (exactly when the
//! answer is 0 or 1), and the LMQ bounds bracket the magnitude of the
//! positive roots. The exact counts come from
//! [`SturmChain`](crate::SturmChain).

use alloc::vec;

use crate::Poly;

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// Descartes' rule of signs: the number of sign changes between
/// consecutive nonzero coefficients.
///
/// This is an upper bound on the number of positive real roots (counted
/// with multiplicity), exact whenever it is 0 or 1, and differing from
/// the true count by an even number otherwise.
pub fn descartes_rule_of_signs(f: &Poly) -> usize {
    let mut last_sign = 0_i8;
    let mut changes = 0;
    for &c in f.coeffs() {
        let sign = if c > 0.0 {
            1
        } else if c < 0.0 {
            -1
        } else {
            0
        };
        if sign != 0 {
            if last_sign != 0 && sign != last_sign {
                changes += 1;
            }
            last_sign = sign;
        }
    }
    changes
}

/// Budan's 0-1 test: an upper bound on the number of roots in the open
/// interval `(0, 1)`, exact when it is 0 or 1.
///
/// This is Descartes' rule applied after the inversive Taylor shift that
/// maps `(0, 1)` onto the positive axis.
pub fn budan_01_test(f: &Poly) -> usize {
    descartes_rule_of_signs(&f.invert_taylor_shift())
}

/// The Alesina-Galuzzi test: an upper bound on the number of roots in the
/// open interval `(a, b)`, exact when it is 0 or 1.
///
/// Generalizes [`budan_01_test`] by first mapping `(a, b)` onto `(0, 1)`
/// with a shift and a scale.
pub fn alesina_galuzzi_test(f: &Poly, a: f64, b: f64) -> usize {
    budan_01_test(&f.shift(a).scale(b - a))
}

/// The local-max quadratic (LMQ) upper bound on the positive real roots.
///
/// Every positive real root of `f` is ≤ the returned value. Each negative
/// coefficient (after normalizing the leading coefficient positive) is
/// paired against the higher-order positive coefficients; a usage counter
/// per positive coefficient doubles its share each time it is paired so
/// the same coefficient is not spent twice. Returns 0 when the
/// coefficients never change sign, in which case there are no positive
/// roots at all.
pub fn lmq_upper_bound(f: &Poly) -> f64 {
    let d = f.degree();
    if d == 0 {
        return 0.0;
    }
    let sign = if f.coeffs()[d] < 0.0 { -1.0 } else { 1.0 };
    let coeff = |i: usize| sign * f.coeffs()[i];
    let mut usage = vec![1_i32; d + 1];
    let mut bound = 0.0_f64;
    for m in (0..d).rev() {
        if coeff(m) >= 0.0 {
            continue;
        }
        // The positive leading coefficient guarantees at least one valid k.
        let mut best = f64::INFINITY;
        for k in m + 1..=d {
            if coeff(k) <= 0.0 {
                continue;
            }
            let cand =
                (-coeff(m) * 2.0_f64.powi(usage[k]) / coeff(k)).powf(1.0 / (k - m) as f64);
            usage[k] += 1;
            best = best.min(cand);
        }
        bound = bound.max(best);
    }
    bound
}

/// The LMQ lower bound on the positive real roots.
///
/// Every positive real root of `f` is ≥ the returned value. Computed as
/// the reciprocal of the [`lmq_upper_bound`] of the coefficient-reversed
/// polynomial (whose positive roots are the reciprocals of `f`'s).
/// Returns 0 when there are no positive roots to bound.
pub fn lmq_lower_bound(f: &Poly) -> f64 {
    let d = f.degree();
    let rev = Poly::new(f.coeffs()[..=d].iter().rev().copied());
    let ub = lmq_upper_bound(&rev);
    if ub == 0.0 {
        0.0
    } else {
        1.0 / ub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descartes_counts_sign_changes() {
        // x² - 3x + 2: two positive roots, two sign changes.
        assert_eq!(descartes_rule_of_signs(&Poly::new([2.0, -3.0, 1.0])), 2);
        // x² + 1: none.
        assert_eq!(descartes_rule_of_signs(&Poly::new([1.0, 0.0, 1.0])), 0);
        // Zero coefficients neither count nor reset: x³ - 1.
        assert_eq!(
            descartes_rule_of_signs(&Poly::new([-1.0, 0.0, 0.0, 1.0])),
            1
        );
        assert_eq!(descartes_rule_of_signs(&Poly::new([0.0])), 0);
    }

    #[test]
    fn descartes_is_an_upper_bound() {
        // (x - 1)(x - 2)(x - 3): three positive roots, three changes.
        let f = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        assert_eq!(descartes_rule_of_signs(&f), 3);
        // x⁴ + x³ - x - 1: one positive root, one change.
        let g = Poly::new([-1.0, -1.0, 0.0, 1.0, 1.0]);
        assert_eq!(descartes_rule_of_signs(&g), 1);
    }

    #[test]
    fn budan_01() {
        // Roots at 1/4 and 1/2: two roots in (0, 1).
        let f = &Poly::new([-0.25, 1.0]) * &Poly::new([-0.5, 1.0]);
        assert!(budan_01_test(&f) >= 2);
        // Roots at 2 and 3: none in (0, 1).
        let g = &Poly::new([-2.0, 1.0]) * &Poly::new([-3.0, 1.0]);
        assert_eq!(budan_01_test(&g), 0);
        // Exactly one root in (0, 1).
        let h = Poly::new([-0.5, 1.0]);
        assert_eq!(budan_01_test(&h), 1);
    }

    #[test]
    fn alesina_galuzzi() {
        // (x - 1)(x - 2)(x - 3)
        let f = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        assert_eq!(alesina_galuzzi_test(&f, 0.5, 1.5), 1);
        assert_eq!(alesina_galuzzi_test(&f, 3.5, 9.0), 0);
        assert!(alesina_galuzzi_test(&f, 0.0, 4.0) >= 3);
    }

    #[test]
    fn lmq_bounds_bracket_the_roots() {
        // Positive roots 1, 2, 3.
        let f = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        let ub = lmq_upper_bound(&f);
        let lb = lmq_lower_bound(&f);
        assert!(ub >= 3.0);
        assert!(lb > 0.0 && lb <= 1.0);

        // Negative leading coefficient changes nothing.
        let g = Poly::new([6.0, -11.0, 6.0, -1.0]);
        assert!(lmq_upper_bound(&g) >= 3.0);
    }

    #[test]
    fn lmq_no_positive_roots() {
        assert_eq!(lmq_upper_bound(&Poly::new([1.0, 2.0, 1.0])), 0.0);
        assert_eq!(lmq_lower_bound(&Poly::new([1.0, 2.0, 1.0])), 0.0);
        assert_eq!(lmq_upper_bound(&Poly::new([5.0])), 0.0);
    }

    #[test]
    fn lmq_wide_magnitude_range() {
        // x³ - 1e156·x² + 1.25: the far root near 1e156 stays under the
        // bound, and the bound stays finite.
        let f = Poly::new([1.25, 0.0, -1e156, 1.0]);
        let ub = lmq_upper_bound(&f);
        assert!(ub.is_finite());
        assert!(ub >= 1e156);
    }
}

// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root isolation: VCA interval bisection and VAS continued-fraction
//! search.
//!
//! Both algorithms take a polynomial with no repeated roots, a nonzero
//! constant term, and a nonzero leading coefficient, and produce brackets
//! on the positive axis each containing exactly one root (degenerate
//! `(r, r)` brackets mark roots hit exactly). The
//! [solver](crate::solve_real_roots) establishes those preconditions and
//! polishes the brackets afterwards.

use alloc::vec::Vec;

use crate::bounds::{budan_01_test, descartes_rule_of_signs, lmq_lower_bound, lmq_upper_bound};
use crate::divide::deflate;
use crate::solve::{DEFAULT_TOL_BITS, VAS_NEAR_ROOT_FACTOR, VAS_RESCALE_THRESHOLD};
use crate::Poly;

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// The rational map `x ↦ (a·x + b)/(c·x + d)`.
///
/// The VAS search works on a chain of shifted, scaled, and inverted
/// copies of its input polynomial; the accumulated transform is what maps
/// a root found in the transformed coordinates back to the original ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mobius {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Mobius {
    /// The identity map.
    pub const IDENTITY: Mobius = Mobius {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };

    /// Evaluates the map at `x`, which may be `+∞`.
    ///
    /// The transforms accumulated during a VAS search keep all four
    /// entries non-negative, so the image of `+∞` with a vanishing
    /// denominator coefficient is `+∞`.
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_infinite() {
            if self.c == 0.0 {
                return f64::INFINITY;
            }
            return self.a / self.c;
        }
        (self.a * x + self.b) / (self.c * x + self.d)
    }

    /// Composes with `x ↦ x + t` on the right.
    pub fn shift(&mut self, t: f64) {
        self.b += self.a * t;
        self.d += self.c * t;
    }

    /// Composes with `x ↦ s·x` on the right.
    pub fn scale(&mut self, s: f64) {
        self.a *= s;
        self.c *= s;
    }

    /// Composes with `x ↦ 1/(x + 1)` on the right, the map underlying
    /// [`Poly::invert_taylor_shift`].
    pub fn invert_taylor_shift(&mut self) {
        let Mobius { a, b, c, d } = *self;
        self.a = b;
        self.b = a + b;
        self.c = d;
        self.d = c + d;
    }
}

/// Isolates the positive real roots of `f` by VCA bisection, with the
/// default subdivision depth.
///
/// `f` must be squarefree with nonzero constant and leading coefficients.
pub fn isolate_vca(f: &Poly) -> Vec<(f64, f64)> {
    isolate_vca_with(f, DEFAULT_TOL_BITS)
}

pub(crate) fn isolate_vca_with(f: &Poly, tol_bits: u32) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let ub = lmq_upper_bound(f);
    if ub == 0.0 {
        return out;
    }
    // Map the interesting part of the positive axis onto (0, 1).
    let g = normalized(f.scale(ub));
    if !g.is_finite() {
        return out;
    }
    vca_rec(&g, 0.0, 1.0, tol_bits, &mut out);
    for (lo, hi) in &mut out {
        *lo *= ub;
        *hi *= ub;
    }
    out
}

fn vca_rec(p: &Poly, lo: f64, hi: f64, depth: u32, out: &mut Vec<(f64, f64)>) {
    let count = budan_01_test(p);
    if count == 0 {
        return;
    }
    if count == 1 || depth == 0 {
        // At depth 0 the bracket is narrower than the tolerance; emit it
        // best-effort rather than recursing forever on a root cluster.
        out.push((lo, hi));
        return;
    }
    let mid = 0.5 * (lo + hi);
    // Stretch [0, 1] to [0, 2]; the halves of the original interval are
    // now [0, 1] of `half` and of its unit Taylor shift.
    let half = normalized(p.scale(0.5));
    let right = normalized(half.shift(1.0));
    if half.eval(1.0) == 0.0 {
        // The split point landed exactly on a root; neither open half
        // would see it.
        out.push((mid, mid));
    }
    vca_rec(&half, lo, mid, depth - 1, out);
    vca_rec(&right, mid, hi, depth - 1, out);
}

/// Isolates the positive real roots of `f` by the VAS continued-fraction
/// search, with the default tuning constants.
///
/// `f` must be squarefree with nonzero constant and leading coefficients.
pub fn isolate_vas(f: &Poly) -> Vec<(f64, f64)> {
    isolate_vas_with(f, VAS_RESCALE_THRESHOLD, VAS_NEAR_ROOT_FACTOR, DEFAULT_TOL_BITS)
}

pub(crate) fn isolate_vas_with(
    f: &Poly,
    rescale_threshold: f64,
    near_root_factor: f64,
    tol_bits: u32,
) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let ub = lmq_upper_bound(f);
    if ub == 0.0 {
        return out;
    }
    let ub = ub.min(f64::MAX);
    let budget = 2 * tol_bits + 64;
    vas_rec(f.clone(), Mobius::IDENTITY, rescale_threshold, near_root_factor, budget, &mut out);
    // An unbounded image of +∞ is sound but useless to the polisher;
    // every positive root lies under the LMQ bound.
    for (lo, hi) in &mut out {
        if !hi.is_finite() {
            *hi = ub;
        }
        if !lo.is_finite() {
            *lo = ub;
        }
    }
    out
}

fn vas_rec(
    mut p: Poly,
    mut m: Mobius,
    rescale_threshold: f64,
    near_root_factor: f64,
    mut budget: u32,
    out: &mut Vec<(f64, f64)>,
) {
    loop {
        p = normalized(p);
        if p.coeffs()[0] == 0.0 && !p.is_zero() {
            // A transformed root landed exactly on the origin; record it
            // and deflate it out before counting. Deflation shrinks the
            // polynomial, so this cannot loop.
            let at = m.eval(0.0);
            out.push((at, at));
            p = deflate(&p, 0.0);
            continue;
        }
        let count = descartes_rule_of_signs(&p);
        if count == 0 {
            return;
        }
        if count == 1 || budget == 0 {
            // Exactly one root in (0, ∞) of the transformed coordinates,
            // or out of budget: emit the current box (best-effort in the
            // latter case).
            out.push(mobius_interval(&m));
            return;
        }
        budget -= 1;
        let lb = lmq_lower_bound(&p);
        if lb >= rescale_threshold {
            // The roots are far out; compress the search so the shift
            // below moves a sensible amount.
            p = p.scale(lb);
            m.scale(lb);
            continue;
        }
        if lb >= 1.0 {
            // No roots below the bound: translate past it and retry
            // without subdividing.
            p = p.shift(lb);
            m.shift(lb);
            continue;
        }
        if p.eval(1.0).abs() <= near_root_factor * p.precision(1.0) {
            // A root is numerically on the split point; rescale to move
            // it off before splitting.
            p = p.scale(2.0);
            m.scale(2.0);
            continue;
        }
        // Split at x = 1: the (0, 1) part through the inversive shift,
        // the [1, ∞) part through a unit shift (tail of this loop).
        let mut m1 = m;
        m1.invert_taylor_shift();
        vas_rec(
            p.invert_taylor_shift(),
            m1,
            rescale_threshold,
            near_root_factor,
            budget,
            out,
        );
        p = p.shift(1.0);
        m.shift(1.0);
    }
}

fn mobius_interval(m: &Mobius) -> (f64, f64) {
    let x = m.eval(0.0);
    let y = m.eval(f64::INFINITY);
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

// Positive rescaling leaves every sign-based count unchanged; keeping the
// coefficients near unit magnitude keeps the repeated shift/scale
// transforms away from overflow and underflow.
fn normalized(p: Poly) -> Poly {
    let mag = p.magnitude();
    if mag.is_finite() && !(1e-100..=1e100).contains(&mag) && mag != 0.0 {
        return p / mag;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_exactly(intervals: &[(f64, f64)], roots: &[f64]) {
        assert_eq!(intervals.len(), roots.len(), "{intervals:?} vs {roots:?}");
        let mut sorted: Vec<_> = intervals.to_vec();
        sorted.sort_unstable_by(|p, q| p.0.total_cmp(&q.0));
        for (&(lo, hi), &r) in sorted.iter().zip(roots) {
            assert!(
                lo <= r && r <= hi,
                "root {r} outside bracket ({lo}, {hi})"
            );
        }
    }

    #[test]
    fn mobius_composition() {
        let mut m = Mobius::IDENTITY;
        m.shift(2.0);
        assert_eq!(m.eval(1.0), 3.0);
        m.scale(3.0);
        assert_eq!(m.eval(1.0), 5.0);
        m.invert_taylor_shift();
        // x = 1 maps through 1/(1+1) = 0.5, then 3·0.5 + 2.
        assert_eq!(m.eval(1.0), 3.5);
        assert_eq!(m.eval(f64::INFINITY), 2.0);
    }

    #[test]
    fn vca_isolates_three_roots() {
        let f = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        contains_exactly(&isolate_vca(&f), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn vas_isolates_three_roots() {
        let f = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        contains_exactly(&isolate_vas(&f), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn no_positive_roots() {
        let f = Poly::new([1.0, 2.0, 1.0]);
        assert!(isolate_vca(&f).is_empty());
        assert!(isolate_vas(&f).is_empty());
    }

    #[test]
    fn close_roots_are_separated() {
        // Roots at 0.999 and 1.001, deliberately straddling the VAS split
        // point at 1.
        let f = &Poly::new([-0.999, 1.0]) * &Poly::new([-1.001, 1.0]);
        contains_exactly(&isolate_vca(&f), &[0.999, 1.001]);
        contains_exactly(&isolate_vas(&f), &[0.999, 1.001]);
    }

    #[test]
    fn vas_spread_out_roots() {
        // Roots spanning several orders of magnitude exercise the rescale
        // branch.
        let f = &(&Poly::new([-0.01, 1.0]) * &Poly::new([-1.0, 1.0])) * &Poly::new([-100.0, 1.0]);
        contains_exactly(&isolate_vas(&f), &[0.01, 1.0, 100.0]);
    }

    #[test]
    fn quartic_with_two_positive_roots() {
        // x⁴ + x³ - x - 1: positive root only at 1... and at 1 exactly.
        let f = Poly::new([-1.0, -1.0, 0.0, 1.0, 1.0]);
        let vca = isolate_vca(&f);
        assert_eq!(vca.len(), 1);
        assert!(vca[0].0 <= 1.0 && 1.0 <= vca[0].1);
        let vas = isolate_vas(&f);
        assert_eq!(vas.len(), 1);
        assert!(vas[0].0 <= 1.0 && 1.0 <= vas[0].1);
    }
}

// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The top-level real-root solver.

use alloc::vec::Vec;

use crate::bounds::{lmq_lower_bound, lmq_upper_bound};
use crate::closed_form::{solve_cubic, solve_linear, solve_quadratic};
use crate::divide::{deflate, divide, gcd};
use crate::isolate::{isolate_vas_with, isolate_vca_with};
use crate::polish::{bisection, halley};
use crate::sturm::SturmChain;
use crate::Poly;

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// Default bisection tolerance, in bits of relative interval width.
///
/// 56 bits takes an isolating interval essentially to adjacent doubles.
/// This value is inherited tuning, not derivation; override it through
/// [`SolveOptions`] if a different cost/accuracy trade-off is wanted.
pub const DEFAULT_TOL_BITS: u32 = 56;

/// VAS rescale threshold: a lower root bound at least this large triggers
/// a compressing rescale instead of a shift. Inherited tuning.
pub const VAS_RESCALE_THRESHOLD: f64 = 16.0;

/// VAS near-root threshold, as a multiple of the evaluation
/// [`precision`](Poly::precision) at the split point. Inherited tuning.
pub const VAS_NEAR_ROOT_FACTOR: f64 = 100.0;

/// Which root-isolation algorithm [`solve_real_roots_with`] runs for
/// polynomials of degree four and up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum IsolationStrategy {
    /// Bisection with exact Sturm-chain root counts. The production
    /// default: guaranteed termination, no root missed or duplicated.
    #[default]
    SturmBisection,
    /// VCA bisection of `[0, 1]` driven by Budan's 0-1 test.
    Vca,
    /// VAS continued-fraction search tracked by a Möbius transform.
    Vas,
}

/// Tuning for [`solve_real_roots_with`].
///
/// The defaults reproduce [`solve_real_roots`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveOptions {
    /// The isolation strategy for degree ≥ 4.
    pub strategy: IsolationStrategy,
    /// Bits of relative width at which interval subdivision stops.
    pub tol_bits: u32,
    /// See [`VAS_RESCALE_THRESHOLD`].
    pub vas_rescale_threshold: f64,
    /// See [`VAS_NEAR_ROOT_FACTOR`].
    pub vas_near_root_factor: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            strategy: IsolationStrategy::default(),
            tol_bits: DEFAULT_TOL_BITS,
            vas_rescale_threshold: VAS_RESCALE_THRESHOLD,
            vas_near_root_factor: VAS_NEAR_ROOT_FACTOR,
        }
    }
}

/// Finds all real roots of `f`, in increasing order, with default options.
///
/// Degeneracies are normalized first: zero high-order coefficients reduce
/// the working order, and a zero constant term contributes a root at the
/// origin and deflates away. Degrees one through three go to the closed
/// forms; higher degrees go through isolation and polishing. For
/// polynomials of degree ≥ 4 with repeated roots, each distinct root is
/// reported once.
///
/// Accuracy is relative: a returned root `r` satisfies
/// `|f(r)| ≲ C·precision(f, r)` for a small constant `C`, not bit-exact
/// reproducibility across float environments.
pub fn solve_real_roots(f: &Poly) -> Vec<f64> {
    solve_real_roots_with(f, &SolveOptions::default())
}

/// Finds all real roots of `f`, in increasing order, with explicit
/// options.
pub fn solve_real_roots_with(f: &Poly, opts: &SolveOptions) -> Vec<f64> {
    let mut roots = Vec::with_capacity(f.order());
    solve_rec(f, opts, &mut roots);
    roots.sort_unstable_by(f64::total_cmp);
    roots
}

fn solve_rec(f: &Poly, opts: &SolveOptions, roots: &mut Vec<f64>) {
    if f.is_zero() {
        // Everything is a root of the zero polynomial; there is nothing
        // useful to enumerate.
        return;
    }
    let order = f.order();
    if order > 0 && f.coeffs()[order] == 0.0 {
        // Zero leading coefficient: reduce the stated order and retry.
        solve_rec(&f.reduce_order(), opts, roots);
        return;
    }
    if order == 0 {
        return;
    }
    if f.coeffs()[0] == 0.0 {
        // Zero constant term: x divides f.
        roots.push(0.0);
        solve_rec(&deflate(f, 0.0), opts, roots);
        return;
    }
    match order {
        1 => roots.extend(solve_linear(f.coeffs()[0], f.coeffs()[1])),
        2 => roots.extend(solve_quadratic(f.coeffs()[0], f.coeffs()[1], f.coeffs()[2])),
        3 => roots.extend(solve_cubic(
            f.coeffs()[0],
            f.coeffs()[1],
            f.coeffs()[2],
            f.coeffs()[3],
        )),
        _ => {
            // The isolators need a squarefree polynomial; divide out the
            // repeated part. Positive roots come from f itself, negative
            // ones from the reflection.
            let sf = squarefree(f);
            positive_roots(&sf, opts, false, roots);
            positive_roots(&sf.reflect(), opts, true, roots);
        }
    }
}

fn squarefree(f: &Poly) -> Poly {
    let g = gcd(f, &f.derivative());
    if g.degree() == 0 {
        f.clone()
    } else {
        divide(f, &g).0
    }
}

fn positive_roots(f: &Poly, opts: &SolveOptions, negate: bool, out: &mut Vec<f64>) {
    let mut found = Vec::new();
    match opts.strategy {
        IsolationStrategy::SturmBisection => sturm_bisection(f, opts, &mut found),
        IsolationStrategy::Vca => {
            for (lo, hi) in isolate_vca_with(f, opts.tol_bits) {
                found.push(polish_bracket(f, lo, hi, false));
            }
        }
        IsolationStrategy::Vas => {
            for (lo, hi) in isolate_vas_with(
                f,
                opts.vas_rescale_threshold,
                opts.vas_near_root_factor,
                opts.tol_bits,
            ) {
                found.push(polish_bracket(f, lo, hi, false));
            }
        }
    }
    out.extend(found.into_iter().map(|r| if negate { -r } else { r }));
}

/// The default pipeline: establish `[LMQ lower, LMQ upper]`, then bisect
/// while the Sturm chain tracks exact per-interval root counts.
fn sturm_bisection(f: &Poly, opts: &SolveOptions, out: &mut Vec<f64>) {
    // The bound can overflow to infinity for extreme coefficient ratios;
    // f64::MAX still works as a bisection endpoint.
    let ub = lmq_upper_bound(f).min(f64::MAX);
    if ub == 0.0 {
        return;
    }
    // roots(a, b) is half-open at a, and the lower bound may in principle
    // coincide with the smallest root; halving keeps it strictly below.
    let lb = 0.5 * lmq_lower_bound(f);
    let chain = SturmChain::new(f);
    let count = chain.roots(lb, ub);
    bisect_rec(&chain, f, lb, ub, count, opts.tol_bits, out);
}

fn bisect_rec(
    chain: &SturmChain,
    f: &Poly,
    lo: f64,
    hi: f64,
    count: usize,
    tol_bits: u32,
    out: &mut Vec<f64>,
) {
    if count == 0 {
        return;
    }
    if count == 1 {
        out.push(polish_bracket(f, lo, hi, true));
        return;
    }
    let scale = lo.abs().max(hi.abs()).max(1.0);
    if hi - lo <= scale * 2.0_f64.powi(-(tol_bits as i32)) {
        // The interval is below tolerance but still claims several roots:
        // a cluster tighter than the working precision. Report the
        // midpoint for each.
        let mid = 0.5 * (lo + hi);
        for _ in 0..count {
            out.push(mid);
        }
        return;
    }
    let mid = 0.5 * (lo + hi);
    let c1 = chain.roots(lo, mid);
    let c2 = chain.roots(mid, hi);
    if c1 + c2 != count {
        // The split point fell (numerically) on a root. Re-split once at
        // an off-center point.
        let mid2 = lo + 0.75 * (hi - lo);
        let d1 = chain.roots(lo, mid2);
        let d2 = chain.roots(mid2, hi);
        if d1 + d2 == count {
            bisect_rec(chain, f, lo, mid2, d1, tol_bits, out);
            bisect_rec(chain, f, mid2, hi, d2, tol_bits, out);
            return;
        }
        // Best effort: the unaccounted roots get the midpoint estimate.
        // This is a documented quality degradation, not an error.
        for _ in 0..count.saturating_sub(c1 + c2) {
            out.push(mid);
        }
    }
    bisect_rec(chain, f, lo, mid, c1, tol_bits, out);
    bisect_rec(chain, f, mid, hi, c2, tol_bits, out);
}

// Sharpens one isolating bracket. A degenerate bracket is already an
// exact root. Sturm brackets are half-open `(lo, hi]` (`include_hi`), so
// a root exactly on `hi` is this bracket's root; in the open VCA/VAS
// brackets a root exactly on a wall belongs to a neighboring interval
// and the wall is nudged inward before bisecting.
fn polish_bracket(f: &Poly, lo: f64, hi: f64, include_hi: bool) -> f64 {
    if lo == hi {
        return lo;
    }
    let w = hi - lo;
    let mut a = lo;
    let mut b = hi;
    if f.eval(b) == 0.0 {
        if include_hi {
            return b;
        }
        b -= 1e-9 * w;
    }
    if f.eval(a) == 0.0 {
        a += 1e-9 * w;
    }
    match bisection(f, a, b) {
        Some(r) => halley(f, r, a, b).unwrap_or(r),
        None => {
            // No sign change across the bracket (tangency or a numeric
            // artifact): try Halley from the midpoint, else keep it.
            let mid = 0.5 * (a + b);
            halley(f, mid, a, b).unwrap_or(mid)
        }
    }
}

// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-form root solvers for degrees up to three.

use arrayvec::ArrayVec;

use crate::divide::deflate;
use crate::polish::halley;
use crate::Poly;

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// Coefficients with magnitude beyond `sqrt(f64::MAX)` overflow when
/// squared; past this the discriminant machinery is abandoned for
/// dominant-term approximations.
const SQRT_MAX: f64 = 1.3407807929942596e154;

/// Find the real root of the linear equation `c0 + c1·x = 0`.
///
/// In the degenerate case where both coefficients are zero, so that all
/// values of x satisfy the equation, a single `0.0` is returned.
pub fn solve_linear(c0: f64, c1: f64) -> ArrayVec<f64, 1> {
    let mut result = ArrayVec::new();
    let root = -c0 / c1;
    if root.is_finite() {
        result.push(root);
    } else if c0 == 0.0 && c1 == 0.0 {
        // Degenerate case
        result.push(0.0);
    }
    result
}

/// Find real roots of the quadratic equation `c0 + c1·x + c2·x² = 0`,
/// in increasing order.
///
/// The leading coefficient is normalized away first. If the equation is
/// nearly linear the quadratic term is dropped and the linear solver used;
/// if the normalized linear coefficient is too large to square, the roots
/// are approximated as `-c1/c2` and `c0/c1` instead of going through the
/// discriminant. Otherwise the numerically stable form of the quadratic
/// formula is used: the root whose numerator avoids cancellation is
/// computed first and the other is derived from the product of roots.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 / c2;
    let sc1 = c1 / c2;
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        for root in solve_linear(c0, c1) {
            result.push(root);
        }
        return result;
    }
    if sc0 == 0.0 {
        // Zero constant term: x factors out.
        result.push(0.0);
        if sc1 != 0.0 {
            result.push(-sc1);
        }
        result.sort_unstable_by(f64::total_cmp);
        return result;
    }
    let arg = if sc1.abs() > SQRT_MAX {
        f64::INFINITY
    } else {
        sc1 * sc1 - 4.0 * sc0
    };
    let root1 = if !arg.is_finite() {
        // Calculation of sc1 * sc1 would overflow. Find one root using
        // sc1 x + x² = 0, the other as sc0 / root1.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        // See https://math.stackexchange.com/questions/866331
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}

/// Find real roots of the cubic equation `c0 + c1·x + c2·x² + c3·x³ = 0`,
/// in increasing order.
///
/// The cubic is normalized to a monic polynomial, degenerate and
/// overflow-prone regimes are peeled off, and the remaining cases go
/// through the depressed-cubic discriminant: Cardano's formula for one
/// real root, the triple-root short circuit, or the trigonometric method
/// for three. Every root is polished once by Halley's method before being
/// accepted; a failed polish keeps the closed-form estimate.
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    let a = c2 / c3;
    let b = c1 / c3;
    let c = c0 / c3;
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        // cubic coefficient is zero or nearly so.
        for root in solve_quadratic(c0, c1, c2) {
            result.push(root);
        }
        return result;
    }
    let monic = Poly::new([c, b, a, 1.0]);

    if c == 0.0 {
        // Zero constant term: deflate out the root at x = 0.
        result.push(0.0);
        for root in solve_quadratic(b, a, 1.0) {
            result.push(polish(&monic, root));
        }
        result.sort_unstable_by(f64::total_cmp);
        return result;
    }

    if a.abs() > SQRT_MAX || b.abs() > SQRT_MAX || c.abs() > SQRT_MAX {
        // Some coefficient is too large for the discriminant machinery.
        // Approximate the cubic by its dominant term balance, deflate that
        // root out, and solve the remaining quadratic.
        let approx = if a.abs() > SQRT_MAX {
            // x³ + ax² dominates far from the origin.
            -a
        } else if b.abs() > SQRT_MAX {
            // bx + c dominates near the origin.
            -c / b
        } else {
            // x³ + c dominates.
            (-c).cbrt()
        };
        result.push(polish(&monic, approx));
        let quad = deflate(&monic, approx);
        for root in solve_quadratic(quad.coeffs()[0], quad.coeffs()[1], quad.coeffs()[2]) {
            result.push(polish(&monic, root));
        }
        result.sort_unstable_by(f64::total_cmp);
        return result;
    }

    // Depressed cubic y³ + u·y + v via x = y - a/3.
    let u = b - a * a / 3.0;
    let v = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;
    let j = 4.0 * (u / 3.0) * (u / 3.0) * (u / 3.0) + v * v;
    if j > 0.0 {
        // One real root, by Cardano's formula.
        let w = j.sqrt();
        let y = (0.5 * (-v + w)).cbrt() + (0.5 * (-v - w)).cbrt();
        let root = polish(&monic, y - a / 3.0);
        result.push(root);
        // The remaining quadratic factor has no real roots when j is
        // solidly positive, but when j is barely positive it may: let the
        // quadratic solver decide.
        let quad = deflate(&monic, root);
        for extra in solve_quadratic(quad.coeffs()[0], quad.coeffs()[1], quad.coeffs()[2]) {
            result.push(polish(&monic, extra));
        }
    } else if u >= 0.0 {
        // j ≤ 0 with a non-negative depressed linear term forces
        // u = v = 0: a triple root.
        result.push(polish(&monic, -a / 3.0));
    } else {
        // Three real roots, by the trigonometric method.
        let m = 2.0 * (-u / 3.0).sqrt();
        let arg = (3.0 * v / (u * m)).clamp(-1.0, 1.0);
        let theta = arg.acos() / 3.0;
        const TWO_THIRDS_PI: f64 = 2.0943951023931953;
        for k in 0..3 {
            let y = m * (theta - k as f64 * TWO_THIRDS_PI).cos();
            result.push(polish(&monic, y - a / 3.0));
        }
    }
    result.sort_unstable_by(f64::total_cmp);
    result
}

// One Halley pass over the monic form; a polish that fails to converge
// keeps the closed-form estimate.
fn polish(monic: &Poly, root: f64) -> f64 {
    if !root.is_finite() {
        return root;
    }
    halley(monic, root, f64::NEG_INFINITY, f64::INFINITY).unwrap_or(root)
}

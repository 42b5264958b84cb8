// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sturm chains: exact real-root counting over an interval.

use alloc::vec::Vec;

use crate::divide::divide;
use crate::Poly;

/// A Sturm chain: `p₀ = f`, `p₁ = f′`, and each later element the negated
/// remainder of dividing the two before it.
///
/// Counting sign changes of the chain at two points and differencing gives
/// the exact number of distinct real roots in the half-open interval
/// between them. Unlike the Descartes-style estimators in
/// [`bounds`](crate::descartes_rule_of_signs), this is not an upper bound;
/// the exactness is what lets the default solver strategy bisect with
/// guaranteed termination.
///
/// The chain is immutable once built.
#[derive(Clone, Debug)]
pub struct SturmChain {
    chain: Vec<Poly>,
}

impl SturmChain {
    /// Builds the Sturm chain of `f`.
    ///
    /// Construction performs one polynomial division per element; the
    /// stored order strictly decreases along the chain, so a polynomial of
    /// degree n yields at most n + 1 elements.
    pub fn new(f: &Poly) -> Self {
        let mut chain = Vec::with_capacity(f.order() + 1);
        chain.push(f.clone());
        let deriv = f.derivative();
        if !deriv.is_zero() {
            chain.push(deriv);
            loop {
                let n = chain.len();
                let (_, rem) = divide(&chain[n - 2], &chain[n - 1]);
                if rem.is_zero() {
                    break;
                }
                chain.push(-&rem);
            }
        }
        SturmChain { chain }
    }

    /// The number of polynomials in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// A chain is never empty; this is here for the usual pairing with
    /// [`SturmChain::len`].
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `i`-th polynomial of the chain (`0` is the input itself).
    pub fn get(&self, i: usize) -> Option<&Poly> {
        self.chain.get(i)
    }

    /// Counts the sign changes of the chain evaluated at `x`.
    ///
    /// A zero value neither counts as a change nor resets the running
    /// sign. `x` may be ±∞, evaluated through the leading-term sign.
    pub fn sign_changes(&self, x: f64) -> usize {
        let mut last_sign = 0_i8;
        let mut changes = 0;
        for p in &self.chain {
            let val = p.eval(x);
            let sign = if val > 0.0 {
                1
            } else if val < 0.0 {
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

    /// The exact number of distinct real roots of `f` in `(a, b]`.
    ///
    /// Either bound may be infinite; `roots(-∞, ∞)` counts every distinct
    /// real root.
    pub fn roots(&self, a: f64, b: f64) -> usize {
        self.sign_changes(a).abs_diff(self.sign_changes(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_of_quartic() {
        // x⁴ + x³ - x - 1 = (x - 1)(x + 1)(x² + x + 1)
        let f = Poly::new([-1.0, -1.0, 0.0, 1.0, 1.0]);
        let chain = SturmChain::new(&f);
        assert_eq!(chain.sign_changes(f64::NEG_INFINITY), 3);
        assert_eq!(chain.sign_changes(0.0), 2);
        assert_eq!(chain.sign_changes(f64::INFINITY), 1);
        assert_eq!(chain.roots(f64::NEG_INFINITY, f64::INFINITY), 2);
        assert_eq!(chain.roots(0.0, f64::INFINITY), 1);
        assert_eq!(chain.roots(f64::NEG_INFINITY, 0.0), 1);
    }

    #[test]
    fn counts_are_per_interval() {
        // (x - 1)(x - 2)(x - 3)
        let f = Poly::new([-6.0, 11.0, -6.0, 1.0]);
        let chain = SturmChain::new(&f);
        assert_eq!(chain.roots(0.0, 4.0), 3);
        assert_eq!(chain.roots(1.5, 2.5), 1);
        assert_eq!(chain.roots(3.5, 10.0), 0);
        // Half-open: a root sitting exactly on the upper bound counts,
        // one on the lower bound does not.
        assert_eq!(chain.roots(1.0, 2.0), 1);
    }

    #[test]
    fn repeated_roots_count_once() {
        // (x - 1)² has one distinct root; the chain terminates early at
        // the shared factor.
        let f = Poly::new([1.0, -2.0, 1.0]);
        let chain = SturmChain::new(&f);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.roots(f64::NEG_INFINITY, f64::INFINITY), 1);
    }

    #[test]
    fn no_real_roots() {
        let f = Poly::new([1.0, 0.0, 1.0]);
        let chain = SturmChain::new(&f);
        assert_eq!(chain.roots(f64::NEG_INFINITY, f64::INFINITY), 0);
    }

    #[test]
    fn constant_polynomial() {
        let chain = SturmChain::new(&Poly::new([3.0]));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.roots(f64::NEG_INFINITY, f64::INFINITY), 0);
    }
}

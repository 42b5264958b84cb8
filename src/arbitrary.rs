// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::Poly;

fn check_finite(f: f64) -> Result<f64, arbitrary::Error> {
    if f.is_finite() {
        Ok(f)
    } else {
        Err(arbitrary::Error::IncorrectFormat)
    }
}

/// An arbitrary finite float.
pub fn finite_float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    check_finite(u.arbitrary()?)
}

/// An arbitrary float in (-1.0, 1.0).
pub fn float_in_unit_interval(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    let mantissa: u64 = u.arbitrary()?;
    let mantissa = mantissa & ((1u64 << 52) - 1);
    let negative: bool = u.arbitrary()?;
    let sign: u64 = if negative { 1u64 << 63 } else { 0 };

    // 1023 is an exponent of zero, which would lead to numbers of the form 1.something.
    // `% 1023` means we get a maximum exponent of 1022, so our biggest number is 0.11111...
    //
    // `large` here gives us a decent chance of producing a number of magnitude between 0.5 and 1.0.
    // Without it, we only ever generate tiny numbers.
    let large: bool = u.arbitrary()?;
    let exponent: u64 = if large {
        1022 << 52
    } else {
        (u.arbitrary::<u64>()? % 1023u64) << 52
    };

    Ok(f64::from_bits(sign | exponent | mantissa))
}

/// An arbitrary polynomial of order at most `max_order`, with small
/// integer coefficients.
///
/// Small integers keep the roots well-conditioned, which is what the
/// count-exactness and residual properties need; for wild-magnitude
/// coefficient stress, use [`poly`].
pub fn small_integer_poly(
    u: &mut Unstructured<'_>,
    max_order: usize,
) -> Result<Poly, arbitrary::Error> {
    let len = u.int_in_range(1..=max_order as u64 + 1)? as usize;
    let mut coeffs = alloc::vec::Vec::with_capacity(len);
    for _ in 0..len {
        coeffs.push(f64::from(u.int_in_range(-8_i8..=8)?));
    }
    Ok(Poly::new(coeffs))
}

/// An arbitrary polynomial of order `order` with finite coefficients.
pub fn poly(u: &mut Unstructured<'_>, order: usize) -> Result<Poly, arbitrary::Error> {
    let mut coeffs = alloc::vec::Vec::with_capacity(order + 1);
    for _ in 0..=order {
        coeffs.push(finite_float(u)?);
    }
    Ok(Poly::new(coeffs))
}

/// A polynomial of order `order` with a root at `root` and no other root
/// within `buffer` of it.
pub fn poly_with_planted_root(
    u: &mut Unstructured<'_>,
    order: usize,
    root: f64,
    buffer: f64,
) -> Result<Poly, arbitrary::Error> {
    let mut p = Poly::new([-root, 1.0]);
    for _ in 1..order {
        let r = float_in_unit_interval(u)?;
        if (r - root).abs() < buffer {
            return Err(arbitrary::Error::IncorrectFormat);
        }
        p = &p * &Poly::new([-r, 1.0]);
    }
    if !p.is_finite() {
        return Err(arbitrary::Error::IncorrectFormat);
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_interval() {
        arbtest::arbtest(|u| {
            let x = float_in_unit_interval(u)?;
            assert!(x.abs() < 1.0);
            Ok(())
        });
    }

    #[test]
    fn planted_root() {
        arbtest::arbtest(|u| {
            let r = float_in_unit_interval(u)?;
            let p = poly_with_planted_root(u, 5, r, 1e-6)?;
            assert!(p.eval(r).abs() <= 1e-12 * p.magnitude().max(1.0));
            Ok(())
        });
    }
}

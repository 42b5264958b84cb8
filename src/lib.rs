// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real-root isolation and refinement for univariate polynomials.
//!
//! This crate finds the real roots of a polynomial with `f64` coefficients.
//! Degrees up to three are handled by numerically careful closed forms; for
//! higher degrees the roots are first *isolated* (each root bracketed in an
//! interval containing no other root) and then *polished* to full double
//! precision.
//!
//! Three isolation strategies are provided, selected through
//! [`SolveOptions`]:
//!
//! - Sturm-chain bisection (the default): exact root counts per interval,
//!   guaranteed termination.
//! - VCA: recursive interval bisection tracked by Budan's 0-1 test.
//! - VAS: continued-fraction search tracked by a Möbius transformation.
//!
//! # Examples
//!
//! ```
//! use realroot::{solve_real_roots, Poly};
//!
//! // (x + 1)(x - 2)(x - 3) = x³ - 4x² + x + 6
//! let p = Poly::new([6.0, 1.0, -4.0, 1.0]);
//! let roots = solve_real_roots(&p);
//! assert_eq!(roots.len(), 3);
//! assert!((roots[0] + 1.0).abs() < 1e-12);
//! assert!((roots[1] - 2.0).abs() < 1e-12);
//! assert!((roots[2] - 3.0).abs() < 1e-12);
//! ```
//!
//! The root-counting machinery is exposed directly as well:
//!
//! ```
//! use realroot::{Poly, SturmChain};
//!
//! // x⁴ + x³ - x - 1 has exactly two real roots, -1 and 1.
//! let p = Poly::new([-1.0, -1.0, 0.0, 1.0, 1.0]);
//! let chain = SturmChain::new(&p);
//! assert_eq!(chain.roots(f64::NEG_INFINITY, f64::INFINITY), 2);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. However, note that the `libm` crate is not as
//! efficient as the standard library, and that this crate still uses the
//! `alloc` crate regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("realroot requires either the `std` or `libm` feature");

extern crate alloc;

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod bounds;
mod closed_form;
mod divide;
mod isolate;
#[cfg(feature = "libm")]
mod libm_polyfill;
mod polish;
mod poly;
mod solve;
mod sturm;

pub use crate::bounds::{
    alesina_galuzzi_test, budan_01_test, descartes_rule_of_signs, lmq_lower_bound, lmq_upper_bound,
};
pub use crate::closed_form::{solve_cubic, solve_linear, solve_quadratic};
pub use crate::divide::{deflate, divide, gcd};
pub use crate::isolate::{isolate_vas, isolate_vca, Mobius};
pub use crate::polish::{bisection, halley};
pub use crate::poly::Poly;
pub use crate::solve::{
    solve_real_roots, solve_real_roots_with, IsolationStrategy, SolveOptions, DEFAULT_TOL_BITS,
    VAS_NEAR_ROOT_FACTOR, VAS_RESCALE_THRESHOLD,
};
pub use crate::sturm::SturmChain;

/// Do `x` and `y` lie on opposite sides of zero?
fn different_signs(x: f64, y: f64) -> bool {
    (x < 0.0) != (y < 0.0)
}

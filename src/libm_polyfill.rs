// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[expect(dead_code, reason = "unused if std and libm are both around")]
pub(crate) trait FloatFuncs: Sized {
    /// Special implementation for signum, because libm doesn't have it.
    fn signum(self) -> Self;

    fn abs(self) -> Self;
    fn copysign(self, sign: Self) -> Self;
    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;
    fn cos(self) -> Self;
    fn acos(self) -> Self;
    fn powi(self, pow: i32) -> Self;
    fn powf(self, pow: Self) -> Self;
}

impl FloatFuncs for f64 {
    fn signum(self) -> Self {
        if self.is_nan() {
            f64::NAN
        } else {
            1.0_f64.copysign(self)
        }
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn copysign(self, sign: Self) -> Self {
        libm::copysign(self, sign)
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn cbrt(self) -> Self {
        libm::cbrt(self)
    }
    fn cos(self) -> Self {
        libm::cos(self)
    }
    fn acos(self) -> Self {
        libm::acos(self)
    }
    fn powi(self, pow: i32) -> Self {
        libm::pow(self, pow as _)
    }
    fn powf(self, pow: Self) -> Self {
        libm::pow(self, pow)
    }
}

/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! `assert_close!` for floating point data.
//!
//! ```
//! #[macro_use] extern crate lupfit_assert_close;
//! # fn main() {
//! assert_close!(1.0, 1.0 + 1e-12);
//! assert_close!(abs=1e-8, 0.0, 1e-10);
//! assert_close!(rel=1e-3, abs=0.0, vec![1000.0, 2.0], vec![1000.1, 2.0]);
//! # }
//! ```

#[macro_use]
extern crate failure;

use std::fmt;
use ndarray::{ArrayBase, Data, Dimension};

/// Relative tolerance used when none is given.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub rel: f64,
    pub abs: f64,
}

impl Default for Tolerances {
    fn default() -> Self { Tolerances { rel: DEFAULT_REL_TOL, abs: 0.0 } }
}

impl Tolerances {
    /// Python's `math.isclose`.
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        assert!(self.rel >= 0.0 && self.abs >= 0.0, "negative tolerance: {:?}", self);

        // equal infinities
        if a == b { return true; }
        if a.is_infinite() || b.is_infinite() { return false; }

        // NaN falls through to false here
        let diff = (a - b).abs();
        diff <= self.abs.max(self.rel * a.abs()).max(self.rel * b.abs())
    }
}

#[derive(Debug, Fail)]
pub enum CloseError {
    #[fail(display = "values differ at index {}: {} vs {}", index, left, right)]
    Value { index: usize, left: f64, right: f64 },
    #[fail(display = "lengths differ: {} vs {}", left, right)]
    Length { left: usize, right: usize },
}

/// Elementwise comparison against another value of (roughly) the same shape.
pub trait CheckClose<Rhs: ?Sized = Self> {
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CloseError>;
}

fn check_iter<'a, A, B>(a: A, b: B, tol: Tolerances) -> Result<(), CloseError>
where
    A: ExactSizeIterator<Item = &'a f64>,
    B: ExactSizeIterator<Item = &'a f64>,
{
    if a.len() != b.len() {
        return Err(CloseError::Length { left: a.len(), right: b.len() });
    }
    for (index, (&left, &right)) in a.zip(b).enumerate() {
        if !tol.is_close(left, right) {
            return Err(CloseError::Value { index, left, right });
        }
    }
    Ok(())
}

impl CheckClose for f64 {
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CloseError> {
        check_iter(std::iter::once(self), std::iter::once(other), tol)
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CloseError> {
        (**self).check_close(*other, tol)
    }
}

impl CheckClose for [f64] {
    fn check_close(&self, other: &[f64], tol: Tolerances) -> Result<(), CloseError> {
        check_iter(self.iter(), other.iter(), tol)
    }
}

impl CheckClose<[f64]> for Vec<f64> {
    fn check_close(&self, other: &[f64], tol: Tolerances) -> Result<(), CloseError> {
        self[..].check_close(other, tol)
    }
}

impl CheckClose for Vec<f64> {
    fn check_close(&self, other: &Vec<f64>, tol: Tolerances) -> Result<(), CloseError> {
        self[..].check_close(&other[..], tol)
    }
}

impl<const N: usize> CheckClose for [f64; N] {
    fn check_close(&self, other: &[f64; N], tol: Tolerances) -> Result<(), CloseError> {
        self[..].check_close(&other[..], tol)
    }
}

impl<S, D> CheckClose for ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CloseError> {
        // shape mismatch is reported as a length mismatch of the flattened data
        if self.shape() != other.shape() {
            return Err(CloseError::Length { left: self.len(), right: other.len() });
        }
        check_iter(self.iter(), other.iter(), tol)
    }
}

#[doc(hidden)]
pub fn __assert_close<A, B>(a: &A, b: &B, tol: Tolerances, msg: fmt::Arguments<'_>)
where
    A: ?Sized + CheckClose<B> + fmt::Debug,
    B: ?Sized + fmt::Debug,
{
    if let Err(e) = a.check_close(b, tol) {
        panic!(
            "{} (rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
            msg, tol.rel, tol.abs, a, b, e,
        );
    }
}

/// Assert that two values are elementwise close.
///
/// Tolerances are given as leading `rel=` and/or `abs=` arguments.
/// An optional format message may follow the two values.
#[macro_export]
macro_rules! assert_close {
    (rel=$rel:expr, abs=$abs:expr, $($rest:tt)+) => {
        $crate::assert_close!(@go $crate::Tolerances { rel: $rel, abs: $abs }, $($rest)+)
    };
    (abs=$abs:expr, rel=$rel:expr, $($rest:tt)+) => {
        $crate::assert_close!(@go $crate::Tolerances { rel: $rel, abs: $abs }, $($rest)+)
    };
    (rel=$rel:expr, $($rest:tt)+) => {
        $crate::assert_close!(@go $crate::Tolerances { rel: $rel, abs: 0.0 }, $($rest)+)
    };
    (abs=$abs:expr, $($rest:tt)+) => {
        $crate::assert_close!(@go $crate::Tolerances { rel: $crate::DEFAULT_REL_TOL, abs: $abs }, $($rest)+)
    };
    (@go $tol:expr, $a:expr, $b:expr $(,)?) => {
        $crate::__assert_close(&$a, &$b, $tol, format_args!("not nearly equal!"))
    };
    (@go $tol:expr, $a:expr, $b:expr, $($fmt:tt)+) => {
        $crate::__assert_close(&$a, &$b, $tol, format_args!($($fmt)+))
    };
    ($a:expr, $b:expr $(, $($fmt:tt)*)?) => {
        $crate::assert_close!(@go $crate::Tolerances::default(), $a, $b $(, $($fmt)*)?)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn macro_forms() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0 + 1e-9);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0);
        assert_close!(abs=1e-8, rel=1e-8, 1.0, 1.0,);
        assert_close!(abs=1e-8, 0.0, 1e-9, "with a {}", "message");
        assert_close!(vec![1.0, 2.0], vec![1.0, 2.0]);
        assert_close!(abs=1e-12, [1.0, 2.0], [1.0, 2.0 + 1e-13]);
        assert_close!(arr2(&[[1.0, 2.0], [3.0, 4.0]]), arr2(&[[1.0, 2.0], [3.0, 4.0]]));
    }

    #[test]
    fn infinities_and_nan() {
        let tol = Tolerances::default();
        assert!(tol.is_close(std::f64::INFINITY, std::f64::INFINITY));
        assert!(!tol.is_close(std::f64::INFINITY, std::f64::NEG_INFINITY));
        assert!(!tol.is_close(std::f64::NAN, std::f64::NAN));
        assert!(!tol.is_close(1.0, std::f64::NAN));
    }

    #[test]
    fn reports_index() {
        match vec![1.0, 2.0, 3.0].check_close(&vec![1.0, 2.5, 3.0], Tolerances::default()) {
            Err(CloseError::Value { index: 1, .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }
        match vec![1.0].check_close(&vec![1.0, 2.0], Tolerances::default()) {
            Err(CloseError::Length { left: 1, right: 2 }) => {},
            r => panic!("unexpected: {:?}", r),
        }
    }

    #[test]
    #[should_panic(expected = "not nearly equal")]
    fn not_close() {
        assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }
}

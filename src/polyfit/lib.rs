/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Ordinary least squares polynomial fits.
//!
//! The normal equations `(X' X) c = X' y` are formed directly from power sums
//! and solved by LU decomposition.  Forming `X' X` squares the condition number
//! of the design matrix, so high degrees over wide x ranges lose accuracy fast.
//!
//! ```
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [1.0, 3.0, 5.0, 7.0];
//! let poly = lupfit_polyfit::fit(&x, &y, 1).unwrap();
//! assert!((poly.coefficients()[0] - 1.0).abs() < 1e-9);
//! assert!((poly.coefficients()[1] - 2.0).abs() < 1e-9);
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[cfg(test)]
#[macro_use]
extern crate lupfit_assert_close;

pub use crate::normal::NormalEquations;
mod normal;

pub use crate::poly::{EmptyCoefficients, Polynomial};
mod poly;

use lupfit_linalg::{DegenerateMatrixError, DEFAULT_PIVOT_TOL};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Passed to the LU decomposition; pivots smaller than this are rejected.
    pub pivot_tol: f64,
}

impl Default for FitOptions {
    fn default() -> Self { FitOptions { pivot_tol: DEFAULT_PIVOT_TOL } }
}

#[derive(Debug, Fail)]
pub enum FitError {
    #[fail(display = "x and y have different lengths ({} vs {})", x_len, y_len)]
    LengthMismatch { x_len: usize, y_len: usize },

    #[fail(display = "sample {} is not finite: ({}, {})", index, x, y)]
    NonFiniteSample { index: usize, x: f64, y: f64 },

    #[fail(display = "normal equations are degenerate for a degree {} fit", degree)]
    Degenerate {
        degree: u32,
        #[cause] cause: DegenerateMatrixError,
    },

    #[fail(display = "normal equations are degenerate: {} samples are too few for a degree {} fit", samples, degree)]
    Underdetermined { degree: u32, samples: usize },

    #[fail(display = "degree {} fit overflowed; x values are too large for the normal equations", degree)]
    Overflow { degree: u32 },
}

impl FitError {
    /// Numeric status for callers that want one: `1` for a degenerate system,
    /// `2` for unusable input.  (`0` is success and never produced here.)
    pub fn code(&self) -> i32 {
        match self {
            FitError::Degenerate { .. } |
            FitError::Underdetermined { .. } |
            FitError::Overflow { .. } => 1,
            FitError::LengthMismatch { .. } |
            FitError::NonFiniteSample { .. } => 2,
        }
    }
}

/// Fit a polynomial of the given degree using the default pivot tolerance.
///
/// Coefficients are ordered constant term first.
pub fn fit(x: &[f64], y: &[f64], degree: u32) -> Result<Polynomial, FitError> {
    fit_with(&FitOptions::default(), x, y, degree)
}

pub fn fit_with(
    options: &FitOptions,
    x: &[f64],
    y: &[f64],
    degree: u32,
) -> Result<Polynomial, FitError> {
    check_samples(x, y)?;

    let num_coeffs = degree as usize + 1;
    debug!("fitting degree {} to {} samples (pivot tol {:e})", degree, x.len(), options.pivot_tol);
    // rank(X'X) <= samples, so this is exact; it also keeps a huge degree
    // from sizing the normal matrix
    if x.len() < num_coeffs {
        warn!(
            "only {} samples for {} coefficients; the fit is underdetermined",
            x.len(), num_coeffs,
        );
        return Err(FitError::Underdetermined { degree, samples: x.len() });
    }

    let NormalEquations { xx, xy } = NormalEquations::accumulate(x, y, degree);
    if !(xx.iter().all(|v| v.is_finite()) && xy.iter().all(|v| v.is_finite())) {
        debug!("power sums overflowed for degree {}", degree);
        return Err(FitError::Overflow { degree });
    }

    let coeffs = lupfit_linalg::lup_solve(xx, &xy, options.pivot_tol)
        .map_err(|cause| FitError::Degenerate { degree, cause })?;
    if !coeffs.iter().all(|c| c.is_finite()) {
        debug!("elimination overflowed for degree {}", degree);
        return Err(FitError::Overflow { degree });
    }

    Ok(Polynomial::from_coefficients(coeffs))
}

fn check_samples(x: &[f64], y: &[f64]) -> Result<(), FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    match x.iter().zip(y).position(|(x, y)| !(x.is_finite() && y.is_finite())) {
        Some(index) => Err(FitError::NonFiniteSample { index, x: x[index], y: y[index] }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn straight_line() {
        let poly = fit(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0], 1).unwrap();
        assert_close!(abs=1e-12, poly.coefficients(), &[1.0, 2.0][..]);
    }

    #[test]
    fn identical_x_is_degenerate() {
        let err = fit(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0], 1).unwrap_err();
        assert_eq!(err.code(), 1);
        match err {
            FitError::Degenerate { degree: 1, .. } => {},
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn too_few_samples_is_degenerate() {
        assert_eq!(fit(&[2.0], &[5.0], 1).unwrap_err().code(), 1);
        assert_eq!(fit(&[0.0, 1.0], &[0.0, 1.0], 2).unwrap_err().code(), 1);
        assert_eq!(fit(&[], &[], 0).unwrap_err().code(), 1);
    }

    #[test]
    fn huge_degree_is_rejected_up_front() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 0.0, 1.0];
        for &degree in &[100_000, ::std::u32::MAX] {
            match fit(&x, &y, degree).unwrap_err() {
                e @ FitError::Underdetermined { samples: 3, .. } => assert_eq!(e.code(), 1),
                e => panic!("unexpected error: {}", e),
            }
        }
    }

    #[test]
    fn overflowing_power_sums() {
        let y = [1.0, 2.0, 3.0, 5.0, 4.0];
        for &scale in &[1e154, 1e155, 1e160] {
            let x: Vec<f64> = (1..=5).map(|i| i as f64 * scale).collect();
            match fit(&x, &y, 1).unwrap_err() {
                e @ FitError::Overflow { degree: 1 } => assert_eq!(e.code(), 1),
                e => panic!("unexpected error: {}", e),
            }
        }
    }

    #[test]
    fn single_sample_constant() {
        let poly = fit(&[4.0], &[-2.5], 0).unwrap();
        assert_eq!(poly.coefficients(), &[-2.5]);
    }

    #[test]
    fn recovers_exact_polynomials() {
        let mut rng = rand::thread_rng();
        for degree in 0..5 {
            for _ in 0..20 {
                let truth: Vec<f64> = (0..=degree).map(|_| 1.0 - 2.0 * rng.gen::<f64>()).collect();
                let truth = Polynomial::from_coefficients(truth);

                // distinct, evenly spaced points on [-1, 1]
                let n = degree as usize + 1 + rng.gen_range(0, 10);
                let x: Vec<f64> = (0..n).map(|i| -1.0 + 2.0 * i as f64 / n as f64).collect();
                let y: Vec<f64> = x.iter().map(|&x| truth.eval(x)).collect();

                let poly = fit(&x, &y, degree).unwrap();
                assert_close!(rel=1e-9, abs=1e-9, poly.coefficients(), truth.coefficients());
            }
        }
    }

    #[test]
    fn least_squares_of_noisy_line() {
        // symmetric noise around 2x - 1 leaves the line untouched
        let x = [0.0, 0.0, 1.0, 1.0, 2.0, 2.0];
        let y = [-1.5, -0.5, 0.5, 1.5, 2.5, 3.5];
        let poly = fit(&x, &y, 1).unwrap();
        assert_close!(abs=1e-12, poly.coefficients(), &[-1.0, 2.0][..]);
    }

    #[test]
    fn repeated_fits_are_identical() {
        let x = [0.1, 0.7, 1.3, 2.9, 3.3, 4.0];
        let y = [1.0, -0.2, 0.4, 2.2, 5.1, 8.0];
        let first = fit(&x, &y, 3).unwrap();
        for _ in 0..5 {
            assert_eq!(fit(&x, &y, 3).unwrap(), first);
        }
    }

    #[test]
    fn invalid_input() {
        match fit(&[1.0, 2.0], &[1.0], 1).unwrap_err() {
            e @ FitError::LengthMismatch { x_len: 2, y_len: 1 } => assert_eq!(e.code(), 2),
            e => panic!("unexpected error: {}", e),
        }
        match fit(&[1.0, std::f64::NAN], &[1.0, 2.0], 0).unwrap_err() {
            FitError::NonFiniteSample { index: 1, .. } => {},
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn pivot_tolerance_is_configurable() {
        // a narrow x range leaves a second pivot of 5e-7
        let x = [0.0, 1e-3];
        let y = [0.0, 1e-3];
        assert!(fit(&x, &y, 1).is_ok());

        let strict = FitOptions { pivot_tol: 1e-6 };
        assert_eq!(fit_with(&strict, &x, &y, 1).unwrap_err().code(), 1);
    }
}

/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ndarray::Array2;

/// The system `xx c = xy` whose solution `c` minimizes the squared residuals.
///
/// The design matrix `X` (rows `[1, x, x^2, ...]`) is never built; only its
/// Gram matrix `X' X` and the projection `X' y`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalEquations {
    pub xx: Array2<f64>,
    pub xy: Vec<f64>,
}

impl NormalEquations {
    /// # Panics
    ///
    /// Panics if `x` and `y` differ in length.
    pub fn accumulate(x: &[f64], y: &[f64], degree: u32) -> Self {
        let num_coeffs = degree as usize + 1;
        let num_powers = num_coeffs + degree as usize;

        // power_sums[k] = sum of x^k; X'X is a Hankel matrix of these
        let mut power_sums = vec![0.0; num_powers];
        let mut xy = vec![0.0; num_coeffs];

        for (&x, &y) in ::itertools::zip_eq(x, y) {
            let mut power = 1.0;
            for (k, sum) in power_sums.iter_mut().enumerate() {
                if k < num_coeffs {
                    xy[k] += y * power;
                }
                *sum += power;
                power *= x;
            }
        }

        let xx = Array2::from_shape_fn((num_coeffs, num_coeffs), |(i, j)| power_sums[i + j]);
        NormalEquations { xx, xy }
    }

    pub fn num_coeffs(&self) -> usize { self.xy.len() }
}

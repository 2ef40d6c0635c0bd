/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense square linear systems, solved by LU decomposition with partial pivoting.
//!
//! ```
//! use ndarray::arr2;
//!
//! let a = arr2(&[[2.0, 1.0], [4.0, 3.0]]);
//! let lu = lupfit_linalg::decompose(a, lupfit_linalg::DEFAULT_PIVOT_TOL).unwrap();
//! let x = lu.solve(&[3.0, 7.0]);
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! assert!((x[1] - 1.0).abs() < 1e-12);
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate lupfit_assert_close;

pub use crate::lup::{decompose, lup_solve, LuDecomposition, Permutation};
mod lup;

/// Pivots whose magnitude falls below this are treated as zero.
pub const DEFAULT_PIVOT_TOL: f64 = 1e-12;

/// The matrix is singular, or too close to it for the requested tolerance.
#[derive(Debug, Clone, PartialEq, Fail)]
#[fail(display = "matrix is degenerate: best pivot in column {} has magnitude {:e} (tolerance {:e})", column, magnitude, tolerance)]
pub struct DegenerateMatrixError {
    pub column: usize,
    pub magnitude: f64,
    pub tolerance: f64,
}

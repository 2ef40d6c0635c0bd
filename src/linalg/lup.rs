/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::DegenerateMatrixError;

use ndarray::Array2;

/// Row permutation produced by pivoting.
///
/// `perm[i]` is the index of the original row that ended up at row `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    perm: Vec<usize>,
    swaps: usize,
}

impl Permutation {
    fn identity(n: usize) -> Self {
        Permutation { perm: (0..n).collect(), swaps: 0 }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.perm.swap(i, j);
        self.swaps += 1;
    }

    pub fn len(&self) -> usize { self.perm.len() }
    pub fn is_empty(&self) -> bool { self.perm.is_empty() }
    pub fn as_slice(&self) -> &[usize] { &self.perm }

    /// Number of row exchanges performed during decomposition.
    pub fn num_swaps(&self) -> usize { self.swaps }

    /// Determinant of the permutation matrix.
    pub fn sign(&self) -> f64 {
        match self.swaps % 2 {
            0 => 1.0,
            _ => -1.0,
        }
    }

    /// The `N + 1` element form, whose last entry is `N + num_swaps()`.
    pub fn to_counted_vec(&self) -> Vec<usize> {
        let mut out = self.perm.clone();
        out.push(self.perm.len() + self.swaps);
        out
    }
}

/// Combined `L - E` and `U` factors of `P A`, stored in a single square matrix.
///
/// The unit diagonal of `L` is implicit.  Only obtainable from [`decompose`],
/// so a value of this type always holds a complete factorization.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    factors: Array2<f64>,
    perm: Permutation,
}

/// Factor `a` in place as `P a = L U`.
///
/// Fails on the first column whose largest candidate pivot is smaller in
/// magnitude than `tol`.  The matrix is consumed either way.
pub fn decompose(mut a: Array2<f64>, tol: f64) -> Result<LuDecomposition, DegenerateMatrixError> {
    assert!(a.is_square(), "cannot decompose a {:?} matrix", a.dim());
    let n = a.nrows();
    let mut perm = Permutation::identity(n);

    for i in 0..n {
        // strict comparison, so NaN never wins and an all-zero column keeps imax = i
        let mut max = 0.0;
        let mut imax = i;
        for k in i..n {
            let abs = a[(k, i)].abs();
            if abs > max {
                max = abs;
                imax = k;
            }
        }

        if max < tol {
            debug!("degenerate pivot in column {} of {}: |a| = {:e}", i, n, max);
            return Err(DegenerateMatrixError { column: i, magnitude: max, tolerance: tol });
        }

        if imax != i {
            trace!("pivot swap: row {} <-> row {}", i, imax);
            perm.swap(i, imax);
            for k in 0..n {
                a.swap((i, k), (imax, k));
            }
        }

        let pivot = a[(i, i)];
        for j in i + 1..n {
            let factor = a[(j, i)] / pivot;
            a[(j, i)] = factor;
            for k in i + 1..n {
                a[(j, k)] -= factor * a[(i, k)];
            }
        }
    }

    Ok(LuDecomposition { factors: a, perm })
}

/// Solve `a x = b` in one go.
pub fn lup_solve(a: Array2<f64>, b: &[f64], tol: f64) -> Result<Vec<f64>, DegenerateMatrixError> {
    decompose(a, tol).map(|lu| lu.solve(b))
}

impl LuDecomposition {
    pub fn dim(&self) -> usize { self.factors.nrows() }

    /// The combined factor matrix.  Entries below the diagonal belong to `L`.
    pub fn factors(&self) -> &Array2<f64> { &self.factors }

    pub fn permutation(&self) -> &Permutation { &self.perm }

    pub fn into_parts(self) -> (Array2<f64>, Permutation) { (self.factors, self.perm) }

    /// Solve `A x = b` for the original matrix `A`.
    ///
    /// # Panics
    ///
    /// Panics if `b.len()` differs from the dimension of the matrix.
    pub fn solve(&self, b: &[f64]) -> Vec<f64> {
        let n = self.dim();
        assert_eq!(b.len(), n, "right-hand side has the wrong length");

        let a = &self.factors;
        let p = self.perm.as_slice();
        let mut x = vec![0.0; n];

        // forward substitution with L
        for i in 0..n {
            let mut acc = b[p[i]];
            for k in 0..i {
                acc -= a[(i, k)] * x[k];
            }
            x[i] = acc;
        }

        // back substitution with U
        for i in (0..n).rev() {
            let mut acc = x[i];
            for k in i + 1..n {
                acc -= a[(i, k)] * x[k];
            }
            x[i] = acc / a[(i, i)];
        }
        x
    }

    pub fn determinant(&self) -> f64 {
        let diag: f64 = self.factors.diag().iter().product();
        self.perm.sign() * diag
    }

    pub fn inverse(&self) -> Array2<f64> {
        let n = self.dim();
        let mut out = Array2::zeros((n, n));
        let mut unit = vec![0.0; n];
        for j in 0..n {
            unit[j] = 1.0;
            let col = self.solve(&unit);
            unit[j] = 0.0;
            for (i, value) in col.into_iter().enumerate() {
                out[(i, j)] = value;
            }
        }
        out
    }
}

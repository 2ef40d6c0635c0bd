/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::convert::TryFrom;
use std::fmt;

/// A polynomial in `x`, coefficients ordered from the constant term upwards.
///
/// Serializes as the plain coefficient list.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

#[derive(Debug, Fail)]
#[fail(display = "a polynomial needs at least one coefficient")]
pub struct EmptyCoefficients;

impl TryFrom<Vec<f64>> for Polynomial {
    type Error = EmptyCoefficients;

    fn try_from(coeffs: Vec<f64>) -> Result<Self, EmptyCoefficients> {
        if coeffs.is_empty() {
            return Err(EmptyCoefficients);
        }
        Ok(Polynomial { coeffs })
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(poly: Polynomial) -> Vec<f64> { poly.coeffs }
}

impl Polynomial {
    /// # Panics
    ///
    /// Panics on an empty coefficient list.
    pub fn from_coefficients(coeffs: Vec<f64>) -> Self {
        assert!(!coeffs.is_empty(), "a polynomial needs at least one coefficient");
        Polynomial { coeffs }
    }

    pub fn coefficients(&self) -> &[f64] { &self.coeffs }
    pub fn into_coefficients(self) -> Vec<f64> { self.coeffs }

    /// Nominal degree; leading zero coefficients are not trimmed.
    pub fn degree(&self) -> u32 { self.coeffs.len().saturating_sub(1) as u32 }

    /// Horner's method.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// `y - p(x)` for each sample.
    pub fn residuals(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        ::itertools::zip_eq(x, y).map(|(&x, &y)| y - self.eval(x)).collect()
    }

    pub fn residual_sum_of_squares(&self, x: &[f64], y: &[f64]) -> f64 {
        self.residuals(x, y).iter().map(|r| r * r).sum()
    }

    /// Coefficient of determination.
    ///
    /// `NaN` when `y` is constant (zero total variance), or empty.
    pub fn r_squared(&self, x: &[f64], y: &[f64]) -> f64 {
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        let total: f64 = y.iter().map(|y| (y - mean) * (y - mean)).sum();
        if total == 0.0 {
            return ::std::f64::NAN;
        }
        1.0 - self.residual_sum_of_squares(x, y) / total
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (k, c) in self.coeffs.iter().enumerate() {
            match k {
                0 => write!(f, "{}", c)?,
                1 => write!(f, " + {}*x", c)?,
                _ => write!(f, " + {}*x^{}", c, k)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner() {
        // 1 - 2x + 3x^2
        let p = Polynomial::from_coefficients(vec![1.0, -2.0, 3.0]);
        assert_eq!(p.degree(), 2);
        assert_eq!(p.eval(0.0), 1.0);
        assert_eq!(p.eval(2.0), 9.0);
        assert_eq!(p.eval(-1.0), 6.0);
    }

    #[test]
    fn residual_stats() {
        let p = Polynomial::from_coefficients(vec![0.0, 1.0]);
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 2.0, 2.0];
        assert_eq!(p.residuals(&x, &y), vec![0.0, 1.0, 0.0]);
        assert_eq!(p.residual_sum_of_squares(&x, &y), 1.0);
        // mean 4/3, total variance 16/9 + 4/9 + 4/9 = 8/3
        assert_close!(p.r_squared(&x, &y), 1.0 - 3.0 / 8.0);

        assert!(p.r_squared(&x, &[1.0, 1.0, 1.0]).is_nan());
    }

    #[test]
    fn perfect_fit_has_unit_r_squared() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let p = crate::fit(&x, &y, 1).unwrap();
        assert_close!(abs=1e-12, p.r_squared(&x, &y), 1.0);
    }

    #[test]
    fn display() {
        let p = Polynomial::from_coefficients(vec![1.5, -2.0, 0.25]);
        assert_eq!(p.to_string(), "1.5 + -2*x + 0.25*x^2");
    }

    #[test]
    fn serializes_as_plain_list() {
        let p = Polynomial::from_coefficients(vec![1.0, 2.5]);
        assert_eq!(::serde_json::to_string(&p).unwrap(), "[1.0,2.5]");
        let back: Polynomial = ::serde_json::from_str("[1.0,2.5]").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn empty_list_does_not_deserialize() {
        assert!(::serde_json::from_str::<Polynomial>("[]").is_err());
        assert!(Polynomial::try_from(vec![]).is_err());
    }
}

//! Matrix norms.
//!
//! Used for:
//! - Condition estimation of a computed inverse
//! - Relative pivot thresholds during factorization
//!
//! All norms are accumulated in working precision (`f64`). The norm of an
//! empty matrix is 0.

use crate::{Element, Matrix};

/// Largest absolute value in a buffer: `max_i |x_i|`.
pub fn max_abs(x: &[f64]) -> f64 {
    x.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// 1-norm on a row-major working buffer: maximum absolute column sum.
pub fn norm_one_working(data: &[f64], rows: usize, cols: usize) -> f64 {
    (0..cols)
        .map(|j| (0..rows).map(|i| data[i * cols + j].abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Matrix 1-norm: ||A||_1 = max_j sum_i |a_ij|
pub fn norm_one<T: Element>(a: &Matrix<T>) -> f64 {
    norm_one_working(&a.to_working(), a.rows(), a.cols())
}

/// Matrix infinity-norm: ||A||_inf = max_i sum_j |a_ij|
pub fn norm_inf<T: Element>(a: &Matrix<T>) -> f64 {
    (0..a.rows())
        .map(|i| a.row(i).iter().map(|x| x.to_working().abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Frobenius norm: ||A||_F = sqrt(sum_ij a_ij^2)
pub fn norm_frobenius<T: Element>(a: &Matrix<T>) -> f64 {
    a.as_slice()
        .iter()
        .map(|x| {
            let v = x.to_working();
            v * v
        })
        .sum::<f64>()
        .sqrt()
}

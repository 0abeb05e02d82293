//! LU factorization with partial pivoting, and matrix inversion built on it.
//!
//! ## Algorithm
//!
//! Implements **unblocked right-looking LU with partial pivoting** (LAPACK
//! DGETF2 style). For a square matrix A, computes:
//! ```text
//! P * A = L * U
//! ```
//! where:
//! - P is a permutation matrix (stored as vector)
//! - L is lower triangular with unit diagonal
//! - U is upper triangular
//!
//! The inverse is then obtained by solving `A * X = I` one identity column at
//! a time:
//! ```text
//! for j = 0..N-1:
//!   1. PERMUTE: b = P * e_j
//!   2. FORWARD:  L * y = b   (unit diagonal)
//!   3. BACKWARD: U * x = y
//!   4. X[:, j] = x
//! ```
//!
//! Everything runs in working precision (`f64`) regardless of the storage
//! element of the input matrix.

use tracing::{debug, warn};

use crate::components::norm::{max_abs, norm_one, norm_one_working};
use crate::matrix::shape_label;
use crate::{Element, LinalgError, LinalgResult, Matrix, SolveInfo, SolveQuality};

/// Configuration for LU-based inversion.
///
/// These are the pass-through options of [`LuInverter`](crate::LuInverter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseConfig {
    /// Pivot threshold for singularity detection.
    /// If |pivot| <= threshold * max|A|, matrix is considered singular.
    pub pivot_threshold: f64,

    /// Reject inverses whose 1-norm condition number exceeds this value.
    pub max_condition: Option<f64>,
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            pivot_threshold: 1e-14,
            max_condition: None,
        }
    }
}

impl InverseConfig {
    pub fn with_pivot_threshold(mut self, threshold: f64) -> Self {
        self.pivot_threshold = threshold;
        self
    }

    pub fn with_max_condition(mut self, cond: f64) -> Self {
        self.max_condition = Some(cond);
        self
    }
}

/// Packed LU factorization of an `n×n` matrix.
///
/// - Lower triangle (below diagonal): L with unit diagonal (implicit)
/// - Upper triangle (including diagonal): U
/// - `perm[i]` is the original row now at position i
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors {
    lu: Vec<f64>,
    perm: Vec<usize>,
    n: usize,
}

impl LuFactors {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Combined L+U in row-major order.
    pub fn packed(&self) -> &[f64] {
        &self.lu
    }
}

/// LU factorization with partial pivoting: P * A = L * U
///
/// # Errors
///
/// - `InvalidShape`: Input is empty or not square
/// - `SingularPivot`: Zero or tiny pivot encountered (matrix is singular/near-singular)
///
/// # Example
///
/// ```
/// use linalg_cache::{lu_factor, InverseConfig, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let (factors, _info) = lu_factor(&a, &InverseConfig::default()).unwrap();
///
/// // Row 1 holds the largest pivot in column 0
/// assert_eq!(factors.perm(), &[1, 0]);
/// ```
pub fn lu_factor<T: Element>(
    a: &Matrix<T>,
    config: &InverseConfig,
) -> LinalgResult<(LuFactors, SolveInfo)> {
    if a.is_empty() {
        return Err(LinalgError::InvalidShape {
            reason: format!("LU requires a non-empty matrix, got {}", shape_label(a)),
        });
    }

    if !a.is_square() {
        return Err(LinalgError::InvalidShape {
            reason: format!("LU requires square matrix, got {}", shape_label(a)),
        });
    }

    let n = a.rows();
    let mut lu = a.to_working();
    let mut perm: Vec<usize> = (0..n).collect();

    let threshold = config.pivot_threshold * max_abs(&lu);
    let mut min_pivot = f64::INFINITY;

    for k in 0..n {
        // Find pivot
        let mut pivot_row = k;
        let mut max_val = lu[k * n + k].abs();

        for i in (k + 1)..n {
            let val = lu[i * n + k].abs();
            if val > max_val {
                max_val = val;
                pivot_row = i;
            }
        }

        // Written so that NaN entries also count as singular
        if !(max_val > threshold) {
            return Err(LinalgError::SingularPivot {
                index: k,
                value: lu[pivot_row * n + k],
            });
        }
        min_pivot = min_pivot.min(max_val);

        // Swap rows in LU and permutation
        if pivot_row != k {
            for j in 0..n {
                lu.swap(k * n + j, pivot_row * n + j);
            }
            perm.swap(k, pivot_row);
        }

        // Eliminate column k
        let pivot = lu[k * n + k];
        for i in (k + 1)..n {
            let factor = lu[i * n + k] / pivot;
            lu[i * n + k] = factor;

            for j in (k + 1)..n {
                lu[i * n + j] -= factor * lu[k * n + j];
            }
        }
    }

    let info = SolveInfo::new().with_min_pivot(min_pivot);
    Ok((LuFactors { lu, perm, n }, info))
}

/// Solve A*x = b using a precomputed LU factorization.
///
/// 1. Apply permutation: b' = P * b
/// 2. Forward solve: L * y = b' (L has unit diagonal)
/// 3. Backward solve: U * x = y
pub fn solve_lu(factors: &LuFactors, b: &[f64]) -> LinalgResult<Vec<f64>> {
    let n = factors.n;
    if b.len() != n {
        return Err(LinalgError::InvalidShape {
            reason: format!("right-hand side has length {}, expected {}", b.len(), n),
        });
    }

    let lu = &factors.lu;
    let mut x: Vec<f64> = factors.perm.iter().map(|&p| b[p]).collect();

    for i in 0..n {
        let mut sum = x[i];
        for j in 0..i {
            sum -= lu[i * n + j] * x[j];
        }
        x[i] = sum;
    }

    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum -= lu[i * n + j] * x[j];
        }
        x[i] = sum / lu[i * n + i];
    }

    Ok(x)
}

/// Compute the inverse from an LU factorization: solves A * X = I.
///
/// Returns X row-major in working precision.
pub fn inverse_lu(factors: &LuFactors) -> LinalgResult<Vec<f64>> {
    let n = factors.n;
    let mut inv = vec![0.0_f64; n * n];
    let mut e = vec![0.0_f64; n];

    for j in 0..n {
        e[j] = 1.0;
        let col = solve_lu(factors, &e)?;
        e[j] = 0.0;

        for (i, v) in col.into_iter().enumerate() {
            inv[i * n + j] = v;
        }
    }

    Ok(inv)
}

/// Row-major index of the first entry that is not finite in working precision.
fn first_non_finite<T: Element>(values: &[T]) -> Option<usize> {
    values.iter().position(|v| !v.to_working().is_finite())
}

/// Invert a square matrix via LU with partial pivoting.
///
/// The returned [`SolveInfo`] carries the 1-norm condition number
/// `||A||_1 * ||A^-1||_1` and the smallest pivot. When the condition number
/// times the storage epsilon of `T` reaches 1, the quality is reported as
/// [`SolveQuality::Marginal`] whatever the condition band says.
///
/// # Errors
///
/// - `InvalidShape`: empty or non-square input
/// - `SingularPivot`: singular or numerically singular input
/// - `Overflow`: an entry of the inverse is not finite in `f64` or in `T`
/// - `NumericalInstability`: condition number above `config.max_condition`
///
/// # Example
///
/// ```
/// use linalg_cache::{invert, InverseConfig, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
/// let (inv, info) = invert(&a, &InverseConfig::default()).unwrap();
///
/// assert_eq!(inv.as_slice(), &[0.5, 0.0, 0.0, 0.5]);
/// assert_eq!(info.condition_estimate, Some(1.0));
/// ```
pub fn invert<T: Element>(
    a: &Matrix<T>,
    config: &InverseConfig,
) -> LinalgResult<(Matrix<T>, SolveInfo)> {
    let (factors, info) = lu_factor(a, config)?;
    let n = factors.n;
    let inv = inverse_lu(&factors)?;

    if let Some(index) = first_non_finite(inv.as_slice()) {
        return Err(LinalgError::Overflow {
            index,
            elem: <f64 as Element>::NAME,
        });
    }

    let cond = norm_one(a) * norm_one_working(&inv, n, n);

    if let Some(threshold) = config.max_condition {
        if cond > threshold {
            return Err(LinalgError::NumericalInstability { cond, threshold });
        }
    }

    let inverse = Matrix::from_working(n, n, &inv)?;
    if let Some(index) = first_non_finite(inverse.as_slice()) {
        return Err(LinalgError::Overflow {
            index,
            elem: T::NAME,
        });
    }

    let mut info = info.with_condition(cond);
    if cond * T::EPSILON >= 1.0 {
        info = info.with_quality(SolveQuality::Marginal);
    }

    if info.quality == SolveQuality::Marginal {
        warn!(n, cond, elem = T::NAME, "inverse is ill-conditioned");
    } else {
        debug!(n, cond, elem = T::NAME, quality = %info.quality, "LU inverse computed");
    }

    Ok((inverse, info))
}

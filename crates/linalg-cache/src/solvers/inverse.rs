//! Memoized matrix inverse.
//!
//! ```text
//! cache_solve(m):
//!   hit  -> return m.get_inverse()
//!   miss -> inv = invert(m.get(), options)?   (error: cache stays empty)
//!           m.set_inverse(inv)
//!           return inv
//! ```

use crate::{get_inverse_policy, invert, CachedMatrix, Element, InverseConfig, LinalgResult, Matrix};

/// An inversion routine.
///
/// `Options` are forwarded verbatim from [`cache_solve_with`] to
/// [`invert`](Inverter::invert). Implementations must fail for non-square or
/// singular input rather than returning a placeholder.
pub trait Inverter<T: Element> {
    /// Tuning parameters of the routine.
    type Options;

    /// Compute the inverse of `a`.
    fn invert(&self, a: &Matrix<T>, options: &Self::Options) -> LinalgResult<Matrix<T>>;
}

/// LU with partial pivoting, see [`invert`](crate::invert).
#[derive(Debug, Clone, Copy, Default)]
pub struct LuInverter;

impl<T: Element> Inverter<T> for LuInverter {
    type Options = InverseConfig;

    fn invert(&self, a: &Matrix<T>, options: &InverseConfig) -> LinalgResult<Matrix<T>> {
        invert(a, options).map(|(inverse, _info)| inverse)
    }
}

impl<T, I> Inverter<T> for &I
where
    T: Element,
    I: Inverter<T> + ?Sized,
{
    type Options = I::Options;

    fn invert(&self, a: &Matrix<T>, options: &Self::Options) -> LinalgResult<Matrix<T>> {
        (**self).invert(a, options)
    }
}

/// Inverse of `cached`, computed with [`LuInverter`] under the global policy
/// on a cache miss.
///
/// # Errors
///
/// Whatever the inversion routine returns (`InvalidShape`, `SingularPivot`,
/// `NumericalInstability`). On error nothing is cached, so the next call
/// retries.
///
/// # Example
///
/// ```
/// use linalg_cache::{cache_solve, CachedMatrix, Matrix};
///
/// let mut m = CachedMatrix::new(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap());
/// let inverse = cache_solve(&mut m).unwrap().clone();
/// assert_eq!(inverse.as_slice(), &[0.5, 0.0, 0.0, 0.5]);
///
/// // Second call is served from the cache
/// assert_eq!(cache_solve(&mut m).unwrap(), &inverse);
/// ```
pub fn cache_solve<T: Element>(cached: &mut CachedMatrix<T>) -> LinalgResult<&Matrix<T>> {
    cache_solve_with(cached, &LuInverter, &get_inverse_policy())
}

/// Inverse of `cached`, computed with `inverter` and `options` on a cache
/// miss.
pub fn cache_solve_with<'a, T, I>(
    cached: &'a mut CachedMatrix<T>,
    inverter: &I,
    options: &I::Options,
) -> LinalgResult<&'a Matrix<T>>
where
    T: Element,
    I: Inverter<T> + ?Sized,
{
    cached.inverse_or_try_insert_with(|a| inverter.invert(a, options))
}

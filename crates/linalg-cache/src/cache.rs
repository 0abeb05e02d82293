//! Matrices that memoize their inverse.
//!
//! [`CachedMatrix`] owns a value and an optional cached inverse. The only
//! ways to mutate it are [`CachedMatrix::set`], which always drops the cached
//! inverse, and [`CachedMatrix::set_inverse`]. [`SharedCachedMatrix`] puts the
//! same state behind a mutex for use from several threads.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::{cache_solve_with, get_inverse_policy, Element, Inverter, LinalgResult, LuInverter, Matrix};

/// A matrix together with its lazily computed inverse.
///
/// # Example
///
/// ```
/// use linalg_cache::{cache_solve, CachedMatrix, Matrix};
///
/// let mut m = CachedMatrix::new(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap());
/// assert!(m.get_inverse().is_none());
///
/// cache_solve(&mut m).unwrap();
/// assert!(m.get_inverse().is_some());
///
/// m.set(Matrix::identity(2));
/// assert!(m.get_inverse().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedMatrix<T: Element = f64> {
    value: Matrix<T>,
    inverse: Option<Matrix<T>>,
}

impl<T: Element> CachedMatrix<T> {
    pub fn new(value: Matrix<T>) -> Self {
        Self {
            value,
            inverse: None,
        }
    }

    /// Replace the value and drop any cached inverse. Returns the new value.
    ///
    /// The shape is not validated here; a non-square value is only rejected
    /// when its inverse is requested.
    pub fn set(&mut self, value: Matrix<T>) -> &Matrix<T> {
        if self.inverse.take().is_some() {
            debug!(shape = ?value.shape(), "cached inverse invalidated");
        }
        self.value = value;
        &self.value
    }

    pub fn get(&self) -> &Matrix<T> {
        &self.value
    }

    /// Store an inverse for the current value. Returns the stored inverse.
    ///
    /// The inverse is trusted as given; nothing checks that it actually
    /// inverts [`get`](Self::get).
    pub fn set_inverse(&mut self, inverse: Matrix<T>) -> &Matrix<T> {
        self.inverse.insert(inverse)
    }

    /// The cached inverse, or `None` if it has not been computed since the
    /// last [`set`](Self::set).
    pub fn get_inverse(&self) -> Option<&Matrix<T>> {
        self.inverse.as_ref()
    }

    pub fn is_cached(&self) -> bool {
        self.inverse.is_some()
    }

    /// Consume the container, returning the value.
    pub fn into_inner(self) -> Matrix<T> {
        self.value
    }

    /// Return the cached inverse, or compute it with `f` and cache it.
    ///
    /// If `f` fails the error is returned and the cache stays empty.
    pub(crate) fn inverse_or_try_insert_with<F>(&mut self, f: F) -> LinalgResult<&Matrix<T>>
    where
        F: FnOnce(&Matrix<T>) -> LinalgResult<Matrix<T>>,
    {
        let inverse = match self.inverse.take() {
            Some(inverse) => {
                trace!(shape = ?self.value.shape(), "inverse cache hit");
                inverse
            }
            None => {
                debug!(shape = ?self.value.shape(), "inverse cache miss");
                f(&self.value)?
            }
        };
        Ok(self.set_inverse(inverse))
    }
}

impl<T: Element> From<Matrix<T>> for CachedMatrix<T> {
    fn from(value: Matrix<T>) -> Self {
        Self::new(value)
    }
}

/// A [`CachedMatrix`] behind a mutex.
///
/// `set`, `set_inverse` and the whole check / compute / store sequence of
/// [`solve_with`](Self::solve_with) each run under a single lock acquisition,
/// so two callers never both compute the inverse and a concurrent `set`
/// can never leave an inverse of the old value in the cache.
///
/// Accessors return owned clones.
#[derive(Debug, Default)]
pub struct SharedCachedMatrix<T: Element = f64> {
    inner: Mutex<CachedMatrix<T>>,
}

impl<T: Element> SharedCachedMatrix<T> {
    pub fn new(value: Matrix<T>) -> Self {
        Self {
            inner: Mutex::new(CachedMatrix::new(value)),
        }
    }

    // Every mutation is a single assignment, so state behind a poisoned lock
    // is still consistent.
    fn lock(&self) -> MutexGuard<'_, CachedMatrix<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the value and drop any cached inverse. Returns the new value.
    pub fn set(&self, value: Matrix<T>) -> Matrix<T> {
        self.lock().set(value).clone()
    }

    pub fn get(&self) -> Matrix<T> {
        self.lock().get().clone()
    }

    pub fn set_inverse(&self, inverse: Matrix<T>) -> Matrix<T> {
        self.lock().set_inverse(inverse).clone()
    }

    pub fn get_inverse(&self) -> Option<Matrix<T>> {
        self.lock().get_inverse().cloned()
    }

    pub fn is_cached(&self) -> bool {
        self.lock().is_cached()
    }

    /// Inverse via [`LuInverter`] and the global policy.
    pub fn solve(&self) -> LinalgResult<Matrix<T>> {
        self.solve_with(&LuInverter, &get_inverse_policy())
    }

    /// Inverse via `inverter`, holding the lock for the whole solve.
    pub fn solve_with<I>(&self, inverter: &I, options: &I::Options) -> LinalgResult<Matrix<T>>
    where
        I: Inverter<T> + ?Sized,
    {
        let mut guard = self.lock();
        cache_solve_with(&mut *guard, inverter, options).cloned()
    }

    pub fn into_inner(self) -> CachedMatrix<T> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Element> From<CachedMatrix<T>> for SharedCachedMatrix<T> {
    fn from(cached: CachedMatrix<T>) -> Self {
        Self {
            inner: Mutex::new(cached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinalgError;

    fn diag(a: f64, b: f64) -> Matrix {
        Matrix::from_rows(vec![vec![a, 0.0], vec![0.0, b]]).unwrap()
    }

    #[test]
    fn test_default_is_empty_placeholder() {
        let m = CachedMatrix::<f64>::default();
        assert!(m.get().is_empty());
        assert!(m.get_inverse().is_none());
    }

    #[test]
    fn test_set_returns_new_value_and_clears_cache() {
        let mut m = CachedMatrix::new(diag(1.0, 1.0));
        m.set_inverse(diag(1.0, 1.0));
        assert!(m.is_cached());

        let returned = m.set(diag(3.0, 5.0)).clone();
        assert_eq!(returned, diag(3.0, 5.0));
        assert_eq!(m.get(), &diag(3.0, 5.0));
        assert!(m.get_inverse().is_none());
    }

    #[test]
    fn test_set_inverse_is_not_verified() {
        let mut m = CachedMatrix::new(diag(2.0, 2.0));
        let bogus = diag(7.0, 7.0);
        assert_eq!(m.set_inverse(bogus.clone()), &bogus);
        assert_eq!(m.get_inverse(), Some(&bogus));
    }

    #[test]
    fn test_set_does_not_alias_caller_copy() {
        let original = diag(2.0, 2.0);
        let mut m = CachedMatrix::new(original.clone());
        m.set(diag(9.0, 9.0));
        assert_eq!(original, diag(2.0, 2.0));
        assert_eq!(m.into_inner(), diag(9.0, 9.0));
    }

    #[test]
    fn test_set_accepts_non_square() {
        let mut m = CachedMatrix::<f64>::default();
        m.set(Matrix::zeros(2, 3));
        assert_eq!(m.get().shape(), (2, 3));
    }

    #[test]
    fn test_inverse_or_try_insert_with_failure_keeps_cache_empty() {
        let mut m = CachedMatrix::new(diag(1.0, 1.0));
        let err = m
            .inverse_or_try_insert_with(|_| Err(LinalgError::Inversion("boom".into())))
            .unwrap_err();
        assert_eq!(err, LinalgError::Inversion("boom".into()));
        assert!(!m.is_cached());
    }

    #[test]
    fn test_inverse_or_try_insert_with_hit_skips_closure() {
        let mut m = CachedMatrix::new(diag(1.0, 1.0));
        m.set_inverse(diag(1.0, 1.0));
        let inverse = m
            .inverse_or_try_insert_with(|_| panic!("must not recompute"))
            .unwrap();
        assert_eq!(inverse, &diag(1.0, 1.0));
    }

    #[test]
    fn test_shared_set_and_get() {
        let shared = SharedCachedMatrix::new(diag(2.0, 4.0));
        assert_eq!(shared.get(), diag(2.0, 4.0));
        assert!(!shared.is_cached());

        shared.set_inverse(diag(0.5, 0.25));
        assert_eq!(shared.get_inverse(), Some(diag(0.5, 0.25)));

        assert_eq!(shared.set(diag(1.0, 1.0)), diag(1.0, 1.0));
        assert_eq!(shared.get_inverse(), None);

        let inner = shared.into_inner();
        assert_eq!(inner.get(), &diag(1.0, 1.0));
    }
}

//! # Linalg Cache
//!
//! Memoized matrix inversion.
//!
//! A [`CachedMatrix`] holds a matrix and, once requested, its inverse.
//! [`cache_solve`] returns the cached inverse or computes and stores it;
//! replacing the matrix with [`CachedMatrix::set`] drops the cached inverse in
//! the same step, so a stale inverse is never observable.
//!
//! ## Features
//!
//! - **Cache**: [`CachedMatrix`] for single-threaded use, [`SharedCachedMatrix`]
//!   with the whole check / compute / store sequence under one lock
//! - **Pluggable inversion**: any [`Inverter`]; [`LuInverter`] (LU with partial
//!   pivoting) is the default
//! - **Diagnostics**: condition estimate and quality via [`invert`] / [`SolveInfo`]
//! - **Storage precision**: `f64`, `f32`, `f16`, `bf16` elements, computed in `f64`
//!
//! ## Example
//!
//! ```
//! use linalg_cache::{cache_solve, CachedMatrix, Matrix};
//!
//! let mut m = CachedMatrix::new(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]])?);
//! assert_eq!(cache_solve(&mut m)?.as_slice(), &[0.5, 0.0, 0.0, 0.5]);
//!
//! m.set(Matrix::from_rows(vec![vec![4.0, 0.0], vec![0.0, 4.0]])?);
//! assert!(m.get_inverse().is_none());
//! assert_eq!(cache_solve(&mut m)?.as_slice(), &[0.25, 0.0, 0.0, 0.25]);
//! # Ok::<(), linalg_cache::LinalgError>(())
//! ```

mod cache;
mod error;
mod matrix;
mod policy;
mod precision;

/// Core linear algebra components
pub mod components;

/// High-level solver wrappers
pub mod solvers;

/// Reference helpers and scenario tests
#[cfg(any(test, feature = "export_tests"))]
pub mod tests;

// Re-export public API
pub use cache::*;
pub use error::*;
pub use matrix::*;
pub use policy::*;
pub use precision::*;

// Re-export key components
pub use components::lu::*;
pub use components::norm::*;

// Re-export solvers
pub use solvers::inverse::*;

//! Basic example demonstrating the inverse cache
//!
//! This example shows how to:
//! 1. Wrap a matrix in a `CachedMatrix`
//! 2. Compute its inverse once and serve repeats from the cache
//! 3. Replace the matrix and watch the cache being invalidated
//! 4. Handle a singular matrix
//!
//! Run with: RUST_LOG=debug cargo run --example cache_basic

use linalg_cache::{cache_solve, invert, CachedMatrix, InverseConfig, LinalgResult, Matrix};
use tracing_subscriber::EnvFilter;

fn main() -> LinalgResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    #[rustfmt::skip]
    let a = Matrix::from_rows(vec![
        vec![2.0, 1.0, 1.0, 0.0],
        vec![4.0, 3.0, 3.0, 1.0],
        vec![8.0, 7.0, 9.0, 5.0],
        vec![6.0, 7.0, 9.0, 8.0],
    ])?;

    println!("Original matrix A ({}×{}):", a.rows(), a.cols());
    println!("{}", a);

    let (_, info) = invert(&a, &InverseConfig::default())?;
    println!("\nSolve info: {}", info);

    let mut cached = CachedMatrix::new(a);

    println!("\nFirst request (computes):");
    println!("{}", cache_solve(&mut cached)?);

    println!("\nSecond request (cached: {}):", cached.is_cached());
    println!("{}", cache_solve(&mut cached)?);

    cached.set(Matrix::from_rows(vec![vec![4.0, 0.0], vec![0.0, 4.0]])?);
    println!("\nAfter set(), cached: {}", cached.is_cached());
    println!("{}", cache_solve(&mut cached)?);

    cached.set(Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]])?);
    match cache_solve(&mut cached) {
        Ok(inverse) => println!("\nUnexpected inverse:\n{}", inverse),
        Err(e) => println!("\n✗ Singular matrix rejected: {}", e),
    }
    println!("cached after failure: {}", cached.is_cached());

    Ok(())
}

//! Test infrastructure and utilities.


// Re-export CPU references for use in other tests
pub use cache_tests::{diag, CountingInverter};
pub use lu_tests::{cpu_matmul, dominant_matrix, max_abs_diff};

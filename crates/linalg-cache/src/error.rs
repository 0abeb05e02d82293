//! Error types and diagnostic information for matrix inversion.

use core::fmt;
use thiserror::Error;

/// Errors that can occur while building or inverting a matrix.
///
/// Any error returned by an [`Inverter`](crate::Inverter) is an inversion
/// error: `cache_solve` surfaces it unchanged and leaves the cache empty.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Singular matrix detected during factorization.
    #[error("Singular matrix: pivot at index {index} is zero or too small (value: {value})")]
    SingularPivot {
        /// Index of the singular pivot
        index: usize,
        /// Value of the pivot
        value: f64,
    },

    /// Numerical instability detected.
    #[error("Numerical instability detected: condition number {cond} exceeds threshold {threshold}")]
    NumericalInstability {
        /// Estimated condition number
        cond: f64,
        /// Threshold that was exceeded
        threshold: f64,
    },

    /// Invalid matrix shape.
    #[error("Invalid shape: {reason}")]
    InvalidShape {
        /// Description of the shape error
        reason: String,
    },

    /// The inverse has an entry that is not finite in the given element type.
    #[error("Inverse overflows {elem}: entry {index} is not finite")]
    Overflow {
        /// Row-major index of the first non-finite entry
        index: usize,
        /// Element type the entry was computed or stored in
        elem: &'static str,
    },

    /// Failure reported by a custom inversion routine.
    #[error("Inversion failed: {0}")]
    Inversion(String),
}

/// Result type for linear algebra operations.
pub type LinalgResult<T> = Result<T, LinalgError>;

/// Quality indicator for a computed inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveQuality {
    /// High confidence in accuracy (condition < 1e6).
    Excellent,
    /// Acceptable, but monitor residuals (condition < 1e10).
    Good,
    /// Numerically challenging, use with caution (condition >= 1e10).
    Marginal,
}

impl SolveQuality {
    /// Classify a 1-norm condition number.
    pub fn from_condition(cond: f64) -> Self {
        match cond {
            c if c < 1e6 => SolveQuality::Excellent,
            c if c < 1e10 => SolveQuality::Good,
            _ => SolveQuality::Marginal,
        }
    }
}

impl fmt::Display for SolveQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveQuality::Excellent => write!(f, "excellent"),
            SolveQuality::Good => write!(f, "good"),
            SolveQuality::Marginal => write!(f, "marginal"),
        }
    }
}

/// Diagnostic information returned with a successful inversion.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveInfo {
    /// Condition number in the 1-norm, `||A||_1 * ||A^-1||_1`.
    pub condition_estimate: Option<f64>,

    /// Smallest absolute pivot seen during factorization.
    pub min_pivot: Option<f64>,

    /// Numerical quality indicator.
    pub quality: SolveQuality,
}

impl SolveInfo {
    /// Create a new SolveInfo with default values.
    pub fn new() -> Self {
        Self {
            condition_estimate: None,
            min_pivot: None,
            quality: SolveQuality::Good,
        }
    }

    /// Set the condition number estimate and update quality.
    pub fn with_condition(mut self, cond: f64) -> Self {
        self.condition_estimate = Some(cond);
        self.quality = SolveQuality::from_condition(cond);
        self
    }

    /// Set the smallest pivot magnitude.
    pub fn with_min_pivot(mut self, pivot: f64) -> Self {
        self.min_pivot = Some(pivot);
        self
    }

    /// Manually set the quality indicator.
    pub fn with_quality(mut self, quality: SolveQuality) -> Self {
        self.quality = quality;
        self
    }
}

impl Default for SolveInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SolveInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolveInfo {{ quality: {}", self.quality)?;

        if let Some(cond) = self.condition_estimate {
            write!(f, ", cond: {:.2e}", cond)?;
        }

        if let Some(pivot) = self.min_pivot {
            write!(f, ", min pivot: {:.2e}", pivot)?;
        }

        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_info_quality() {
        let info = SolveInfo::new().with_condition(1e5);
        assert_eq!(info.quality, SolveQuality::Excellent);

        let info = SolveInfo::new().with_condition(1e8);
        assert_eq!(info.quality, SolveQuality::Good);

        let info = SolveInfo::new().with_condition(1e12);
        assert_eq!(info.quality, SolveQuality::Marginal);
    }

    #[test]
    fn test_solve_info_builder() {
        let info = SolveInfo::new()
            .with_condition(1e7)
            .with_min_pivot(0.25)
            .with_quality(SolveQuality::Marginal);

        assert_eq!(info.condition_estimate, Some(1e7));
        assert_eq!(info.min_pivot, Some(0.25));
        assert_eq!(info.quality, SolveQuality::Marginal);
    }

    #[test]
    fn test_solve_info_display() {
        let info = SolveInfo::new().with_condition(2.0);
        assert_eq!(format!("{}", info), "SolveInfo { quality: excellent, cond: 2.00e0 }");
    }

    #[test]
    fn test_error_messages() {
        let err = LinalgError::SingularPivot { index: 1, value: 0.0 };
        assert_eq!(
            err.to_string(),
            "Singular matrix: pivot at index 1 is zero or too small (value: 0)"
        );

        let err = LinalgError::InvalidShape {
            reason: "expected square matrix, got 2×3".into(),
        };
        assert_eq!(err.to_string(), "Invalid shape: expected square matrix, got 2×3");

        let err = LinalgError::Overflow { index: 3, elem: "f16" };
        assert_eq!(err.to_string(), "Inverse overflows f16: entry 3 is not finite");
    }
}

//! Element trait system for matrix storage.
//!
//! Matrices are stored in their element type (`EG` in the usual
//! global/working/accumulation split) while the inversion routine always
//! works and accumulates in `f64`. This keeps half-precision storage usable
//! without a half-precision factorization.

use core::fmt::Debug;

/// Storage element of a [`Matrix`](crate::Matrix).
///
/// # Example
///
/// ```
/// use linalg_cache::Element;
///
/// let x = half::f16::from_working(0.5);
/// assert_eq!(x.to_working(), 0.5);
/// ```
pub trait Element: Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Short name used in diagnostics.
    const NAME: &'static str;

    /// Machine epsilon of the storage type, expressed in working precision.
    const EPSILON: f64;

    /// Widen to working precision.
    fn to_working(self) -> f64;

    /// Narrow from working precision, rounding to nearest.
    fn from_working(value: f64) -> Self;
}

impl Element for f64 {
    const NAME: &'static str = "f64";
    const EPSILON: f64 = f64::EPSILON;

    #[inline]
    fn to_working(self) -> f64 {
        self
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        value
    }
}

impl Element for f32 {
    const NAME: &'static str = "f32";
    const EPSILON: f64 = f32::EPSILON as f64;

    #[inline]
    fn to_working(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        value as f32
    }
}

/// Half precision storage.
///
/// Warning: the rounded inverse may have limited accuracy for
/// ill-conditioned problems.
impl Element for half::f16 {
    const NAME: &'static str = "f16";
    const EPSILON: f64 = 9.765_625e-4;

    #[inline]
    fn to_working(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        half::f16::from_f64(value)
    }
}

/// bfloat16 storage: same exponent range as f32, less mantissa than f16.
impl Element for half::bf16 {
    const NAME: &'static str = "bf16";
    const EPSILON: f64 = 7.812_5e-3;

    #[inline]
    fn to_working(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_working(value: f64) -> Self {
        half::bf16::from_f64(value)
    }
}

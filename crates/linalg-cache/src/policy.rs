//! Global default policy for inversion.
//!
//! [`cache_solve`](crate::cache_solve) and
//! [`SharedCachedMatrix::solve`](crate::SharedCachedMatrix::solve) read the
//! process-wide [`InverseConfig`] from here. Callers that need per-call
//! options use the `*_with` variants instead.

use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::InverseConfig;

static GLOBAL_POLICY: Lazy<RwLock<InverseConfig>> =
    Lazy::new(|| RwLock::new(InverseConfig::default()));

/// Set the global inversion policy.
///
/// Already cached inverses are not recomputed.
///
/// # Example
///
/// ```
/// use linalg_cache::{get_inverse_policy, set_inverse_policy, InverseConfig};
///
/// set_inverse_policy(InverseConfig::default().with_max_condition(1e8));
/// assert_eq!(get_inverse_policy().max_condition, Some(1e8));
/// ```
pub fn set_inverse_policy(config: InverseConfig) {
    debug!(?config, "inverse policy updated");
    *GLOBAL_POLICY.write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// Get the current global inversion policy.
pub fn get_inverse_policy() -> InverseConfig {
    *GLOBAL_POLICY.read().unwrap_or_else(PoisonError::into_inner)
}

/// Restore the default inversion policy.
pub fn reset_inverse_policy() {
    set_inverse_policy(InverseConfig::default());
}

//! High-level solver wrappers.
//!
//! This module provides the inversion seam ([`Inverter`](inverse::Inverter))
//! and the memoizing entry points built on it.

pub mod inverse;

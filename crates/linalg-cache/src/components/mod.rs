//! Core linear algebra components.
//!
//! This module contains the building blocks used by the inversion routine:
//! - Norms and condition estimation
//! - LU factorization, triangular solves, and explicit inverse

pub mod norm;
pub mod lu;

//! Arithmetic utilities for pair calculations.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on [`Amount`](crate::domain::Amount) and [`mul_div`], the 256-bit
//! widening ratio used wherever the pool contracts call `full_mul`.

mod checked;
mod mul_div;

pub use checked::CheckedArithmetic;
pub use mul_div::{isqrt_product, mul_div};

//! 256-bit amounts and directional multiply-divide
//!
//! All share/asset conversions reduce to `x * y / d` with an explicit
//! rounding direction. The product is formed first so that precision is
//! only lost in the single final division.

use serde::{Deserialize, Serialize};

pub use alloy_primitives::U256;

use crate::errors::NumericError;

/// Rounding direction for an integer division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Truncate toward zero (floor for unsigned values)
    Down,
    /// Round any remainder up (ceiling)
    Up,
}

/// Compute `x * y / denominator` rounded in the given direction.
///
/// Ceiling is `(x * y + denominator - 1) / denominator`. Fails with
/// `Overflow` when an intermediate does not fit in 256 bits and with
/// `DivisionByZero` when `denominator` is zero.
pub fn mul_div(
    x: U256,
    y: U256,
    denominator: U256,
    rounding: Rounding,
) -> Result<U256, NumericError> {
    if denominator.is_zero() {
        return Err(NumericError::DivisionByZero);
    }

    let product = x.checked_mul(y).ok_or(NumericError::Overflow)?;

    match rounding {
        Rounding::Down => Ok(product / denominator),
        Rounding::Up => {
            let bias = denominator - U256::from(1u64);
            let numerator = product.checked_add(bias).ok_or(NumericError::Overflow)?;
            Ok(numerator / denominator)
        }
    }
}

/// Floor variant of [`mul_div`].
pub fn mul_div_down(x: U256, y: U256, denominator: U256) -> Result<U256, NumericError> {
    mul_div(x, y, denominator, Rounding::Down)
}

/// Ceiling variant of [`mul_div`].
pub fn mul_div_up(x: U256, y: U256, denominator: U256) -> Result<U256, NumericError> {
    mul_div(x, y, denominator, Rounding::Up)
}

//! Checked arithmetic for share accounting
//!
//! All share/asset conversions go through [`mul_div`] / [`mul_div_up`], which
//! keep the intermediate product in 512 bits so `a * b` never overflows.
use odra::casper_types::{U256, U512};
use crate::errors::VaultError;

/// Fixed-point scale of the unit conversion factor (1e18 = identity)
pub const SHARE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_add(b).ok_or(VaultError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_sub(b).ok_or(VaultError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, VaultError> {
        a.checked_mul(b).ok_or(VaultError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, VaultError> {
        if b.is_zero() {
            return Err(VaultError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// Returns the minimum of two U256 values
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b { a } else { b }
    }
}

fn widen(value: U256) -> U512 {
    let mut bytes = [0u8; 32];
    value.to_little_endian(&mut bytes);
    U512::from_little_endian(&bytes)
}

fn narrow(value: U512) -> Result<U256, VaultError> {
    if value.bits() > 256 {
        return Err(VaultError::Overflow);
    }
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    Ok(U256::from_little_endian(&bytes[..32]))
}

/// `floor(a * b / denominator)` with a 512-bit intermediate product
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, VaultError> {
    if denominator.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// `ceil(a * b / denominator)` with a 512-bit intermediate product
pub fn mul_div_up(a: U256, b: U256, denominator: U256) -> Result<U256, VaultError> {
    if denominator.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    let product = widen(a) * widen(b);
    let denominator = widen(denominator);
    let mut quotient = product / denominator;
    if !(product % denominator).is_zero() {
        quotient += U512::one();
    }
    narrow(quotient)
}

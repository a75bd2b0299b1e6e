//! Fee calculator and share splitter
//!
//! Fees are charged on assets but paid in shares: the fee's fraction of the
//! gross asset amount decides how much of an operation's share amount is
//! diverted to the fee pool.
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::math::{mul_div, mul_div_up};

/// Basis point denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Highest fee rate the wrapper accepts (10%)
pub const MAX_FEE_RATE_BPS: u32 = 1_000;

/// Rejects rates above [`MAX_FEE_RATE_BPS`]
pub fn validate_fee_rate(rate_bps: u32) -> Result<u32, VaultError> {
    if rate_bps > MAX_FEE_RATE_BPS {
        return Err(VaultError::InvalidFeeRate);
    }
    Ok(rate_bps)
}

/// `floor(gross * rate_bps / 10000)`
///
/// Splits `gross` into whole and partial multiples of the denominator so the
/// product never leaves 256 bits. Requires `rate_bps <= BPS_DENOMINATOR`.
pub fn calculate_fee(gross: U256, rate_bps: u32) -> U256 {
    let denominator = U256::from(BPS_DENOMINATOR);
    let rate = U256::from(rate_bps);
    (gross / denominator) * rate + (gross % denominator) * rate / denominator
}

/// Smallest gross amount whose net after a `rate_bps` fee covers `net`
///
/// `ceil(net * 10000 / (10000 - rate_bps))`
pub fn gross_up(net: U256, rate_bps: u32) -> Result<U256, VaultError> {
    if rate_bps == 0 {
        return Ok(net);
    }
    if rate_bps >= BPS_DENOMINATOR {
        return Err(VaultError::InvalidFeeRate);
    }
    mul_div_up(
        net,
        U256::from(BPS_DENOMINATOR),
        U256::from(BPS_DENOMINATOR - rate_bps),
    )
}

/// Partitions `total_shares` into `(user_shares, fee_shares)`
///
/// `fee_shares = floor(total_shares * fee_assets / gross_assets)` and the user
/// keeps the remainder, so the two parts always sum to `total_shares`.
pub fn split_shares(
    total_shares: U256,
    gross_assets: U256,
    fee_assets: U256,
) -> Result<(U256, U256), VaultError> {
    if fee_assets.is_zero() {
        return Ok((total_shares, U256::zero()));
    }
    if gross_assets.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    if fee_assets > gross_assets {
        return Err(VaultError::InvalidFeeSplit);
    }
    let fee_shares = mul_div(total_shares, fee_assets, gross_assets)?;
    Ok((total_shares - fee_shares, fee_shares))
}

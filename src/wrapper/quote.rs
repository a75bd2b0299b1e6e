//! Fee-inclusive quotes for entering and leaving the wrapper
//!
//! Quotes are computed in local share units and hold everything an operation
//! writes to the ledger. The same quote backs both the `preview_*` views and
//! the state-changing entry points.

use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::fees::{calculate_fee, split_shares};

/// Split of a deposit between the receiver and the fee pool
pub struct DepositQuote {
    /// Gross assets deposited
    pub assets: U256,
    /// Input fee charged on `assets`
    pub fee_assets: U256,
    /// Shares credited to the receiver
    pub user_shares: U256,
    /// Shares credited to the fee pool
    pub fee_shares: U256,
}

impl DepositQuote {
    /// `local_shares` is what the vault issues for `assets`, in local units
    pub fn new(assets: U256, input_fee_bps: u32, local_shares: U256) -> Result<Self, VaultError> {
        let fee_assets = calculate_fee(assets, input_fee_bps);
        let (user_shares, fee_shares) = split_shares(local_shares, assets, fee_assets)?;
        Ok(Self {
            assets,
            fee_assets,
            user_shares,
            fee_shares,
        })
    }
}

/// Split of a redeem between the vault and the fee pool
pub struct ExitQuote {
    /// Shares debited from the owner
    pub shares: U256,
    /// Assets the debited shares are worth before the fee
    pub gross_assets: U256,
    /// Output fee charged on `gross_assets`
    pub fee_assets: U256,
    /// Shares redeemed from the vault for the receiver
    pub burn_shares: U256,
    /// Shares moved to the fee pool
    pub fee_shares: U256,
}

impl ExitQuote {
    pub fn new(shares: U256, gross_assets: U256, output_fee_bps: u32) -> Result<Self, VaultError> {
        let fee_assets = calculate_fee(gross_assets, output_fee_bps);
        let (burn_shares, fee_shares) = split_shares(shares, gross_assets, fee_assets)?;
        Ok(Self {
            shares,
            gross_assets,
            fee_assets,
            burn_shares,
            fee_shares,
        })
    }
}

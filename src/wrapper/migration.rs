//! Vault migration checks and rebasing
//!
//! Migration swaps every vault share the wrapper holds for shares of a new
//! vault. Local balances stay as they are; only the conversion factor moves,
//! by the ratio of shares received to shares given up.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::math::mul_div;

/// Rejects a migration before any vault is touched
pub fn validate_migration(
    current_vault: Address,
    new_vault: Address,
    asset: Address,
    new_vault_asset: Address,
) -> Result<(), VaultError> {
    if new_vault == current_vault {
        return Err(VaultError::SameVault);
    }
    if new_vault_asset != asset {
        return Err(VaultError::AssetMismatch);
    }
    Ok(())
}

/// Conversion factor after trading `shares_before` old-vault shares for
/// `shares_after` new-vault shares
///
/// `factor * shares_after / shares_before`, rounded down.
pub fn rebase_factor(
    factor: U256,
    shares_before: U256,
    shares_after: U256,
) -> Result<U256, VaultError> {
    if shares_before.is_zero() {
        return Err(VaultError::NoAssetsToMigrate);
    }
    let rebased = mul_div(factor, shares_after, shares_before)?;
    if rebased.is_zero() {
        return Err(VaultError::InvalidConversionFactor);
    }
    Ok(rebased)
}

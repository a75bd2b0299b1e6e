//! Accounting ledger of the vault wrapper
//!
//! Every balance here, principal and fee pool alike, is kept in local share
//! units. One local unit is worth `unit_conversion_factor / SHARE_SCALE`
//! shares of the active vault. Migration rescales only that factor, so the
//! relative claims of all holders survive a change of vault untouched.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::fees::validate_fee_rate;
use crate::math::{mul_div, mul_div_up, SafeMath, SHARE_SCALE};
use super::migration::rebase_factor;

/// Schema version written by `init`
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Target version when upgrading a ledger stored at `from`
///
/// Versions 0 and 1 predate the unit conversion factor.
pub fn schema_upgrade_target(from: u32) -> Result<u32, VaultError> {
    match from {
        0 | 1 => Ok(CURRENT_SCHEMA_VERSION),
        CURRENT_SCHEMA_VERSION => Err(VaultError::SchemaUpToDate),
        _ => Err(VaultError::UnsupportedSchemaVersion),
    }
}

/// Share ledger owned by the wrapper
#[odra::module]
pub struct Ledger {
    /// Layout version of this ledger
    schema_version: Var<u32>,
    /// Active underlying vault
    vault: Var<Address>,
    /// Base asset, fixed at init
    asset: Var<Address>,
    /// Fee on deposit/mint, in basis points
    input_fee_bps: Var<u32>,
    /// Fee on withdraw/redeem, in basis points
    output_fee_bps: Var<u32>,
    /// Shares owned by the fee pool
    total_fee_shares: Var<U256>,
    /// Sum of all principal balances
    total_principal_shares: Var<U256>,
    /// Principal balances
    balances: Mapping<Address, U256>,
    /// Share allowances: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Vault units per local unit, scaled by `SHARE_SCALE`
    unit_conversion_factor: Var<U256>,
}

#[odra::module]
impl Ledger {
    /// Fresh ledger: zero fees, empty fee pool, identity conversion factor
    pub fn init(&mut self, vault: Address, asset: Address) {
        self.schema_version.set(CURRENT_SCHEMA_VERSION);
        self.vault.set(vault);
        self.asset.set(asset);
        self.input_fee_bps.set(0);
        self.output_fee_bps.set(0);
        self.total_fee_shares.set(U256::zero());
        self.total_principal_shares.set(U256::zero());
        self.unit_conversion_factor.set(U256::from(SHARE_SCALE));
    }

    // ========================================
    // Views
    // ========================================

    pub fn schema_version(&self) -> u32 {
        self.schema_version.get_or_default()
    }

    pub fn vault(&self) -> Address {
        self.vault.get_or_revert_with(VaultError::NotInitialized)
    }

    pub fn asset(&self) -> Address {
        self.asset.get_or_revert_with(VaultError::NotInitialized)
    }

    pub fn input_fee_bps(&self) -> u32 {
        self.input_fee_bps.get_or_default()
    }

    pub fn output_fee_bps(&self) -> u32 {
        self.output_fee_bps.get_or_default()
    }

    pub fn total_fee_shares(&self) -> U256 {
        self.total_fee_shares.get_or_default()
    }

    pub fn total_principal_shares(&self) -> U256 {
        self.total_principal_shares.get_or_default()
    }

    /// Principal shares plus fee pool
    pub fn total_shares(&self) -> U256 {
        self.checked(SafeMath::add(
            self.total_principal_shares(),
            self.total_fee_shares(),
        ))
    }

    pub fn balance_of(&self, principal: Address) -> U256 {
        self.balances.get(&principal).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn unit_conversion_factor(&self) -> U256 {
        self.unit_conversion_factor
            .get_or_revert_with(VaultError::InvalidConversionFactor)
    }

    // ========================================
    // Unit Conversion
    // ========================================

    /// Local units to vault shares, rounding down
    pub fn to_vault_units(&self, local: U256) -> U256 {
        self.checked(mul_div(
            local,
            self.unit_conversion_factor(),
            U256::from(SHARE_SCALE),
        ))
    }

    /// Local units to vault shares, rounding up
    pub fn to_vault_units_up(&self, local: U256) -> U256 {
        self.checked(mul_div_up(
            local,
            self.unit_conversion_factor(),
            U256::from(SHARE_SCALE),
        ))
    }

    /// Vault shares to local units, rounding down
    pub fn to_local_units(&self, vault_units: U256) -> U256 {
        self.checked(mul_div(
            vault_units,
            U256::from(SHARE_SCALE),
            self.unit_conversion_factor(),
        ))
    }

    /// Vault shares to local units, rounding up
    pub fn to_local_units_up(&self, vault_units: U256) -> U256 {
        self.checked(mul_div_up(
            vault_units,
            U256::from(SHARE_SCALE),
            self.unit_conversion_factor(),
        ))
    }

    // ========================================
    // Mutations
    // ========================================

    /// Returns the previous rate
    pub fn set_input_fee_bps(&mut self, rate_bps: u32) -> u32 {
        let rate_bps = self.checked(validate_fee_rate(rate_bps));
        let old = self.input_fee_bps();
        self.input_fee_bps.set(rate_bps);
        old
    }

    /// Returns the previous rate
    pub fn set_output_fee_bps(&mut self, rate_bps: u32) -> u32 {
        let rate_bps = self.checked(validate_fee_rate(rate_bps));
        let old = self.output_fee_bps();
        self.output_fee_bps.set(rate_bps);
        old
    }

    pub fn credit(&mut self, principal: Address, shares: U256) {
        let balance = self.checked(SafeMath::add(self.balance_of(principal), shares));
        let total = self.checked(SafeMath::add(self.total_principal_shares(), shares));
        self.balances.set(&principal, balance);
        self.total_principal_shares.set(total);
    }

    pub fn debit(&mut self, principal: Address, shares: U256) {
        let balance = self.balance_of(principal);
        if balance < shares {
            self.env().revert(VaultError::InsufficientShares);
        }
        let total = self.checked(SafeMath::sub(self.total_principal_shares(), shares));
        self.balances.set(&principal, balance - shares);
        self.total_principal_shares.set(total);
    }

    pub fn accrue_fees(&mut self, shares: U256) {
        let total = self.checked(SafeMath::add(self.total_fee_shares(), shares));
        self.total_fee_shares.set(total);
    }

    pub fn release_fees(&mut self, shares: U256) {
        let total = self.total_fee_shares();
        if total < shares {
            self.env().revert(VaultError::InsufficientFeeShares);
        }
        self.total_fee_shares.set(total - shares);
    }

    pub fn approve(&mut self, owner: Address, spender: Address, shares: U256) {
        self.allowances.set(&(owner, spender), shares);
    }

    pub fn spend_allowance(&mut self, owner: Address, spender: Address, shares: U256) {
        let allowance = self.allowance(owner, spender);
        if allowance < shares {
            self.env().revert(VaultError::InsufficientAllowance);
        }
        self.allowances.set(&(owner, spender), allowance - shares);
    }

    /// Point the ledger at `new_vault` and rescale the conversion factor.
    /// Returns the new factor.
    pub fn rebase(&mut self, new_vault: Address, shares_before: U256, shares_after: U256) -> U256 {
        let factor = self.checked(rebase_factor(
            self.unit_conversion_factor(),
            shares_before,
            shares_after,
        ));
        self.vault.set(new_vault);
        self.unit_conversion_factor.set(factor);
        factor
    }

    /// Bring a legacy ledger to the current layout. Returns the old version.
    pub fn upgrade_schema(&mut self) -> u32 {
        let from = self.schema_version();
        let to = self.checked(schema_upgrade_target(from));
        if self.unit_conversion_factor.get().is_none() {
            self.unit_conversion_factor.set(U256::from(SHARE_SCALE));
        }
        self.schema_version.set(to);
        from
    }

    fn checked<T>(&self, value: Result<T, VaultError>) -> T {
        value.unwrap_or_else(|error| self.env().revert(error))
    }
}

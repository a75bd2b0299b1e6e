//! CEP-4626 Tokenized Vault Standard Interface
//!
//! A vault represents shares of a single underlying CEP-18 token. This is the
//! surface the wrapper calls on its underlying vault; [`crate::yield_vault::YieldVault`]
//! is a conforming implementation.

use odra::prelude::*;
use odra::casper_types::U256;

/// CEP-4626 Tokenized Vault Interface
#[odra::external_contract]
pub trait Cep4626Vault {
    // ============================================
    // Vault Metadata
    // ============================================

    /// Returns the address of the underlying CEP-18 token
    fn asset(&self) -> Address;

    /// Returns the total amount of the underlying asset managed by the vault
    fn total_assets(&self) -> U256;

    /// Share balance of `owner`
    fn balance_of(&self, owner: Address) -> U256;

    // ============================================
    // Conversion Functions
    // ============================================

    /// Converts an amount of assets to shares, rounding down
    fn convert_to_shares(&self, assets: U256) -> U256;

    /// Converts an amount of shares to assets, rounding down
    fn convert_to_assets(&self, shares: U256) -> U256;

    // ============================================
    // Preview Functions
    // ============================================

    /// Shares a `deposit` of `assets` would mint, no more than the real amount
    fn preview_deposit(&self, assets: U256) -> U256;

    /// Assets a `mint` of `shares` would pull, no fewer than the real amount
    fn preview_mint(&self, shares: U256) -> U256;

    /// Shares a `withdraw` of `assets` would burn, no fewer than the real amount
    fn preview_withdraw(&self, assets: U256) -> U256;

    /// Assets a `redeem` of `shares` would pay, no more than the real amount
    fn preview_redeem(&self, shares: U256) -> U256;

    // ============================================
    // Deposit/Mint Functions
    // ============================================

    /// Pulls `assets` from the caller via `transfer_from` and mints shares to `receiver`
    ///
    /// Returns the amount of shares minted
    fn deposit(&mut self, assets: U256, receiver: Address) -> U256;

    /// Mints exactly `shares` to `receiver`
    ///
    /// Returns the amount of assets pulled from the caller
    fn mint(&mut self, shares: U256, receiver: Address) -> U256;

    // ============================================
    // Withdraw/Redeem Functions
    // ============================================

    /// Burns `owner`'s shares and pays exactly `assets` to `receiver`
    ///
    /// Returns the amount of shares burned
    fn withdraw(&mut self, assets: U256, receiver: Address, owner: Address) -> U256;

    /// Burns exactly `shares` from `owner` and pays the assets to `receiver`
    ///
    /// Returns the amount of assets sent to receiver
    fn redeem(&mut self, shares: U256, receiver: Address, owner: Address) -> U256;
}

//! Vault Wrapper - fee-charging share accounting over a CEP-4626 vault
//!
//! Users deposit the base asset and receive wrapper shares; the wrapper
//! forwards the assets to the underlying vault. Input and output fees are
//! charged in assets but collected as shares in a separate fee pool, and the
//! wrapper's vault position always covers principal shares plus fee shares.
//!
//! Every state-changing entry point runs under a reentrancy lock, and any
//! revert (including one raised inside the vault or the token) rolls the
//! whole call back, ledger included.

use odra::prelude::*;
use odra::casper_types::account::AccountHash;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::cep4626::{Deposit as Cep4626Deposit, Withdraw as Cep4626Withdraw};
use crate::errors::VaultError;
use crate::events::{
    Approval, FeeCollected, FeeRateChanged, FeeSide, FeesWithdrawn, OwnershipTransferred, Paused,
    SchemaUpgraded, Unpaused, VaultMigrated,
};
use crate::fees::{calculate_fee, gross_up, MAX_FEE_RATE_BPS};
use crate::math::SafeMath;
use crate::token::Cep18TokenContractRef;
use super::adapter::VaultAdapter;
use super::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use super::migration::validate_migration;
use super::quote::{DepositQuote, ExitQuote};

/// The all-zero account, never a valid receiver or owner
pub fn null_address() -> Address {
    Address::Account(AccountHash::new([0u8; 32]))
}

/// Vault Wrapper contract
#[odra::module(events = [
    Cep4626Deposit,
    Cep4626Withdraw,
    Approval,
    FeeCollected,
    FeeRateChanged,
    FeesWithdrawn,
    VaultMigrated,
    Paused,
    Unpaused,
    OwnershipTransferred,
    SchemaUpgraded
])]
pub struct VaultWrapper {
    /// Share accounting
    ledger: SubModule<Ledger>,
    /// Admin for fees, pause and migration
    owner: Var<Address>,
    /// Whether user operations are paused
    paused: Var<bool>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl VaultWrapper {
    /// Initialize the wrapper over `vault`, which must hold `asset`
    pub fn init(&mut self, asset: Address, vault: Address) {
        if VaultAdapter::new(self.env(), vault).asset() != asset {
            self.env().revert(VaultError::AssetMismatch);
        }

        self.ledger.init(vault, asset);
        self.owner.set(self.env().caller());
        self.paused.set(false);
        self.locked.set(false);
    }

    // ========================================
    // User Operations
    // ========================================

    /// Deposit `assets` and credit the net shares to `receiver`
    ///
    /// # Returns
    /// Shares credited to `receiver`
    pub fn deposit(&mut self, assets: U256, receiver: Address) -> U256 {
        self.ensure_not_paused();
        self.ensure_nonzero(assets);
        self.ensure_not_null(receiver);
        self.lock();

        let caller = self.env().caller();
        let quote = self.deposit_internal(caller, assets, receiver);

        self.unlock();
        quote.user_shares
    }

    /// Credit at least `shares` net shares to `receiver`
    ///
    /// # Returns
    /// Assets pulled from the caller
    pub fn mint(&mut self, shares: U256, receiver: Address) -> U256 {
        self.ensure_not_paused();
        self.ensure_nonzero(shares);
        self.ensure_not_null(receiver);
        self.lock();

        let assets = self.mint_assets(shares);
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAssets);
        }

        let caller = self.env().caller();
        let quote = self.deposit_internal(caller, assets, receiver);
        if quote.user_shares < shares {
            self.env().revert(VaultError::MintShortfall);
        }

        self.unlock();
        assets
    }

    /// Pay `assets` net of the output fee to `receiver` from `owner`'s shares
    ///
    /// # Returns
    /// Shares debited from `owner`
    pub fn withdraw(&mut self, assets: U256, receiver: Address, owner: Address) -> U256 {
        self.ensure_not_paused();
        self.ensure_nonzero(assets);
        self.ensure_not_null(receiver);
        self.ensure_not_null(owner);
        self.lock();

        let (gross_assets, shares) = self.quote_withdraw(assets);
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroShares);
        }

        let caller = self.env().caller();
        self.take_shares(caller, owner, shares);

        // the vault pays exactly `assets`; whatever the debit covers beyond
        // the shares it burned stays behind as the fee
        let vault_shares = self.adapter().withdraw(assets, receiver);
        let burned = self.ledger.to_local_units_up(vault_shares);
        let fee_shares = self.checked(SafeMath::sub(shares, burned));
        self.ledger.accrue_fees(fee_shares);

        let fee_assets = calculate_fee(gross_assets, self.ledger.output_fee_bps());
        self.emit_exit(caller, receiver, owner, assets, shares, fee_assets, fee_shares);

        self.unlock();
        shares
    }

    /// Debit exactly `shares` from `owner` and pay the net assets to `receiver`
    ///
    /// # Returns
    /// Assets paid to `receiver`
    pub fn redeem(&mut self, shares: U256, receiver: Address, owner: Address) -> U256 {
        self.ensure_not_paused();
        self.ensure_nonzero(shares);
        self.ensure_not_null(receiver);
        self.ensure_not_null(owner);
        self.lock();

        let quote = self.quote_redeem(shares);
        let caller = self.env().caller();
        let assets = self.exit_internal(caller, receiver, owner, &quote);

        self.unlock();
        assets
    }

    /// Let `spender` withdraw or redeem up to `shares` of the caller's shares
    pub fn approve(&mut self, spender: Address, shares: U256) {
        let owner = self.env().caller();
        self.ensure_not_null(spender);
        self.ledger.approve(owner, spender, shares);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: shares,
        });
    }

    // ========================================
    // Previews
    // ========================================

    /// Net shares a deposit of `assets` would credit
    pub fn preview_deposit(&self, assets: U256) -> U256 {
        let local_shares = self
            .ledger
            .to_local_units(self.adapter().preview_deposit(assets));
        self.checked(DepositQuote::new(
            assets,
            self.ledger.input_fee_bps(),
            local_shares,
        ))
        .user_shares
    }

    /// Assets a mint of `shares` would pull
    pub fn preview_mint(&self, shares: U256) -> U256 {
        self.mint_assets(shares)
    }

    /// Shares a withdraw of `assets` would debit
    pub fn preview_withdraw(&self, assets: U256) -> U256 {
        self.quote_withdraw(assets).1
    }

    /// Net assets a redeem of `shares` would pay
    pub fn preview_redeem(&self, shares: U256) -> U256 {
        let quote = self.quote_redeem(shares);
        let vault_shares = self.ledger.to_vault_units(quote.burn_shares);
        self.adapter().preview_redeem(vault_shares)
    }

    pub fn max_redeem(&self, owner: Address) -> U256 {
        if self.is_paused() {
            return U256::zero();
        }
        self.balance_of(owner)
    }

    pub fn max_withdraw(&self, owner: Address) -> U256 {
        let shares = self.max_redeem(owner);
        if shares.is_zero() {
            return U256::zero();
        }
        self.preview_redeem(shares)
    }

    // ========================================
    // Views
    // ========================================

    pub fn asset(&self) -> Address {
        self.ledger.asset()
    }

    pub fn vault(&self) -> Address {
        self.ledger.vault()
    }

    pub fn balance_of(&self, principal: Address) -> U256 {
        self.ledger.balance_of(principal)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    pub fn total_fee_shares(&self) -> U256 {
        self.ledger.total_fee_shares()
    }

    pub fn total_principal_shares(&self) -> U256 {
        self.ledger.total_principal_shares()
    }

    /// Principal shares plus fee pool, in local units
    pub fn total_shares(&self) -> U256 {
        self.ledger.total_shares()
    }

    pub fn input_fee_rate(&self) -> u32 {
        self.ledger.input_fee_bps()
    }

    pub fn output_fee_rate(&self) -> u32 {
        self.ledger.output_fee_bps()
    }

    pub fn max_fee_rate(&self) -> u32 {
        MAX_FEE_RATE_BPS
    }

    pub fn unit_conversion_factor(&self) -> U256 {
        self.ledger.unit_conversion_factor()
    }

    pub fn schema_version(&self) -> u32 {
        self.ledger.schema_version()
    }

    /// Vault shares the wrapper holds in the active vault
    pub fn vault_share_balance(&self) -> U256 {
        self.adapter().share_balance()
    }

    /// Assets backing every wrapper share, fee pool included
    pub fn total_assets(&self) -> U256 {
        let adapter = self.adapter();
        adapter.convert_to_assets(adapter.share_balance())
    }

    /// Fee-free asset value of `shares`
    pub fn convert_to_assets(&self, shares: U256) -> U256 {
        let vault_shares = self.ledger.to_vault_units(shares);
        self.adapter().convert_to_assets(vault_shares)
    }

    /// Fee-free share amount for `assets`
    pub fn convert_to_shares(&self, assets: U256) -> U256 {
        let vault_shares = self.adapter().convert_to_shares(assets);
        self.ledger.to_local_units(vault_shares)
    }

    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(VaultError::Unauthorized)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    // ========================================
    // Admin Functions
    // ========================================

    pub fn set_input_fee_rate(&mut self, rate_bps: u32) {
        self.only_owner();
        let old_rate_bps = self.ledger.set_input_fee_bps(rate_bps);
        self.env().emit_event(FeeRateChanged {
            side: FeeSide::Input,
            old_rate_bps,
            new_rate_bps: rate_bps,
        });
    }

    pub fn set_output_fee_rate(&mut self, rate_bps: u32) {
        self.only_owner();
        let old_rate_bps = self.ledger.set_output_fee_bps(rate_bps);
        self.env().emit_event(FeeRateChanged {
            side: FeeSide::Output,
            old_rate_bps,
            new_rate_bps: rate_bps,
        });
    }

    /// Redeem `shares` from the fee pool and pay the assets to `receiver`
    pub fn withdraw_fees(&mut self, shares: U256, receiver: Address) -> U256 {
        self.only_owner();
        self.ensure_nonzero(shares);
        self.ensure_not_null(receiver);
        self.lock();

        self.ledger.release_fees(shares);
        let vault_shares = self.ledger.to_vault_units(shares);
        if vault_shares.is_zero() {
            self.env().revert(VaultError::ZeroAssets);
        }
        let assets = self.adapter().redeem(vault_shares, receiver);

        self.env().emit_event(FeesWithdrawn {
            receiver,
            shares,
            assets,
        });

        self.unlock();
        assets
    }

    pub fn pause(&mut self) {
        self.only_owner();
        self.paused.set(true);
        self.env().emit_event(Paused {
            by: self.env().caller(),
        });
    }

    pub fn unpause(&mut self) {
        self.only_owner();
        self.paused.set(false);
        self.env().emit_event(Unpaused {
            by: self.env().caller(),
        });
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.only_owner();
        self.ensure_not_null(new_owner);
        let previous_owner = self.owner();
        self.owner.set(new_owner);
        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    /// Move every asset from the active vault into `new_vault`
    ///
    /// Redeems all vault shares, deposits the proceeds into `new_vault` and
    /// rescales the unit conversion factor by `shares_received / shares_redeemed`.
    pub fn migrate_vault(&mut self, new_vault: Address) {
        self.only_owner();
        self.lock();

        let old_adapter = self.adapter();
        let new_adapter = VaultAdapter::new(self.env(), new_vault);
        self.checked(validate_migration(
            old_adapter.address(),
            new_vault,
            self.ledger.asset(),
            new_adapter.asset(),
        ));

        let shares_before = old_adapter.share_balance();
        if shares_before.is_zero() {
            self.env().revert(VaultError::NoAssetsToMigrate);
        }

        let assets_redeemed = old_adapter.redeem(shares_before, self.env().self_address());
        let shares_received = new_adapter.deposit(assets_redeemed);
        self.ledger.rebase(new_vault, shares_before, shares_received);

        self.env().emit_event(VaultMigrated {
            old_vault: old_adapter.address(),
            new_vault,
            assets_redeemed,
            shares_received,
        });

        self.unlock();
    }

    /// Bring a ledger written by an older release to the current schema
    pub fn upgrade_schema(&mut self) {
        self.only_owner();
        let from_version = self.ledger.upgrade_schema();
        self.env().emit_event(SchemaUpgraded {
            from_version,
            to_version: CURRENT_SCHEMA_VERSION,
        });
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn adapter(&self) -> VaultAdapter {
        VaultAdapter::new(self.env(), self.ledger.vault())
    }

    /// Pull, deposit into the vault, then split the issued shares
    fn deposit_internal(&mut self, caller: Address, assets: U256, receiver: Address) -> DepositQuote {
        self.pull_assets(caller, assets);

        let vault_shares = self.adapter().deposit(assets);
        let local_shares = self.ledger.to_local_units(vault_shares);
        let quote = self.checked(DepositQuote::new(
            assets,
            self.ledger.input_fee_bps(),
            local_shares,
        ));
        if quote.user_shares.is_zero() {
            self.env().revert(VaultError::ZeroShares);
        }

        self.ledger.accrue_fees(quote.fee_shares);
        self.ledger.credit(receiver, quote.user_shares);

        self.env().emit_event(Cep4626Deposit {
            sender: caller,
            owner: receiver,
            assets,
            shares: quote.user_shares,
        });
        if !quote.fee_shares.is_zero() {
            self.env().emit_event(FeeCollected {
                fee_assets: quote.fee_assets,
                fee_shares: quote.fee_shares,
            });
        }

        quote
    }

    /// Debit the owner, accrue the fee, then redeem the rest to `receiver`
    fn exit_internal(
        &mut self,
        caller: Address,
        receiver: Address,
        owner: Address,
        quote: &ExitQuote,
    ) -> U256 {
        self.take_shares(caller, owner, quote.shares);
        self.ledger.accrue_fees(quote.fee_shares);

        let vault_shares = self.ledger.to_vault_units(quote.burn_shares);
        if vault_shares.is_zero() {
            self.env().revert(VaultError::ZeroAssets);
        }
        let assets = self.adapter().redeem(vault_shares, receiver);
        if assets.is_zero() {
            self.env().revert(VaultError::ZeroAssets);
        }

        self.emit_exit(
            caller,
            receiver,
            owner,
            assets,
            quote.shares,
            quote.fee_assets,
            quote.fee_shares,
        );
        assets
    }

    /// Assets needed so the receiver nets `shares` after the input fee
    fn mint_assets(&self, shares: U256) -> U256 {
        let gross_shares = self.checked(gross_up(shares, self.ledger.input_fee_bps()));
        let vault_shares = self.ledger.to_vault_units_up(gross_shares);
        self.adapter().preview_mint(vault_shares)
    }

    /// Gross up `assets` by the output fee and price the shares it takes
    /// Gross assets and local shares to debit for a net withdrawal of `assets`
    fn quote_withdraw(&self, assets: U256) -> (U256, U256) {
        let gross_assets = self.checked(gross_up(assets, self.ledger.output_fee_bps()));
        let vault_shares = self.adapter().preview_withdraw(gross_assets);
        (gross_assets, self.ledger.to_local_units_up(vault_shares))
    }

    /// Spend the caller's allowance when acting for `owner`, then debit `owner`
    fn take_shares(&mut self, caller: Address, owner: Address, shares: U256) {
        if caller != owner {
            self.ledger.spend_allowance(owner, caller, shares);
        }
        self.ledger.debit(owner, shares);
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_exit(
        &self,
        caller: Address,
        receiver: Address,
        owner: Address,
        assets: U256,
        shares: U256,
        fee_assets: U256,
        fee_shares: U256,
    ) {
        self.env().emit_event(Cep4626Withdraw {
            sender: caller,
            receiver,
            owner,
            assets,
            shares,
        });
        if !fee_shares.is_zero() {
            self.env().emit_event(FeeCollected {
                fee_assets,
                fee_shares,
            });
        }
    }

    fn quote_redeem(&self, shares: U256) -> ExitQuote {
        let vault_shares = self.ledger.to_vault_units(shares);
        let gross_assets = self.adapter().preview_redeem(vault_shares);
        self.checked(ExitQuote::new(
            shares,
            gross_assets,
            self.ledger.output_fee_bps(),
        ))
    }

    fn pull_assets(&mut self, from: Address, amount: U256) {
        let mut token = Cep18TokenContractRef::new(self.env(), self.ledger.asset());
        if !token.transfer_from(from, self.env().self_address(), amount) {
            self.env().revert(VaultError::TransferFailed);
        }
    }

    /// Reentrancy lock
    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(VaultError::ReentrantCall);
        }
        self.locked.set(true);
    }

    /// Reentrancy unlock
    fn unlock(&mut self) {
        self.locked.set(false);
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(VaultError::Paused);
        }
    }

    fn ensure_nonzero(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
    }

    fn ensure_not_null(&self, address: Address) {
        if address == null_address() {
            self.env().revert(VaultError::NullAddress);
        }
    }

    fn only_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(VaultError::Unauthorized);
        }
    }

    fn checked<T>(&self, value: Result<T, VaultError>) -> T {
        value.unwrap_or_else(|error| self.env().revert(error))
    }
}

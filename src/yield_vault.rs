//! Reference CEP-4626 yield vault
//!
//! Stands in for the underlying vault on devnets and in tests. Yield is
//! modelled by `distribute_yield`, which adds assets without minting shares and
//! so raises the share price. The admin can halt deposits to simulate a vault
//! that refuses new funds.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::cep4626::{Deposit as Cep4626Deposit, Withdraw as Cep4626Withdraw};
use crate::errors::{VaultError, YieldVaultError};
use crate::math::{mul_div, mul_div_up, SafeMath};
use crate::token::Cep18TokenContractRef;

pub mod events {
    use odra::prelude::*;
    use odra::casper_types::U256;

    #[odra::event]
    pub struct YieldDistributed {
        pub from: Address,
        pub amount: U256,
        pub total_assets: U256,
    }

    #[odra::event]
    pub struct HaltStatusChanged {
        pub halted: bool,
    }
}

/// CEP-4626 vault over a single CEP-18 asset
#[odra::module(events = [
    Cep4626Deposit,
    Cep4626Withdraw,
    events::YieldDistributed,
    events::HaltStatusChanged
])]
pub struct YieldVault {
    /// Underlying CEP-18 token address
    asset: Var<Address>,
    /// Total supply of vault shares
    total_supply: Var<U256>,
    /// Share balances
    balances: Mapping<Address, U256>,
    /// Share allowances: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Assets under management (deposits plus distributed yield)
    total_assets: Var<U256>,
    /// Admin address
    admin: Var<Address>,
    /// Deposits and mints are rejected while set
    halted: Var<bool>,
}

#[odra::module]
impl YieldVault {
    /// Initialize the vault over `asset`
    pub fn init(&mut self, asset: Address) {
        self.asset.set(asset);
        self.total_supply.set(U256::zero());
        self.total_assets.set(U256::zero());
        self.admin.set(self.env().caller());
        self.halted.set(false);
    }

    // ========================================
    // Share Token Functions
    // ========================================

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn approve(&mut self, spender: Address, shares: U256) {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), shares);
    }

    // ========================================
    // CEP-4626 Views
    // ========================================

    pub fn asset(&self) -> Address {
        self.asset.get_or_revert_with(YieldVaultError::InvalidConfiguration)
    }

    pub fn total_assets(&self) -> U256 {
        self.total_assets.get_or_default()
    }

    pub fn convert_to_shares(&self, assets: U256) -> U256 {
        let total_supply = self.total_supply();
        let total_assets = self.total_assets();

        if total_supply.is_zero() || total_assets.is_zero() {
            return assets; // 1:1 initial rate
        }
        self.checked(mul_div(assets, total_supply, total_assets))
    }

    pub fn convert_to_assets(&self, shares: U256) -> U256 {
        let total_supply = self.total_supply();

        if total_supply.is_zero() {
            return shares;
        }
        self.checked(mul_div(shares, self.total_assets(), total_supply))
    }

    pub fn preview_deposit(&self, assets: U256) -> U256 {
        self.convert_to_shares(assets)
    }

    pub fn preview_mint(&self, shares: U256) -> U256 {
        let total_supply = self.total_supply();

        if total_supply.is_zero() {
            return shares;
        }
        self.checked(mul_div_up(shares, self.total_assets(), total_supply))
    }

    pub fn preview_withdraw(&self, assets: U256) -> U256 {
        let total_supply = self.total_supply();
        let total_assets = self.total_assets();

        if total_supply.is_zero() || total_assets.is_zero() {
            return assets;
        }
        self.checked(mul_div_up(assets, total_supply, total_assets))
    }

    pub fn preview_redeem(&self, shares: U256) -> U256 {
        self.convert_to_assets(shares)
    }

    pub fn is_halted(&self) -> bool {
        self.halted.get_or_default()
    }

    // ========================================
    // CEP-4626 Mutations
    // ========================================

    /// Pull `assets` from the caller and mint shares to `receiver`
    pub fn deposit(&mut self, assets: U256, receiver: Address) -> U256 {
        self.ensure_not_halted();
        if assets.is_zero() {
            self.env().revert(YieldVaultError::ZeroAmount);
        }

        let shares = self.preview_deposit(assets);
        if shares.is_zero() {
            self.env().revert(YieldVaultError::ZeroShares);
        }

        let caller = self.env().caller();
        self.pull_assets(caller, assets);
        self.mint_shares(receiver, shares);

        self.env().emit_event(Cep4626Deposit {
            sender: caller,
            owner: receiver,
            assets,
            shares,
        });

        shares
    }

    /// Mint exactly `shares` to `receiver`, pulling the required assets
    pub fn mint(&mut self, shares: U256, receiver: Address) -> U256 {
        self.ensure_not_halted();
        if shares.is_zero() {
            self.env().revert(YieldVaultError::ZeroAmount);
        }

        let assets = self.preview_mint(shares);
        let caller = self.env().caller();
        self.pull_assets(caller, assets);
        self.mint_shares(receiver, shares);

        self.env().emit_event(Cep4626Deposit {
            sender: caller,
            owner: receiver,
            assets,
            shares,
        });

        assets
    }

    /// Burn the shares worth `assets` from `owner` and pay `receiver`
    pub fn withdraw(&mut self, assets: U256, receiver: Address, owner: Address) -> U256 {
        if assets.is_zero() {
            self.env().revert(YieldVaultError::ZeroAmount);
        }

        let shares = self.preview_withdraw(assets);
        self.burn_shares(owner, shares);
        self.pay_assets(receiver, assets);

        self.env().emit_event(Cep4626Withdraw {
            sender: self.env().caller(),
            receiver,
            owner,
            assets,
            shares,
        });

        shares
    }

    /// Burn exactly `shares` from `owner` and pay the assets to `receiver`
    pub fn redeem(&mut self, shares: U256, receiver: Address, owner: Address) -> U256 {
        if shares.is_zero() {
            self.env().revert(YieldVaultError::ZeroAmount);
        }

        let assets = self.preview_redeem(shares);
        self.burn_shares(owner, shares);
        self.pay_assets(receiver, assets);

        self.env().emit_event(Cep4626Withdraw {
            sender: self.env().caller(),
            receiver,
            owner,
            assets,
            shares,
        });

        assets
    }

    /// Add `amount` assets from the caller as yield for existing shareholders
    pub fn distribute_yield(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(YieldVaultError::ZeroAmount);
        }

        let caller = self.env().caller();
        self.pull_assets(caller, amount);

        self.env().emit_event(events::YieldDistributed {
            from: caller,
            amount,
            total_assets: self.total_assets(),
        });
    }

    // ========================================
    // Admin Functions
    // ========================================

    pub fn set_halted(&mut self, halted: bool) {
        self.only_admin();
        self.halted.set(halted);
        self.env().emit_event(events::HaltStatusChanged { halted });
    }

    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(YieldVaultError::InvalidConfiguration)
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn pull_assets(&mut self, from: Address, amount: U256) {
        let mut token = Cep18TokenContractRef::new(self.env(), self.asset());
        if !token.transfer_from(from, self.env().self_address(), amount) {
            self.env().revert(YieldVaultError::TransferFailed);
        }
        let total_assets = self.checked(SafeMath::add(self.total_assets(), amount));
        self.total_assets.set(total_assets);
    }

    fn pay_assets(&mut self, to: Address, amount: U256) {
        let total_assets = self.checked(SafeMath::sub(self.total_assets(), amount));
        self.total_assets.set(total_assets);

        let mut token = Cep18TokenContractRef::new(self.env(), self.asset());
        if !token.transfer(to, amount) {
            self.env().revert(YieldVaultError::TransferFailed);
        }
    }

    fn mint_shares(&mut self, to: Address, shares: U256) {
        let total_supply = self.checked(SafeMath::add(self.total_supply(), shares));
        let balance = self.checked(SafeMath::add(self.balance_of(to), shares));
        self.total_supply.set(total_supply);
        self.balances.set(&to, balance);
    }

    fn burn_shares(&mut self, owner: Address, shares: U256) {
        let caller = self.env().caller();
        if caller != owner {
            let allowance = self.allowance(owner, caller);
            if allowance < shares {
                self.env().revert(YieldVaultError::InsufficientAllowance);
            }
            self.allowances.set(&(owner, caller), allowance - shares);
        }

        let balance = self.balance_of(owner);
        if balance < shares {
            self.env().revert(YieldVaultError::InsufficientShares);
        }
        self.balances.set(&owner, balance - shares);

        let total_supply = self.checked(SafeMath::sub(self.total_supply(), shares));
        self.total_supply.set(total_supply);
    }

    fn ensure_not_halted(&self) {
        if self.halted.get_or_default() {
            self.env().revert(YieldVaultError::Halted);
        }
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(YieldVaultError::Unauthorized);
        if caller != admin {
            self.env().revert(YieldVaultError::Unauthorized);
        }
    }

    fn checked(&self, value: Result<U256, VaultError>) -> U256 {
        value.unwrap_or_else(|error| self.env().revert(YieldVaultError::from(error)))
    }
}

//! Calls into the underlying CEP-4626 vault
//!
//! The only place the wrapper grants the vault an allowance: `deposit`
//! approves the exact amount right before the call and resets it to zero right
//! after, so no approval outlives a single deposit.

use alloc::rc::Rc;
use odra::prelude::*;
use odra::casper_types::U256;
use odra::{ContractEnv, ContractRef};
use crate::cep4626::Cep4626VaultContractRef;
use crate::errors::VaultError;
use crate::token::Cep18TokenContractRef;

/// Handle on one underlying vault, acting as the current contract
pub struct VaultAdapter {
    env: Rc<ContractEnv>,
    vault: Address,
}

impl VaultAdapter {
    pub fn new(env: Rc<ContractEnv>, vault: Address) -> Self {
        Self { env, vault }
    }

    pub fn address(&self) -> Address {
        self.vault
    }

    fn vault_ref(&self) -> Cep4626VaultContractRef {
        Cep4626VaultContractRef::new(self.env.clone(), self.vault)
    }

    pub fn asset(&self) -> Address {
        self.vault_ref().asset()
    }

    /// Vault shares held by the current contract
    pub fn share_balance(&self) -> U256 {
        self.vault_ref().balance_of(self.env.self_address())
    }

    pub fn convert_to_assets(&self, shares: U256) -> U256 {
        self.vault_ref().convert_to_assets(shares)
    }

    pub fn convert_to_shares(&self, assets: U256) -> U256 {
        self.vault_ref().convert_to_shares(assets)
    }

    pub fn preview_deposit(&self, assets: U256) -> U256 {
        self.vault_ref().preview_deposit(assets)
    }

    pub fn preview_mint(&self, shares: U256) -> U256 {
        self.vault_ref().preview_mint(shares)
    }

    pub fn preview_withdraw(&self, assets: U256) -> U256 {
        self.vault_ref().preview_withdraw(assets)
    }

    pub fn preview_redeem(&self, shares: U256) -> U256 {
        self.vault_ref().preview_redeem(shares)
    }

    /// Deposit `assets` held by the current contract; returns shares issued
    pub fn deposit(&self, assets: U256) -> U256 {
        let mut token = Cep18TokenContractRef::new(self.env.clone(), self.asset());
        if !token.approve(self.vault, assets) {
            self.env.revert(VaultError::TransferFailed);
        }

        let shares = self.vault_ref().deposit(assets, self.env.self_address());

        if !token.approve(self.vault, U256::zero()) {
            self.env.revert(VaultError::TransferFailed);
        }
        if shares.is_zero() {
            self.env.revert(VaultError::VaultCallFailed);
        }
        shares
    }

    /// Pay exactly `assets` to `receiver`; returns the vault shares burned
    pub fn withdraw(&self, assets: U256, receiver: Address) -> U256 {
        self.vault_ref()
            .withdraw(assets, receiver, self.env.self_address())
    }

    /// Redeem `shares` owned by the current contract, paying `receiver`
    pub fn redeem(&self, shares: U256, receiver: Address) -> U256 {
        self.vault_ref()
            .redeem(shares, receiver, self.env.self_address())
    }
}

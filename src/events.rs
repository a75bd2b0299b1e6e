//! Event definitions for the fee vault contracts
use odra::prelude::*;
use odra::casper_types::U256;

/// Which side of the wrapper a fee rate applies to
#[odra::odra_type]
#[derive(Default)]
pub enum FeeSide {
    /// Charged on deposit and mint
    #[default]
    Input = 0,
    /// Charged on withdraw and redeem
    Output = 1,
}

/// Event emitted when tokens are transferred
#[odra::event]
pub struct Transfer {
    /// From address
    pub from: Address,
    /// To address
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when approval is granted
#[odra::event]
pub struct Approval {
    /// Owner address
    pub owner: Address,
    /// Spender address
    pub spender: Address,
    /// Amount approved
    pub value: U256,
}

/// Event emitted when an operation diverts shares to the fee pool
#[odra::event]
pub struct FeeCollected {
    /// Fee charged, in assets
    pub fee_assets: U256,
    /// Shares credited to the fee pool
    pub fee_shares: U256,
}

/// Event emitted when a fee rate changes
#[odra::event]
pub struct FeeRateChanged {
    /// Input or output fee
    pub side: FeeSide,
    /// Previous rate in basis points
    pub old_rate_bps: u32,
    /// New rate in basis points
    pub new_rate_bps: u32,
}

/// Event emitted when the owner redeems fee pool shares
#[odra::event]
pub struct FeesWithdrawn {
    /// Receiver of the redeemed assets
    pub receiver: Address,
    /// Fee shares removed from the pool
    pub shares: U256,
    /// Assets paid to `receiver`
    pub assets: U256,
}

/// Event emitted when all assets move to a new underlying vault
#[odra::event]
pub struct VaultMigrated {
    /// Previous vault
    pub old_vault: Address,
    /// New vault
    pub new_vault: Address,
    /// Assets redeemed from the previous vault
    pub assets_redeemed: U256,
    /// Shares received from the new vault
    pub shares_received: U256,
}

/// Event emitted when the contract is paused
#[odra::event]
pub struct Paused {
    /// Paused by (owner address)
    pub by: Address,
}

/// Event emitted when the contract is unpaused
#[odra::event]
pub struct Unpaused {
    /// Unpaused by (owner address)
    pub by: Address,
}

/// Event emitted when ownership moves to a new address
#[odra::event]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// Event emitted when the ledger schema is upgraded
#[odra::event]
pub struct SchemaUpgraded {
    pub from_version: u32,
    pub to_version: u32,
}

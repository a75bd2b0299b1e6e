//! CEP-4626: Tokenized Vault Standard for Casper
//!
//! The interface the wrapper expects from its underlying yield vault, plus the
//! standard `Deposit` / `Withdraw` events emitted by every vault in this crate.

pub mod vault;
pub mod events;

pub use vault::{Cep4626Vault, Cep4626VaultContractRef};
pub use events::*;

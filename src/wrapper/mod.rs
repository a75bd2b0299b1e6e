//! Fee-charging wrapper over a CEP-4626 vault
//!
//! The wrapper keeps its own share ledger on top of the vault position it
//! holds, charges configurable input and output fees, and can move its whole
//! position to another vault without disturbing holders' proportions.

pub mod adapter;
pub mod ledger;
pub mod migration;
pub mod quote;
pub mod vault_wrapper;

#[cfg(test)]
mod tests;

pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
pub use vault_wrapper::{null_address, VaultWrapper};

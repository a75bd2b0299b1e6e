#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared building blocks
pub mod errors;
pub mod events;
pub mod math;
pub mod fees;

// CEP-4626: Tokenized Vault Standard
pub mod cep4626;

// Base asset token
pub mod token;

// Reference yield vault
pub mod yield_vault;

// Fee-charging vault wrapper
pub mod wrapper;

//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use fee_vault_contracts;

fn main() {
    // The odra build system compiles the wrapper, yield vault and asset token
    // to WASM through odra-build; nothing to do at runtime.
}

//! Binary for generating contract schemas from odra modules.
#![doc = "Binary for generating contract schemas from odra modules."]

#[allow(unused_imports)]
use fee_vault_contracts;

fn main() {
    // Schemas are emitted by odra-build from the module definitions.
}

//! Tests for the Vault Wrapper

#[cfg(test)]
mod tests {
    use odra::prelude::*;
    use odra::casper_types::U256;
    use odra::host::{Deployer, HostEnv, HostRef};
    use odra::ContractRef;
    use crate::cep4626::{Deposit, Withdraw};
    use crate::errors::VaultError;
    use crate::events::{
        Approval, FeeCollected, FeeRateChanged, FeeSide, FeesWithdrawn, OwnershipTransferred,
        Paused, VaultMigrated,
    };
    use crate::math::SHARE_SCALE;
    use crate::token::{AssetToken, AssetTokenHostRef, AssetTokenInitArgs};
    use crate::wrapper::vault_wrapper::{
        VaultWrapperContractRef, VaultWrapperHostRef, VaultWrapperInitArgs,
    };
    use crate::wrapper::{null_address, VaultWrapper, CURRENT_SCHEMA_VERSION};
    use crate::yield_vault::{YieldVault, YieldVaultHostRef, YieldVaultInitArgs};

    /// Vault that calls back into the wrapper from inside `deposit`
    #[odra::module]
    pub struct ReentrantVault {
        asset: Var<Address>,
        target: Var<Address>,
    }

    #[odra::module]
    impl ReentrantVault {
        pub fn init(&mut self, asset: Address) {
            self.asset.set(asset);
        }

        pub fn set_target(&mut self, target: Address) {
            self.target.set(target);
        }

        pub fn asset(&self) -> Address {
            self.asset.get_or_revert_with(VaultError::AssetMismatch)
        }

        pub fn deposit(&mut self, assets: U256, receiver: Address) -> U256 {
            let target = self.target.get_or_revert_with(VaultError::NullAddress);
            VaultWrapperContractRef::new(self.env(), target).deposit(assets, receiver)
        }
    }

    struct Stack {
        env: HostEnv,
        token: AssetTokenHostRef,
        vault: YieldVaultHostRef,
        wrapper: VaultWrapperHostRef,
    }

    fn deploy_token(env: &HostEnv, symbol: &str) -> AssetTokenHostRef {
        AssetToken::deploy(
            env,
            AssetTokenInitArgs {
                name: String::from("Test Asset"),
                symbol: String::from(symbol),
                decimals: 9,
            },
        )
    }

    fn deploy_vault(env: &HostEnv, asset: Address) -> YieldVaultHostRef {
        YieldVault::deploy(env, YieldVaultInitArgs { asset })
    }

    fn setup() -> Stack {
        let env = odra_test::env();
        let token = deploy_token(&env, "TST");
        let vault = deploy_vault(&env, token.address());
        let wrapper = VaultWrapper::deploy(
            &env,
            VaultWrapperInitArgs {
                asset: token.address(),
                vault: vault.address(),
            },
        );
        Stack {
            env,
            token,
            vault,
            wrapper,
        }
    }

    impl Stack {
        fn owner(&self) -> Address {
            self.env.get_account(0)
        }

        /// Mint `amount` to `user` and approve the wrapper for it
        fn fund(&mut self, user: Address, amount: u64) {
            self.token.mint(user, U256::from(amount));
            self.env.set_caller(user);
            self.token.approve(self.wrapper.address(), U256::from(amount));
        }

        fn deposit(&mut self, user: Address, amount: u64) -> U256 {
            self.fund(user, amount);
            self.env.set_caller(user);
            self.wrapper.deposit(U256::from(amount), user)
        }

        fn set_fees(&mut self, input_bps: u32, output_bps: u32) {
            self.env.set_caller(self.owner());
            self.wrapper.set_input_fee_rate(input_bps);
            self.wrapper.set_output_fee_rate(output_bps);
        }
    }

    /// Donate `amount` of yield to `vault`
    fn add_yield(
        env: &HostEnv,
        token: &mut AssetTokenHostRef,
        vault: &mut YieldVaultHostRef,
        amount: u64,
    ) {
        let donor = env.get_account(9);
        token.mint(donor, U256::from(amount));
        env.set_caller(donor);
        token.approve(vault.address(), U256::from(amount));
        vault.distribute_yield(U256::from(amount));
    }

    #[test]
    fn test_init() {
        let s = setup();

        assert_eq!(s.wrapper.asset(), s.token.address());
        assert_eq!(s.wrapper.vault(), s.vault.address());
        assert_eq!(s.wrapper.owner(), s.owner());
        assert!(!s.wrapper.is_paused());
        assert_eq!(s.wrapper.input_fee_rate(), 0);
        assert_eq!(s.wrapper.output_fee_rate(), 0);
        assert_eq!(s.wrapper.max_fee_rate(), 1_000);
        assert_eq!(s.wrapper.total_fee_shares(), U256::zero());
        assert_eq!(s.wrapper.total_principal_shares(), U256::zero());
        assert_eq!(s.wrapper.unit_conversion_factor(), U256::from(SHARE_SCALE));
        assert_eq!(s.wrapper.schema_version(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_deposit_without_fee() {
        let mut s = setup();
        let user = s.env.get_account(1);

        let shares = s.deposit(user, 1_000);

        assert_eq!(shares, U256::from(1_000));
        assert_eq!(s.wrapper.balance_of(user), U256::from(1_000));
        assert_eq!(s.wrapper.total_fee_shares(), U256::zero());
        assert_eq!(s.wrapper.total_principal_shares(), U256::from(1_000));
        assert_eq!(s.wrapper.vault_share_balance(), U256::from(1_000));
        assert_eq!(s.token.balance_of(s.vault.address()), U256::from(1_000));
        assert_eq!(s.token.balance_of(user), U256::zero());
        assert!(s.env.emitted_event(
            &s.wrapper,
            Deposit {
                sender: user,
                owner: user,
                assets: U256::from(1_000),
                shares: U256::from(1_000),
            }
        ));
    }

    #[test]
    fn test_deposit_with_input_fee() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.set_fees(500, 0);

        let shares = s.deposit(user, 1_000);

        assert_eq!(shares, U256::from(950));
        assert_eq!(s.wrapper.balance_of(user), U256::from(950));
        assert_eq!(s.wrapper.total_fee_shares(), U256::from(50));
        assert_eq!(s.wrapper.total_shares(), s.wrapper.vault_share_balance());
        assert!(s.env.emitted_event(
            &s.wrapper,
            FeeCollected {
                fee_assets: U256::from(50),
                fee_shares: U256::from(50),
            }
        ));
    }

    #[test]
    fn test_fee_rate_bounds() {
        let mut s = setup();
        s.env.set_caller(s.owner());

        assert_eq!(
            s.wrapper.try_set_input_fee_rate(1_001),
            Err(VaultError::InvalidFeeRate.into())
        );
        assert_eq!(
            s.wrapper.try_set_output_fee_rate(u32::MAX),
            Err(VaultError::InvalidFeeRate.into())
        );
        assert_eq!(s.wrapper.input_fee_rate(), 0);
        assert_eq!(s.wrapper.output_fee_rate(), 0);

        s.wrapper.set_input_fee_rate(1_000);
        s.wrapper.set_output_fee_rate(337);
        assert_eq!(s.wrapper.input_fee_rate(), 1_000);
        assert_eq!(s.wrapper.output_fee_rate(), 337);
        assert!(s.env.emitted_event(
            &s.wrapper,
            FeeRateChanged {
                side: FeeSide::Output,
                old_rate_bps: 0,
                new_rate_bps: 337,
            }
        ));

        s.env.set_caller(s.env.get_account(1));
        assert_eq!(
            s.wrapper.try_set_input_fee_rate(10),
            Err(VaultError::Unauthorized.into())
        );
    }

    #[test]
    fn test_migrate_without_assets() {
        let mut s = setup();
        let new_vault = deploy_vault(&s.env, s.token.address());

        s.env.set_caller(s.owner());
        assert_eq!(
            s.wrapper.try_migrate_vault(new_vault.address()),
            Err(VaultError::NoAssetsToMigrate.into())
        );
        assert_eq!(s.wrapper.vault(), s.vault.address());
        assert_eq!(s.wrapper.unit_conversion_factor(), U256::from(SHARE_SCALE));
    }

    #[test]
    fn test_exit_more_than_balance() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 100);

        s.env.set_caller(user);
        assert_eq!(
            s.wrapper.try_withdraw(U256::from(200), user, user),
            Err(VaultError::InsufficientShares.into())
        );
        assert_eq!(
            s.wrapper.try_redeem(U256::from(101), user, user),
            Err(VaultError::InsufficientShares.into())
        );

        assert_eq!(s.wrapper.balance_of(user), U256::from(100));
        assert_eq!(s.token.balance_of(user), U256::zero());
        assert_eq!(s.token.balance_of(s.vault.address()), U256::from(100));
    }

    #[test]
    fn test_zero_fee_round_trip() {
        let mut s = setup();
        let user = s.env.get_account(1);
        let shares = s.deposit(user, 1_000);

        s.env.set_caller(user);
        let assets = s.wrapper.redeem(shares, user, user);

        assert_eq!(assets, U256::from(1_000));
        assert_eq!(s.token.balance_of(user), U256::from(1_000));
        assert_eq!(s.wrapper.balance_of(user), U256::zero());
        assert_eq!(s.wrapper.total_shares(), U256::zero());
        assert_eq!(s.wrapper.vault_share_balance(), U256::zero());
    }

    #[test]
    fn test_withdraw_with_output_fee() {
        let mut s = setup();
        let user = s.env.get_account(1);
        let receiver = s.env.get_account(2);
        s.deposit(user, 1_000);
        s.set_fees(0, 500);

        s.env.set_caller(user);
        let burned = s.wrapper.withdraw(U256::from(190), receiver, user);

        // 190 net is 200 gross at 5%, 10 of which go to the fee pool
        assert_eq!(burned, U256::from(200));
        assert_eq!(s.token.balance_of(receiver), U256::from(190));
        assert_eq!(s.wrapper.balance_of(user), U256::from(800));
        assert_eq!(s.wrapper.total_fee_shares(), U256::from(10));
        assert_eq!(s.wrapper.total_shares(), s.wrapper.vault_share_balance());
        assert!(s.env.emitted_event(
            &s.wrapper,
            Withdraw {
                sender: user,
                receiver,
                owner: user,
                assets: U256::from(190),
                shares: U256::from(200),
            }
        ));
    }

    #[test]
    fn test_redeem_with_output_fee() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 1_000);
        s.set_fees(0, 500);

        s.env.set_caller(user);
        let assets = s.wrapper.redeem(U256::from(1_000), user, user);

        assert_eq!(assets, U256::from(950));
        assert_eq!(s.token.balance_of(user), U256::from(950));
        assert_eq!(s.wrapper.total_fee_shares(), U256::from(50));
        assert_eq!(s.wrapper.vault_share_balance(), U256::from(50));
        assert_eq!(s.wrapper.total_principal_shares(), U256::zero());
    }

    #[test]
    fn test_mint_with_input_fee() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.set_fees(500, 0);

        assert_eq!(s.wrapper.preview_mint(U256::from(950)), U256::from(1_000));

        s.fund(user, 1_000);
        s.env.set_caller(user);
        let assets = s.wrapper.mint(U256::from(950), user);

        assert_eq!(assets, U256::from(1_000));
        assert_eq!(s.wrapper.balance_of(user), U256::from(950));
        assert_eq!(s.wrapper.total_fee_shares(), U256::from(50));
        assert_eq!(s.token.balance_of(user), U256::zero());
    }

    #[test]
    fn test_pause_blocks_user_operations() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 1_000);
        s.fund(user, 500);

        s.env.set_caller(s.owner());
        s.wrapper.pause();
        assert!(s.wrapper.is_paused());
        assert!(s.env.emitted_event(&s.wrapper, Paused { by: s.owner() }));

        s.env.set_caller(user);
        let one = U256::from(100);
        assert_eq!(
            s.wrapper.try_deposit(one, user),
            Err(VaultError::Paused.into())
        );
        assert_eq!(s.wrapper.try_mint(one, user), Err(VaultError::Paused.into()));
        assert_eq!(
            s.wrapper.try_withdraw(one, user, user),
            Err(VaultError::Paused.into())
        );
        assert_eq!(
            s.wrapper.try_redeem(one, user, user),
            Err(VaultError::Paused.into())
        );
        assert_eq!(s.wrapper.max_redeem(user), U256::zero());
        assert_eq!(s.wrapper.max_withdraw(user), U256::zero());

        assert_eq!(s.wrapper.balance_of(user), U256::from(1_000));
        assert_eq!(s.wrapper.total_principal_shares(), U256::from(1_000));
        assert_eq!(s.wrapper.total_fee_shares(), U256::zero());
        assert_eq!(s.token.balance_of(user), U256::from(500));

        assert_eq!(s.wrapper.try_unpause(), Err(VaultError::Unauthorized.into()));

        s.env.set_caller(s.owner());
        s.wrapper.unpause();
        s.env.set_caller(user);
        assert_eq!(s.wrapper.deposit(one, user), one);
        assert_eq!(s.wrapper.max_redeem(user), U256::from(1_100));
    }

    #[test]
    fn test_migration_keeps_proportions() {
        let mut s = setup();
        let alice = s.env.get_account(1);
        let bob = s.env.get_account(2);
        s.deposit(alice, 3_000);
        s.deposit(bob, 1_000);

        // new vault already at 2 assets per share
        let mut new_vault = deploy_vault(&s.env, s.token.address());
        let carol = s.env.get_account(3);
        s.token.mint(carol, U256::from(1_000));
        s.env.set_caller(carol);
        s.token.approve(new_vault.address(), U256::from(1_000));
        new_vault.deposit(U256::from(1_000), carol);
        add_yield(&s.env, &mut s.token, &mut new_vault, 1_000);

        s.env.set_caller(s.owner());
        s.wrapper.migrate_vault(new_vault.address());

        assert_eq!(s.wrapper.vault(), new_vault.address());
        assert_eq!(s.wrapper.vault_share_balance(), U256::from(2_000));
        assert_eq!(s.vault.balance_of(s.wrapper.address()), U256::zero());
        assert_eq!(
            s.wrapper.unit_conversion_factor(),
            U256::from(SHARE_SCALE) / 2
        );
        assert_eq!(
            s.token.allowance(s.wrapper.address(), new_vault.address()),
            U256::zero()
        );
        assert!(s.env.emitted_event(
            &s.wrapper,
            VaultMigrated {
                old_vault: s.vault.address(),
                new_vault: new_vault.address(),
                assets_redeemed: U256::from(4_000),
                shares_received: U256::from(2_000),
            }
        ));

        // local balances untouched, claims still 3:1
        assert_eq!(s.wrapper.balance_of(alice), U256::from(3_000));
        assert_eq!(s.wrapper.balance_of(bob), U256::from(1_000));
        let alice_assets = s.wrapper.convert_to_assets(U256::from(3_000));
        let bob_assets = s.wrapper.convert_to_assets(U256::from(1_000));
        assert_eq!(alice_assets, U256::from(3_000));
        assert_eq!(bob_assets, U256::from(1_000));

        s.env.set_caller(alice);
        assert_eq!(
            s.wrapper.redeem(U256::from(3_000), alice, alice),
            U256::from(3_000)
        );
        s.env.set_caller(bob);
        assert_eq!(
            s.wrapper.redeem(U256::from(1_000), bob, bob),
            U256::from(1_000)
        );
    }

    /// Migrate every wrapped asset into a fresh vault priced at 3 assets per 2 shares
    fn migrate_at_three_two(s: &mut Stack) -> YieldVaultHostRef {
        let mut new_vault = deploy_vault(&s.env, s.token.address());
        let carol = s.env.get_account(3);
        s.token.mint(carol, U256::from(2_000));
        s.env.set_caller(carol);
        s.token.approve(new_vault.address(), U256::from(2_000));
        new_vault.deposit(U256::from(2_000), carol);
        add_yield(&s.env, &mut s.token, &mut new_vault, 1_000);

        s.env.set_caller(s.owner());
        s.wrapper.migrate_vault(new_vault.address());
        new_vault
    }

    /// Vault shares the ledger's total claims amount to, rounded up
    fn ledger_claim_in_vault_shares(s: &Stack) -> U256 {
        let scale = U256::from(SHARE_SCALE);
        (s.wrapper.total_shares() * s.wrapper.unit_conversion_factor() + scale - U256::one()) / scale
    }

    #[test]
    fn test_withdraw_after_migration_pays_requested_assets() {
        let mut s = setup();
        let alice = s.env.get_account(1);
        let bob = s.env.get_account(2);
        let receiver = s.env.get_account(5);
        s.deposit(alice, 3_000);
        s.deposit(bob, 1_000);

        let mut new_vault = migrate_at_three_two(&mut s);
        // 4000 assets bought 2666 shares
        assert_eq!(
            s.wrapper.unit_conversion_factor(),
            U256::from(666_500_000_000_000_000u128)
        );
        add_yield(&s.env, &mut s.token, &mut new_vault, 66);
        s.set_fees(0, 1_000);

        s.env.set_caller(alice);
        let shares = s.wrapper.withdraw(U256::from(1_001), receiver, alice);

        assert_eq!(shares, U256::from(1_103));
        assert_eq!(s.token.balance_of(receiver), U256::from(1_001));
        assert_eq!(s.wrapper.balance_of(alice), U256::from(3_000 - 1_103));
        assert!(s.env.emitted_event(
            &s.wrapper,
            Withdraw {
                sender: alice,
                receiver,
                owner: alice,
                assets: U256::from(1_001),
                shares: U256::from(1_103),
            }
        ));

        let mut paid = U256::from(1_001);
        for amount in [1u64, 7, 333, 998] {
            let quoted = s.wrapper.preview_withdraw(U256::from(amount));
            assert_eq!(
                s.wrapper.withdraw(U256::from(amount), receiver, alice),
                quoted
            );
            paid += U256::from(amount);
            assert_eq!(s.token.balance_of(receiver), paid);
        }
        assert!(ledger_claim_in_vault_shares(&s) <= s.wrapper.vault_share_balance());
    }

    #[test]
    fn test_migration_with_fees_and_full_exit() {
        let mut s = setup();
        let alice = s.env.get_account(1);
        let bob = s.env.get_account(2);
        let treasury = s.env.get_account(5);
        s.set_fees(100, 200);
        s.deposit(alice, 3_000);
        s.deposit(bob, 1_000);
        assert_eq!(s.wrapper.balance_of(alice), U256::from(2_970));
        assert_eq!(s.wrapper.balance_of(bob), U256::from(990));
        assert_eq!(s.wrapper.total_fee_shares(), U256::from(40));

        migrate_at_three_two(&mut s);
        let backing = s.wrapper.total_assets();

        // balances and fee pool keep their local values
        assert_eq!(s.wrapper.balance_of(alice), U256::from(2_970));
        assert_eq!(s.wrapper.balance_of(bob), U256::from(990));
        assert_eq!(s.wrapper.total_fee_shares(), U256::from(40));
        assert!(ledger_claim_in_vault_shares(&s) <= s.wrapper.vault_share_balance());

        // claims stay 3:1 within one unit
        let alice_claim = s.wrapper.convert_to_assets(U256::from(2_970));
        let bob_claim = s.wrapper.convert_to_assets(U256::from(990));
        let third = alice_claim / U256::from(3);
        let diff = if third > bob_claim { third - bob_claim } else { bob_claim - third };
        assert!(diff <= U256::one());

        s.env.set_caller(alice);
        let mut paid = U256::zero();
        s.wrapper.withdraw(U256::from(1_000), alice, alice);
        assert_eq!(s.token.balance_of(alice), U256::from(1_000));
        paid += U256::from(1_000);
        assert!(ledger_claim_in_vault_shares(&s) <= s.wrapper.vault_share_balance());

        let rest = s.wrapper.balance_of(alice);
        paid += s.wrapper.redeem(rest, alice, alice);
        assert!(ledger_claim_in_vault_shares(&s) <= s.wrapper.vault_share_balance());

        s.env.set_caller(bob);
        paid += s.wrapper.redeem(U256::from(990), bob, bob);
        assert!(ledger_claim_in_vault_shares(&s) <= s.wrapper.vault_share_balance());

        s.env.set_caller(s.owner());
        let fees = s.wrapper.total_fee_shares();
        paid += s.wrapper.withdraw_fees(fees, treasury);

        assert_eq!(s.wrapper.total_principal_shares(), U256::zero());
        assert_eq!(s.wrapper.total_fee_shares(), U256::zero());
        assert!(paid <= backing);
        assert_eq!(
            paid,
            s.token.balance_of(alice) + s.token.balance_of(bob) + s.token.balance_of(treasury)
        );
    }

    #[test]
    fn test_failed_migration_rolls_back() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 4_000);

        s.env.set_caller(s.owner());
        let mut new_vault = deploy_vault(&s.env, s.token.address());
        new_vault.set_halted(true);

        assert!(s.wrapper.try_migrate_vault(new_vault.address()).is_err());

        assert_eq!(s.wrapper.vault(), s.vault.address());
        assert_eq!(s.wrapper.vault_share_balance(), U256::from(4_000));
        assert_eq!(s.token.balance_of(s.vault.address()), U256::from(4_000));
        assert_eq!(s.token.balance_of(s.wrapper.address()), U256::zero());
        assert_eq!(s.wrapper.unit_conversion_factor(), U256::from(SHARE_SCALE));
    }

    #[test]
    fn test_migration_rejects_bad_targets() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 1_000);

        let other_token = deploy_token(&s.env, "OTH");
        let foreign_vault = deploy_vault(&s.env, other_token.address());
        let new_vault = deploy_vault(&s.env, s.token.address());

        s.env.set_caller(s.owner());
        assert_eq!(
            s.wrapper.try_migrate_vault(s.vault.address()),
            Err(VaultError::SameVault.into())
        );
        assert_eq!(
            s.wrapper.try_migrate_vault(foreign_vault.address()),
            Err(VaultError::AssetMismatch.into())
        );

        s.env.set_caller(user);
        assert_eq!(
            s.wrapper.try_migrate_vault(new_vault.address()),
            Err(VaultError::Unauthorized.into())
        );
        assert_eq!(s.wrapper.vault(), s.vault.address());
    }

    #[test]
    fn test_withdraw_fees() {
        let mut s = setup();
        let user = s.env.get_account(1);
        let treasury = s.env.get_account(5);
        s.set_fees(500, 0);
        s.deposit(user, 1_000);

        s.env.set_caller(user);
        assert_eq!(
            s.wrapper.try_withdraw_fees(U256::from(50), treasury),
            Err(VaultError::Unauthorized.into())
        );

        s.env.set_caller(s.owner());
        assert_eq!(
            s.wrapper.try_withdraw_fees(U256::from(51), treasury),
            Err(VaultError::InsufficientFeeShares.into())
        );

        let assets = s.wrapper.withdraw_fees(U256::from(50), treasury);
        assert_eq!(assets, U256::from(50));
        assert_eq!(s.token.balance_of(treasury), U256::from(50));
        assert_eq!(s.wrapper.total_fee_shares(), U256::zero());
        assert_eq!(s.wrapper.vault_share_balance(), U256::from(950));
        assert!(s.env.emitted_event(
            &s.wrapper,
            FeesWithdrawn {
                receiver: treasury,
                shares: U256::from(50),
                assets: U256::from(50),
            }
        ));
    }

    #[test]
    fn test_redeem_on_behalf_requires_allowance() {
        let mut s = setup();
        let alice = s.env.get_account(1);
        let bob = s.env.get_account(2);
        s.deposit(alice, 1_000);

        s.env.set_caller(bob);
        assert_eq!(
            s.wrapper.try_redeem(U256::from(400), bob, alice),
            Err(VaultError::InsufficientAllowance.into())
        );

        s.env.set_caller(alice);
        s.wrapper.approve(bob, U256::from(400));
        assert_eq!(s.wrapper.allowance(alice, bob), U256::from(400));
        assert!(s.env.emitted_event(
            &s.wrapper,
            Approval {
                owner: alice,
                spender: bob,
                value: U256::from(400),
            }
        ));

        s.env.set_caller(bob);
        assert_eq!(
            s.wrapper.redeem(U256::from(400), bob, alice),
            U256::from(400)
        );
        assert_eq!(s.token.balance_of(bob), U256::from(400));
        assert_eq!(s.wrapper.balance_of(alice), U256::from(600));
        assert_eq!(s.wrapper.allowance(alice, bob), U256::zero());
        assert_eq!(
            s.wrapper.try_redeem(U256::one(), bob, alice),
            Err(VaultError::InsufficientAllowance.into())
        );
    }

    #[test]
    fn test_vault_allowance_is_scoped() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 1_000);
        s.deposit(user, 250);

        assert_eq!(
            s.token.allowance(s.wrapper.address(), s.vault.address()),
            U256::zero()
        );
        assert_eq!(s.token.balance_of(s.wrapper.address()), U256::zero());
    }

    #[test]
    fn test_halted_vault_leaves_no_trace() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.fund(user, 1_000);

        s.env.set_caller(s.owner());
        s.vault.set_halted(true);

        s.env.set_caller(user);
        assert!(s.wrapper.try_deposit(U256::from(1_000), user).is_err());

        assert_eq!(s.wrapper.balance_of(user), U256::zero());
        assert_eq!(s.wrapper.total_shares(), U256::zero());
        assert_eq!(s.token.balance_of(user), U256::from(1_000));
        assert_eq!(s.token.balance_of(s.wrapper.address()), U256::zero());
        assert_eq!(
            s.token.allowance(user, s.wrapper.address()),
            U256::from(1_000)
        );
    }

    #[test]
    fn test_rejects_zero_amounts_and_null_addresses() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 100);
        s.fund(user, 100);

        s.env.set_caller(user);
        assert_eq!(
            s.wrapper.try_deposit(U256::zero(), user),
            Err(VaultError::ZeroAmount.into())
        );
        assert_eq!(
            s.wrapper.try_mint(U256::zero(), user),
            Err(VaultError::ZeroAmount.into())
        );
        assert_eq!(
            s.wrapper.try_redeem(U256::zero(), user, user),
            Err(VaultError::ZeroAmount.into())
        );
        assert_eq!(
            s.wrapper.try_deposit(U256::from(10), null_address()),
            Err(VaultError::NullAddress.into())
        );
        assert_eq!(
            s.wrapper.try_withdraw(U256::from(10), null_address(), user),
            Err(VaultError::NullAddress.into())
        );
        assert_eq!(
            s.wrapper.try_redeem(U256::from(10), user, null_address()),
            Err(VaultError::NullAddress.into())
        );
    }

    #[test]
    fn test_reentrant_deposit_is_rejected() {
        let env = odra_test::env();
        let mut token = deploy_token(&env, "TST");
        let mut vault = ReentrantVault::deploy(
            &env,
            ReentrantVaultInitArgs {
                asset: token.address(),
            },
        );
        let mut wrapper = VaultWrapper::deploy(
            &env,
            VaultWrapperInitArgs {
                asset: token.address(),
                vault: vault.address(),
            },
        );
        vault.set_target(wrapper.address());

        let user = env.get_account(1);
        token.mint(user, U256::from(100));
        env.set_caller(user);
        token.approve(wrapper.address(), U256::from(100));

        assert_eq!(
            wrapper.try_deposit(U256::from(100), user),
            Err(VaultError::ReentrantCall.into())
        );
        assert_eq!(wrapper.balance_of(user), U256::zero());
        assert_eq!(token.balance_of(user), U256::from(100));
    }

    #[test]
    fn test_yield_accrues_to_holders() {
        let mut s = setup();
        let user = s.env.get_account(1);
        s.deposit(user, 1_000);

        add_yield(&s.env, &mut s.token, &mut s.vault, 500);

        assert_eq!(s.wrapper.total_assets(), U256::from(1_500));
        assert_eq!(
            s.wrapper.convert_to_assets(U256::from(1_000)),
            U256::from(1_500)
        );
        assert_eq!(s.wrapper.max_withdraw(user), U256::from(1_500));

        s.env.set_caller(user);
        let assets = s.wrapper.redeem(U256::from(1_000), user, user);
        assert_eq!(assets, U256::from(1_500));
        assert_eq!(s.token.balance_of(user), U256::from(1_500));
    }

    #[test]
    fn test_previews_match_execution() {
        let mut s = setup();
        let alice = s.env.get_account(1);
        let bob = s.env.get_account(2);
        s.set_fees(250, 100);
        s.deposit(alice, 10_000);
        add_yield(&s.env, &mut s.token, &mut s.vault, 3_333);

        let quoted = s.wrapper.preview_deposit(U256::from(777));
        assert_eq!(s.deposit(bob, 777), quoted);

        s.env.set_caller(alice);
        let quoted = s.wrapper.preview_redeem(U256::from(1_234));
        assert_eq!(
            s.wrapper.redeem(U256::from(1_234), alice, alice),
            quoted
        );

        let quoted = s.wrapper.preview_withdraw(U256::from(2_000));
        assert_eq!(
            s.wrapper.withdraw(U256::from(2_000), alice, alice),
            quoted
        );

        let quoted = s.wrapper.preview_mint(U256::from(500));
        s.fund(bob, 1_000);
        s.env.set_caller(bob);
        assert_eq!(s.wrapper.mint(U256::from(500), bob), quoted);

        assert_eq!(s.wrapper.total_shares(), s.wrapper.vault_share_balance());
    }

    #[test]
    fn test_upgrade_schema_when_current() {
        let mut s = setup();

        s.env.set_caller(s.env.get_account(1));
        assert_eq!(
            s.wrapper.try_upgrade_schema(),
            Err(VaultError::Unauthorized.into())
        );

        s.env.set_caller(s.owner());
        assert_eq!(
            s.wrapper.try_upgrade_schema(),
            Err(VaultError::SchemaUpToDate.into())
        );
        assert_eq!(s.wrapper.schema_version(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_transfer_ownership() {
        let mut s = setup();
        let previous_owner = s.owner();
        let new_owner = s.env.get_account(4);

        s.env.set_caller(previous_owner);
        assert_eq!(
            s.wrapper.try_transfer_ownership(null_address()),
            Err(VaultError::NullAddress.into())
        );
        s.wrapper.transfer_ownership(new_owner);
        assert_eq!(s.wrapper.owner(), new_owner);
        assert!(s.env.emitted_event(
            &s.wrapper,
            OwnershipTransferred {
                previous_owner,
                new_owner,
            }
        ));

        assert_eq!(s.wrapper.try_pause(), Err(VaultError::Unauthorized.into()));
        s.env.set_caller(new_owner);
        s.wrapper.pause();
        assert!(s.wrapper.is_paused());
    }
}

//! CLI tool for deploying and operating the fee vault contracts.

use fee_vault_contracts::token::AssetToken;
use fee_vault_contracts::wrapper::VaultWrapper;
use fee_vault_contracts::yield_vault::YieldVault;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the base asset token.
pub struct AssetTokenDeployScript;

impl DeployScript for AssetTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use fee_vault_contracts::token::AssetTokenInitArgs;

        let _token = AssetToken::load_or_deploy(
            &env,
            AssetTokenInitArgs {
                name: String::from("Vault Asset"),
                symbol: String::from("VAST"),
                decimals: 9,
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the reference yield vault over the asset token.
/// Requires AssetToken to be deployed first.
pub struct YieldVaultDeployScript;

impl DeployScript for YieldVaultDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use fee_vault_contracts::yield_vault::YieldVaultInitArgs;

        let token = container.contract_ref::<AssetToken>(env)?;

        let _vault = YieldVault::load_or_deploy(
            &env,
            YieldVaultInitArgs {
                asset: token.address().clone(),
            },
            container,
            400_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the vault wrapper over the deployed token and yield vault.
/// The deployer becomes the wrapper owner.
pub struct VaultWrapperDeployScript;

impl DeployScript for VaultWrapperDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use fee_vault_contracts::wrapper::vault_wrapper::VaultWrapperInitArgs;

        let token = container.contract_ref::<AssetToken>(env)?;
        let vault = container.contract_ref::<YieldVault>(env)?;

        let _wrapper = VaultWrapper::load_or_deploy(
            &env,
            VaultWrapperInitArgs {
                asset: token.address().clone(),
                vault: vault.address().clone(),
            },
            container,
            500_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the full stack (AssetToken + YieldVault + VaultWrapper).
pub struct FullStackDeployScript;

impl DeployScript for FullStackDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        AssetTokenDeployScript.deploy(env, container)?;
        YieldVaultDeployScript.deploy(env, container)?;
        VaultWrapperDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to set the wrapper's input and output fee rates.
pub struct SetFeeRatesScenario;

impl Scenario for SetFeeRatesScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "input_fee_bps",
                "Fee on deposit and mint, in basis points (max 1000)",
                NamedCLType::U32,
            ),
            CommandArg::new(
                "output_fee_bps",
                "Fee on withdraw and redeem, in basis points (max 1000)",
                NamedCLType::U32,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut wrapper = container.contract_ref::<VaultWrapper>(env)?;
        let input_fee_bps = args.get_single::<u32>("input_fee_bps")?;
        let output_fee_bps = args.get_single::<u32>("output_fee_bps")?;

        env.set_gas(50_000_000_000);
        wrapper.try_set_input_fee_rate(input_fee_bps)?;
        env.set_gas(50_000_000_000);
        wrapper.try_set_output_fee_rate(output_fee_bps)?;

        println!("Fee rates set: input {} bps, output {} bps", input_fee_bps, output_fee_bps);
        Ok(())
    }
}

impl ScenarioMetadata for SetFeeRatesScenario {
    const NAME: &'static str = "set-fee-rates";
    const DESCRIPTION: &'static str = "Sets the wrapper's input and output fee rates";
}

/// Scenario to move every wrapped asset into another CEP-4626 vault.
pub struct MigrateVaultScenario;

impl Scenario for MigrateVaultScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "new_vault",
                "Address of the CEP-4626 vault to migrate into",
                NamedCLType::Key,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut wrapper = container.contract_ref::<VaultWrapper>(env)?;
        let new_vault = args.get_single::<Address>("new_vault")?;

        env.set_gas(600_000_000_000);
        wrapper.try_migrate_vault(new_vault)?;

        println!("Vault migrated, conversion factor is now {}", wrapper.unit_conversion_factor());
        Ok(())
    }
}

impl ScenarioMetadata for MigrateVaultScenario {
    const NAME: &'static str = "migrate-vault";
    const DESCRIPTION: &'static str = "Migrates all wrapped assets into a new underlying vault";
}

/// Scenario to pause user operations on the wrapper.
pub struct PauseScenario;

impl Scenario for PauseScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut wrapper = container.contract_ref::<VaultWrapper>(env)?;

        env.set_gas(50_000_000_000);
        wrapper.try_pause()?;

        println!("Wrapper paused");
        Ok(())
    }
}

impl ScenarioMetadata for PauseScenario {
    const NAME: &'static str = "pause";
    const DESCRIPTION: &'static str = "Pauses deposit, mint, withdraw and redeem";
}

/// Scenario to resume user operations on the wrapper.
pub struct UnpauseScenario;

impl Scenario for UnpauseScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut wrapper = container.contract_ref::<VaultWrapper>(env)?;

        env.set_gas(50_000_000_000);
        wrapper.try_unpause()?;

        println!("Wrapper unpaused");
        Ok(())
    }
}

impl ScenarioMetadata for UnpauseScenario {
    const NAME: &'static str = "unpause";
    const DESCRIPTION: &'static str = "Resumes deposit, mint, withdraw and redeem";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the fee vault contracts")
        // Deploy scripts
        .deploy(AssetTokenDeployScript)
        .deploy(YieldVaultDeployScript)
        .deploy(VaultWrapperDeployScript)
        .deploy(FullStackDeployScript)
        // Contract references
        .contract::<AssetToken>()
        .contract::<YieldVault>()
        .contract::<VaultWrapper>()
        // Scenarios
        .scenario(SetFeeRatesScenario)
        .scenario(MigrateVaultScenario)
        .scenario(PauseScenario)
        .scenario(UnpauseScenario)
        .build()
        .run();
}

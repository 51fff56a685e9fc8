//! Definitions of CLI arguments and commands for the vault scripts

use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    accounts::{Account, KeystoreDir},
    artifacts::ArtifactStore,
    chain::{RpcChain, VaultChain},
    commands::{add_strategy_to_vault, deploy_mock_token, deploy_vault},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_KEYSTORE_SUBDIR, DEFAULT_MOCK_TOKEN_DECIMALS,
        DEFAULT_MOCK_TOKEN_NAME, DEFAULT_MOCK_TOKEN_SYMBOL, DEFAULT_RPC_URL,
        VAULT_PROXY_DEPLOYMENT_KEY,
    },
    deployments::find_deployment,
    errors::ScriptError,
    prompt::{prompt_for_address, read_password, select_account},
    utils::setup_client,
};

/// Deploy and administer the vault contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory holding the account keystores,
    /// `~/.vault-scripts/keystores` if unset
    #[arg(short, long, env = "KEYSTORE_DIR")]
    pub keystore_dir: Option<PathBuf>,

    /// Directory holding the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// JSON file in which deployed contract addresses are recorded
    #[arg(short, long, env = "DEPLOYMENTS_PATH")]
    pub deployments: Option<PathBuf>,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The keystore directory, falling back to the one in the home directory
    pub fn keystores(&self) -> Result<KeystoreDir, ScriptError> {
        match &self.keystore_dir {
            Some(dir) => Ok(KeystoreDir::new(dir)),
            None => home::home_dir()
                .map(|home| KeystoreDir::new(home.join(DEFAULT_KEYSTORE_SUBDIR)))
                .ok_or_else(|| {
                    ScriptError::Keystore("could not determine the home directory".to_string())
                }),
        }
    }
}

/// The available scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the proxy admin, the vault and its proxy, then initialize the vault
    DeployVault(DeployVaultArgs),
    /// Add a collateral token and its default strategy to a deployed vault
    AddStrategy(AddStrategyArgs),
    /// Deploy a mock ERC20 token, for testing only
    DeployMockToken(DeployMockTokenArgs),
}

impl Command {
    /// Resolve the accounts and addresses the script needs, then run it
    pub async fn run(
        self,
        rpc_url: &str,
        keystores: &KeystoreDir,
        artifacts: ArtifactStore,
        deployments_path: Option<&Path>,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployVault(args) => {
                let admin = resolve_account(keystores, args.admin, "admin account", None)?;
                info!("admin account: {:#x}", admin.address());
                let owner = resolve_account(keystores, args.owner, "owner account", Some(&admin))?;
                info!("contract owner account: {:#x}", owner.address());

                let chain = connect(rpc_url, &[&admin, &owner], artifacts).await?;
                let deployment =
                    deploy_vault(&chain, admin.address(), owner.address(), deployments_path)
                        .await?;

                info!("Vault proxy at {:#x} is ready", deployment.proxy);
                Ok(())
            }
            Command::AddStrategy(args) => {
                let owner = resolve_account(keystores, args.owner, "owner account", None)?;

                let vault = match args.vault {
                    Some(vault) => vault,
                    None => match deployed_vault(deployments_path)? {
                        Some(vault) => vault,
                        None => prompt_for_address("Enter your vault address")?,
                    },
                };
                let strategy = match args.strategy {
                    Some(strategy) => strategy,
                    None => prompt_for_address("Enter your strategy address")?,
                };
                let collateral = match args.collateral {
                    Some(collateral) => collateral,
                    None => prompt_for_address("Enter your collateral address")?,
                };

                let chain = connect(rpc_url, &[&owner], artifacts).await?;
                add_strategy_to_vault(&chain, owner.address(), vault, strategy, collateral).await
            }
            Command::DeployMockToken(args) => {
                let deployer = resolve_account(keystores, args.from, "deployer account", None)?;

                let chain = connect(rpc_url, &[&deployer], artifacts).await?;
                deploy_mock_token(
                    &chain,
                    deployer.address(),
                    &args.name,
                    &args.symbol,
                    args.decimals,
                    deployments_path,
                )
                .await
                .map(|_| ())
            }
        }
    }
}

/// Deploy the vault implementation behind a transparent upgradeable proxy.
///
/// A `ProxyAdmin` contract and the proxy are deployed from the admin account,
/// the vault implementation from the owner account. The vault is then
/// initialized, both directly and through the proxy, by the owner.
///
/// Calls made to the proxy are forwarded to the implementation contract.
/// Upgrades can only be made through the `ProxyAdmin`.
#[derive(Args)]
pub struct DeployVaultArgs {
    /// Name of the keystore of the proxy admin account,
    /// chosen interactively if omitted
    #[arg(long)]
    pub admin: Option<String>,

    /// Name of the keystore of the vault owner account,
    /// chosen interactively if omitted
    #[arg(long)]
    pub owner: Option<String>,
}

/// Register a collateral token and its default strategy on a deployed vault
#[derive(Args)]
pub struct AddStrategyArgs {
    /// Name of the keystore of the vault owner account,
    /// chosen interactively if omitted
    #[arg(long)]
    pub owner: Option<String>,

    /// Vault (proxy) contract address in hex
    #[arg(long)]
    pub vault: Option<Address>,

    /// Strategy contract address in hex
    #[arg(long)]
    pub strategy: Option<Address>,

    /// Collateral token address in hex
    #[arg(long)]
    pub collateral: Option<Address>,
}

/// Deploy a mock ERC20 token. THIS SHOULD ONLY BE DONE FOR TESTING
#[derive(Args)]
pub struct DeployMockTokenArgs {
    /// Name of the keystore of the deploying account,
    /// chosen interactively if omitted
    #[arg(long)]
    pub from: Option<String>,

    /// The token name
    #[arg(long, default_value = DEFAULT_MOCK_TOKEN_NAME)]
    pub name: String,

    /// The token symbol
    #[arg(long, default_value = DEFAULT_MOCK_TOKEN_SYMBOL)]
    pub symbol: String,

    /// The token decimals
    #[arg(long, default_value_t = DEFAULT_MOCK_TOKEN_DECIMALS)]
    pub decimals: u8,
}

/// Pick an account by name, prompting for the choice when no name was given,
/// and decrypt it.
///
/// An account that was already decrypted under the same name is reused.
fn resolve_account(
    keystores: &KeystoreDir,
    name: Option<String>,
    role: &str,
    loaded: Option<&Account>,
) -> Result<Account, ScriptError> {
    let name = match name {
        Some(name) => name,
        None => select_account(role, &keystores.list_nonempty()?)?,
    };

    if let Some(account) = loaded.filter(|account| account.name == name) {
        return Ok(account.clone());
    }

    let password = read_password(&name)?;
    keystores.load(&name, &password)
}

/// The vault proxy recorded in the deployments file, if there is one
fn deployed_vault(deployments_path: Option<&Path>) -> Result<Option<Address>, ScriptError> {
    let Some(path) = deployments_path.filter(|path| path.exists()) else {
        return Ok(None);
    };

    let vault = find_deployment(VAULT_PROXY_DEPLOYMENT_KEY, path)?;
    if let Some(vault) = vault {
        info!("Using vault {:#x} from {}", vault, path.display());
    }

    Ok(vault)
}

/// Connect to the network and log which one is active
async fn connect(
    rpc_url: &str,
    accounts: &[&Account],
    artifacts: ArtifactStore,
) -> Result<RpcChain, ScriptError> {
    let client = setup_client(rpc_url, accounts)?;
    let chain = RpcChain::new(client, artifacts);

    let chain_id = chain.chain_id().await?;
    info!("Deploying on chain {} ({})", chain_id, rpc_url);

    Ok(chain)
}

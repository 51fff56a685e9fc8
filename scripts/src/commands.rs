//! Implementations of the vault scripts

use std::path::Path;

use alloy_primitives::{Address, Bytes};
use tracing::{info, warn};

use crate::{
    chain::VaultChain,
    constants::{
        MOCK_TOKEN_DEPLOYMENT_KEY, PROXY_ADMIN_DEPLOYMENT_KEY,
        VAULT_IMPLEMENTATION_DEPLOYMENT_KEY, VAULT_PROXY_DEPLOYMENT_KEY,
    },
    deployments::write_deployment,
    errors::ScriptError,
    solidity::{mock_token_constructor_args, proxy_constructor_args},
    types::{DeployableContract, VaultDeployment},
};

/// Deploy the vault behind an upgradeable proxy and initialize it.
///
/// The proxy admin and the proxy are deployed from `admin`, the vault
/// implementation from `owner`. The implementation is initialized directly and
/// then through the proxy, both from `owner`.
pub async fn deploy_vault(
    chain: &impl VaultChain,
    admin: Address,
    owner: Address,
    deployments_path: Option<&Path>,
) -> Result<VaultDeployment, ScriptError> {
    let proxy_admin = chain
        .deploy(admin, DeployableContract::ProxyAdmin, Bytes::new())
        .await?;
    info!("Proxy admin contract deployed at {:#x}", proxy_admin);

    let implementation = chain
        .deploy(owner, DeployableContract::Vault, Bytes::new())
        .await?;
    info!("Vault implementation deployed at {:#x}", implementation);

    // The proxy is deployed without initialization calldata, the vault is
    // initialized with a separate call below
    let proxy = chain
        .deploy(
            admin,
            DeployableContract::TransparentUpgradeableProxy,
            proxy_constructor_args(implementation, proxy_admin, Bytes::new()),
        )
        .await?;
    info!("Vault proxy deployed at {:#x}", proxy);

    chain.initialize(owner, implementation).await?;
    chain.initialize(owner, proxy).await?;
    info!("Vault initialized");

    // A mismatched or unreadable admin slot is only reported
    match chain.proxy_admin(proxy).await {
        Ok(recorded_admin) if recorded_admin != proxy_admin => warn!(
            "Proxy admin slot holds {:#x}, not the deployed proxy admin {:#x}",
            recorded_admin, proxy_admin
        ),
        Ok(_) => {}
        Err(e) => warn!("Could not read the proxy admin slot: {}", e),
    }

    let deployment = VaultDeployment {
        proxy_admin,
        implementation,
        proxy,
    };

    if let Some(path) = deployments_path {
        write_deployment(PROXY_ADMIN_DEPLOYMENT_KEY, proxy_admin, path)?;
        write_deployment(VAULT_IMPLEMENTATION_DEPLOYMENT_KEY, implementation, path)?;
        write_deployment(VAULT_PROXY_DEPLOYMENT_KEY, proxy, path)?;
        info!("Deployments written to {}", path.display());
    }

    Ok(deployment)
}

/// Register a collateral token on the vault with the given default strategy,
/// then register the strategy itself
pub async fn add_strategy_to_vault(
    chain: &impl VaultChain,
    owner: Address,
    vault: Address,
    strategy: Address,
    collateral: Address,
) -> Result<(), ScriptError> {
    chain
        .add_collateral(owner, vault, collateral, strategy)
        .await?;
    info!("Collateral {:#x} added to vault {:#x}", collateral, vault);

    chain.add_strategy(owner, vault, strategy).await?;
    info!("Strategy {:#x} added to vault {:#x}", strategy, vault);

    Ok(())
}

/// Deploy a mock ERC20 token, for use as collateral on test networks
pub async fn deploy_mock_token(
    chain: &impl VaultChain,
    from: Address,
    name: &str,
    symbol: &str,
    decimals: u8,
    deployments_path: Option<&Path>,
) -> Result<Address, ScriptError> {
    warn!("Deploying `{}` - THIS SHOULD ONLY BE DONE FOR TESTING", DeployableContract::MockToken);

    let token = chain
        .deploy(
            from,
            DeployableContract::MockToken,
            mock_token_constructor_args(name, symbol, decimals),
        )
        .await?;
    info!("Mock token {} deployed at {:#x}", symbol, token);

    if let Some(path) = deployments_path {
        write_deployment(MOCK_TOKEN_DEPLOYMENT_KEY, token, path)?;
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashSet};

    use alloy_primitives::TxHash;
    use tempfile::tempdir;

    use super::*;
    use crate::deployments::read_deployment;

    /// A call recorded by the [`RecordingChain`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Deploy {
            from: Address,
            contract: DeployableContract,
            constructor_args: Bytes,
        },
        Initialize {
            from: Address,
            vault: Address,
        },
        AddCollateral {
            from: Address,
            vault: Address,
            collateral: Address,
            strategy: Address,
        },
        AddStrategy {
            from: Address,
            vault: Address,
            strategy: Address,
        },
    }

    /// An in-memory chain recording every transaction it is sent
    #[derive(Default)]
    struct RecordingChain {
        /// The transactions, in submission order
        calls: RefCell<Vec<Call>>,
        /// Contracts whose deployment fails
        failing: HashSet<DeployableContract>,
        /// Overrides the proxy admin slot when set
        proxy_admin_override: Option<Address>,
        /// Whether reading the proxy admin slot fails
        proxy_admin_unreadable: bool,
    }

    impl RecordingChain {
        fn failing_on(contract: DeployableContract) -> Self {
            Self {
                failing: HashSet::from([contract]),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) -> TxHash {
            let mut calls = self.calls.borrow_mut();
            calls.push(call);
            TxHash::with_last_byte(calls.len() as u8)
        }

        /// Deterministic address of the nth deployment
        fn deployed_address(n: usize) -> Address {
            Address::with_last_byte(0xd0 + n as u8)
        }
    }

    impl VaultChain for RecordingChain {
        async fn chain_id(&self) -> Result<u64, ScriptError> {
            Ok(31337)
        }

        async fn deploy(
            &self,
            from: Address,
            contract: DeployableContract,
            constructor_args: Bytes,
        ) -> Result<Address, ScriptError> {
            if self.failing.contains(&contract) {
                return Err(ScriptError::TransactionReverted(format!("deploying {contract}")));
            }

            self.record(Call::Deploy {
                from,
                contract,
                constructor_args,
            });
            let n = self
                .calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, Call::Deploy { .. }))
                .count();
            Ok(Self::deployed_address(n))
        }

        async fn initialize(&self, from: Address, vault: Address) -> Result<TxHash, ScriptError> {
            Ok(self.record(Call::Initialize { from, vault }))
        }

        async fn add_collateral(
            &self,
            from: Address,
            vault: Address,
            collateral: Address,
            strategy: Address,
        ) -> Result<TxHash, ScriptError> {
            Ok(self.record(Call::AddCollateral {
                from,
                vault,
                collateral,
                strategy,
            }))
        }

        async fn add_strategy(
            &self,
            from: Address,
            vault: Address,
            strategy: Address,
        ) -> Result<TxHash, ScriptError> {
            Ok(self.record(Call::AddStrategy {
                from,
                vault,
                strategy,
            }))
        }

        async fn proxy_admin(&self, _proxy: Address) -> Result<Address, ScriptError> {
            if self.proxy_admin_unreadable {
                return Err(ScriptError::ContractInteraction("eth_getStorageAt".to_string()));
            }

            // The first deployment is the proxy admin
            Ok(self
                .proxy_admin_override
                .unwrap_or_else(|| Self::deployed_address(1)))
        }
    }

    fn admin() -> Address {
        Address::repeat_byte(0xaa)
    }

    fn owner() -> Address {
        Address::repeat_byte(0x0e)
    }

    #[tokio::test]
    async fn test_deploy_vault_call_sequence() {
        let chain = RecordingChain::default();
        let deployment = deploy_vault(&chain, admin(), owner(), None).await.unwrap();

        let proxy_admin = RecordingChain::deployed_address(1);
        let implementation = RecordingChain::deployed_address(2);
        let proxy = RecordingChain::deployed_address(3);
        assert_eq!(
            deployment,
            VaultDeployment {
                proxy_admin,
                implementation,
                proxy,
            }
        );

        assert_eq!(
            chain.calls(),
            vec![
                Call::Deploy {
                    from: admin(),
                    contract: DeployableContract::ProxyAdmin,
                    constructor_args: Bytes::new(),
                },
                Call::Deploy {
                    from: owner(),
                    contract: DeployableContract::Vault,
                    constructor_args: Bytes::new(),
                },
                Call::Deploy {
                    from: admin(),
                    contract: DeployableContract::TransparentUpgradeableProxy,
                    constructor_args: proxy_constructor_args(
                        implementation,
                        proxy_admin,
                        Bytes::new()
                    ),
                },
                Call::Initialize {
                    from: owner(),
                    vault: implementation,
                },
                Call::Initialize {
                    from: owner(),
                    vault: proxy,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_deploy_vault_stops_at_first_failure() {
        let chain = RecordingChain::failing_on(DeployableContract::TransparentUpgradeableProxy);
        let err = deploy_vault(&chain, admin(), owner(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ScriptError::TransactionReverted(_)));
        let calls = chain.calls();
        assert_eq!(calls.len(), 2);
        assert!(!calls.iter().any(|c| matches!(c, Call::Initialize { .. })));
    }

    #[tokio::test]
    async fn test_deploy_vault_tolerates_foreign_proxy_admin() {
        let chain = RecordingChain {
            proxy_admin_override: Some(Address::repeat_byte(0x99)),
            ..Default::default()
        };

        deploy_vault(&chain, admin(), owner(), None).await.unwrap();
        assert_eq!(chain.calls().len(), 5);
    }

    #[tokio::test]
    async fn test_deploy_vault_with_unreadable_proxy_admin_slot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let chain = RecordingChain {
            proxy_admin_unreadable: true,
            ..Default::default()
        };

        let deployment = deploy_vault(&chain, admin(), owner(), Some(&path))
            .await
            .unwrap();

        let calls = chain.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(
            calls[3..],
            [
                Call::Initialize {
                    from: owner(),
                    vault: deployment.implementation,
                },
                Call::Initialize {
                    from: owner(),
                    vault: deployment.proxy,
                },
            ]
        );
        assert_eq!(
            read_deployment(VAULT_PROXY_DEPLOYMENT_KEY, &path).unwrap(),
            deployment.proxy
        );
    }

    #[tokio::test]
    async fn test_deploy_vault_writes_deployments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let chain = RecordingChain::default();
        let deployment = deploy_vault(&chain, admin(), owner(), Some(&path))
            .await
            .unwrap();

        assert_eq!(
            read_deployment(PROXY_ADMIN_DEPLOYMENT_KEY, &path).unwrap(),
            deployment.proxy_admin
        );
        assert_eq!(
            read_deployment(VAULT_IMPLEMENTATION_DEPLOYMENT_KEY, &path).unwrap(),
            deployment.implementation
        );
        assert_eq!(
            read_deployment(VAULT_PROXY_DEPLOYMENT_KEY, &path).unwrap(),
            deployment.proxy
        );
    }

    #[tokio::test]
    async fn test_add_strategy_call_sequence() {
        let vault = Address::repeat_byte(0x01);
        let strategy = Address::repeat_byte(0x02);
        let collateral = Address::repeat_byte(0x03);

        let chain = RecordingChain::default();
        add_strategy_to_vault(&chain, owner(), vault, strategy, collateral)
            .await
            .unwrap();

        assert_eq!(
            chain.calls(),
            vec![
                Call::AddCollateral {
                    from: owner(),
                    vault,
                    collateral,
                    strategy,
                },
                Call::AddStrategy {
                    from: owner(),
                    vault,
                    strategy,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_deploy_mock_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let chain = RecordingChain::default();
        let token = deploy_mock_token(&chain, owner(), "MockToken", "MOCK", 18, Some(&path))
            .await
            .unwrap();

        assert_eq!(
            chain.calls(),
            vec![Call::Deploy {
                from: owner(),
                contract: DeployableContract::MockToken,
                constructor_args: mock_token_constructor_args("MockToken", "MOCK", 18),
            }]
        );
        assert_eq!(read_deployment(MOCK_TOKEN_DEPLOYMENT_KEY, &path).unwrap(), token);
    }
}

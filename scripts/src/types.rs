//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::Address;

/// The contracts the scripts deploy from compiled artifacts
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeployableContract {
    /// The admin contract authorized to upgrade the vault proxy
    ProxyAdmin,
    /// The vault implementation contract
    Vault,
    /// The upgradeable proxy fronting the vault implementation
    TransparentUpgradeableProxy,
    /// A mintable ERC20 used as test collateral
    MockToken,
}

impl DeployableContract {
    /// The contract name, which is also the artifact file stem
    pub fn artifact_name(&self) -> &'static str {
        match self {
            DeployableContract::ProxyAdmin => "ProxyAdmin",
            DeployableContract::Vault => "Vault",
            DeployableContract::TransparentUpgradeableProxy => "TransparentUpgradeableProxy",
            DeployableContract::MockToken => "MockToken",
        }
    }
}

impl Display for DeployableContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.artifact_name())
    }
}

/// The addresses produced by a vault deployment
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VaultDeployment {
    /// The proxy admin contract
    pub proxy_admin: Address,
    /// The vault implementation behind the proxy
    pub implementation: Address,
    /// The proxy through which the vault is used
    pub proxy: Address,
}

//! Constants used in the vault scripts

/// The default RPC URL, a local development node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default directory, relative to the working directory, holding
/// compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// The directory under the user's home directory holding the account keystores
pub const DEFAULT_KEYSTORE_SUBDIR: &str = ".vault-scripts/keystores";

/// The extension of a keystore or artifact file
pub const JSON_EXTENSION: &str = "json";

/// The suffix of a per-source-file artifact directory, e.g. `Vault.sol/Vault.json`
pub const SOLIDITY_SOURCE_SUFFIX: &str = "sol";

/// The storage slot containing the proxy admin contract address in the upgradeable proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#admin-address
pub const PROXY_ADMIN_STORAGE_SLOT: &str =
    "0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103";

/// The number of bytes stored in a single storage slot
pub const NUM_BYTES_STORAGE_SLOT: usize = 32;

/// The number of bytes in an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

/// The default name of the mock token
pub const DEFAULT_MOCK_TOKEN_NAME: &str = "MockToken";

/// The default symbol of the mock token
pub const DEFAULT_MOCK_TOKEN_SYMBOL: &str = "MOCK";

/// The default number of decimals of the mock token
pub const DEFAULT_MOCK_TOKEN_DECIMALS: u8 = 18;

/// The proxy admin contract key in the deployments file
pub const PROXY_ADMIN_DEPLOYMENT_KEY: &str = "ProxyAdmin";

/// The vault implementation contract key in the deployments file
pub const VAULT_IMPLEMENTATION_DEPLOYMENT_KEY: &str = "VaultImplementation";

/// The vault proxy contract key in the deployments file
pub const VAULT_PROXY_DEPLOYMENT_KEY: &str = "VaultProxy";

/// The mock token contract key in the deployments file
pub const MOCK_TOKEN_DEPLOYMENT_KEY: &str = "MockToken";

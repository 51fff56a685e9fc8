//! The on-chain operations the scripts perform, and their RPC implementation

use std::str::FromStr;

use alloy::{
    contract::{CallBuilder, CallDecoder},
    network::{Ethereum, TransactionBuilder},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use alloy_primitives::{Address, Bytes, TxHash, U256};
use tracing::{debug, info};

use crate::{
    artifacts::ArtifactStore,
    constants::{NUM_BYTES_ADDRESS, NUM_BYTES_STORAGE_SLOT, PROXY_ADMIN_STORAGE_SLOT},
    errors::ScriptError,
    solidity::IVault,
    types::DeployableContract,
    utils::{ensure_success, Client},
};

/// The operations the scripts issue against a chain.
///
/// Every method submits at most one transaction from the `from` account and
/// returns once it has been mined successfully.
#[allow(async_fn_in_trait)]
pub trait VaultChain {
    /// The id of the chain the operations are sent to
    async fn chain_id(&self) -> Result<u64, ScriptError>;

    /// Deploy the given contract with the ABI-encoded constructor arguments,
    /// returning the address of the new contract
    async fn deploy(
        &self,
        from: Address,
        contract: DeployableContract,
        constructor_args: Bytes,
    ) -> Result<Address, ScriptError>;

    /// Call `initialize()` on the vault at the given address
    async fn initialize(&self, from: Address, vault: Address) -> Result<TxHash, ScriptError>;

    /// Call `addCollateral(collateral, strategy)` on the vault at the given address
    async fn add_collateral(
        &self,
        from: Address,
        vault: Address,
        collateral: Address,
        strategy: Address,
    ) -> Result<TxHash, ScriptError>;

    /// Call `addStrategy(strategy)` on the vault at the given address
    async fn add_strategy(
        &self,
        from: Address,
        vault: Address,
        strategy: Address,
    ) -> Result<TxHash, ScriptError>;

    /// Read the admin recorded in the EIP-1967 admin slot of a proxy
    async fn proxy_admin(&self, proxy: Address) -> Result<Address, ScriptError>;
}

/// A [`VaultChain`] backed by an RPC node, deploying from compiled artifacts
pub struct RpcChain {
    /// The signing client
    client: Client,
    /// The artifacts contracts are deployed from
    artifacts: ArtifactStore,
}

impl RpcChain {
    /// Create a new RPC-backed chain
    pub fn new(client: Client, artifacts: ArtifactStore) -> Self {
        Self { client, artifacts }
    }

    /// Send a contract call and wait for it to be mined successfully
    async fn send_call<D: CallDecoder>(
        call: CallBuilder<&Client, D, Ethereum>,
        description: &str,
    ) -> Result<TxHash, ScriptError> {
        let receipt = call
            .send()
            .await
            .map_err(|e| ScriptError::ContractInteraction(format!("{}: {}", description, e)))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(format!("{}: {}", description, e)))?;

        let receipt = ensure_success(receipt, description)?;
        info!(tx = %receipt.transaction_hash, "{description}");
        Ok(receipt.transaction_hash)
    }
}

impl VaultChain for RpcChain {
    async fn chain_id(&self) -> Result<u64, ScriptError> {
        self.client
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
    }

    async fn deploy(
        &self,
        from: Address,
        contract: DeployableContract,
        constructor_args: Bytes,
    ) -> Result<Address, ScriptError> {
        let bytecode = self.artifacts.bytecode(contract)?;
        debug!(
            %contract,
            code_len = bytecode.len(),
            args_len = constructor_args.len(),
            "deploying contract"
        );

        let mut deploy_code = bytecode.to_vec();
        deploy_code.extend_from_slice(&constructor_args);

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(deploy_code);

        let receipt = self
            .client
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {}", contract, e)))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {}", contract, e)))?;

        let receipt = ensure_success(receipt, &format!("deploying {contract}"))?;
        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!("no contract address in {} receipt", contract))
        })
    }

    async fn initialize(&self, from: Address, vault: Address) -> Result<TxHash, ScriptError> {
        let vault = IVault::new(vault, self.client.clone());
        Self::send_call(vault.initialize().from(from), "initialize").await
    }

    async fn add_collateral(
        &self,
        from: Address,
        vault: Address,
        collateral: Address,
        strategy: Address,
    ) -> Result<TxHash, ScriptError> {
        let vault = IVault::new(vault, self.client.clone());
        Self::send_call(
            vault.addCollateral(collateral, strategy).from(from),
            "addCollateral",
        )
        .await
    }

    async fn add_strategy(
        &self,
        from: Address,
        vault: Address,
        strategy: Address,
    ) -> Result<TxHash, ScriptError> {
        let vault = IVault::new(vault, self.client.clone());
        Self::send_call(vault.addStrategy(strategy).from(from), "addStrategy").await
    }

    async fn proxy_admin(&self, proxy: Address) -> Result<Address, ScriptError> {
        let slot = U256::from_str(PROXY_ADMIN_STORAGE_SLOT)
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        let value = self
            .client
            .get_storage_at(proxy, slot)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        // The address occupies the low-order bytes of the slot
        let bytes = value.to_be_bytes::<NUM_BYTES_STORAGE_SLOT>();
        Ok(Address::from_slice(
            &bytes[NUM_BYTES_STORAGE_SLOT - NUM_BYTES_ADDRESS..],
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloy::signers::local::PrivateKeySigner;
    use alloy_primitives::hex;

    use super::*;
    use crate::{accounts::Account, utils::setup_client};

    /// A client pointed at a local node, never contacted by these tests
    fn offline_client() -> Client {
        let account = Account {
            name: "owner".to_string(),
            signer: PrivateKeySigner::random(),
        };
        setup_client("http://localhost:8545", &[&account]).unwrap()
    }

    /// The calldata of a call builder of the shape `send_call` accepts
    fn sendable_calldata<D: CallDecoder>(call: &CallBuilder<&Client, D, Ethereum>) -> Bytes {
        call.calldata().clone()
    }

    #[test]
    fn test_vault_calls_build_sendable_calldata() {
        let client = offline_client();
        let vault = IVault::new(Address::repeat_byte(0x01), client);
        let owner = Address::repeat_byte(0x0e);
        let collateral = Address::repeat_byte(0xc0);
        let strategy = Address::repeat_byte(0x57);

        let initialize = sendable_calldata(&vault.initialize().from(owner));
        assert_eq!(initialize.as_ref(), hex!("8129fc1c"));

        let add_collateral =
            sendable_calldata(&vault.addCollateral(collateral, strategy).from(owner));
        assert_eq!(add_collateral.len(), 4 + 64);
        assert_eq!(&add_collateral[4 + 12..4 + 32], collateral.as_slice());
        assert_eq!(&add_collateral[4 + 44..4 + 64], strategy.as_slice());

        let add_strategy = sendable_calldata(&vault.addStrategy(strategy).from(owner));
        assert_eq!(add_strategy.len(), 4 + 32);
        assert_eq!(&add_strategy[4 + 12..], strategy.as_slice());
    }
}

//! Utilities for the vault scripts.

use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{DynProvider, ProviderBuilder},
    rpc::types::TransactionReceipt,
    transports::http::reqwest::Url,
};

use crate::{accounts::Account, errors::ScriptError};

/// The provider type used by the scripts
pub type Client = DynProvider<Ethereum>;

/// Sets up a client able to sign transactions for each of the given accounts.
///
/// Transactions pick their signer through their `from` address.
pub fn setup_client(rpc_url: &str, accounts: &[&Account]) -> Result<Client, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let (first, rest) = accounts.split_first().ok_or_else(|| {
        ScriptError::ClientInitialization("no signing account provided".to_string())
    })?;

    let mut wallet = EthereumWallet::new(first.signer.clone());
    for account in rest {
        wallet.register_signer(account.signer.clone());
    }

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);
    Ok(DynProvider::new(provider))
}

/// Ensure a mined transaction succeeded
pub fn ensure_success(
    receipt: TransactionReceipt,
    description: &str,
) -> Result<TransactionReceipt, ScriptError> {
    if receipt.status() {
        Ok(receipt)
    } else {
        Err(ScriptError::TransactionReverted(format!(
            "{} (tx {:#x})",
            description, receipt.transaction_hash
        )))
    }
}

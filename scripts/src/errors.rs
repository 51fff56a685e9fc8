//! Definitions of errors that can occur during the execution of the vault scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the vault scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading or listing the keystore directory
    Keystore(String),
    /// Error decrypting an account keystore
    AccountLoading(String),
    /// Error reading operator input from the console
    Prompt(String),
    /// Error reading a compiled contract artifact
    ReadArtifact(String),
    /// Error parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error parsing an address or constructing calldata
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A transaction was mined but reverted
    TransactionReverted(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Keystore(s) => write!(f, "error reading keystores: {}", s),
            ScriptError::AccountLoading(s) => write!(f, "error loading account: {}", s),
            ScriptError::Prompt(s) => write!(f, "error reading input: {}", s),
            ScriptError::ReadArtifact(s) => write!(f, "error reading artifact: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::TransactionReverted(s) => write!(f, "transaction reverted: {}", s),
        }
    }
}

impl Error for ScriptError {}

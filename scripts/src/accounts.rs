//! Local account management
//!
//! Accounts are encrypted Ethereum JSON keystores kept in a single directory,
//! named by their file stem.

use std::{fs, path::PathBuf};

use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::Address;
use tracing::debug;

use crate::{constants::JSON_EXTENSION, errors::ScriptError};

/// A decrypted account, ready to sign transactions
#[derive(Debug, Clone)]
pub struct Account {
    /// The keystore name the account was loaded from
    pub name: String,
    /// The account's signer
    pub signer: PrivateKeySigner,
}

impl Account {
    /// The address of the account
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

/// A directory of account keystores
#[derive(Debug, Clone)]
pub struct KeystoreDir {
    /// The directory path
    path: PathBuf,
}

impl KeystoreDir {
    /// Wrap the given keystore directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// List the names of the available accounts, sorted
    pub fn list(&self) -> Result<Vec<String>, ScriptError> {
        let entries = fs::read_dir(&self.path).map_err(|e| {
            ScriptError::Keystore(format!("{}: {}", self.path.display(), e))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ScriptError::Keystore(e.to_string()))?.path();
            if !path.is_file() || !path.extension().is_some_and(|ext| ext == JSON_EXTENSION) {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// List the available accounts, failing if there are none to choose from
    pub fn list_nonempty(&self) -> Result<Vec<String>, ScriptError> {
        let names = self.list()?;
        if names.is_empty() {
            return Err(ScriptError::Keystore(format!(
                "no accounts found in {}",
                self.path.display()
            )));
        }

        Ok(names)
    }

    /// The keystore file backing the named account
    pub fn keystore_path(&self, name: &str) -> Result<PathBuf, ScriptError> {
        let path = self.path.join(format!("{name}.{JSON_EXTENSION}"));
        if !path.is_file() {
            return Err(ScriptError::AccountLoading(format!(
                "unknown account {}, expected a keystore at {}",
                name,
                path.display()
            )));
        }

        Ok(path)
    }

    /// Decrypt the named account with the given password
    pub fn load(&self, name: &str, password: &str) -> Result<Account, ScriptError> {
        let path = self.keystore_path(name)?;
        debug!(account = name, path = %path.display(), "decrypting keystore");

        let signer = PrivateKeySigner::decrypt_keystore(&path, password)
            .map_err(|e| ScriptError::AccountLoading(format!("{}: {}", name, e)))?;

        Ok(Account {
            name: name.to_string(),
            signer,
        })
    }
}

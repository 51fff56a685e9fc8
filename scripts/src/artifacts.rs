//! Loading of compiled contract artifacts
//!
//! Artifacts are the JSON files emitted by the Solidity toolchain. Both the flat
//! `<dir>/<Name>.json` layout and the per-source `<dir>/<Name>.sol/<Name>.json`
//! layout are supported, as is a `bytecode` field given either as a hex string
//! or as an object with an `object` hex string.

use std::{fs, path::PathBuf, str::FromStr};

use alloy_primitives::Bytes;
use serde::Deserialize;

use crate::{
    constants::{JSON_EXTENSION, SOLIDITY_SOURCE_SUFFIX},
    errors::ScriptError,
    types::DeployableContract,
};

/// The `bytecode` field of an artifact
#[derive(Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    /// A bare hex string
    Hex(String),
    /// An object wrapping the hex string
    Object {
        /// The hex-encoded creation bytecode
        object: String,
    },
}

impl BytecodeField {
    /// The hex string, whichever form it came in
    fn into_hex(self) -> String {
        match self {
            BytecodeField::Hex(hex) | BytecodeField::Object { object: hex } => hex,
        }
    }
}

/// The subset of an artifact the scripts need
#[derive(Deserialize)]
struct RawArtifact {
    /// The creation bytecode
    bytecode: BytecodeField,
}

/// A directory of compiled contract artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// The root of the artifacts directory
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Find the artifact file for the given contract
    pub fn artifact_path(&self, contract: DeployableContract) -> Result<PathBuf, ScriptError> {
        let name = contract.artifact_name();
        let file_name = format!("{name}.{JSON_EXTENSION}");

        let candidates = [
            self.dir.join(&file_name),
            self.dir
                .join(format!("{name}.{SOLIDITY_SOURCE_SUFFIX}"))
                .join(&file_name),
        ];

        candidates
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| {
                ScriptError::ReadArtifact(format!(
                    "no artifact for {} in {}",
                    contract,
                    self.dir.display()
                ))
            })
    }

    /// Read the creation bytecode of the given contract
    pub fn bytecode(&self, contract: DeployableContract) -> Result<Bytes, ScriptError> {
        let path = self.artifact_path(contract)?;
        let contents =
            fs::read_to_string(&path).map_err(|e| ScriptError::ReadArtifact(e.to_string()))?;

        parse_bytecode(&contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
    }
}

/// Parse the creation bytecode out of the JSON contents of an artifact
fn parse_bytecode(contents: &str) -> Result<Bytes, String> {
    let artifact: RawArtifact = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    let hex = artifact.bytecode.into_hex();

    let bytecode = Bytes::from_str(hex.trim()).map_err(|e| e.to_string())?;
    if bytecode.is_empty() {
        return Err("empty bytecode, is the contract abstract?".to_string());
    }

    Ok(bytecode)
}

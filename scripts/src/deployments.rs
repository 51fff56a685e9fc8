//! Utilities for reading and writing deployment addresses in a JSON file

use std::{fs, path::Path, str::FromStr};

use alloy_primitives::Address;
use serde_json::{Map, Value};

use crate::errors::ScriptError;

/// Read an address from the deployments file
///
/// Returns the address for the given key, or an error if not found
pub fn read_deployment(key: &str, deployments_path: &Path) -> Result<Address, ScriptError> {
    find_deployment(key, deployments_path)?.ok_or_else(|| {
        ScriptError::ReadDeployments(format!("key {} not found in deployments file", key))
    })
}

/// Look up an address in the deployments file, `None` if the key is absent
pub fn find_deployment(
    key: &str,
    deployments_path: &Path,
) -> Result<Option<Address>, ScriptError> {
    let json = read_deployments_json(deployments_path)?;
    let Some(value) = json.get(key) else {
        return Ok(None);
    };

    let addr_str = value.as_str().ok_or_else(|| {
        ScriptError::ReadDeployments(format!("entry {} is not an address string", key))
    })?;

    Address::from_str(addr_str).map(Some).map_err(|e| {
        ScriptError::ReadDeployments(format!("failed to parse address {}: {}", addr_str, e))
    })
}

/// Record the address of a deployed contract under the given key,
/// creating the deployments file if it doesn't exist
pub fn write_deployment(
    key: &str,
    address: Address,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let mut json = if deployments_path.exists() {
        read_deployments_json(deployments_path)?
    } else {
        Map::new()
    };

    json.insert(key.to_string(), Value::String(format!("{address:#x}")));

    let contents = serde_json::to_string_pretty(&Value::Object(json))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(deployments_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}

/// Read the deployments file as a JSON object
fn read_deployments_json(deployments_path: &Path) -> Result<Map<String, Value>, ScriptError> {
    let content = fs::read_to_string(deployments_path).map_err(|e| {
        ScriptError::ReadDeployments(format!(
            "failed to read deployments file at {}: {}",
            deployments_path.display(),
            e
        ))
    })?;

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ScriptError::ReadDeployments(
            "deployments file is not a JSON object".to_string(),
        )),
        Err(e) => Err(ScriptError::ReadDeployments(e.to_string())),
    }
}

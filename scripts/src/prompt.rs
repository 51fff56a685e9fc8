//! Interactive console prompts

use std::str::FromStr;

use alloy_primitives::Address;

use crate::errors::ScriptError;

/// Ask the operator to choose one of the given accounts
pub fn select_account(prompt: &str, names: &[String]) -> Result<String, ScriptError> {
    let idx = dialoguer::Select::new()
        .with_prompt(prompt)
        .items(names)
        .default(0)
        .interact()
        .map_err(|e| ScriptError::Prompt(e.to_string()))?;

    Ok(names[idx].clone())
}

/// Ask for the password of the named account, without echoing it
pub fn read_password(account: &str) -> Result<String, ScriptError> {
    dialoguer::Password::new()
        .with_prompt(format!("Enter the password for \"{account}\""))
        .interact()
        .map_err(|e| ScriptError::Prompt(e.to_string()))
}

/// Ask for an Ethereum address, re-prompting until the input parses
pub fn prompt_for_address(prompt: &str) -> Result<Address, ScriptError> {
    let input: String = dialoguer::Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_eth_address(input) {
                Ok(())
            } else {
                Err("Invalid Ethereum address, expected 0x followed by 40 hex characters")
            }
        })
        .interact_text()
        .map_err(|e| ScriptError::Prompt(e.to_string()))?;

    Address::from_str(input.trim()).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

/// Whether the input parses as an Ethereum address
pub fn is_valid_eth_address(input: &str) -> bool {
    Address::from_str(input.trim()).is_ok()
}

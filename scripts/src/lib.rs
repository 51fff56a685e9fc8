//! Scripts for deploying and administering the vault smart contracts.

#![deny(missing_docs)]

pub mod accounts;
pub mod artifacts;
pub mod chain;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod deployments;
pub mod errors;
mod prompt;
mod solidity;
pub mod types;
pub mod utils;

//! Scripts for compiling, deploying, and interacting with Solidity contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod errors;
pub mod proxy;
pub mod repl;
pub mod types;
pub mod utils;

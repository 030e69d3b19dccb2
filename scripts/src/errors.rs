//! Definitions of errors that can occur during the execution of the contract scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the contract scripts
#[derive(Debug)]
pub enum ScriptError {
    /// A compiled or deployed file that the workflow depends on does not exist
    FileNotFound(String),
    /// Error reading a compiled or deployed file
    ReadFile(String),
    /// Error writing a compiled or deployed file
    WriteFile(String),
    /// Error parsing a compilation artifact or deployment record
    ArtifactParsing(String),
    /// Error loading the configuration file
    Config(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error compiling a Solidity contract
    ContractCompilation(String),
    /// Error constructing calldata for a contract method or constructor
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// The named account is not present in the configuration
    UnknownAccount(String),
    /// Error reading from or writing to the terminal
    Input(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::FileNotFound(s) => write!(f, "file not found: {}", s),
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::Config(s) => write!(f, "error loading config: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractCompilation(s) => write!(f, "error compiling contract: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::UnknownAccount(s) => write!(f, "unknown account '{}'", s),
            ScriptError::Input(s) => write!(f, "error reading input: {}", s),
        }
    }
}

impl Error for ScriptError {}

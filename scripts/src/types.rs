//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    primitives::{Address, BlockHash, TxHash},
};
use serde::{Deserialize, Serialize};

use crate::utils::format_values;

/// A compiled contract, as persisted in `compiled/<name>.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompiledContract {
    /// The contract name
    pub name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The creation bytecode, hex encoded
    pub bin: String,
}

/// The result of deploying a contract, as persisted in `deployed/<name>.json`
///
/// Only the contract address is required when reading a record back, so that
/// records written by other tools can be used to interact with a contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// The address of the deployed contract
    pub contract_address: Address,
    /// The hash of the contract creation transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
    /// The block in which the creation transaction was included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// The hash of that block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<BlockHash>,
    /// The deployer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// The gas used by the creation transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    /// Whether the creation transaction succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

/// A summary of a mined state-changing transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionSummary {
    /// The transaction hash
    pub transaction_hash: TxHash,
    /// The block in which the transaction was included
    pub block_number: Option<u64>,
    /// The gas used by the transaction
    pub gas_used: u64,
    /// Whether the transaction succeeded
    pub status: bool,
}

impl Display for TransactionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.status { "success" } else { "reverted" };
        write!(
            f,
            "transaction {} {} (gas used: {}",
            self.transaction_hash, status, self.gas_used
        )?;
        if let Some(block) = self.block_number {
            write!(f, ", block: {}", block)?;
        }
        write!(f, ")")
    }
}

/// The result of invoking a contract method
#[derive(Clone, Debug, PartialEq)]
pub enum CallOutcome {
    /// The decoded return values of a read-only call
    Values(Vec<DynSolValue>),
    /// The receipt summary of a state-changing transaction
    Transaction(TransactionSummary),
}

impl Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallOutcome::Values(values) => write!(f, "{}", format_values(values)),
            CallOutcome::Transaction(summary) => write!(f, "{}", summary),
        }
    }
}

//! The chain client: contract deployment, calls, and transactions over RPC

use std::{collections::HashMap, str::FromStr};

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::debug;

use crate::{
    config::Config,
    errors::ScriptError,
    types::{DeploymentRecord, TransactionSummary},
};

/// The operations the workflows need from a chain, on behalf of a named account
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Whether `account` names a configured signing account
    fn has_account(&self, account: &str) -> bool;

    /// Submit a contract creation transaction and wait for it to be mined
    async fn deploy(&self, account: &str, code: Bytes) -> Result<DeploymentRecord, ScriptError>;

    /// Execute a read-only call and return the raw return data
    async fn call(
        &self,
        account: &str,
        to: Address,
        calldata: Bytes,
    ) -> Result<Bytes, ScriptError>;

    /// Send a state-changing transaction and wait for it to be mined
    async fn send(
        &self,
        account: &str,
        to: Address,
        calldata: Bytes,
    ) -> Result<TransactionSummary, ScriptError>;
}

/// A [`ChainClient`] talking to an HTTP RPC endpoint, signing locally with
/// the configured accounts
pub struct RpcClient {
    /// The RPC endpoint
    url: Url,
    /// The signing accounts, by name
    signers: HashMap<String, PrivateKeySigner>,
}

impl RpcClient {
    /// Set up a client from the RPC URL and accounts in the configuration
    pub fn new(config: &Config) -> Result<Self, ScriptError> {
        let url = Url::parse(&config.rpc_url)
            .map_err(|e| ScriptError::ClientInitialization(format!("{}: {}", config.rpc_url, e)))?;

        let signers = config
            .accounts
            .iter()
            .map(|(name, key)| {
                PrivateKeySigner::from_str(key)
                    .map(|signer| (name.clone(), signer))
                    .map_err(|e| {
                        ScriptError::ClientInitialization(format!(
                            "invalid private key for account '{}': {}",
                            name, e
                        ))
                    })
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { url, signers })
    }

    /// Set up a provider that signs with the given account
    fn provider(&self, account: &str) -> Result<(DynProvider, Address), ScriptError> {
        let signer = self
            .signers
            .get(account)
            .cloned()
            .ok_or_else(|| ScriptError::UnknownAccount(account.to_string()))?;
        let address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(self.url.clone());
        Ok((DynProvider::new(provider), address))
    }
}

impl ChainClient for RpcClient {
    fn has_account(&self, account: &str) -> bool {
        self.signers.contains_key(account)
    }

    async fn deploy(&self, account: &str, code: Bytes) -> Result<DeploymentRecord, ScriptError> {
        let (provider, from) = self.provider(account)?;
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code);

        let receipt = send_and_wait(&provider, tx)
            .await
            .map_err(ScriptError::ContractDeployment)?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "creation transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        let contract_address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in receipt of {}",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeploymentRecord {
            contract_address,
            transaction_hash: Some(receipt.transaction_hash),
            block_number: receipt.block_number,
            block_hash: receipt.block_hash,
            from: Some(receipt.from),
            gas_used: Some(receipt.gas_used),
            status: Some(true),
        })
    }

    async fn call(
        &self,
        account: &str,
        to: Address,
        calldata: Bytes,
    ) -> Result<Bytes, ScriptError> {
        let (provider, from) = self.provider(account)?;
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(calldata);

        provider
            .call(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn send(
        &self,
        account: &str,
        to: Address,
        calldata: Bytes,
    ) -> Result<TransactionSummary, ScriptError> {
        let (provider, from) = self.provider(account)?;
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(calldata);

        let receipt = send_and_wait(&provider, tx)
            .await
            .map_err(ScriptError::ContractInteraction)?;

        Ok(TransactionSummary {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            status: receipt.status(),
        })
    }
}

/// Send a transaction and wait for its receipt
///
/// Once the transaction has been accepted by the node, errors mention its hash
/// so that a transaction which was mined despite the error can be found.
async fn send_and_wait(
    provider: &DynProvider,
    tx: TransactionRequest,
) -> Result<TransactionReceipt, String> {
    let pending_tx = provider
        .send_transaction(tx)
        .await
        .map_err(|e| format!("pending tx error: {e}"))?;

    let tx_hash = *pending_tx.tx_hash();
    debug!(%tx_hash, "transaction submitted");

    pending_tx
        .get_receipt()
        .await
        .map_err(|e| format!("no receipt for {tx_hash}: {e}"))
}

//! The configuration shared by all workflows, loaded once at startup

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    constants::{
        DEFAULT_ACCOUNT_NAME, DEFAULT_COMPILED_DIR, DEFAULT_CONTRACTS_DIR, DEFAULT_DEPLOYED_DIR,
        DEFAULT_DEVNET_PKEY, DEFAULT_RPC_URL, DEFAULT_SOLC_COMMAND, JSON_EXTENSION,
        SOLIDITY_EXTENSION,
    },
    errors::ScriptError,
};

/// Network endpoint, signing accounts, and file locations used by the workflows
///
/// Every field may be omitted from the configuration file, in which case the
/// local devnet default is used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// The RPC URL of the node to deploy to and call
    pub rpc_url: String,
    /// Named signing accounts, mapping an account name to a hex private key
    pub accounts: BTreeMap<String, String>,
    /// The account used when the user does not name one
    pub default_account: String,
    /// The directory holding `<name>.sol` sources
    pub contracts_dir: PathBuf,
    /// The directory holding `<name>.json` compiled contracts
    pub compiled_dir: PathBuf,
    /// The directory holding `<name>.json` deployment records
    pub deployed_dir: PathBuf,
    /// The Solidity compiler executable
    pub solc: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            accounts: BTreeMap::from([(
                DEFAULT_ACCOUNT_NAME.to_string(),
                DEFAULT_DEVNET_PKEY.to_string(),
            )]),
            default_account: DEFAULT_ACCOUNT_NAME.to_string(),
            contracts_dir: PathBuf::from(DEFAULT_CONTRACTS_DIR),
            compiled_dir: PathBuf::from(DEFAULT_COMPILED_DIR),
            deployed_dir: PathBuf::from(DEFAULT_DEPLOYED_DIR),
            solc: DEFAULT_SOLC_COMMAND.to_string(),
        }
    }
}

impl Config {
    /// Load the configuration from the given JSON file
    ///
    /// A missing file yields the defaults, a malformed one is an error
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| ScriptError::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "No config file at {}, using local devnet defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ScriptError::Config(format!("{}: {}", path.display(), e))),
        }
    }

    /// The account to use for the given answer, falling back to the default
    /// account when the answer is empty
    pub fn resolve_account<'a>(&'a self, answer: &'a str) -> &'a str {
        let answer = answer.trim();
        if answer.is_empty() {
            &self.default_account
        } else {
            answer
        }
    }

    /// The path of the Solidity source for contract `name`
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.contracts_dir.join(format!("{name}.{SOLIDITY_EXTENSION}"))
    }

    /// The path of the compiled file for contract `name`
    pub fn compiled_path(&self, name: &str) -> PathBuf {
        self.compiled_dir.join(format!("{name}.{JSON_EXTENSION}"))
    }

    /// The path of the deployment record for contract `name`
    pub fn deployed_path(&self, name: &str) -> PathBuf {
        self.deployed_dir.join(format!("{name}.{JSON_EXTENSION}"))
    }
}

//! Constants used in the contract scripts

// -----------
// | Prompts |
// -----------

/// The prompt for the name of the contract to compile
pub const COMPILE_NAME_PROMPT: &str = "contract name: ";

/// The prompt for the name of the contract to deploy
pub const DEPLOY_NAME_PROMPT: &str = "Which contract are you gonna deploy? ";

/// The prompt for the account that signs the deployment
pub const DEPLOY_ACCOUNT_PROMPT: &str = "Which account are you gonna use? ";

/// The prompt for the constructor parameters
pub const DEPLOY_PARAMS_PROMPT: &str = "Parameters of constructor (split by space): ";

/// The prompt for the name of the contract to interact with
pub const INTERACT_NAME_PROMPT: &str = "which contract are you going to use? ";

/// The prompt shown before each command of the interactive loop
pub const COMMAND_PROMPT: &str = "> ";

// ------------------
// | Loop commands |
// ------------------

/// Terminates the interactive loop
pub const EXIT_COMMAND: &str = ".exit";

/// Lists the methods of the loaded contract
pub const HELP_COMMAND: &str = ".help";

/// Switches the account that signs subsequent transactions
pub const SWITCH_ACCOUNT_COMMAND: &str = ".by";

// ---------
// | Files |
// ---------

/// The extension of Solidity source files
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of compiled and deployed files
pub const JSON_EXTENSION: &str = "json";

/// The name of the environment variable pointing at the configuration file
pub const CONFIG_ENV_VAR: &str = "SCRIPTS_CONFIG";

/// The default path of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// The default directory holding Solidity sources
pub const DEFAULT_CONTRACTS_DIR: &str = "contracts";

/// The default directory holding compiled contracts
pub const DEFAULT_COMPILED_DIR: &str = "compiled";

/// The default directory holding deployment records
pub const DEFAULT_DEPLOYED_DIR: &str = "deployed";

// ------------
// | Compiler |
// ------------

/// The default name of the Solidity compiler executable
pub const DEFAULT_SOLC_COMMAND: &str = "solc";

/// The flag selecting solc's combined JSON output
pub const COMBINED_JSON_FLAG: &str = "--combined-json";

/// The outputs requested from solc
pub const COMBINED_JSON_OUTPUTS: &str = "abi,bin";

/// The separator between the source path and contract name in solc's output keys
pub const CONTRACT_KEY_SEPARATOR: char = ':';

// -----------
// | Network |
// -----------

/// The default RPC URL, a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The name of the account used when none is specified
pub const DEFAULT_ACCOUNT_NAME: &str = "default";

/// The default private key, the first default account in an Anvil node
pub const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

//! Definitions of CLI arguments and commands for the contract scripts

use std::{io, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use tool_utils::LineReader;

use crate::{
    client::RpcClient,
    commands::{compile, deploy, interact},
    compiler::SolcCompiler,
    config::Config,
    constants::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH},
    errors::ScriptError,
};

/// Compile, deploy, and interact with Solidity contracts
///
/// Any argument a workflow needs that is not given on the command line is
/// prompted for interactively.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = CONFIG_ENV_VAR, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// The workflow to run
    #[command(subcommand)]
    pub command: Command,
}

/// The workflows
#[derive(Subcommand)]
pub enum Command {
    /// Compile `contracts/<name>.sol` into `compiled/<name>.json`
    Compile(CompileArgs),
    /// Deploy `compiled/<name>.json`, recording the result in `deployed/<name>.json`
    Deploy(DeployArgs),
    /// Call the methods of a deployed contract interactively
    Interact(InteractArgs),
}

impl Command {
    /// Run the workflow against the real compiler and RPC endpoint
    pub async fn run(
        self,
        config: &Config,
        reader: &mut impl LineReader,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Compile(args) => {
                let compiler = SolcCompiler::new(config.solc.clone());
                compile(args, config, reader, &compiler).map(|_| ())
            }
            Command::Deploy(args) => {
                let client = RpcClient::new(config)?;
                deploy(args, config, reader, &client).await.map(|_| ())
            }
            Command::Interact(args) => {
                let client = RpcClient::new(config)?;
                interact(args, config, reader, &mut io::stdout(), &client).await
            }
        }
    }
}

/// Compile a contract
#[derive(Args, Default)]
pub struct CompileArgs {
    /// The contract name, matching `contracts/<name>.sol`
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Deploy a compiled contract
#[derive(Args, Default)]
pub struct DeployArgs {
    /// The contract name, matching `compiled/<name>.json`
    #[arg(short, long)]
    pub name: Option<String>,

    /// The configured account to deploy from, empty for the default account
    #[arg(short, long)]
    pub account: Option<String>,

    /// Constructor parameters, separated by spaces
    #[arg(short, long, allow_hyphen_values = true)]
    pub params: Option<String>,
}

/// Interact with a deployed contract
#[derive(Args, Default)]
pub struct InteractArgs {
    /// The contract name, matching `compiled/<name>.json` and `deployed/<name>.json`
    #[arg(short, long)]
    pub name: Option<String>,

    /// The configured account to act as, defaults to the default account
    #[arg(short, long)]
    pub account: Option<String>,
}

//! Implementations of the compile, deploy, and interact workflows

use std::io::Write;

use tool_utils::{prompt_for_input, LineReader};
use tracing::{error, info};

use crate::{
    cli::{CompileArgs, DeployArgs, InteractArgs},
    client::ChainClient,
    compiler::Compiler,
    config::Config,
    constants::{
        COMPILE_NAME_PROMPT, DEPLOY_ACCOUNT_PROMPT, DEPLOY_NAME_PROMPT, DEPLOY_PARAMS_PROMPT,
        INTERACT_NAME_PROMPT,
    },
    errors::ScriptError,
    proxy::{deploy_code, ContractProxy},
    repl::Session,
    types::{CompiledContract, DeploymentRecord},
    utils::{
        read_compiled, read_deployment, split_params, to_pretty_json, write_compiled,
        write_deployment,
    },
};

/// Compile `contracts/<name>.sol` and save the result to `compiled/<name>.json`
///
/// Compiler failures are returned; a failure to save the result is only logged
pub fn compile(
    args: CompileArgs,
    config: &Config,
    reader: &mut impl LineReader,
    compiler: &impl Compiler,
) -> Result<CompiledContract, ScriptError> {
    let name = answer_or_prompt(args.name, reader, COMPILE_NAME_PROMPT)?;

    info!("Compiling {} ...", name);
    let compiled = compiler.compile(&config.source_path(&name), &name)?;

    match write_compiled(config, &compiled) {
        Ok(()) => info!(
            "Compiled file saved to {}",
            config.compiled_path(&name).display()
        ),
        Err(e) => error!("Failed to write compiled file: {}", e),
    }

    Ok(compiled)
}

/// Deploy a compiled contract and save the result to `deployed/<name>.json`
///
/// A missing compiled file is returned as an error. Deployment failures are
/// logged and yield `None`, leaving any earlier deployment record in place.
pub async fn deploy(
    args: DeployArgs,
    config: &Config,
    reader: &mut impl LineReader,
    client: &impl ChainClient,
) -> Result<Option<DeploymentRecord>, ScriptError> {
    let name = answer_or_prompt(args.name, reader, DEPLOY_NAME_PROMPT)?;

    info!("Loading contract from compiled file ...");
    let compiled = read_compiled(config, &name)?;

    let account = answer_or_prompt(args.account, reader, DEPLOY_ACCOUNT_PROMPT)?;
    let account = config.resolve_account(&account);
    let params = split_params(&answer_or_prompt(args.params, reader, DEPLOY_PARAMS_PROMPT)?);

    info!("Trying to deploy contract {} from account '{}' ...", name, account);
    let deployment = match deploy_code(&compiled, &params) {
        Ok(code) => client.deploy(account, code).await,
        Err(e) => Err(e),
    };

    let record = match deployment {
        Ok(record) => record,
        Err(e) => {
            error!("Failed to deploy {}: {}", name, e);
            return Ok(None);
        }
    };

    info!(
        "Contract {} deployed at {:#x}",
        name, record.contract_address
    );
    match to_pretty_json(&record) {
        Ok(json) => info!("Deployment record:\n{}", json),
        Err(e) => error!("Failed to render deployment record: {}", e),
    }

    match write_deployment(config, &name, &record) {
        Ok(()) => info!(
            "Deployed file saved to {}",
            config.deployed_path(&name).display()
        ),
        Err(e) => error!(
            "Contract deployed, but failed to write deployed file: {}",
            e
        ),
    }

    Ok(Some(record))
}

/// Load a deployed contract and run the interactive command loop against it
pub async fn interact<C: ChainClient>(
    args: InteractArgs,
    config: &Config,
    reader: &mut impl LineReader,
    out: &mut impl Write,
    client: &C,
) -> Result<(), ScriptError> {
    let name = answer_or_prompt(args.name, reader, INTERACT_NAME_PROMPT)?;

    info!("Loading contract from compiled file ...");
    let compiled = read_compiled(config, &name)?;

    info!("Loading deployed contract address from deployed file ...");
    let record = read_deployment(config, &name)?;
    let proxy = ContractProxy::new(&compiled, record.contract_address)?;

    let account = args
        .account
        .unwrap_or_else(|| config.default_account.clone());
    if !client.has_account(&account) {
        return Err(ScriptError::UnknownAccount(account));
    }

    info!(
        "Done. {} at {:#x}, acting as '{}'",
        proxy.name(),
        proxy.address(),
        account
    );
    Session::new(&proxy, client, account).run(reader, out).await
}

/// Use the value given on the command line, or prompt for it
fn answer_or_prompt(
    given: Option<String>,
    reader: &mut impl LineReader,
    prompt: &str,
) -> Result<String, ScriptError> {
    match given {
        Some(answer) => Ok(answer),
        None => prompt_for_input(reader, prompt).map_err(|e| ScriptError::Input(e.to_string())),
    }
}

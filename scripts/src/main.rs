use clap::Parser;
use contract_scripts::{cli::Cli, config::Config, errors::ScriptError};
use tool_utils::StdinReader;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli { config, command } = Cli::parse();

    // Logs go to stderr so that prompts and command results stay on stdout
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(&config)?;

    // Workflow failures are reported, not signaled through the exit status
    if let Err(e) = command.run(&config, &mut StdinReader).await {
        error!("{}", e);
    }

    Ok(())
}

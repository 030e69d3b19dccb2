//! Compiling Solidity sources with an external `solc` executable

use std::{collections::BTreeMap, path::Path, process::Command};

use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use serde_json::Value;
use tool_utils::run_command_captured;

use crate::{
    constants::{COMBINED_JSON_FLAG, COMBINED_JSON_OUTPUTS, CONTRACT_KEY_SEPARATOR},
    errors::ScriptError,
    types::CompiledContract,
};

/// Produces the ABI and bytecode of a named contract from its source file
pub trait Compiler {
    /// Compile `source` and return the contract called `name` defined in it
    fn compile(&self, source: &Path, name: &str) -> Result<CompiledContract, ScriptError>;
}

/// A [`Compiler`] that shells out to `solc --combined-json abi,bin`
///
/// Assumes the configured executable is available on the local machine.
#[derive(Clone, Debug)]
pub struct SolcCompiler {
    /// The executable to invoke
    command: String,
}

impl SolcCompiler {
    /// Create a compiler invoking the given executable
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Compiler for SolcCompiler {
    fn compile(&self, source: &Path, name: &str) -> Result<CompiledContract, ScriptError> {
        if !source.exists() {
            return Err(ScriptError::FileNotFound(source.display().to_string()));
        }

        let mut solc_cmd = Command::new(&self.command);
        solc_cmd.arg(COMBINED_JSON_FLAG);
        solc_cmd.arg(COMBINED_JSON_OUTPUTS);
        solc_cmd.arg(source);

        let output = run_command_captured(solc_cmd)
            .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;

        parse_combined_json(&output.stdout, name)
    }
}

/// The subset of solc's combined JSON output we consume
#[derive(Deserialize)]
struct SolcOutput {
    /// Compiled contracts keyed by `<source path>:<contract name>`
    contracts: BTreeMap<String, SolcContract>,
}

/// A single contract in solc's combined JSON output
#[derive(Deserialize)]
struct SolcContract {
    /// The ABI, inline JSON on recent compilers and a JSON string on older ones
    abi: Value,
    /// The creation bytecode, hex encoded
    bin: String,
}

/// Pick the contract called `name` out of solc's combined JSON output
pub(crate) fn parse_combined_json(
    stdout: &[u8],
    name: &str,
) -> Result<CompiledContract, ScriptError> {
    let output: SolcOutput = serde_json::from_slice(stdout)
        .map_err(|e| ScriptError::ArtifactParsing(format!("invalid solc output: {}", e)))?;

    let available = output.contracts.keys().cloned().collect::<Vec<_>>();
    let contract = output
        .contracts
        .into_iter()
        .find_map(|(key, contract)| {
            let contract_name = key.rsplit(CONTRACT_KEY_SEPARATOR).next()?;
            (contract_name == name).then_some(contract)
        })
        .ok_or_else(|| {
            ScriptError::ContractCompilation(format!(
                "no contract named {} in compiler output (found: {})",
                name,
                available.join(", ")
            ))
        })?;

    let abi: JsonAbi = match contract.abi {
        Value::String(abi) => serde_json::from_str(&abi),
        abi => serde_json::from_value(abi),
    }
    .map_err(|e| ScriptError::ArtifactParsing(format!("invalid ABI for {}: {}", name, e)))?;

    Ok(CompiledContract {
        name: name.to_string(),
        abi,
        bin: contract.bin,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{parse_combined_json, Compiler, SolcCompiler};
    use crate::errors::ScriptError;

    /// The ABI of a minimal counter contract, as emitted by solc
    const COUNTER_ABI: &str = r#"[{"inputs":[],"name":"get","outputs":[{"internalType":"uint256","name":"","type":"uint256"}],"stateMutability":"view","type":"function"},{"inputs":[{"internalType":"uint256","name":"value","type":"uint256"}],"name":"set","outputs":[],"stateMutability":"nonpayable","type":"function"}]"#;

    #[test]
    fn test_parse_inline_abi() {
        let stdout = format!(
            r#"{{"contracts":{{"contracts/Counter.sol:Counter":{{"abi":{COUNTER_ABI},"bin":"6080"}},"contracts/Counter.sol:Helper":{{"abi":[],"bin":"00"}}}},"version":"0.8.26"}}"#
        );

        let compiled = parse_combined_json(stdout.as_bytes(), "Counter").unwrap();
        assert_eq!(compiled.name, "Counter");
        assert_eq!(compiled.bin, "6080");
        assert_eq!(compiled.abi, serde_json::from_str(COUNTER_ABI).unwrap());
    }

    #[test]
    fn test_parse_string_encoded_abi() {
        let stdout = serde_json::json!({
            "contracts": {
                "contracts/Counter.sol:Counter": { "abi": COUNTER_ABI, "bin": "6080" }
            },
            "version": "0.5.17"
        })
        .to_string();

        let compiled = parse_combined_json(stdout.as_bytes(), "Counter").unwrap();
        assert_eq!(compiled.abi.functions().count(), 2);
    }

    #[test]
    fn test_missing_contract_lists_available() {
        let stdout = r#"{"contracts":{"contracts/Counter.sol:Helper":{"abi":[],"bin":"00"}}}"#;

        let err = parse_combined_json(stdout.as_bytes(), "Counter").unwrap_err();
        match err {
            ScriptError::ContractCompilation(msg) => {
                assert!(msg.contains("contracts/Counter.sol:Helper"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let compiler = SolcCompiler::new("solc");
        let err = compiler
            .compile(Path::new("does/not/exist/Counter.sol"), "Counter")
            .unwrap_err();

        assert!(matches!(err, ScriptError::FileNotFound(_)));
    }
}

//! Utilities for the contract scripts.

use std::{fs, io::ErrorKind, path::Path};

use alloy::{dyn_abi::DynSolValue, hex};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::Config,
    errors::ScriptError,
    types::{CompiledContract, DeploymentRecord},
};

// --------------
// | JSON files |
// --------------

/// Read and parse a JSON file, reporting a missing file as
/// [`ScriptError::FileNotFound`]
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ScriptError::FileNotFound(path.display().to_string())
        } else {
            ScriptError::ReadFile(format!("{}: {}", path.display(), e))
        }
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
}

/// Serialize a value to a pretty-printed JSON file, creating its parent
/// directory if necessary
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ScriptError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| ScriptError::WriteFile(format!("{}: {}", parent.display(), e)))?;
    }

    let contents = to_pretty_json(value).map_err(ScriptError::WriteFile)?;
    fs::write(path, contents)
        .map_err(|e| ScriptError::WriteFile(format!("{}: {}", path.display(), e)))
}

/// Render a value as pretty-printed JSON, the format of every file written
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

/// Load `compiled/<name>.json`
pub fn read_compiled(config: &Config, name: &str) -> Result<CompiledContract, ScriptError> {
    read_json_file(&config.compiled_path(name))
}

/// Persist a compiled contract under its own name
pub fn write_compiled(config: &Config, compiled: &CompiledContract) -> Result<(), ScriptError> {
    write_json_file(&config.compiled_path(&compiled.name), compiled)
}

/// Load `deployed/<name>.json`
pub fn read_deployment(config: &Config, name: &str) -> Result<DeploymentRecord, ScriptError> {
    read_json_file(&config.deployed_path(name))
}

/// Persist the deployment record of contract `name`, replacing any earlier one
pub fn write_deployment(
    config: &Config,
    name: &str,
    record: &DeploymentRecord,
) -> Result<(), ScriptError> {
    write_json_file(&config.deployed_path(name), record)
}

// ---------
// | Input |
// ---------

/// Split a line of user input into whitespace-separated tokens, discarding
/// empty ones
pub fn split_params(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

// ----------
// | Output |
// ----------

/// Render a decoded ABI value for the terminal
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => format!("{s:?}"),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", join_values(values))
        }
        DynSolValue::Tuple(values) => format!("({})", join_values(values)),
        other => format!("{other:?}"),
    }
}

/// Render the return values of a call: nothing, a single value, or a tuple
pub fn format_values(values: &[DynSolValue]) -> String {
    match values {
        [] => "()".to_string(),
        [value] => format_value(value),
        values => format!("({})", join_values(values)),
    }
}

/// Render a list of values separated by commas
fn join_values(values: &[DynSolValue]) -> String {
    values.iter().map(format_value).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use alloy::{
        json_abi::JsonAbi,
        primitives::{address, Address, I256, U256},
    };

    use super::*;

    #[test]
    fn test_split_params_discards_empty_tokens() {
        assert_eq!(split_params("  1   two\t3 \n"), vec!["1", "two", "3"]);
        assert!(split_params("   ").is_empty());
    }

    #[test]
    fn test_compiled_contract_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            compiled_dir: dir.path().join("compiled"),
            ..Default::default()
        };
        let compiled = CompiledContract {
            name: "Counter".to_string(),
            abi: JsonAbi::parse([
                "constructor(uint256 start)",
                "function get() external view returns (uint256)",
                "function set(uint256 value) external",
                "event Set(uint256 indexed value)",
            ])
            .unwrap(),
            bin: "6080604052348015600f57600080fd5b50".to_string(),
        };

        write_compiled(&config, &compiled).unwrap();
        let read_back = read_compiled(&config, "Counter").unwrap();

        assert_eq!(read_back, compiled);
    }

    #[test]
    fn test_deployment_record_accepts_address_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            deployed_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        fs::write(
            config.deployed_path("Counter"),
            r#"{ "contractAddress": "0x5fbdb2315678afecb367f032d93f642f64180aa3" }"#,
        )
        .unwrap();

        let record = read_deployment(&config, "Counter").unwrap();
        assert_eq!(
            record.contract_address,
            address!("5FbDB2315678afecb367f032d93F642f64180aa3")
        );
        assert_eq!(record.transaction_hash, None);
    }

    #[test]
    fn test_deployment_record_pretty_json() {
        let record = DeploymentRecord {
            contract_address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            transaction_hash: None,
            block_number: Some(1),
            block_hash: None,
            from: None,
            gas_used: Some(21_000),
            status: Some(true),
        };

        let json = to_pretty_json(&record).unwrap();
        let lines = json.lines().map(str::trim).collect::<Vec<_>>();
        assert!(json
            .to_lowercase()
            .contains(r#""contractaddress": "0x5fbdb2315678afecb367f032d93f642f64180aa3""#));
        assert!(lines.contains(&r#""blockNumber": 1,"#));
        assert!(lines.contains(&r#""status": true"#));
        assert!(!json.contains("transactionHash"));
    }

    #[test]
    fn test_missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            compiled_dir: dir.path().to_path_buf(),
            ..Default::default()
        };

        let err = read_compiled(&config, "Missing").unwrap_err();
        assert!(matches!(err, ScriptError::FileNotFound(path) if path.ends_with("Missing.json")));
    }

    #[test]
    fn test_format_values() {
        let values = vec![
            DynSolValue::Uint(U256::from(42), 256),
            DynSolValue::Int(I256::from_dec_str("-7").unwrap(), 256),
            DynSolValue::Bool(true),
            DynSolValue::String("hi".to_string()),
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Array(vec![
                DynSolValue::Uint(U256::from(1), 8),
                DynSolValue::Uint(U256::from(2), 8),
            ]),
        ];

        assert_eq!(
            format_values(&values),
            "(42, -7, true, \"hi\", 0x0000000000000000000000000000000000000000, [1, 2])"
        );
        assert_eq!(format_values(&values[..1]), "42");
        assert_eq!(format_values(&[]), "()");
        assert_eq!(
            format_value(&DynSolValue::Bytes(vec![0xde, 0xad])),
            "0xdead"
        );
    }
}

//! A method table over a deployed contract, built once from its ABI
//!
//! Each ABI function becomes a [`MethodDescriptor`] holding its resolved
//! parameter types, so that user input can be looked up by name and coerced
//! from strings at dispatch time.

use std::collections::HashMap;

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt, Specifier},
    hex,
    json_abi::{Function, Param, StateMutability},
    primitives::{Address, Bytes},
};

use crate::{
    client::ChainClient,
    errors::ScriptError,
    types::{CallOutcome, CompiledContract},
};

/// How a contract method is executed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    /// A `view` or `pure` method, executed with `eth_call`
    Call,
    /// A state-changing method, sent as a signed transaction
    Transaction,
}

/// A single ABI function together with its resolved parameter types
#[derive(Clone, Debug)]
pub struct MethodDescriptor {
    /// The ABI function
    function: Function,
    /// The resolved input types, in order
    inputs: Vec<DynSolType>,
    /// Whether the method is called or transacted
    kind: MethodKind,
}

impl MethodDescriptor {
    /// Build a descriptor for an ABI function
    pub fn new(function: &Function) -> Result<Self, ScriptError> {
        let inputs = resolve_params(&function.inputs)?;
        let kind = match function.state_mutability {
            StateMutability::Pure | StateMutability::View => MethodKind::Call,
            StateMutability::NonPayable | StateMutability::Payable => MethodKind::Transaction,
        };

        Ok(Self {
            function: function.clone(),
            inputs,
            kind,
        })
    }

    /// The number of arguments the method takes
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// How the method is executed
    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    /// The full signature, including outputs
    pub fn signature(&self) -> String {
        self.function.full_signature()
    }

    /// Coerce string arguments to the method's input types and ABI-encode the
    /// call, selector included
    pub fn encode_call(&self, args: &[String]) -> Result<Bytes, ScriptError> {
        let values = coerce_args(&self.inputs, args)?;
        self.function
            .abi_encode_input(&values)
            .map(Bytes::from)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
    }

    /// Decode the return data of a call
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<DynSolValue>, ScriptError> {
        self.function
            .abi_decode_output(data)
            .map_err(|e| ScriptError::ContractInteraction(format!("undecodable output: {}", e)))
    }
}

/// A contract's methods bound to its deployed address
#[derive(Clone, Debug)]
pub struct ContractProxy {
    /// The contract name
    name: String,
    /// The deployed address
    address: Address,
    /// The methods, keyed by name, one descriptor per overload
    methods: HashMap<String, Vec<MethodDescriptor>>,
}

impl ContractProxy {
    /// Build the method table of a compiled contract deployed at `address`
    pub fn new(contract: &CompiledContract, address: Address) -> Result<Self, ScriptError> {
        let methods = contract
            .abi
            .functions
            .iter()
            .map(|(name, overloads)| {
                let descriptors = overloads
                    .iter()
                    .map(MethodDescriptor::new)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, ScriptError>((name.clone(), descriptors))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            name: contract.name.clone(),
            address,
            methods,
        })
    }

    /// The contract name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The address the proxy is bound to
    pub fn address(&self) -> Address {
        self.address
    }

    /// Whether the contract declares a method with this name
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// The signatures of every method, sorted
    pub fn signatures(&self) -> Vec<String> {
        let mut signatures = self
            .methods
            .values()
            .flatten()
            .map(MethodDescriptor::signature)
            .collect::<Vec<_>>();
        signatures.sort();
        signatures
    }

    /// Select the overload of `method` taking `arity` arguments
    pub fn select(&self, method: &str, arity: usize) -> Result<&MethodDescriptor, ScriptError> {
        let overloads = self.methods.get(method).ok_or_else(|| {
            ScriptError::ContractInteraction(format!("undefined method '{}'", method))
        })?;

        overloads
            .iter()
            .find(|descriptor| descriptor.arity() == arity)
            .ok_or_else(|| {
                let expected = overloads
                    .iter()
                    .map(|descriptor| descriptor.arity().to_string())
                    .collect::<Vec<_>>()
                    .join(" or ");
                ScriptError::CalldataConstruction(format!(
                    "{} takes {} arguments, got {}",
                    method, expected, arity
                ))
            })
    }

    /// Invoke `method` with string arguments on behalf of `account`
    pub async fn invoke<C: ChainClient>(
        &self,
        client: &C,
        account: &str,
        method: &str,
        args: &[String],
    ) -> Result<CallOutcome, ScriptError> {
        let descriptor = self.select(method, args.len())?;
        let calldata = descriptor.encode_call(args)?;

        match descriptor.kind() {
            MethodKind::Call => {
                let data = client.call(account, self.address, calldata).await?;
                descriptor.decode_output(&data).map(CallOutcome::Values)
            }
            MethodKind::Transaction => client
                .send(account, self.address, calldata)
                .await
                .map(CallOutcome::Transaction),
        }
    }
}

/// Build the creation code for a contract: its bytecode followed by the
/// ABI-encoded constructor arguments
pub fn deploy_code(contract: &CompiledContract, params: &[String]) -> Result<Bytes, ScriptError> {
    let mut code = hex::decode(contract.bin.trim())
        .map_err(|e| ScriptError::ArtifactParsing(format!("invalid bytecode: {}", e)))?;
    if code.is_empty() {
        return Err(ScriptError::ContractDeployment(format!(
            "{} has no bytecode, it may be abstract or an interface",
            contract.name
        )));
    }

    match &contract.abi.constructor {
        Some(constructor) => {
            let inputs = resolve_params(&constructor.inputs)?;
            let values = coerce_args(&inputs, params)?;
            let encoded = constructor
                .abi_encode_input(&values)
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
            code.extend_from_slice(&encoded);
        }
        None if !params.is_empty() => {
            return Err(ScriptError::CalldataConstruction(format!(
                "{} has no constructor but {} parameters were given",
                contract.name,
                params.len()
            )));
        }
        None => {}
    }

    Ok(code.into())
}

/// Resolve ABI parameters to concrete types
fn resolve_params(params: &[Param]) -> Result<Vec<DynSolType>, ScriptError> {
    params
        .iter()
        .map(|param| {
            param
                .resolve()
                .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", param.ty, e)))
        })
        .collect()
}

/// Coerce string arguments to the given types, one argument per type
pub fn coerce_args(types: &[DynSolType], args: &[String]) -> Result<Vec<DynSolValue>, ScriptError> {
    if types.len() != args.len() {
        return Err(ScriptError::CalldataConstruction(format!(
            "expected {} arguments, got {}",
            types.len(),
            args.len()
        )));
    }

    types
        .iter()
        .zip(args)
        .map(|(ty, arg)| {
            ty.coerce_str(arg).map_err(|e| {
                ScriptError::CalldataConstruction(format!(
                    "invalid {} argument '{}': {}",
                    ty.sol_type_name(),
                    arg,
                    e
                ))
            })
        })
        .collect()
}

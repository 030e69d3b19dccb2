//! The interactive command loop of the interact workflow

use std::io::Write;

use tool_utils::LineReader;
use tracing::debug;

use crate::{
    client::ChainClient,
    constants::{COMMAND_PROMPT, EXIT_COMMAND, HELP_COMMAND, SWITCH_ACCOUNT_COMMAND},
    errors::ScriptError,
    proxy::ContractProxy,
    utils::split_params,
};

/// The state of the command loop after handling a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Keep reading commands
    Running,
    /// Stop reading commands
    Exited,
}

/// Dispatches user commands to a contract on behalf of the current account
pub struct Session<'a, C> {
    /// The contract being interacted with
    proxy: &'a ContractProxy,
    /// The chain client
    client: &'a C,
    /// The account calls and transactions are made from
    account: String,
}

impl<'a, C: ChainClient> Session<'a, C> {
    /// Start a session acting as `account`
    pub fn new(proxy: &'a ContractProxy, client: &'a C, account: impl Into<String>) -> Self {
        Self {
            proxy,
            client,
            account: account.into(),
        }
    }

    /// The account calls and transactions are currently made from
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Read and dispatch commands until `.exit` or the end of input
    pub async fn run(
        &mut self,
        reader: &mut impl LineReader,
        out: &mut impl Write,
    ) -> Result<(), ScriptError> {
        loop {
            let line = reader
                .read_line(COMMAND_PROMPT)
                .map_err(|e| ScriptError::Input(e.to_string()))?;

            let Some(line) = line else {
                debug!("input closed, leaving command loop");
                return Ok(());
            };

            if self.dispatch(&line, out).await? == LoopState::Exited {
                return Ok(());
            }
        }
    }

    /// Handle a single line of input
    ///
    /// Method failures are reported to `out` and leave the loop running; only
    /// failing to write to `out` is an error
    pub async fn dispatch(
        &mut self,
        line: &str,
        out: &mut impl Write,
    ) -> Result<LoopState, ScriptError> {
        let mut tokens = split_params(line).into_iter();
        let Some(method) = tokens.next() else {
            return Ok(LoopState::Running);
        };
        let args = tokens.collect::<Vec<_>>();

        let written = match method.as_str() {
            EXIT_COMMAND => return Ok(LoopState::Exited),
            HELP_COMMAND => self
                .proxy
                .signatures()
                .iter()
                .try_for_each(|signature| writeln!(out, "{}", signature)),
            SWITCH_ACCOUNT_COMMAND => match args.as_slice() {
                [account] if self.client.has_account(account) => {
                    self.account = account.clone();
                    writeln!(out, "using account '{}'", account)
                }
                [account] => writeln!(out, "unknown account '{}'", account),
                _ => writeln!(out, "usage: {} <account>", SWITCH_ACCOUNT_COMMAND),
            },
            method if !self.proxy.has_method(method) => {
                writeln!(out, "undefined method '{}'", method)
            }
            method => {
                match self
                    .proxy
                    .invoke(self.client, &self.account, method, &args)
                    .await
                {
                    Ok(outcome) => writeln!(out, "{}", outcome),
                    Err(e) => writeln!(out, "error occurred: {}", e),
                }
            }
        };

        written.map_err(|e| ScriptError::Input(e.to_string()))?;
        Ok(LoopState::Running)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use alloy::{
        dyn_abi::DynSolValue,
        json_abi::JsonAbi,
        primitives::{Address, Bytes, B256, U256},
    };
    use tool_utils::ScriptedReader;

    use super::{LoopState, Session};
    use crate::{
        client::ChainClient,
        errors::ScriptError,
        proxy::ContractProxy,
        types::{CompiledContract, DeploymentRecord, TransactionSummary},
    };

    /// A chain that answers every call with `42` and records what it was sent
    #[derive(Default)]
    struct RecordingChain {
        /// `(account, calldata)` of every call and transaction
        calls: RefCell<Vec<(String, Bytes)>>,
    }

    impl ChainClient for RecordingChain {
        fn has_account(&self, account: &str) -> bool {
            account == "alice" || account == "bob"
        }

        async fn deploy(&self, _: &str, _: Bytes) -> Result<DeploymentRecord, ScriptError> {
            unimplemented!("not used by the command loop")
        }

        async fn call(
            &self,
            account: &str,
            _: Address,
            calldata: Bytes,
        ) -> Result<Bytes, ScriptError> {
            self.calls.borrow_mut().push((account.to_string(), calldata));
            Ok(DynSolValue::Uint(U256::from(42), 256).abi_encode().into())
        }

        async fn send(
            &self,
            account: &str,
            _: Address,
            calldata: Bytes,
        ) -> Result<TransactionSummary, ScriptError> {
            self.calls.borrow_mut().push((account.to_string(), calldata));
            Ok(TransactionSummary {
                transaction_hash: B256::repeat_byte(0xab),
                block_number: Some(3),
                gas_used: 21_000,
                status: true,
            })
        }
    }

    /// A proxy over a contract with one view and one state-changing method
    fn proxy() -> ContractProxy {
        let contract = CompiledContract {
            name: "Counter".to_string(),
            abi: JsonAbi::parse([
                "function get() external view returns (uint256)",
                "function add(uint256 a, uint256 b) external",
            ])
            .unwrap(),
            bin: "6080".to_string(),
        };
        ContractProxy::new(&contract, Address::ZERO).unwrap()
    }

    /// The lines written to the loop's output
    fn output_lines(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .lines()
            .map(String::from)
            .collect()
    }

    #[tokio::test]
    async fn test_exit_stops_reading() {
        let proxy = proxy();
        let chain = RecordingChain::default();
        let mut reader = ScriptedReader::new([".exit", "get"]);
        let mut out = Vec::new();

        Session::new(&proxy, &chain, "alice")
            .run(&mut reader, &mut out)
            .await
            .unwrap();

        assert_eq!(reader.prompts(), ["> "]);
        assert_eq!(reader.remaining(), 1);
        assert!(out.is_empty());
        assert!(chain.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_undefined_method_prints_one_line() {
        let proxy = proxy();
        let chain = RecordingChain::default();
        let mut session = Session::new(&proxy, &chain, "alice");
        let mut out = Vec::new();

        let state = session.dispatch("increment 1 2", &mut out).await.unwrap();

        assert_eq!(state, LoopState::Running);
        assert_eq!(output_lines(&out), ["undefined method 'increment'"]);
        assert!(chain.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_method_receives_every_argument() {
        let proxy = proxy();
        let chain = RecordingChain::default();
        let mut session = Session::new(&proxy, &chain, "alice");
        let mut out = Vec::new();

        session.dispatch("add   3 4", &mut out).await.unwrap();
        session.dispatch("get", &mut out).await.unwrap();

        let calls = chain.calls.borrow();
        assert_eq!(calls.len(), 2);
        // Selector followed by exactly two words
        assert_eq!(calls[0].1.len(), 4 + 2 * 32);
        assert_eq!(U256::from_be_slice(&calls[0].1[36..]), U256::from(4));
        assert_eq!(calls[1].1.len(), 4);

        let lines = output_lines(&out);
        assert!(lines[0].contains("success"));
        assert_eq!(lines[1], "42");
    }

    #[tokio::test]
    async fn test_errors_keep_the_loop_running() {
        let proxy = proxy();
        let chain = RecordingChain::default();
        let mut reader = ScriptedReader::new(["add 1", "add x y", "", "get"]);
        let mut out = Vec::new();

        Session::new(&proxy, &chain, "alice")
            .run(&mut reader, &mut out)
            .await
            .unwrap();

        let lines = output_lines(&out);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("error occurred:"));
        assert!(lines[1].starts_with("error occurred:"));
        assert_eq!(lines[2], "42");
        // Input ran out after the fourth command
        assert_eq!(reader.prompts().len(), 5);
    }

    #[tokio::test]
    async fn test_switch_account() {
        let proxy = proxy();
        let chain = RecordingChain::default();
        let mut session = Session::new(&proxy, &chain, "alice");
        let mut out = Vec::new();

        session.dispatch(".by carol", &mut out).await.unwrap();
        assert_eq!(session.account(), "alice");

        session.dispatch(".by bob", &mut out).await.unwrap();
        session.dispatch("get", &mut out).await.unwrap();

        assert_eq!(session.account(), "bob");
        assert_eq!(chain.calls.borrow()[0].0, "bob");
        assert_eq!(
            output_lines(&out)[..2],
            ["unknown account 'carol'", "using account 'bob'"]
        );
    }

    #[tokio::test]
    async fn test_help_lists_methods() {
        let proxy = proxy();
        let chain = RecordingChain::default();
        let mut session = Session::new(&proxy, &chain, "alice");
        let mut out = Vec::new();

        session.dispatch(".help", &mut out).await.unwrap();

        assert_eq!(output_lines(&out).len(), 2);
    }
}

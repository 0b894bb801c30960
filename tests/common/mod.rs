//! Common test utilities and helpers

#![allow(dead_code)]

use alloy::primitives::{keccak256, Address, TxHash, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use swap_supply_runner::chain::{
    ChainError, ChainGateway, ConfirmationPolicy, TransactionIntent, TransactionReceipt,
};
use swap_supply_runner::config::{NetworkConfig, SupplyAmountMode};
use swap_supply_runner::interfaces::{IERC20, ILendingPool, ISwapRouter02, PoolInfo};
use swap_supply_runner::workflow::WorkflowSettings;

pub const APPROVE: [u8; 4] = IERC20::approveCall::SELECTOR;
pub const SWAP: [u8; 4] = ISwapRouter02::exactInputSingleCall::SELECTOR;
pub const DEPOSIT: [u8; 4] = ILendingPool::depositCall::SELECTOR;

pub fn signer() -> Address {
    Address::repeat_byte(0xAA)
}

pub fn pool_address() -> Address {
    Address::repeat_byte(0xB0)
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailMode {
    /// The node rejects the transaction.
    SubmitError,
    /// Mined with a failed status.
    Revert,
    /// Never mined.
    Hang,
}

#[derive(Debug, Clone, Copy)]
struct FailRule {
    selector: [u8; 4],
    mode: FailMode,
    /// Matching submissions let through before the rule applies.
    skip: usize,
}

/// In-memory chain for one signer.
///
/// Successful submissions apply their effect immediately: approvals overwrite
/// the allowance, swaps move balances, deposits debit the depositor.
pub struct MockGateway {
    pub network: NetworkConfig,
    pub chain_id: u64,
    pub pool: Address,
    pub swap_output: U256,
    /// Overrides the token pair reported by the pool contract.
    pub pool_tokens: Option<(Address, Address)>,
    /// Makes every factory lookup fail at the RPC level.
    pub pool_query_error: bool,
    fail: Option<FailRule>,
    submitted: Mutex<Vec<TransactionIntent>>,
    attempts: Mutex<usize>,
    receipts: Mutex<HashMap<TxHash, Option<bool>>>,
    balances: Mutex<HashMap<(Address, Address), U256>>,
    allowances: Mutex<HashMap<(Address, Address, Address), U256>>,
}

impl MockGateway {
    pub fn new(network: NetworkConfig) -> Self {
        let mut balances = HashMap::new();
        balances.insert(
            (network.token_in.address, signer()),
            U256::from(1_000_000_000u64),
        );
        Self {
            chain_id: network.chain_id,
            network,
            pool: pool_address(),
            swap_output: U256::from(250_000u64),
            pool_tokens: None,
            pool_query_error: false,
            fail: None,
            submitted: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
            receipts: Mutex::new(HashMap::new()),
            balances: Mutex::new(balances),
            allowances: Mutex::new(HashMap::new()),
        }
    }

    pub fn sepolia() -> Self {
        Self::new(NetworkConfig::sepolia())
    }

    pub fn without_pool(mut self) -> Self {
        self.pool = Address::ZERO;
        self
    }

    pub fn with_swap_output(mut self, amount: U256) -> Self {
        self.swap_output = amount;
        self
    }

    pub fn with_pool_tokens(mut self, token0: Address, token1: Address) -> Self {
        self.pool_tokens = Some((token0, token1));
        self
    }

    pub fn with_pool_query_error(mut self) -> Self {
        self.pool_query_error = true;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_balance(self, token: Address, amount: U256) -> Self {
        self.balances.lock().unwrap().insert((token, signer()), amount);
        self
    }

    pub fn failing(mut self, selector: [u8; 4], mode: FailMode) -> Self {
        self.fail = Some(FailRule { selector, mode, skip: 0 });
        self
    }

    pub fn failing_after(mut self, selector: [u8; 4], mode: FailMode, skip: usize) -> Self {
        self.fail = Some(FailRule { selector, mode, skip });
        self
    }

    pub fn submitted(&self) -> Vec<TransactionIntent> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submitted_selectors(&self) -> Vec<[u8; 4]> {
        self.submitted()
            .iter()
            .filter_map(|intent| intent.selector())
            .collect()
    }

    pub fn balance_of(&self, token: Address, owner: Address) -> U256 {
        self.balances
            .lock()
            .unwrap()
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    pub fn allowance_of(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .lock()
            .unwrap()
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn matching_failure(&self, selector: Option<[u8; 4]>) -> Option<FailMode> {
        let rule = self.fail?;
        if selector != Some(rule.selector) {
            return None;
        }
        let mut attempts = self.attempts.lock().unwrap();
        *attempts += 1;
        if *attempts > rule.skip {
            Some(rule.mode)
        } else {
            None
        }
    }

    fn apply(&self, intent: &TransactionIntent) {
        let owner = signer();
        let mut balances = self.balances.lock().unwrap();
        match intent.selector() {
            Some(APPROVE) => {
                let call = IERC20::approveCall::abi_decode(&intent.calldata).unwrap();
                self.allowances
                    .lock()
                    .unwrap()
                    .insert((intent.to, owner, call.spender), call.amount);
            }
            Some(SWAP) => {
                let call =
                    ISwapRouter02::exactInputSingleCall::abi_decode(&intent.calldata).unwrap();
                let p = call.params;
                let input = balances.entry((p.tokenIn, owner)).or_default();
                *input = input.saturating_sub(p.amountIn);
                let output = balances.entry((p.tokenOut, p.recipient)).or_default();
                *output += self.swap_output;
            }
            Some(DEPOSIT) => {
                let call = ILendingPool::depositCall::abi_decode(&intent.calldata).unwrap();
                let held = balances.entry((call.asset, owner)).or_default();
                *held = held.saturating_sub(call.amount);
            }
            _ => {}
        }
    }
}

#[async_trait]
impl ChainGateway for MockGateway {
    fn signer_address(&self) -> Address {
        signer()
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        Ok(self.chain_id)
    }

    async fn pool_address(
        &self,
        _factory: Address,
        _token_a: Address,
        _token_b: Address,
        _fee: u32,
    ) -> Result<Address, ChainError> {
        if self.pool_query_error {
            return Err(ChainError::Rpc("getPool: connection refused".to_string()));
        }
        Ok(self.pool)
    }

    async fn pool_state(&self, pool: Address) -> Result<PoolInfo, ChainError> {
        let (a, b) = self.pool_tokens.unwrap_or((
            self.network.token_in.address,
            self.network.token_out.address,
        ));
        let (token0, token1) = if a < b { (a, b) } else { (b, a) };
        Ok(PoolInfo {
            address: pool,
            token0,
            token1,
            fee: self.network.fee_tier,
        })
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        Ok(self.balance_of(token, owner))
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError> {
        Ok(self.allowance_of(token, owner, spender))
    }

    async fn submit(&self, intent: &TransactionIntent) -> Result<TxHash, ChainError> {
        let failure = self.matching_failure(intent.selector());
        if failure == Some(FailMode::SubmitError) {
            return Err(ChainError::Rpc("insufficient funds for gas".to_string()));
        }

        let mut submitted = self.submitted.lock().unwrap();
        let hash = keccak256((submitted.len() as u64).to_be_bytes());
        submitted.push(intent.clone());

        let outcome = match failure {
            Some(FailMode::Revert) => Some(false),
            Some(FailMode::Hang) => None,
            _ => {
                self.apply(intent);
                Some(true)
            }
        };
        self.receipts.lock().unwrap().insert(hash, outcome);
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, ChainError> {
        let outcome = self.receipts.lock().unwrap().get(&hash).copied();
        match outcome {
            Some(Some(success)) => Ok(TransactionReceipt {
                hash,
                block_number: Some(1),
                success,
            }),
            Some(None) => std::future::pending().await,
            None => Err(ChainError::MissingReceipt(hash)),
        }
    }
}

pub fn test_settings(mode: SupplyAmountMode) -> WorkflowSettings {
    let network = NetworkConfig::sepolia();
    WorkflowSettings {
        confirmation: ConfirmationPolicy::new(
            Duration::from_secs(5),
            network.explorer_url.clone(),
        ),
        network,
        swap_amount: dec("0.25"),
        amount_out_minimum: Decimal::ZERO,
        supply_amount_mode: mode,
    }
}

//! Network seam for the workflow.
//!
//! Every contract read and transaction submission goes through [`ChainGateway`],
//! so the workflow can run against a live RPC endpoint ([`evm::AlloyGateway`])
//! or an in-memory double in tests.

pub mod evm;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::interfaces::PoolInfo;
use crate::utils::logger::Logger;

/// Errors raised by the network layer.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("signer error: {0}")]
    Signer(String),
    #[error("transaction {hash} reverted")]
    Reverted { hash: TxHash },
    #[error("no confirmation for {hash} after {secs}s")]
    Timeout { hash: TxHash, secs: u64 },
    #[error("receipt for {0} not found")]
    MissingReceipt(TxHash),
}

/// A contract call ready to be signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    /// Short label used in log lines, e.g. `approve USDC`.
    pub label: String,
    pub to: Address,
    pub calldata: Bytes,
    pub value: U256,
}

impl TransactionIntent {
    pub fn new(label: impl Into<String>, to: Address, calldata: impl Into<Bytes>) -> Self {
        Self {
            label: label.into(),
            to,
            calldata: calldata.into(),
            value: U256::ZERO,
        }
    }

    /// First four bytes of the calldata.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.calldata.get(..4).and_then(|s| s.try_into().ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
}

/// How long to wait for a receipt and where to link confirmed transactions.
#[derive(Debug, Clone)]
pub struct ConfirmationPolicy {
    pub timeout: Duration,
    pub explorer_url: String,
}

impl ConfirmationPolicy {
    pub fn new(timeout: Duration, explorer_url: impl Into<String>) -> Self {
        Self {
            timeout,
            explorer_url: explorer_url.into(),
        }
    }

    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{:#x}", self.explorer_url.trim_end_matches('/'), hash)
    }
}

/// Read and write access to the chain for a single signer.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Address of the account that signs every submitted transaction.
    fn signer_address(&self) -> Address;

    async fn chain_id(&self) -> Result<u64, ChainError>;

    /// Looks up the pool for a pair and fee tier. Returns the zero address when none exists.
    async fn pool_address(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> Result<Address, ChainError>;

    async fn pool_state(&self, pool: Address) -> Result<PoolInfo, ChainError>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError>;

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError>;

    /// Signs and broadcasts the intent, returning as soon as the node accepts it.
    async fn submit(&self, intent: &TransactionIntent) -> Result<TxHash, ChainError>;

    /// Blocks until the transaction is mined.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, ChainError>;
}

/// Submits an intent and waits for its receipt.
///
/// The hash is logged as soon as the node accepts the transaction. A receipt
/// with a failed status, or no receipt within the policy timeout, is an error.
pub async fn submit_and_confirm(
    gateway: &dyn ChainGateway,
    intent: &TransactionIntent,
    policy: &ConfirmationPolicy,
) -> Result<TransactionReceipt, ChainError> {
    Logger::separator();
    Logger::info(&format!("Sending {} transaction...", intent.label));

    let hash = gateway.submit(intent).await?;
    Logger::transaction_sent(&intent.label, &hash);
    tracing::info!(
        tx = %intent.label,
        tx_hash = %hash,
        status = "submitted",
        "Transaction sent"
    );

    let wait = tokio::time::timeout(policy.timeout, gateway.wait_for_receipt(hash));
    let receipt = match wait.await {
        Ok(result) => result?,
        Err(_) => {
            return Err(ChainError::Timeout {
                hash,
                secs: policy.timeout.as_secs(),
            })
        }
    };

    if !receipt.success {
        tracing::warn!(
            tx = %intent.label,
            tx_hash = %hash,
            status = "reverted",
            "Transaction reverted"
        );
        return Err(ChainError::Reverted { hash });
    }

    Logger::transaction_confirmed(&intent.label, &policy.tx_url(&receipt.hash));
    tracing::info!(
        tx = %intent.label,
        tx_hash = %receipt.hash,
        block = ?receipt.block_number,
        status = "confirmed",
        "Transaction confirmed"
    );
    Ok(receipt)
}

//! Alloy-backed gateway talking to an HTTP JSON-RPC endpoint.

use alloy::network::TransactionBuilder;
use alloy::primitives::aliases::U24;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionConfig, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use std::str::FromStr;

use super::{ChainError, ChainGateway, TransactionIntent, TransactionReceipt};
use crate::interfaces::{IUniswapV3Factory, IUniswapV3Pool, PoolInfo, IERC20};

/// Gateway for one signer on one chain.
///
/// The provider carries the wallet, so nonce, gas and chain id are filled in
/// by alloy's recommended fillers on every submission.
pub struct AlloyGateway {
    provider: DynProvider,
    signer: Address,
}

impl AlloyGateway {
    pub fn connect(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self, ChainError> {
        let private_key = if private_key.starts_with("0x") {
            private_key.to_string()
        } else {
            format!("0x{}", private_key)
        };
        let signer = PrivateKeySigner::from_str(&private_key)
            .map_err(|e| ChainError::Signer(format!("invalid private key: {}", e)))?
            .with_chain_id(Some(chain_id));
        let signer_address = signer.address();

        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid RPC URL {}: {}", rpc_url, e)))?;

        let provider = ProviderBuilder::new()
            .wallet(signer)
            .with_chain_id(chain_id)
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            signer: signer_address,
        })
    }
}

fn rpc_error(context: &str, err: impl std::fmt::Display) -> ChainError {
    ChainError::Rpc(format!("{}: {}", context, err))
}

#[async_trait]
impl ChainGateway for AlloyGateway {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| rpc_error("eth_chainId", e))
    }

    async fn pool_address(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> Result<Address, ChainError> {
        let factory = IUniswapV3Factory::new(factory, self.provider.clone());
        factory
            .getPool(token_a, token_b, U24::from(fee))
            .call()
            .await
            .map_err(|e| rpc_error("getPool", e))
    }

    async fn pool_state(&self, pool: Address) -> Result<PoolInfo, ChainError> {
        let contract = IUniswapV3Pool::new(pool, self.provider.clone());
        let token0_call = contract.token0();
        let token1_call = contract.token1();
        let fee_call = contract.fee();
        let (token0, token1, fee) =
            tokio::try_join!(token0_call.call(), token1_call.call(), fee_call.call())
                .map_err(|e| rpc_error("pool state", e))?;

        Ok(PoolInfo {
            address: pool,
            token0,
            token1,
            fee: fee.to::<u32>(),
        })
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| rpc_error("balanceOf", e))
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ChainError> {
        IERC20::new(token, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| rpc_error("allowance", e))
    }

    async fn submit(&self, intent: &TransactionIntent) -> Result<TxHash, ChainError> {
        let request = TransactionRequest::default()
            .with_from(self.signer)
            .with_to(intent.to)
            .with_input(intent.calldata.clone())
            .with_value(intent.value);

        tracing::debug!(
            to = %intent.to,
            data_len = intent.calldata.len(),
            "Sending transaction"
        );

        let pending = self.provider.send_transaction(request).await.map_err(|e| {
            tracing::error!("Transaction submission failed: {}", e);
            rpc_error("send transaction", e)
        })?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TransactionReceipt, ChainError> {
        let watcher = self
            .provider
            .watch_pending_transaction(PendingTransactionConfig::new(hash))
            .await
            .map_err(|e| rpc_error("register transaction watcher", e))?;
        let confirmed = watcher
            .await
            .map_err(|e| rpc_error("confirm transaction", e))?;

        let receipt = self
            .provider
            .get_transaction_receipt(confirmed)
            .await
            .map_err(|e| rpc_error("eth_getTransactionReceipt", e))?
            .ok_or(ChainError::MissingReceipt(confirmed))?;

        Ok(TransactionReceipt {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
        })
    }
}

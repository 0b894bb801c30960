use alloy::primitives::aliases::{U160, U24};
use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;

use crate::chain::{
    submit_and_confirm, ChainGateway, ConfirmationPolicy, TransactionIntent, TransactionReceipt,
};
use crate::interfaces::{AssetDescriptor, ExactInputSingleParams, ISwapRouter02};
use crate::workflow::WorkflowError;

/// Parameters for `exactInputSingle`.
///
/// `sqrtPriceLimitX96` is always zero (no price limit). `amount_out_minimum`
/// of zero accepts any output, i.e. unlimited slippage.
pub fn build_swap_params(
    pool_fee: u32,
    token_in: &AssetDescriptor,
    token_out: &AssetDescriptor,
    recipient: Address,
    amount_in: U256,
    amount_out_minimum: U256,
) -> ExactInputSingleParams {
    ExactInputSingleParams {
        tokenIn: token_in.address,
        tokenOut: token_out.address,
        fee: U24::from(pool_fee),
        recipient,
        amountIn: amount_in,
        amountOutMinimum: amount_out_minimum,
        sqrtPriceLimitX96: U160::ZERO,
    }
}

pub fn build_swap(
    router: Address,
    params: &ExactInputSingleParams,
    label: &str,
) -> TransactionIntent {
    let call = ISwapRouter02::exactInputSingleCall {
        params: params.clone(),
    };
    TransactionIntent::new(label, router, call.abi_encode())
}

pub async fn execute_swap(
    gateway: &dyn ChainGateway,
    router: Address,
    params: &ExactInputSingleParams,
    label: &str,
    policy: &ConfirmationPolicy,
) -> Result<TransactionReceipt, WorkflowError> {
    let intent = build_swap(router, params, label);
    submit_and_confirm(gateway, &intent, policy)
        .await
        .map_err(WorkflowError::Swap)
}

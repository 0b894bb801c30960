use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use rust_decimal::Decimal;

use crate::chain::{
    submit_and_confirm, ChainGateway, ConfirmationPolicy, TransactionIntent, TransactionReceipt,
};
use crate::interfaces::{AssetDescriptor, IERC20};
use crate::utils::logger::Logger;
use crate::utils::units::to_base_units;
use crate::workflow::WorkflowError;

/// `approve(spender, amount)` on the token contract. ERC-20 approvals overwrite,
/// so the resulting allowance is exactly `amount`.
pub fn build_approval(
    token: &AssetDescriptor,
    spender: Address,
    amount: U256,
) -> TransactionIntent {
    let call = IERC20::approveCall { spender, amount };
    TransactionIntent::new(
        format!("approve {}", token.symbol),
        token.address,
        call.abi_encode(),
    )
}

/// Approves a human-readable amount, scaled by the token's decimals.
pub async fn approve_token(
    gateway: &dyn ChainGateway,
    token: &AssetDescriptor,
    spender: Address,
    amount: Decimal,
    policy: &ConfirmationPolicy,
) -> Result<TransactionReceipt, WorkflowError> {
    let base_units = to_base_units(amount, token.decimals)?;
    approve_base_units(gateway, token, spender, base_units, policy).await
}

pub async fn approve_base_units(
    gateway: &dyn ChainGateway,
    token: &AssetDescriptor,
    spender: Address,
    amount: U256,
    policy: &ConfirmationPolicy,
) -> Result<TransactionReceipt, WorkflowError> {
    let intent = build_approval(token, spender, amount);
    submit_and_confirm(gateway, &intent, policy)
        .await
        .map_err(|source| {
            Logger::error(&format!("An error occurred during token approval: {}", source));
            WorkflowError::Approval {
                token: token.symbol.clone(),
                source,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;

    #[test]
    fn approval_targets_token_contract() {
        let network = NetworkConfig::sepolia();
        let intent = build_approval(
            &network.token_in,
            network.swap_router,
            U256::from(250_000u64),
        );

        assert_eq!(intent.to, network.token_in.address);
        assert_eq!(intent.label, "approve USDC");
        assert_eq!(intent.value, U256::ZERO);
        let decoded = IERC20::approveCall::abi_decode(&intent.calldata).unwrap();
        assert_eq!(decoded.spender, network.swap_router);
        assert_eq!(decoded.amount, U256::from(250_000u64));
    }
}

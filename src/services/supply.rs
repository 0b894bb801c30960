use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;

use crate::chain::{
    submit_and_confirm, ChainGateway, ConfirmationPolicy, TransactionIntent, TransactionReceipt,
};
use crate::interfaces::{AssetDescriptor, ILendingPool};
use crate::utils::logger::Logger;
use crate::workflow::WorkflowError;

/// `deposit(asset, amount, onBehalfOf, referralCode)` on the lending pool.
pub fn build_deposit(
    lending_pool: Address,
    token: &AssetDescriptor,
    amount: U256,
    on_behalf_of: Address,
    referral_code: u16,
) -> TransactionIntent {
    let call = ILendingPool::depositCall {
        asset: token.address,
        amount,
        onBehalfOf: on_behalf_of,
        referralCode: referral_code,
    };
    TransactionIntent::new(
        format!("supply {}", token.symbol),
        lending_pool,
        call.abi_encode(),
    )
}

/// Deposits `amount` base units of `token` for the signer itself.
///
/// Nothing is unwound on failure; whatever earlier steps did stays on chain.
pub async fn supply_to_pool(
    gateway: &dyn ChainGateway,
    lending_pool: Address,
    token: &AssetDescriptor,
    amount: U256,
    referral_code: u16,
    policy: &ConfirmationPolicy,
) -> Result<TransactionReceipt, WorkflowError> {
    let intent = build_deposit(
        lending_pool,
        token,
        amount,
        gateway.signer_address(),
        referral_code,
    );
    submit_and_confirm(gateway, &intent, policy)
        .await
        .map_err(|source| {
            Logger::error(&format!("An error occurred during supply: {}", source));
            WorkflowError::Supply(source)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;

    #[test]
    fn deposit_is_on_behalf_of_given_account() {
        let network = NetworkConfig::sepolia();
        let me = Address::repeat_byte(0x33);
        let intent = build_deposit(
            network.lending_pool,
            &network.token_out,
            U256::from(9u8),
            me,
            0,
        );

        assert_eq!(intent.to, network.lending_pool);
        let decoded = ILendingPool::depositCall::abi_decode(&intent.calldata).unwrap();
        assert_eq!(decoded.asset, network.token_out.address);
        assert_eq!(decoded.amount, U256::from(9u8));
        assert_eq!(decoded.onBehalfOf, me);
        assert_eq!(decoded.referralCode, 0);
    }
}

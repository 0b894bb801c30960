mod common;

use alloy::primitives::U256;

use common::MockGateway;
use swap_supply_runner::config::NetworkConfig;
use swap_supply_runner::utils::health_check::CheckStatus;
use swap_supply_runner::utils::perform_health_check;

const QUARTER_USDC: u64 = 250_000;

#[tokio::test]
async fn test_healthy_setup() {
    let gateway = MockGateway::sepolia();
    let network = NetworkConfig::sepolia();

    let result = perform_health_check(&gateway, &network, U256::from(QUARTER_USDC)).await;

    assert!(result.healthy);
    assert_eq!(result.checks.rpc.status, CheckStatus::Ok);
    assert_eq!(result.checks.pool.status, CheckStatus::Ok);
    assert_eq!(result.checks.balance.status, CheckStatus::Ok);
    assert!(result.timestamp > 0);
}

#[tokio::test]
async fn test_wrong_chain_is_unhealthy() {
    let gateway = MockGateway::sepolia().with_chain_id(1);
    let network = NetworkConfig::sepolia();

    let result = perform_health_check(&gateway, &network, U256::from(QUARTER_USDC)).await;

    assert!(!result.healthy);
    assert_eq!(result.checks.rpc.status, CheckStatus::Error);
    assert!(result.checks.rpc.message.contains("11155111"));
}

#[tokio::test]
async fn test_missing_pool_is_unhealthy() {
    let gateway = MockGateway::sepolia().without_pool();
    let network = NetworkConfig::sepolia();

    let result = perform_health_check(&gateway, &network, U256::from(QUARTER_USDC)).await;

    assert!(!result.healthy);
    assert_eq!(result.checks.pool.status, CheckStatus::Error);
    assert!(result.checks.pool.message.contains("USDC/LINK"));
}

#[tokio::test]
async fn test_low_balance_only_warns() {
    let network = NetworkConfig::sepolia();
    let gateway =
        MockGateway::sepolia().with_balance(network.token_in.address, U256::from(1_000u64));

    let result = perform_health_check(&gateway, &network, U256::from(QUARTER_USDC)).await;

    assert!(result.healthy);
    assert_eq!(result.checks.balance.status, CheckStatus::Warning);
    assert!(result.checks.balance.message.contains("0.001000 USDC available"));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["checks"]["balance"]["status"], "warning");
}

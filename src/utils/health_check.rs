use alloy::primitives::U256;
use chrono::Utc;
use serde::Serialize;

use crate::chain::ChainGateway;
use crate::config::NetworkConfig;
use crate::utils::logger::Logger;
use crate::utils::units::format_base_units;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Ok,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub rpc: CheckResult,
    pub pool: CheckResult,
    pub balance: CheckResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResult {
    pub healthy: bool,
    pub checks: HealthChecks,
    pub timestamp: i64,
}

/// Checks everything a run depends on without submitting anything.
///
/// A low input-token balance is a warning, not a failure.
pub async fn perform_health_check(
    gateway: &dyn ChainGateway,
    network: &NetworkConfig,
    required_amount_in: U256,
) -> HealthCheckResult {
    let rpc = match gateway.chain_id().await {
        Ok(id) if id == network.chain_id => CheckResult::ok(format!("Connected (chain {})", id)),
        Ok(id) => CheckResult::error(format!(
            "Chain id {} does not match {} ({})",
            id, network.name, network.chain_id
        )),
        Err(e) => CheckResult::error(format!("RPC unreachable: {}", e)),
    };

    let pool = match gateway
        .pool_address(
            network.factory,
            network.token_in.address,
            network.token_out.address,
            network.fee_tier,
        )
        .await
    {
        Ok(address) if address.is_zero() => CheckResult::error(format!(
            "No {}/{} pool at fee tier {}",
            network.token_in.symbol, network.token_out.symbol, network.fee_tier
        )),
        Ok(address) => CheckResult::ok(format!("Pool {}", address)),
        Err(e) => CheckResult::error(format!("Pool lookup failed: {}", e)),
    };

    let balance = match gateway
        .token_balance(network.token_in.address, gateway.signer_address())
        .await
    {
        Ok(balance) if balance < required_amount_in => CheckResult::warning(format!(
            "{} {} available, {} needed",
            format_base_units(balance, network.token_in.decimals),
            network.token_in.symbol,
            format_base_units(required_amount_in, network.token_in.decimals)
        )),
        Ok(balance) => CheckResult::ok(format!(
            "{} {}",
            format_base_units(balance, network.token_in.decimals),
            network.token_in.symbol
        )),
        Err(e) => CheckResult::error(format!("Balance check failed: {}", e)),
    };

    let healthy = rpc.status == CheckStatus::Ok && pool.status == CheckStatus::Ok;

    HealthCheckResult {
        healthy,
        checks: HealthChecks { rpc, pool, balance },
        timestamp: Utc::now().timestamp(),
    }
}

pub fn log_health_check(result: &HealthCheckResult) {
    Logger::header("HEALTH CHECK");
    for (name, check) in [
        ("RPC", &result.checks.rpc),
        ("Pool", &result.checks.pool),
        ("Balance", &result.checks.balance),
    ] {
        let line = format!("{:<8} {}", name, check.message);
        match check.status {
            CheckStatus::Ok => Logger::success(&line),
            CheckStatus::Warning => Logger::warning(&line),
            CheckStatus::Error => Logger::error(&line),
        }
    }
    Logger::separator();
    if result.healthy {
        Logger::success("Health check passed");
    } else {
        Logger::error("Health check failed");
    }
    if let Ok(json) = serde_json::to_value(result) {
        Logger::record("HEALTH", &json);
    }
}

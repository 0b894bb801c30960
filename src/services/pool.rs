use alloy::primitives::Address;

use crate::chain::ChainGateway;
use crate::interfaces::{AssetDescriptor, PoolInfo};
use crate::utils::logger::Logger;
use crate::workflow::WorkflowError;

/// Finds the pool for `(token_a, token_b, fee)` and reads its token pair and fee.
///
/// A zero address from the factory means no such pool was deployed, which
/// aborts the run before anything is swapped.
pub async fn resolve_pool(
    gateway: &dyn ChainGateway,
    factory: Address,
    token_a: &AssetDescriptor,
    token_b: &AssetDescriptor,
    fee: u32,
) -> Result<PoolInfo, WorkflowError> {
    let pool = gateway
        .pool_address(factory, token_a.address, token_b.address, fee)
        .await
        .map_err(WorkflowError::PoolQuery)?;

    if pool == Address::ZERO {
        return Err(WorkflowError::PoolNotFound {
            token_a: token_a.address,
            token_b: token_b.address,
            fee,
        });
    }

    let info = gateway
        .pool_state(pool)
        .await
        .map_err(WorkflowError::PoolQuery)?;

    if !info.contains(token_a.address) || !info.contains(token_b.address) {
        return Err(WorkflowError::PoolMismatch {
            pool,
            token_a: token_a.address,
            token_b: token_b.address,
        });
    }

    Logger::info(&format!(
        "Pool {}/{} ({}): {}",
        token_a.symbol,
        token_b.symbol,
        info.fee,
        Logger::format_address(&pool.to_string())
    ));
    Ok(info)
}

//! Verify RPC, pool and balance before running the workflow.

use anyhow::Result;
use swap_supply_runner::chain::evm::AlloyGateway;
use swap_supply_runner::config::load_env;
use swap_supply_runner::utils::{log_health_check, perform_health_check, to_base_units};

#[tokio::main]
async fn main() -> Result<()> {
    let env = load_env()?;
    let gateway = AlloyGateway::connect(&env.rpc_url, &env.private_key, env.network.chain_id)?;
    let required = to_base_units(env.swap_amount, env.network.token_in.decimals)?;

    let result = perform_health_check(&gateway, &env.network, required).await;
    log_health_check(&result);

    if !result.healthy {
        std::process::exit(1);
    }
    Ok(())
}

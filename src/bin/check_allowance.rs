//! Show the signer's token balances and current allowances toward the swap
//! router and the lending pool.

use anyhow::Result;
use swap_supply_runner::chain::evm::AlloyGateway;
use swap_supply_runner::chain::ChainGateway;
use swap_supply_runner::config::load_env;
use swap_supply_runner::interfaces::AssetDescriptor;
use swap_supply_runner::utils::{format_base_units, Logger};

async fn print_token(
    gateway: &dyn ChainGateway,
    token: &AssetDescriptor,
    spender_name: &str,
    spender: alloy::primitives::Address,
) -> Result<()> {
    let owner = gateway.signer_address();
    let balance = gateway.token_balance(token.address, owner).await?;
    let allowance = gateway.allowance(token.address, owner, spender).await?;

    println!("💵 {} ({})", token.symbol, Logger::format_address(&token.address.to_string()));
    println!("   Balance:   {}", format_base_units(balance, token.decimals));
    println!(
        "   Allowance: {} → {} ({})",
        format_base_units(allowance, token.decimals),
        spender_name,
        Logger::format_address(&spender.to_string())
    );
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = load_env()?;
    let gateway = AlloyGateway::connect(&env.rpc_url, &env.private_key, env.network.chain_id)?;

    println!();
    println!("🔍 Checking allowances on {}", env.network.name);
    println!("  Wallet: {}", Logger::mask_address(&gateway.signer_address().to_string()));
    println!();

    print_token(&gateway, &env.network.token_in, "swap router", env.network.swap_router).await?;
    print_token(&gateway, &env.network.token_out, "lending pool", env.network.lending_pool).await?;

    Ok(())
}

//! Help command - displays all available commands

use colored::*;

fn main() {
    println!("{}", "━".repeat(65).cyan().bold());
    println!("{}", "     🔄 SWAP & SUPPLY RUNNER - COMMANDS".cyan().bold());
    println!("{}\n", "━".repeat(65).cyan().bold());

    println!("{}\n", "🚀 RUN".yellow().bold());
    println!(
        "  {}            Swap 0.25 (or SWAP_AMOUNT) and supply",
        "cargo run --release".green()
    );
    println!("  {}     Swap a specific amount", "cargo run --release -- 1.5".green());
    println!();

    println!("{}\n", "🔍 CHECKS".yellow().bold());
    println!("  {}   Verify RPC, pool and balance", "cargo run --bin health_check".green());
    println!("  {}  Show balances and allowances", "cargo run --bin check_allowance".green());
    println!();

    println!("{}\n", "⚙️  CONFIGURATION (.env)".yellow().bold());
    println!("  {}                    JSON-RPC endpoint (required)", "RPC_URL".cyan());
    println!("  {}                Signing key (required, never logged)", "PRIVATE_KEY".cyan());
    println!("  {}                    Network preset (default: sepolia)", "NETWORK".cyan());
    println!("  {}                   Read only this file instead of .env", "ENV_FILE".cyan());
    println!("  {}                Input amount (default: 0.25)", "SWAP_AMOUNT".cyan());
    println!("  {}         Minimum output, human units (default: 0)", "AMOUNT_OUT_MINIMUM".cyan());
    println!("  {}         mirror-input | balance-delta", "SUPPLY_AMOUNT_MODE".cyan());
    println!("  {}  Receipt wait limit (default: 300)", "CONFIRMATION_TIMEOUT_SECS".cyan());
    println!("  {}                   Pool fee tier (default: 3000)", "FEE_TIER".cyan());
    println!(
        "  {}  Contract overrides",
        "FACTORY_ADDRESS / SWAP_ROUTER_ADDRESS / LENDING_POOL_ADDRESS".cyan()
    );
    println!();

    println!("{}\n", "🚦 EXIT CODES".yellow().bold());
    println!("  0 success   2 config   3 approval   4 pool   5 swap   6 supply");
    println!();
    println!(
        "{}\n",
        "⚠️  Test networks only: the default run accepts any swap output!".yellow()
    );
}

use colored::Colorize;
use std::error::Error as _;

use swap_supply_runner::chain::evm::AlloyGateway;
use swap_supply_runner::chain::ChainGateway;
use swap_supply_runner::config::load_env;
use swap_supply_runner::utils::logger::{init_tracing, Logger};
use swap_supply_runner::workflow::{FailureCategory, WorkflowRunner, WorkflowSettings};

#[tokio::main]
async fn main() {
    std::process::exit(run().await);
}

async fn run() -> i32 {
    let amount_arg = std::env::args().nth(1);
    let env = match load_env().and_then(|env| env.with_swap_amount_arg(amount_arg.as_deref())) {
        Ok(env) => env,
        Err(e) => {
            init_tracing("info");
            Logger::error(&format!("Configuration error: {:#}", e));
            return FailureCategory::Config.exit_code();
        }
    };
    init_tracing(&env.log_level);

    let connected = AlloyGateway::connect(&env.rpc_url, &env.private_key, env.network.chain_id);
    let gateway = match connected {
        Ok(gateway) => gateway,
        Err(e) => {
            Logger::error(&format!("Cannot connect: {}", e));
            return FailureCategory::Config.exit_code();
        }
    };

    Logger::startup(
        &gateway.signer_address().to_string(),
        &env.network.name,
        &format!("{} {}", env.swap_amount, env.network.token_in.symbol),
    );
    tracing::debug!(config = ?env, "Loaded configuration");

    let settings = WorkflowSettings::from_env(&env);
    let runner = WorkflowRunner::new(&gateway, &settings);

    match runner.run().await {
        Ok(report) => {
            Logger::separator();
            Logger::success(&format!(
                "Swapped {} and supplied {}",
                report.amount_in,
                report.amount_supplied.as_deref().unwrap_or("nothing")
            ));
            if let Ok(json) = serde_json::to_value(&report) {
                Logger::record("REPORT", &json);
            }
            0
        }
        Err(err) => {
            Logger::separator();
            Logger::error(&format!("An error occurred: {}", err));
            let mut source = err.source();
            while let Some(cause) = source {
                Logger::error(&format!("  caused by: {}", cause));
                source = cause.source();
            }
            Logger::record(
                "FAILURE",
                &serde_json::json!({
                    "category": err.category(),
                    "error": err.to_string(),
                }),
            );
            eprintln!("{}", format!("Exiting with code {}", err.exit_code()).red());
            err.exit_code()
        }
    }
}

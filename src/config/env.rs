use alloy::primitives::Address;
use anyhow::{Context, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::network::{NetworkConfig, SUPPORTED_FEE_TIERS};
use crate::utils::units::parse_amount;

pub const DEFAULT_SWAP_AMOUNT: &str = "0.25";
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 300;

/// Where the amount forwarded to the lending pool comes from after the swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplyAmountMode {
    /// Forward the swap's input base amount unchanged (1:1 pass-through).
    #[default]
    MirrorInput,
    /// Forward the output-token balance increase observed across the swap.
    BalanceDelta,
}

impl FromStr for SupplyAmountMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mirror-input" | "mirror_input" => Ok(Self::MirrorInput),
            "balance-delta" | "balance_delta" => Ok(Self::BalanceDelta),
            other => anyhow::bail!(
                "Invalid SUPPLY_AMOUNT_MODE: {} (expected mirror-input or balance-delta)",
                other
            ),
        }
    }
}

impl fmt::Display for SupplyAmountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MirrorInput => write!(f, "mirror-input"),
            Self::BalanceDelta => write!(f, "balance-delta"),
        }
    }
}

#[derive(Clone)]
pub struct Env {
    pub rpc_url: String,
    pub private_key: String,
    pub network: NetworkConfig,
    pub swap_amount: Decimal,
    pub amount_out_minimum: Decimal,
    pub supply_amount_mode: SupplyAmountMode,
    pub confirmation_timeout_secs: u64,
    pub log_level: String,
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("network", &self.network)
            .field("swap_amount", &self.swap_amount)
            .field("amount_out_minimum", &self.amount_out_minimum)
            .field("supply_amount_mode", &self.supply_amount_mode)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

pub fn is_valid_ethereum_address(address: &str) -> bool {
    let re = Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("static regex");
    re.is_match(address)
}

fn is_valid_private_key(key: &str) -> bool {
    let re = Regex::new(r"^(0x)?[a-fA-F0-9]{64}$").expect("static regex");
    re.is_match(key)
}

fn validate_required_env<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<()> {
    let required = ["RPC_URL", "PRIVATE_KEY"];

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| lookup(key).map_or(true, |v| v.trim().is_empty()))
        .collect();

    if !missing.is_empty() {
        eprintln!("\n❌ Configuration Error: Missing required environment variables\n");
        eprintln!("Missing variables: {}\n", missing.join(", "));
        eprintln!("🔧 Quick fix: create a .env file with RPC_URL and PRIVATE_KEY\n");
        anyhow::bail!("Missing required environment variables: {}", missing.join(", "));
    }

    Ok(())
}

fn validate_urls<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<()> {
    if let Some(rpc_url) = lookup("RPC_URL") {
        if !rpc_url.starts_with("http") {
            eprintln!("\n❌ Invalid RPC_URL\n");
            eprintln!("Current value: {}", rpc_url);
            eprintln!("Must start with: http:// or https://\n");
            anyhow::bail!("Invalid RPC_URL: must be a valid HTTP/HTTPS URL");
        }
    }

    if let Some(explorer_url) = lookup("EXPLORER_URL") {
        if !explorer_url.starts_with("http") {
            anyhow::bail!("Invalid EXPLORER_URL: must be a valid HTTP/HTTPS URL");
        }
    }

    Ok(())
}

fn validate_private_key<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<()> {
    if let Some(key) = lookup("PRIVATE_KEY") {
        if !is_valid_private_key(key.trim()) {
            // Never echo the value back.
            eprintln!("\n❌ Invalid PRIVATE_KEY: expected 64 hexadecimal characters\n");
            anyhow::bail!("Invalid PRIVATE_KEY format");
        }
    }
    Ok(())
}

fn parse_address_override<F: Fn(&str) -> Option<String>>(
    lookup: &F,
    key: &str,
) -> Result<Option<Address>> {
    match lookup(key) {
        Some(value) => {
            let value = value.trim().to_string();
            if !is_valid_ethereum_address(&value) {
                eprintln!("\n❌ Invalid {}\n", key);
                eprintln!("Current value: {}", value);
                eprintln!("Expected format: 0x followed by 40 hexadecimal characters\n");
                anyhow::bail!("Invalid {} address format: {}", key, value);
            }
            let address = value
                .parse::<Address>()
                .with_context(|| format!("Invalid {}", key))?;
            Ok(Some(address))
        }
        None => Ok(None),
    }
}

fn parse_network<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<NetworkConfig> {
    let preset = lookup("NETWORK").unwrap_or_else(|| "sepolia".to_string());
    let mut network = NetworkConfig::preset(&preset)
        .with_context(|| format!("Unknown NETWORK preset: {}", preset))?;

    if let Some(factory) = parse_address_override(lookup, "FACTORY_ADDRESS")? {
        network.factory = factory;
    }
    if let Some(router) = parse_address_override(lookup, "SWAP_ROUTER_ADDRESS")? {
        network.swap_router = router;
    }
    if let Some(pool) = parse_address_override(lookup, "LENDING_POOL_ADDRESS")? {
        network.lending_pool = pool;
    }
    if let Some(explorer_url) = lookup("EXPLORER_URL") {
        network.explorer_url = explorer_url.trim().trim_end_matches('/').to_string();
    }

    if let Some(fee) = lookup("FEE_TIER") {
        let fee = fee.trim().parse::<u32>().context("Invalid FEE_TIER")?;
        if !SUPPORTED_FEE_TIERS.contains(&fee) {
            anyhow::bail!(
                "Invalid FEE_TIER: {} (supported: {:?})",
                fee,
                SUPPORTED_FEE_TIERS
            );
        }
        network.fee_tier = fee;
    }

    Ok(network)
}

impl Env {
    /// Builds the configuration from a key lookup, validating everything first.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        validate_required_env(&lookup)?;
        validate_urls(&lookup)?;
        validate_private_key(&lookup)?;

        let network = parse_network(&lookup)?;

        let swap_amount = parse_amount(
            &lookup("SWAP_AMOUNT").unwrap_or_else(|| DEFAULT_SWAP_AMOUNT.to_string()),
        )
        .context("Invalid SWAP_AMOUNT")?;
        if swap_amount.is_zero() {
            anyhow::bail!("Invalid SWAP_AMOUNT: must be positive");
        }

        let amount_out_minimum = match lookup("AMOUNT_OUT_MINIMUM") {
            Some(v) => parse_amount(&v).context("Invalid AMOUNT_OUT_MINIMUM")?,
            None => Decimal::ZERO,
        };

        let supply_amount_mode = match lookup("SUPPLY_AMOUNT_MODE") {
            Some(v) => v.parse::<SupplyAmountMode>()?,
            None => SupplyAmountMode::default(),
        };

        let confirmation_timeout_secs = lookup("CONFIRMATION_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_CONFIRMATION_TIMEOUT_SECS.to_string())
            .trim()
            .parse::<u64>()
            .context("Invalid CONFIRMATION_TIMEOUT_SECS")?;
        if confirmation_timeout_secs == 0 {
            anyhow::bail!("Invalid CONFIRMATION_TIMEOUT_SECS: must be positive");
        }

        Ok(Env {
            rpc_url: lookup("RPC_URL").context("RPC_URL is required")?.trim().to_string(),
            private_key: lookup("PRIVATE_KEY")
                .context("PRIVATE_KEY is required")?
                .trim()
                .to_string(),
            network,
            swap_amount,
            amount_out_minimum,
            supply_amount_mode,
            confirmation_timeout_secs,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Replaces the configured swap amount with one given on the command line.
    pub fn with_swap_amount_arg(mut self, arg: Option<&str>) -> Result<Self> {
        if let Some(arg) = arg {
            let amount =
                parse_amount(arg).with_context(|| format!("Invalid swap amount: {}", arg))?;
            if amount.is_zero() {
                anyhow::bail!("Invalid swap amount: must be positive");
            }
            self.swap_amount = amount;
        }
        Ok(self)
    }
}

/// Loads configuration for the binaries.
///
/// When `ENV_FILE` is set, only that file is read. Otherwise `.env` (if any) is
/// merged into the process environment first.
pub fn load_env() -> Result<Env> {
    if let Ok(path) = env::var("ENV_FILE") {
        return load_env_from_file(Path::new(&path));
    }
    dotenvy::dotenv().ok(); // Load .env file if it exists
    Env::from_lookup(|key| env::var(key).ok())
}

/// Reads a specific `.env` file without touching the process environment.
pub fn load_env_from_file(path: &Path) -> Result<Env> {
    let vars = dotenvy::from_path_iter(path)
        .with_context(|| format!("Cannot read {}", path.display()))?
        .collect::<std::result::Result<HashMap<String, String>, _>>()
        .with_context(|| format!("Cannot parse {}", path.display()))?;
    Env::from_lookup(|key| vars.get(key).cloned())
}

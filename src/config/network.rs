use alloy::primitives::{address, Address};

use crate::interfaces::AssetDescriptor;

pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const DEFAULT_FEE_TIER: u32 = 3000;
/// Fee tiers enabled on Uniswap V3 factories, in hundredths of a basis point.
pub const SUPPORTED_FEE_TIERS: [u32; 4] = [100, 500, 3000, 10000];

/// Contracts and assets taking part in one swap-then-supply run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub chain_id: u64,
    pub explorer_url: String,
    pub factory: Address,
    pub swap_router: Address,
    pub lending_pool: Address,
    pub token_in: AssetDescriptor,
    pub token_out: AssetDescriptor,
    pub fee_tier: u32,
    pub referral_code: u16,
}

impl NetworkConfig {
    /// USDC → LINK on Sepolia, supplied to the Aave V2 lending pool.
    pub fn sepolia() -> Self {
        Self {
            name: "sepolia".to_string(),
            chain_id: SEPOLIA_CHAIN_ID,
            explorer_url: "https://sepolia.etherscan.io".to_string(),
            factory: address!("0227628f3F023bb0B980b67D528571c95c6DaC1c"),
            swap_router: address!("3bFA4769FB09eefC5a80d6E87c3B9C650f7Ae48E"),
            lending_pool: address!("7d2768dE32b0b80b7a3454c06BdAc94A69DDc7A9"),
            token_in: AssetDescriptor::new(
                SEPOLIA_CHAIN_ID,
                address!("1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
                6,
                "USDC",
                "USD//C",
            ),
            token_out: AssetDescriptor::new(
                SEPOLIA_CHAIN_ID,
                address!("779877A7B0D9E8603169DdbD7836e478b4624789"),
                18,
                "LINK",
                "Chainlink",
            ),
            fee_tier: DEFAULT_FEE_TIER,
            referral_code: 0,
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "sepolia" => Some(Self::sepolia()),
            _ => None,
        }
    }
}

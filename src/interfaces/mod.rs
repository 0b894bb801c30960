use alloy::primitives::Address;
use alloy::sol;

sol! {
    /// Minimal ERC-20 surface used by the workflow.
    #[sol(rpc, all_derives)]
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }

    #[sol(rpc, all_derives)]
    interface IUniswapV3Factory {
        /// Returns the zero address when no pool exists for the pair and fee.
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool);
    }

    #[sol(rpc, all_derives)]
    interface IUniswapV3Pool {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function fee() external view returns (uint24);
    }

    // SwapRouter02 layout: no deadline in the params struct.
    #[sol(all_derives)]
    interface ISwapRouter02 {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
    }

    #[sol(all_derives)]
    interface ILendingPool {
        function deposit(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external;
    }
}

pub use ISwapRouter02::ExactInputSingleParams;

/// Static description of a token on a given chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl AssetDescriptor {
    pub fn new(chain_id: u64, address: Address, decimals: u8, symbol: &str, name: &str) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }
}

/// Parameters read from a resolved liquidity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
}

impl PoolInfo {
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }
}

use alloy::primitives::Address;
use serde::Serialize;
use thiserror::Error;

use crate::chain::ChainError;
use crate::utils::units::AmountError;

/// Coarse failure class, stable enough to drive exit codes and log parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Internal,
    Config,
    Approval,
    Pool,
    Swap,
    Supply,
}

impl FailureCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            FailureCategory::Internal => 1,
            FailureCategory::Config => 2,
            FailureCategory::Approval => 3,
            FailureCategory::Pool => 4,
            FailureCategory::Swap => 5,
            FailureCategory::Supply => 6,
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Token approval failed")]
    Approval {
        token: String,
        #[source]
        source: ChainError,
    },
    #[error("Failed to get pool address")]
    PoolNotFound {
        token_a: Address,
        token_b: Address,
        fee: u32,
    },
    #[error("pool {pool} does not trade {token_a} / {token_b}")]
    PoolMismatch {
        pool: Address,
        token_a: Address,
        token_b: Address,
    },
    #[error("pool query failed: {0}")]
    PoolQuery(#[source] ChainError),
    #[error("swap failed: {0}")]
    Swap(#[source] ChainError),
    #[error("swap produced no {symbol}")]
    EmptySwapOutput { symbol: String },
    #[error("Aave supply failed")]
    Supply(#[source] ChainError),
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),
    #[error("step {step} needs {missing}, which no earlier step produced")]
    MissingInput {
        step: &'static str,
        missing: &'static str,
    },
}

impl WorkflowError {
    pub fn category(&self) -> FailureCategory {
        match self {
            WorkflowError::Approval { .. } => FailureCategory::Approval,
            WorkflowError::PoolNotFound { .. }
            | WorkflowError::PoolMismatch { .. }
            | WorkflowError::PoolQuery(_) => FailureCategory::Pool,
            WorkflowError::Swap(_) | WorkflowError::EmptySwapOutput { .. } => FailureCategory::Swap,
            WorkflowError::Supply(_) => FailureCategory::Supply,
            WorkflowError::Amount(_) => FailureCategory::Config,
            WorkflowError::MissingInput { .. } => FailureCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }
}

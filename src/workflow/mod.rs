//! Sequential runner for the swap-then-supply workflow.
//!
//! The workflow is an ordered list of [`StepKind`]s. [`WorkflowRunner`] executes
//! them one at a time against a [`ChainGateway`], threading results through a
//! [`WorkflowContext`], and stops at the first error. Every step that submits a
//! transaction waits for its receipt before the next step starts.

mod error;

pub use error::{FailureCategory, WorkflowError};

use alloy::primitives::{TxHash, U256};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::chain::{ChainGateway, ConfirmationPolicy};
use crate::config::{Env, NetworkConfig, SupplyAmountMode};
use crate::interfaces::{ExactInputSingleParams, PoolInfo};
use crate::services::{
    approve_base_units, approve_token, build_swap_params, execute_swap, resolve_pool,
    supply_to_pool,
};
use crate::utils::logger::Logger;
use crate::utils::units::{format_base_units, to_base_units};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    ApproveInput,
    ResolvePool,
    BuildSwap,
    ExecuteSwap,
    ApproveOutput,
    Supply,
}

impl StepKind {
    pub const SWAP_AND_SUPPLY: [StepKind; 6] = [
        StepKind::ApproveInput,
        StepKind::ResolvePool,
        StepKind::BuildSwap,
        StepKind::ExecuteSwap,
        StepKind::ApproveOutput,
        StepKind::Supply,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StepKind::ApproveInput => "approve_input",
            StepKind::ResolvePool => "resolve_pool",
            StepKind::BuildSwap => "build_swap",
            StepKind::ExecuteSwap => "execute_swap",
            StepKind::ApproveOutput => "approve_output",
            StepKind::Supply => "supply",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Finished without touching the chain's state.
    Completed,
    /// Submitted a transaction that was mined successfully.
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: &'static str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// What a completed run did, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowReport {
    pub steps: Vec<StepRecord>,
    pub amount_in: String,
    pub amount_supplied: Option<String>,
}

/// Everything the runner needs besides the gateway.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub network: NetworkConfig,
    /// Human-readable amount of the input token.
    pub swap_amount: Decimal,
    /// Human-readable minimum of the output token; zero disables the bound.
    pub amount_out_minimum: Decimal,
    pub supply_amount_mode: SupplyAmountMode,
    pub confirmation: ConfirmationPolicy,
}

impl WorkflowSettings {
    pub fn from_env(env: &Env) -> Self {
        Self {
            confirmation: ConfirmationPolicy::new(
                Duration::from_secs(env.confirmation_timeout_secs),
                env.network.explorer_url.clone(),
            ),
            network: env.network.clone(),
            swap_amount: env.swap_amount,
            amount_out_minimum: env.amount_out_minimum,
            supply_amount_mode: env.supply_amount_mode,
        }
    }
}

/// Values produced by earlier steps and consumed by later ones.
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    pub amount_in: U256,
    pub pool: Option<PoolInfo>,
    pub swap_params: Option<ExactInputSingleParams>,
    pub supply_amount: Option<U256>,
}

pub struct WorkflowRunner<'a> {
    gateway: &'a dyn ChainGateway,
    settings: &'a WorkflowSettings,
    steps: Vec<StepKind>,
}

impl<'a> WorkflowRunner<'a> {
    pub fn new(gateway: &'a dyn ChainGateway, settings: &'a WorkflowSettings) -> Self {
        Self::with_steps(gateway, settings, StepKind::SWAP_AND_SUPPLY.to_vec())
    }

    pub fn with_steps(
        gateway: &'a dyn ChainGateway,
        settings: &'a WorkflowSettings,
        steps: Vec<StepKind>,
    ) -> Self {
        Self {
            gateway,
            settings,
            steps,
        }
    }

    pub fn steps(&self) -> &[StepKind] {
        &self.steps
    }

    pub async fn run(&self) -> Result<WorkflowReport, WorkflowError> {
        let token_in = &self.settings.network.token_in;
        let mut ctx = WorkflowContext {
            amount_in: to_base_units(self.settings.swap_amount, token_in.decimals)?,
            ..Default::default()
        };
        let mut records = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            Logger::step(index + 1, self.steps.len(), step.name());
            tracing::info!(step = step.name(), status = "started");

            match self.run_step(*step, &mut ctx).await {
                Ok(tx_hash) => {
                    let record = StepRecord {
                        step: step.name(),
                        status: if tx_hash.is_some() {
                            StepStatus::Confirmed
                        } else {
                            StepStatus::Completed
                        },
                        tx_hash: tx_hash.map(|h| format!("{:#x}", h)),
                    };
                    tracing::info!(
                        step = step.name(),
                        status = ?record.status,
                        tx_hash = record.tx_hash.as_deref().unwrap_or("-")
                    );
                    records.push(record);
                }
                Err(err) => {
                    tracing::error!(
                        step = step.name(),
                        status = "failed",
                        category = ?err.category(),
                        error = %err
                    );
                    return Err(err);
                }
            }
        }

        let token_out = &self.settings.network.token_out;
        Ok(WorkflowReport {
            steps: records,
            amount_in: format!(
                "{} {}",
                format_base_units(ctx.amount_in, token_in.decimals),
                token_in.symbol
            ),
            amount_supplied: ctx.supply_amount.map(|a| {
                format!(
                    "{} {}",
                    format_base_units(a, token_out.decimals),
                    token_out.symbol
                )
            }),
        })
    }

    /// Runs one step, returning the hash of the transaction it confirmed, if any.
    async fn run_step(
        &self,
        step: StepKind,
        ctx: &mut WorkflowContext,
    ) -> Result<Option<TxHash>, WorkflowError> {
        let network = &self.settings.network;
        let policy = &self.settings.confirmation;

        match step {
            StepKind::ApproveInput => {
                let receipt = approve_token(
                    self.gateway,
                    &network.token_in,
                    network.swap_router,
                    self.settings.swap_amount,
                    policy,
                )
                .await?;
                Ok(Some(receipt.hash))
            }
            StepKind::ResolvePool => {
                let pool = resolve_pool(
                    self.gateway,
                    network.factory,
                    &network.token_in,
                    &network.token_out,
                    network.fee_tier,
                )
                .await?;
                ctx.pool = Some(pool);
                Ok(None)
            }
            StepKind::BuildSwap => {
                let pool = ctx.pool.ok_or(WorkflowError::MissingInput {
                    step: step.name(),
                    missing: "resolved pool",
                })?;
                let amount_out_minimum =
                    to_base_units(self.settings.amount_out_minimum, network.token_out.decimals)?;
                if amount_out_minimum.is_zero() {
                    Logger::warning("amountOutMinimum is 0: the swap accepts any output amount");
                    tracing::warn!(step = step.name(), "swap has no slippage bound");
                }
                ctx.swap_params = Some(build_swap_params(
                    pool.fee,
                    &network.token_in,
                    &network.token_out,
                    self.gateway.signer_address(),
                    ctx.amount_in,
                    amount_out_minimum,
                ));
                Ok(None)
            }
            StepKind::ExecuteSwap => {
                let params = ctx.swap_params.as_ref().ok_or(WorkflowError::MissingInput {
                    step: step.name(),
                    missing: "swap parameters",
                })?;
                let label = format!(
                    "swap {} → {}",
                    network.token_in.symbol, network.token_out.symbol
                );
                let signer = self.gateway.signer_address();

                let receipt = match self.settings.supply_amount_mode {
                    SupplyAmountMode::MirrorInput => {
                        let receipt =
                            execute_swap(self.gateway, network.swap_router, params, &label, policy)
                                .await?;
                        Logger::warning(&format!(
                            "Supplying the swap input amount ({} base units) as {}; \
                             the received amount is not read",
                            ctx.amount_in, network.token_out.symbol
                        ));
                        tracing::warn!(
                            step = step.name(),
                            mode = %SupplyAmountMode::MirrorInput,
                            "supply amount assumes 1:1 swap output"
                        );
                        ctx.supply_amount = Some(ctx.amount_in);
                        receipt
                    }
                    SupplyAmountMode::BalanceDelta => {
                        let before = self
                            .gateway
                            .token_balance(network.token_out.address, signer)
                            .await
                            .map_err(WorkflowError::Swap)?;
                        let receipt =
                            execute_swap(self.gateway, network.swap_router, params, &label, policy)
                                .await?;
                        let after = self
                            .gateway
                            .token_balance(network.token_out.address, signer)
                            .await
                            .map_err(WorkflowError::Swap)?;
                        let received = after.saturating_sub(before);
                        if received.is_zero() {
                            return Err(WorkflowError::EmptySwapOutput {
                                symbol: network.token_out.symbol.clone(),
                            });
                        }
                        Logger::info(&format!(
                            "Received {} {}",
                            format_base_units(received, network.token_out.decimals),
                            network.token_out.symbol
                        ));
                        ctx.supply_amount = Some(received);
                        receipt
                    }
                };
                Ok(Some(receipt.hash))
            }
            StepKind::ApproveOutput => {
                let amount = ctx.supply_amount.ok_or(WorkflowError::MissingInput {
                    step: step.name(),
                    missing: "swap output amount",
                })?;
                let receipt = approve_base_units(
                    self.gateway,
                    &network.token_out,
                    network.lending_pool,
                    amount,
                    policy,
                )
                .await?;
                Ok(Some(receipt.hash))
            }
            StepKind::Supply => {
                let amount = ctx.supply_amount.ok_or(WorkflowError::MissingInput {
                    step: step.name(),
                    missing: "swap output amount",
                })?;
                Logger::info(&format!(
                    "Supplying {} to lending pool...",
                    network.token_out.symbol
                ));
                let receipt = supply_to_pool(
                    self.gateway,
                    network.lending_pool,
                    &network.token_out,
                    amount,
                    network.referral_code,
                    policy,
                )
                .await?;
                Ok(Some(receipt.hash))
            }
        }
    }
}

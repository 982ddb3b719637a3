//! Staking commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::common::PortfolioArg;
use crate::client::RestClient;
use crate::output::print_json;
use crate::services::staking::{CreateStakeRequest, StakeInputs, StakingService};

#[derive(Debug, Subcommand)]
pub enum StakingCommand {
    /// Create a request to stake or delegate funds to a validator
    Stake(StakeArgs),
}

#[derive(Debug, Args)]
pub struct StakeArgs {
    /// Wallet ID (Required)
    #[arg(short = 'i', long = "wallet-id")]
    pub wallet_id: String,

    /// Optional amount to stake. If omitted, the wallet stakes the maximum
    /// amount available
    #[arg(short = 'a', long, default_value = "")]
    pub amount: String,

    /// Idempotency key is a UUID; generated when not passed
    #[arg(long = "idempotency-key", default_value = "")]
    pub idempotency_key: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

pub async fn run(command: StakingCommand, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    match command {
        StakingCommand::Stake(args) => create_stake(args, client, pretty).await,
    }
}

async fn create_stake(args: StakeArgs, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let idempotency_key = if args.idempotency_key.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        args.idempotency_key
    };

    let inputs = if args.amount.is_empty() {
        None
    } else {
        Some(StakeInputs {
            amount: args.amount,
        })
    };

    let request = CreateStakeRequest {
        idempotency_key,
        inputs,
    };

    let service = StakingService::new(client);
    let response = service
        .create_stake(&portfolio_id, &args.wallet_id, &request)
        .await
        .context("cannot create staking request")?;

    print_json(&response, pretty)?;
    Ok(())
}

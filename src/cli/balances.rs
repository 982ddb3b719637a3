//! Balance commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::PortfolioArg;
use crate::client::RestClient;
use crate::output::print_json;
use crate::services::balances::BalancesService;

#[derive(Debug, Subcommand)]
pub enum BalancesCommand {
    /// List portfolio balances that meet filter criteria
    List(ListBalancesArgs),
    /// List onchain balances for a wallet
    ListOnchain(ListOnchainBalancesArgs),
}

#[derive(Debug, Args)]
pub struct ListBalancesArgs {
    /// Type of balance
    #[arg(short = 't', long = "balance-type", default_value = "")]
    pub balance_type: String,

    /// List of symbols
    #[arg(short = 's', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct ListOnchainBalancesArgs {
    /// Wallet ID (Required)
    #[arg(short = 'i', long = "wallet-id")]
    pub wallet_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

pub async fn run(command: BalancesCommand, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    match command {
        BalancesCommand::List(args) => list_balances(args, client, pretty).await,
        BalancesCommand::ListOnchain(args) => list_onchain_balances(args, client, pretty).await,
    }
}

async fn list_balances(
    args: ListBalancesArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = BalancesService::new(client);
    let response = service
        .list_portfolio_balances(&portfolio_id, &args.balance_type, &args.symbols)
        .await
        .context("cannot list balances")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn list_onchain_balances(
    args: ListOnchainBalancesArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = BalancesService::new(client);
    let response = service
        .list_onchain_wallet_balances(&portfolio_id, &args.wallet_id)
        .await
        .context("cannot list onchain balances")?;

    print_json(&response, pretty)?;
    Ok(())
}

//! Margin and short-financing commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::{EntityArg, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::services::financing::{CreateLocateRequest, FinancingService};

#[derive(Debug, Subcommand)]
pub enum FinancingCommand {
    /// Get margin information for an entity
    GetMarginInfo(EntityScopedArgs),
    /// Get withdrawal power for a portfolio and symbol
    GetWithdrawalPower(GetWithdrawalPowerArgs),
    /// Create a new locate for a portfolio and asset
    CreateLocate(CreateLocateArgs),
    /// List locates for a portfolio
    ListLocates(ListLocatesArgs),
    /// List interest accruals for an entity
    ListInterestAccruals(ListInterestAccrualsArgs),
    /// List margin call summaries for an entity
    ListMarginCallSummaries(EntityScopedArgs),
    /// List margin conversions for a portfolio
    ListMarginConversions(PortfolioScopedArgs),
}

#[derive(Debug, Args)]
pub struct EntityScopedArgs {
    #[command(flatten)]
    pub entity: EntityArg,
}

#[derive(Debug, Args)]
pub struct PortfolioScopedArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct GetWithdrawalPowerArgs {
    /// The symbol to query withdrawal power for (Required)
    #[arg(short = 's', long)]
    pub symbol: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct CreateLocateArgs {
    /// The symbol for the asset (Required)
    #[arg(short = 's', long)]
    pub symbol: String,

    /// The locate amount (Required)
    #[arg(short = 'a', long)]
    pub amount: String,

    /// The target date of the locate (YYYY-MM-DD) (Required)
    #[arg(long)]
    pub date: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct ListLocatesArgs {
    /// The IDs of specific locates to filter for
    #[arg(long = "locate-ids", value_delimiter = ',')]
    pub locate_ids: Vec<String>,

    /// The date of the locates in YYYY-MM-DD format
    #[arg(long, default_value = "")]
    pub date: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct ListInterestAccrualsArgs {
    /// Start date in YYYY-MM-DD format
    #[arg(long = "start-date", default_value = "")]
    pub start_date: String,

    /// End date in YYYY-MM-DD format
    #[arg(long = "end-date", default_value = "")]
    pub end_date: String,

    #[command(flatten)]
    pub entity: EntityArg,
}

pub async fn run(
    command: FinancingCommand,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let service = FinancingService::new(client);

    match command {
        FinancingCommand::GetMarginInfo(args) => {
            let entity_id = client
                .credentials()
                .entity_id_or(args.entity.entity_id.as_deref())?;
            let response = service
                .get_margin_information(&entity_id)
                .await
                .context("cannot get margin information")?;
            print_json(&response, pretty)?;
        }
        FinancingCommand::GetWithdrawalPower(args) => {
            let portfolio_id = client
                .credentials()
                .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
            let response = service
                .get_withdrawal_power(&portfolio_id, &args.symbol)
                .await
                .context("cannot get withdrawal power")?;
            print_json(&response, pretty)?;
        }
        FinancingCommand::CreateLocate(args) => {
            let portfolio_id = client
                .credentials()
                .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
            let request = CreateLocateRequest {
                symbol: args.symbol,
                amount: args.amount,
                locate_date: args.date,
            };
            let response = service
                .create_locate(&portfolio_id, &request)
                .await
                .context("cannot create new locate")?;
            print_json(&response, pretty)?;
        }
        FinancingCommand::ListLocates(args) => {
            let portfolio_id = client
                .credentials()
                .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
            let response = service
                .list_locates(&portfolio_id, &args.date, &args.locate_ids)
                .await
                .context("cannot list locates")?;
            print_json_docs(&response.locates, pretty)?;
        }
        FinancingCommand::ListInterestAccruals(args) => {
            let entity_id = client
                .credentials()
                .entity_id_or(args.entity.entity_id.as_deref())?;
            let response = service
                .list_interest_accruals(&entity_id, &args.start_date, &args.end_date)
                .await
                .context("cannot list interest accruals")?;
            print_json_docs(&response.accruals, pretty)?;
        }
        FinancingCommand::ListMarginCallSummaries(args) => {
            let entity_id = client
                .credentials()
                .entity_id_or(args.entity.entity_id.as_deref())?;
            let response = service
                .list_margin_call_summaries(&entity_id)
                .await
                .context("cannot list margin call summaries")?;
            print_json_docs(&response.margin_call_summaries, pretty)?;
        }
        FinancingCommand::ListMarginConversions(args) => {
            let portfolio_id = client
                .credentials()
                .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
            let response = service
                .list_margin_conversions(&portfolio_id)
                .await
                .context("cannot list margin conversions")?;
            print_json_docs(&response.conversions, pretty)?;
        }
    }

    Ok(())
}

//! Allocation commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::{DateRangeArgs, PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::pagination::{paginate, TerminalPrompt};
use crate::services::allocations::{
    AllocationLeg, AllocationsService, CreateAllocationRequest, ListAllocationsFilter,
};

#[derive(Debug, Subcommand)]
pub enum AllocationsCommand {
    /// Create a portfolio allocation
    Create(CreateAllocationArgs),
    /// Get an allocation by allocation ID
    Get(GetAllocationArgs),
    /// Get a net allocation by netting ID
    GetNet(GetNetAllocationArgs),
    /// List the portfolio allocations
    List(ListAllocationsArgs),
}

#[derive(Debug, Args)]
pub struct CreateAllocationArgs {
    /// ID of the allocation (Required)
    #[arg(short = 'i', long = "allocation-id")]
    pub allocation_id: String,

    /// ID of the source portfolio (Required)
    #[arg(short = 's', long = "source-portfolio-id")]
    pub source_portfolio_id: String,

    /// ID of the product (Required)
    #[arg(short = 'p', long = "product-id")]
    pub product_id: String,

    /// Size type of the allocation (Required)
    #[arg(short = 't', long = "size-type")]
    pub size_type: String,

    /// ID of the remainder destination portfolio (Required)
    #[arg(short = 'r', long = "remainder-destination-portfolio-id")]
    pub remainder_destination_portfolio_id: String,

    /// JSON string of allocation legs (Required)
    #[arg(short = 'g', long = "allocation-legs")]
    pub allocation_legs: String,

    /// List of order IDs
    #[arg(short = 'o', long = "order-ids", value_delimiter = ',')]
    pub order_ids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct GetAllocationArgs {
    /// Allocation ID (Required)
    #[arg(short = 'i', long = "allocation-id")]
    pub allocation_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct GetNetAllocationArgs {
    /// Netting ID shared by the buy and sell sides (Required)
    #[arg(short = 'i', long = "netting-id")]
    pub netting_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct ListAllocationsArgs {
    /// List of product IDs
    #[arg(long = "product-ids", value_delimiter = ',')]
    pub product_ids: Vec<String>,

    /// Side of orders
    #[arg(long = "order-side", default_value = "")]
    pub side: String,

    #[command(flatten)]
    pub date_range: DateRangeArgs,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

pub async fn run(
    command: AllocationsCommand,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    match command {
        AllocationsCommand::Create(args) => create_allocation(args, client, pretty).await,
        AllocationsCommand::Get(args) => get_allocation(args, client, pretty).await,
        AllocationsCommand::GetNet(args) => get_net_allocation(args, client, pretty).await,
        AllocationsCommand::List(args) => list_allocations(args, client, pretty).await,
    }
}

async fn create_allocation(
    args: CreateAllocationArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let allocation_legs: Vec<AllocationLeg> = serde_json::from_str(&args.allocation_legs)
        .context("invalid allocation legs format")?;

    let request = CreateAllocationRequest {
        allocation_id: args.allocation_id,
        source_portfolio_id: args.source_portfolio_id,
        product_id: args.product_id,
        order_ids: args.order_ids,
        allocation_legs,
        size_type: args.size_type,
        remainder_destination_portfolio: args.remainder_destination_portfolio_id,
    };

    let service = AllocationsService::new(client);
    let response = service
        .create_allocation(&request)
        .await
        .context("cannot create portfolio allocations")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn get_allocation(
    args: GetAllocationArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = AllocationsService::new(client);
    let response = service
        .get_allocation(&portfolio_id, &args.allocation_id)
        .await
        .context("cannot get allocation")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn get_net_allocation(
    args: GetNetAllocationArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = AllocationsService::new(client);
    let response = service
        .get_net_allocation(&portfolio_id, &args.netting_id)
        .await
        .context("cannot get net allocation")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn list_allocations(
    args: ListAllocationsArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let (start, end) = args.date_range.parse()?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let filter = ListAllocationsFilter {
        product_ids: args.product_ids,
        side: args.side,
        start,
        end,
    };

    let service = AllocationsService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let portfolio_id = &portfolio_id;
    let filter = &filter;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_allocations(portfolio_id, filter, &page)
            .await
            .context("cannot list allocations")?;
        print_json_docs(&response.allocations, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_legs_parse_from_json_flag() {
        let raw = r#"[
            {
                "allocation_leg_id": "leg1",
                "destination_portfolio_id": "dst",
                "amount": "2.5"
            }
        ]"#;

        let legs: Vec<AllocationLeg> = serde_json::from_str(raw).unwrap();

        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].destination_portfolio_id, "dst");
    }

    #[test]
    fn malformed_allocation_legs_are_rejected() {
        serde_json::from_str::<Vec<AllocationLeg>>("not json").unwrap_err();
    }
}

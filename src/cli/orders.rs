//! Order commands: submission, preview, quotes, cancellation, and listing.

use anyhow::Context;
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::common::{parse_date_range, DateRangeArgs, PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::pagination::{paginate, TerminalPrompt};
use crate::services::orders::{
    AcceptQuoteRequest, CreateQuoteRequest, ListOrdersFilter, Order, OrdersService,
};
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// Submit an order
    Create(CreateOrderArgs),
    /// Preview an order without submitting it
    Preview(CreateOrderArgs),
    /// Get an order from an order ID
    Get(GetOrderArgs),
    /// List fills for an order
    GetFills(GetFillsArgs),
    /// List orders meeting filter criteria
    List(ListOrdersArgs),
    /// List open orders meeting filter criteria
    ListOpen(ListOpenOrdersArgs),
    /// Attempt to cancel an open order
    Cancel(CancelOrderArgs),
    /// Create a quote request
    CreateQuote(CreateQuoteArgs),
    /// Accept a quote request
    AcceptQuote(AcceptQuoteArgs),
}

#[derive(Debug, Args)]
pub struct CreateOrderArgs {
    /// Order side (Required)
    #[arg(short = 's', long)]
    pub side: String,

    /// ID of the product (Required)
    #[arg(short = 'i', long = "product-id")]
    pub product_id: String,

    /// Type of the order (Required)
    #[arg(short = 't', long = "type")]
    pub order_type: String,

    /// Order size in base asset units
    #[arg(short = 'b', long = "base-quantity", default_value = "")]
    pub base_quantity: String,

    /// Order size in quote asset units
    #[arg(short = 'q', long = "quote-value", default_value = "")]
    pub quote_value: String,

    /// Determine order fill strategy
    #[arg(short = 'f', long = "time-in-force", default_value = "")]
    pub time_in_force: String,

    /// Limit price for the order
    #[arg(short = 'l', long = "limit-price", default_value = "")]
    pub limit_price: String,

    /// The start time of the order in UTC (TWAP only)
    #[arg(long = "start-time", default_value = "")]
    pub start_time: String,

    /// The expiry time of the order in UTC (TWAP and limit GTD only)
    #[arg(long = "expiry-time", default_value = "")]
    pub expiry_time: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct GetOrderArgs {
    /// Order ID (Required)
    #[arg(short = 'i', long = "order-id")]
    pub order_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct GetFillsArgs {
    /// Order ID (Required)
    #[arg(short = 'i', long = "order-id")]
    pub order_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct ListOrdersArgs {
    /// List of statuses
    #[arg(long = "order-statuses", value_delimiter = ',')]
    pub statuses: Vec<String>,

    /// List of product IDs
    #[arg(long = "product-ids", value_delimiter = ',')]
    pub product_ids: Vec<String>,

    /// Type of orders
    #[arg(long = "order-type", default_value = "")]
    pub order_type: String,

    /// Side of orders
    #[arg(long = "order-side", default_value = "")]
    pub order_side: String,

    /// Start time in RFC3339 format (Required)
    #[arg(long)]
    pub start: String,

    /// End time in RFC3339 format
    #[arg(long)]
    pub end: Option<String>,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct ListOpenOrdersArgs {
    /// List of product IDs
    #[arg(long = "product-ids", value_delimiter = ',')]
    pub product_ids: Vec<String>,

    /// Type of orders
    #[arg(long = "order-type", default_value = "")]
    pub order_type: String,

    /// Side of orders
    #[arg(long = "order-side", default_value = "")]
    pub order_side: String,

    #[command(flatten)]
    pub date_range: DateRangeArgs,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct CancelOrderArgs {
    /// ID of the order to cancel (Required)
    #[arg(long = "order-id")]
    pub order_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct CreateQuoteArgs {
    /// Order side (Required)
    #[arg(short = 's', long)]
    pub side: String,

    /// ID of the product (Required)
    #[arg(short = 'i', long = "product-id")]
    pub product_id: String,

    /// Order size in base asset units
    #[arg(short = 'b', long = "base-quantity", default_value = "")]
    pub base_quantity: String,

    /// Order size in quote asset units
    #[arg(short = 'q', long = "quote-value", default_value = "")]
    pub quote_value: String,

    /// Limit price for the quote
    #[arg(short = 'l', long = "limit-price", default_value = "")]
    pub limit_price: String,

    /// A client-generated quote ID used for reference purposes
    #[arg(long = "client-quote-id", default_value = "")]
    pub client_quote_id: String,

    /// The settlement currency
    #[arg(long = "settle-currency", default_value = "")]
    pub settle_currency: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct AcceptQuoteArgs {
    /// Order side (Required)
    #[arg(short = 's', long)]
    pub side: String,

    /// ID of the product (Required)
    #[arg(short = 'i', long = "product-id")]
    pub product_id: String,

    /// The quote ID returned by the create quote request (Required)
    #[arg(long = "quote-id")]
    pub quote_id: String,

    /// A client-generated order ID used for reference purposes
    #[arg(long = "client-order-id", default_value = "")]
    pub client_order_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

pub async fn run(command: OrdersCommand, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    match command {
        OrdersCommand::Create(args) => create_order(args, client, pretty).await,
        OrdersCommand::Preview(args) => preview_order(args, client, pretty).await,
        OrdersCommand::Get(args) => get_order(args, client, pretty).await,
        OrdersCommand::GetFills(args) => get_order_fills(args, client, pretty).await,
        OrdersCommand::List(args) => list_orders(args, client, pretty).await,
        OrdersCommand::ListOpen(args) => list_open_orders(args, client, pretty).await,
        OrdersCommand::Cancel(args) => cancel_order(args, client, pretty).await,
        OrdersCommand::CreateQuote(args) => create_quote(args, client, pretty).await,
        OrdersCommand::AcceptQuote(args) => accept_quote(args, client, pretty).await,
    }
}

fn validate_order_args(args: &CreateOrderArgs) -> anyhow::Result<()> {
    validation::validate_side(&args.side)?;
    validation::validate_order_type_and_limit_price(&args.order_type, &args.limit_price)?;
    validation::validate_time_in_force(&args.time_in_force)?;
    validation::validate_quantities(&args.base_quantity, &args.quote_value)?;
    Ok(())
}

fn order_from_args(args: &CreateOrderArgs, portfolio_id: String) -> Order {
    Order {
        portfolio_id,
        product_id: args.product_id.clone(),
        side: args.side.clone(),
        client_order_id: Uuid::new_v4().to_string(),
        order_type: args.order_type.clone(),
        base_quantity: args.base_quantity.clone(),
        quote_value: args.quote_value.clone(),
        limit_price: args.limit_price.clone(),
        start_time: args.start_time.clone(),
        expiry_time: args.expiry_time.clone(),
        time_in_force: args.time_in_force.clone(),
        ..Order::default()
    }
}

async fn create_order(
    args: CreateOrderArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    validate_order_args(&args)?;

    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let order = order_from_args(&args, portfolio_id.clone());

    let service = OrdersService::new(client);
    let response = service
        .create_order(&portfolio_id, &order)
        .await
        .context("cannot create order")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn preview_order(
    args: CreateOrderArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    validate_order_args(&args)?;

    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let order = order_from_args(&args, portfolio_id.clone());

    let service = OrdersService::new(client);
    let response = service
        .preview_order(&portfolio_id, &order)
        .await
        .context("cannot preview order")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn get_order(args: GetOrderArgs, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = OrdersService::new(client);
    let response = service
        .get_order(&portfolio_id, &args.order_id)
        .await
        .context("cannot get order")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn get_order_fills(
    args: GetFillsArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = OrdersService::new(client);
    let mut prompt = TerminalPrompt::new();
    let order_id = args.order_id;

    let service = &service;
    let portfolio_id = &portfolio_id;
    let order_id = &order_id;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .get_order_fills(portfolio_id, order_id, &page)
            .await
            .context("cannot get order fills")?;
        print_json_docs(&response.fills, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn list_orders(
    args: ListOrdersArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    // OPEN is a status, not a type; open orders have their own listing.
    if args.order_type.to_uppercase() == "OPEN" {
        anyhow::bail!("invalid order type: 'OPEN' cannot be used");
    }

    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let (start, end) = parse_date_range(Some(&args.start), args.end.as_deref())?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let filter = ListOrdersFilter {
        statuses: args.statuses,
        product_ids: args.product_ids,
        order_type: args.order_type,
        order_side: args.order_side,
        start,
        end,
    };

    let service = OrdersService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let portfolio_id = &portfolio_id;
    let filter = &filter;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_orders(portfolio_id, filter, &page)
            .await
            .context("cannot list orders")?;
        print_json_docs(&response.orders, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn list_open_orders(
    args: ListOpenOrdersArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let (start, end) = args.date_range.parse()?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let filter = ListOrdersFilter {
        statuses: Vec::new(),
        product_ids: args.product_ids,
        order_type: args.order_type,
        order_side: args.order_side,
        start,
        end,
    };

    let service = OrdersService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let portfolio_id = &portfolio_id;
    let filter = &filter;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_open_orders(portfolio_id, filter, &page)
            .await
            .context("cannot list open orders")?;
        print_json_docs(&response.orders, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn cancel_order(
    args: CancelOrderArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    validation::validate_uuid_flag("order-id", &args.order_id)?;

    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = OrdersService::new(client);
    let response = service
        .cancel_order(&portfolio_id, &args.order_id)
        .await
        .context("cannot cancel order")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn create_quote(
    args: CreateQuoteArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let client_quote_id = if args.client_quote_id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        args.client_quote_id
    };

    let request = CreateQuoteRequest {
        product_id: args.product_id,
        client_quote_id,
        side: args.side,
        base_quantity: args.base_quantity,
        quote_value: args.quote_value,
        limit_price: args.limit_price,
        settle_currency: args.settle_currency,
    };

    let service = OrdersService::new(client);
    let response = service
        .create_quote(&portfolio_id, &request)
        .await
        .context("cannot create quote request")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn accept_quote(
    args: AcceptQuoteArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let client_order_id = if args.client_order_id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        args.client_order_id
    };

    let request = AcceptQuoteRequest {
        product_id: args.product_id,
        quote_id: args.quote_id,
        client_order_id,
        side: args.side,
    };

    let service = OrdersService::new(client);
    let response = service
        .accept_quote(&portfolio_id, &request)
        .await
        .context("cannot accept quote")?;

    print_json(&response, pretty)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_args() -> CreateOrderArgs {
        CreateOrderArgs {
            side: "BUY".to_owned(),
            product_id: "BTC-USD".to_owned(),
            order_type: "MARKET".to_owned(),
            base_quantity: "1".to_owned(),
            quote_value: String::new(),
            time_in_force: String::new(),
            limit_price: String::new(),
            start_time: String::new(),
            expiry_time: String::new(),
            portfolio: PortfolioArg { portfolio_id: None },
        }
    }

    #[test]
    fn valid_market_order_passes_validation() {
        validate_order_args(&create_args()).unwrap();
    }

    #[test]
    fn validation_stops_at_the_first_broken_rule() {
        let mut args = create_args();
        args.side = "buy".to_owned();
        args.order_type = "SWAP".to_owned();

        let err = validate_order_args(&args).unwrap_err();

        assert!(err.to_string().contains("side must be either"));
    }

    #[test]
    fn limit_order_without_price_fails_validation() {
        let mut args = create_args();
        args.order_type = "LIMIT".to_owned();

        let err = validate_order_args(&args).unwrap_err();

        assert!(err.to_string().contains("limit-price is required"));
    }

    #[test]
    fn order_body_gets_a_generated_client_order_id() {
        let order = order_from_args(&create_args(), "pid".to_owned());

        assert_eq!(order.portfolio_id, "pid");
        crate::validation::validate_uuid(&order.client_order_id).unwrap();
    }
}

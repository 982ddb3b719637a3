//! Portfolio commands.

use std::cell::RefCell;

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::{PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::pagination::{paginate, Pagination, PaginationParams, TerminalPrompt};
use crate::services::portfolios::{Portfolio, PortfoliosService};

#[derive(Debug, Subcommand)]
pub enum PortfoliosCommand {
    /// List portfolios associated with the API key
    List(ListPortfoliosArgs),
    /// Retrieve portfolio information using a portfolio ID
    Get(GetPortfolioArgs),
}

#[derive(Debug, Args)]
pub struct ListPortfoliosArgs {
    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct GetPortfolioArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

pub async fn run(
    command: PortfoliosCommand,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    match command {
        PortfoliosCommand::List(args) => list_portfolios(args, client, pretty).await,
        PortfoliosCommand::Get(args) => get_portfolio(args, client, pretty).await,
    }
}

/// The portfolios endpoint has no server-side pagination, so the full result
/// set is fetched once and windowed locally through the same driver the
/// paginated listings use.
async fn list_portfolios(
    args: ListPortfoliosArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = PortfoliosService::new(client);
    let response = service
        .list_portfolios()
        .await
        .context("cannot list portfolios")?;

    let remaining = RefCell::new(response.portfolios);
    let mut prompt = TerminalPrompt::new();

    let remaining = &remaining;
    paginate(options, params, &mut prompt, move |page| {
        let result = window_page(remaining, &page, pretty);
        async move { result }
    })
    .await
}

fn window_page(
    remaining: &RefCell<Vec<Portfolio>>,
    page: &PaginationParams,
    pretty: bool,
) -> anyhow::Result<Pagination> {
    let mut values = remaining.borrow_mut();
    sort_by_name(&mut values, &page.sort_direction);

    let limit = page.limit as usize;
    let (to_print, next_cursor): (Vec<Portfolio>, &str) = if values.len() >= limit {
        (values.drain(..limit).collect(), "true")
    } else {
        (values.drain(..).collect(), "")
    };

    print_json_docs(&to_print, pretty)?;

    Ok(Pagination {
        next_cursor: next_cursor.to_owned(),
        ..Pagination::default()
    })
}

fn sort_by_name(items: &mut [Portfolio], direction: &str) {
    if direction.eq_ignore_ascii_case("asc") {
        items.sort_by(|a, b| a.name.cmp(&b.name));
    } else {
        items.sort_by(|a, b| b.name.cmp(&a.name));
    }
}

async fn get_portfolio(
    args: GetPortfolioArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = PortfoliosService::new(client);
    let response = service
        .get_portfolio(&portfolio_id)
        .await
        .context("cannot get portfolio")?;

    print_json(&response, pretty)?;
    Ok(())
}

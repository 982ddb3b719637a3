//! Withdrawal address book commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::{PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::pagination::{paginate, TerminalPrompt};
use crate::services::address_book::{AddressBookService, CreateAddressBookEntryRequest};

#[derive(Debug, Subcommand)]
pub enum AddressBookCommand {
    /// Create an address book entry
    Create(CreateEntryArgs),
    /// List the address book entries
    List(ListEntriesArgs),
}

#[derive(Debug, Args)]
pub struct CreateEntryArgs {
    /// The address to add to the address book (Required)
    #[arg(short = 'a', long)]
    pub address: String,

    /// The currency symbol (Required)
    #[arg(short = 's', long)]
    pub symbol: String,

    /// Name for the address book entry (Required)
    #[arg(short = 'n', long)]
    pub name: String,

    /// Account identifier for the address
    #[arg(short = 'i', long = "account-identifier", default_value = "")]
    pub account_identifier: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct ListEntriesArgs {
    /// The currency symbol to filter by
    #[arg(short = 's', long, default_value = "")]
    pub symbol: String,

    /// Search by name or address
    #[arg(long, default_value = "")]
    pub search: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

pub async fn run(
    command: AddressBookCommand,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    match command {
        AddressBookCommand::Create(args) => create_entry(args, client, pretty).await,
        AddressBookCommand::List(args) => list_entries(args, client, pretty).await,
    }
}

async fn create_entry(
    args: CreateEntryArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let request = CreateAddressBookEntryRequest {
        address: args.address,
        currency_symbol: args.symbol,
        name: args.name,
        account_identifier: args.account_identifier,
    };

    let service = AddressBookService::new(client);
    let response = service
        .create_address_book_entry(&portfolio_id, &request)
        .await
        .context("cannot create address book entry")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn list_entries(
    args: ListEntriesArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = AddressBookService::new(client);
    let mut prompt = TerminalPrompt::new();
    let symbol = args.symbol;
    let search = args.search;

    let service = &service;
    let portfolio_id = &portfolio_id;
    let symbol = &symbol;
    let search = &search;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_address_book(portfolio_id, symbol, search, &page)
            .await
            .context("cannot list address book entries")?;
        print_json_docs(&response.addresses, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

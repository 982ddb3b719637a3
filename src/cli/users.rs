//! User listing commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::{EntityArg, PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::print_json_docs;
use crate::pagination::{paginate, TerminalPrompt};
use crate::services::users::UsersService;

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users for the associated portfolio
    List(ListUsersArgs),
    /// List users for the associated entity
    ListEntity(ListEntityUsersArgs),
}

#[derive(Debug, Args)]
pub struct ListUsersArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct ListEntityUsersArgs {
    #[command(flatten)]
    pub entity: EntityArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

pub async fn run(command: UsersCommand, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    match command {
        UsersCommand::List(args) => list_users(args, client, pretty).await,
        UsersCommand::ListEntity(args) => list_entity_users(args, client, pretty).await,
    }
}

async fn list_users(args: ListUsersArgs, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = UsersService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let portfolio_id = &portfolio_id;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_portfolio_users(portfolio_id, &page)
            .await
            .context("cannot list users")?;
        print_json_docs(&response.users, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn list_entity_users(
    args: ListEntityUsersArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let entity_id = client
        .credentials()
        .entity_id_or(args.entity.entity_id.as_deref())
        .context("cannot get entity ID")?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = UsersService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let entity_id = &entity_id;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_entity_users(entity_id, &page)
            .await
            .context("cannot list entity users")?;
        print_json_docs(&response.users, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

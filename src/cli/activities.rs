//! Activity feed commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::{DateRangeArgs, EntityArg, PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::pagination::{paginate, TerminalPrompt};
use crate::services::activities::{ActivitiesService, ListActivitiesFilter};

#[derive(Debug, Subcommand)]
pub enum ActivitiesCommand {
    /// Get activity information using an activity ID
    Get(GetActivityArgs),
    /// List activities meeting filter criteria
    List(ListActivitiesArgs),
    /// List entity activities meeting filter criteria
    ListEntity(ListEntityActivitiesArgs),
}

#[derive(Debug, Args)]
pub struct GetActivityArgs {
    /// Activity ID (Required)
    #[arg(short = 'i', long)]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListActivitiesArgs {
    #[command(flatten)]
    pub filters: ActivityFilterArgs,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct ListEntityActivitiesArgs {
    #[command(flatten)]
    pub filters: ActivityFilterArgs,

    #[command(flatten)]
    pub entity: EntityArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct ActivityFilterArgs {
    /// List of symbols
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// List of categories
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,

    /// List of statuses
    #[arg(long, value_delimiter = ',')]
    pub statuses: Vec<String>,

    #[command(flatten)]
    pub date_range: DateRangeArgs,
}

impl ActivityFilterArgs {
    fn into_filter(self) -> anyhow::Result<ListActivitiesFilter> {
        let (start, end) = self.date_range.parse()?;
        Ok(ListActivitiesFilter {
            symbols: self.symbols,
            categories: self.categories,
            statuses: self.statuses,
            start,
            end,
        })
    }
}

pub async fn run(
    command: ActivitiesCommand,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    match command {
        ActivitiesCommand::Get(args) => get_activity(args, client, pretty).await,
        ActivitiesCommand::List(args) => list_activities(args, client, pretty).await,
        ActivitiesCommand::ListEntity(args) => list_entity_activities(args, client, pretty).await,
    }
}

async fn get_activity(
    args: GetActivityArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let service = ActivitiesService::new(client);
    let response = service
        .get_activity(&args.id)
        .await
        .context("cannot get activity")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn list_activities(
    args: ListActivitiesArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();
    let filter = args.filters.into_filter()?;

    let service = ActivitiesService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let portfolio_id = &portfolio_id;
    let filter = &filter;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_activities(portfolio_id, filter, &page)
            .await
            .context("cannot list activities")?;
        print_json_docs(&response.activities, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn list_entity_activities(
    args: ListEntityActivitiesArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let entity_id = client
        .credentials()
        .entity_id_or(args.entity.entity_id.as_deref())
        .context("cannot get entity ID")?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();
    let filter = args.filters.into_filter()?;

    let service = ActivitiesService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let entity_id = &entity_id;
    let filter = &filter;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_entity_activities(entity_id, filter, &page)
            .await
            .context("cannot list entity activities")?;
        print_json_docs(&response.activities, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

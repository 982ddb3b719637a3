//! Asset catalog commands.

use std::cell::RefCell;

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::{EntityArg, PaginationArgs};
use crate::client::RestClient;
use crate::output::print_json_docs;
use crate::pagination::{paginate, Pagination, PaginationParams, TerminalPrompt};
use crate::services::assets::{Asset, AssetsService};

#[derive(Debug, Subcommand)]
pub enum AssetsCommand {
    /// List assets for the associated entity
    List(ListAssetsArgs),
}

#[derive(Debug, Args)]
pub struct ListAssetsArgs {
    #[command(flatten)]
    pub entity: EntityArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

pub async fn run(command: AssetsCommand, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    match command {
        AssetsCommand::List(args) => list_assets(args, client, pretty).await,
    }
}

/// The asset catalog comes back in one response; window it locally like the
/// portfolios listing does.
async fn list_assets(args: ListAssetsArgs, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    let entity_id = client
        .credentials()
        .entity_id_or(args.entity.entity_id.as_deref())
        .context("cannot get entity ID")?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = AssetsService::new(client);
    let response = service
        .list_assets(&entity_id)
        .await
        .context("cannot list assets")?;

    let remaining = RefCell::new(response.assets);
    let mut prompt = TerminalPrompt::new();

    let remaining = &remaining;
    paginate(options, params, &mut prompt, move |page| {
        let result = window_page(remaining, &page, pretty);
        async move { result }
    })
    .await
}

fn window_page(
    remaining: &RefCell<Vec<Asset>>,
    page: &PaginationParams,
    pretty: bool,
) -> anyhow::Result<Pagination> {
    let mut values = remaining.borrow_mut();
    sort_by_name(&mut values, &page.sort_direction);

    let limit = page.limit as usize;
    let (to_print, next_cursor): (Vec<Asset>, &str) = if values.len() >= limit {
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

fn sort_by_name(items: &mut [Asset], direction: &str) {
    if direction.eq_ignore_ascii_case("asc") {
        items.sort_by(|a, b| a.name.cmp(&b.name));
    } else {
        items.sort_by(|a, b| b.name.cmp(&a.name));
    }
}

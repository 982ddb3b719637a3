//! Onchain address group commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use super::common::PortfolioArg;
use crate::client::RestClient;
use crate::output::print_json;
use crate::services::onchain_address_book::{
    OnchainAddress, OnchainAddressBookService, OnchainAddressGroup, OnchainNetworkType,
    UpsertAddressGroupRequest,
};

#[derive(Debug, Subcommand)]
pub enum OnchainAddressBookCommand {
    /// Create an onchain address book entry
    CreateGroupEntry(GroupEntryArgs),
    /// Update an onchain address book entry
    UpdateGroupEntry(GroupEntryArgs),
    /// Delete an onchain address book entry
    Delete(DeleteGroupArgs),
}

#[derive(Debug, Args)]
pub struct GroupEntryArgs {
    /// Address group ID (Required)
    #[arg(short = 'i', long)]
    pub id: String,

    /// Address (Required)
    #[arg(short = 'a', long)]
    pub address: String,

    /// Network type (Required)
    #[arg(short = 't', long = "network-type")]
    pub network_type: String,

    /// Name for the address group
    #[arg(short = 'n', long, default_value = "")]
    pub name: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct DeleteGroupArgs {
    /// Address group ID (Required)
    #[arg(short = 'i', long)]
    pub id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

pub async fn run(
    command: OnchainAddressBookCommand,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    match command {
        OnchainAddressBookCommand::CreateGroupEntry(args) => {
            upsert_group_entry(args, client, pretty, false).await
        }
        OnchainAddressBookCommand::UpdateGroupEntry(args) => {
            upsert_group_entry(args, client, pretty, true).await
        }
        OnchainAddressBookCommand::Delete(args) => delete_group(args, client, pretty).await,
    }
}

fn group_from_args(args: &GroupEntryArgs) -> anyhow::Result<OnchainAddressGroup> {
    let network_type = OnchainNetworkType::parse(&args.network_type)?;

    Ok(OnchainAddressGroup {
        id: args.id.clone(),
        name: args.name.clone(),
        network_type,
        addresses: vec![OnchainAddress {
            address: args.address.clone(),
            name: args.name.clone(),
        }],
    })
}

async fn upsert_group_entry(
    args: GroupEntryArgs,
    client: &RestClient,
    pretty: bool,
    update: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let request = UpsertAddressGroupRequest {
        address_group: group_from_args(&args)?,
    };

    let service = OnchainAddressBookService::new(client);
    let response = if update {
        service
            .update_address_group(&portfolio_id, &request)
            .await
            .context("cannot update onchain address book entry")?
    } else {
        service
            .create_address_group(&portfolio_id, &request)
            .await
            .context("cannot create onchain address book entry")?
    };

    print_json(&response, pretty)?;
    Ok(())
}

async fn delete_group(
    args: DeleteGroupArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = OnchainAddressBookService::new(client);
    let response = service
        .delete_address_group(&portfolio_id, &args.id)
        .await
        .context("cannot delete onchain address book entry")?;

    print_json(&response, pretty)?;
    Ok(())
}

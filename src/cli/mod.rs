//! Command tree: one submodule per API domain.

pub mod activities;
pub mod address_book;
pub mod allocations;
pub mod assets;
pub mod balances;
pub mod common;
pub mod financing;
pub mod onchain_address_book;
pub mod orders;
pub mod portfolios;
pub mod staking;
pub mod transactions;
pub mod users;
pub mod wallets;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::client::RestClient;

#[derive(Debug, Parser)]
#[command(name = "prime-cli")]
#[command(about = "Command-line client for a prime brokerage trading and custody REST API")]
#[command(version)]
pub struct Cli {
    /// Pretty-print JSON responses. Default is compact output
    #[arg(long, global = true)]
    pub format: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Activity feed for portfolios and entities
    #[command(subcommand)]
    Activities(activities::ActivitiesCommand),
    /// Withdrawal address book
    #[command(subcommand)]
    AddressBook(address_book::AddressBookCommand),
    /// Portfolio allocations
    #[command(subcommand)]
    Allocations(allocations::AllocationsCommand),
    /// Entity asset catalog
    #[command(subcommand)]
    Assets(assets::AssetsCommand),
    /// Portfolio and onchain balances
    #[command(subcommand)]
    Balances(balances::BalancesCommand),
    /// Margin and short-financing operations
    #[command(subcommand)]
    Financing(financing::FinancingCommand),
    /// Onchain address groups
    #[command(subcommand)]
    OnchainAddressBook(onchain_address_book::OnchainAddressBookCommand),
    /// Order submission and listing
    #[command(subcommand)]
    Orders(orders::OrdersCommand),
    /// Portfolio lookup and listing
    #[command(subcommand)]
    Portfolios(portfolios::PortfoliosCommand),
    /// Staking operations
    #[command(subcommand)]
    Staking(staking::StakingCommand),
    /// Transactions and movement of funds
    #[command(subcommand)]
    Transactions(transactions::TransactionsCommand),
    /// Portfolio and entity users
    #[command(subcommand)]
    Users(users::UsersCommand),
    /// Wallet management
    #[command(subcommand)]
    Wallets(wallets::WalletsCommand),
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = RestClient::from_env()?;
    let pretty = cli.format;

    match cli.command {
        Commands::Activities(command) => activities::run(command, &client, pretty).await?,
        Commands::AddressBook(command) => address_book::run(command, &client, pretty).await?,
        Commands::Allocations(command) => allocations::run(command, &client, pretty).await?,
        Commands::Assets(command) => assets::run(command, &client, pretty).await?,
        Commands::Balances(command) => balances::run(command, &client, pretty).await?,
        Commands::Financing(command) => financing::run(command, &client, pretty).await?,
        Commands::OnchainAddressBook(command) => {
            onchain_address_book::run(command, &client, pretty).await?
        }
        Commands::Orders(command) => orders::run(command, &client, pretty).await?,
        Commands::Portfolios(command) => portfolios::run(command, &client, pretty).await?,
        Commands::Staking(command) => staking::run(command, &client, pretty).await?,
        Commands::Transactions(command) => transactions::run(command, &client, pretty).await?,
        Commands::Users(command) => users::run(command, &client, pretty).await?,
        Commands::Wallets(command) => wallets::run(command, &client, pretty).await?,
    }

    info!("command completed");
    Ok(())
}

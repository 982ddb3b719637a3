//! Wallet commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::common::{PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::pagination::{paginate, TerminalPrompt};
use crate::services::wallets::{CreateWalletRequest, NetworkDetails, WalletsService};
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum WalletsCommand {
    /// Create a new wallet
    Create(CreateWalletArgs),
    /// Get a wallet by wallet ID
    Get(WalletIdArgs),
    /// List wallets that meet filter criteria
    List(ListWalletsArgs),
    /// Get the balance for a given wallet
    Balance(WalletIdArgs),
    /// Get deposit instructions for a given wallet
    DepositInstructions(WalletIdArgs),
}

#[derive(Debug, Args)]
pub struct CreateWalletArgs {
    /// Name for the wallet (Required)
    #[arg(short = 'n', long)]
    pub name: String,

    /// Type of wallet, e.g. VAULT, ONCHAIN (Required)
    #[arg(short = 't', long = "type")]
    pub wallet_type: String,

    /// Symbol for the wallet
    #[arg(short = 's', long, default_value = "")]
    pub symbol: String,

    /// Idempotency key is a UUID; generated when not passed
    #[arg(long = "idempotency-key", default_value = "")]
    pub idempotency_key: String,

    /// Network family. Required for ONCHAIN wallets. Supported values:
    /// NETWORK_FAMILY_EVM or NETWORK_FAMILY_SOLANA
    #[arg(long = "network-family", default_value = "")]
    pub network_family: String,

    /// The network id: base, bitcoin, ethereum, solana etc.
    #[arg(long = "network-id", default_value = "")]
    pub network_id: String,

    /// The network type: mainnet or testnet
    #[arg(long = "network-type", default_value = "")]
    pub network_type: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct WalletIdArgs {
    /// Wallet ID (Required)
    #[arg(short = 'i', long = "wallet-id")]
    pub wallet_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct ListWalletsArgs {
    /// Type of wallet (Required)
    #[arg(short = 't', long = "type")]
    pub wallet_type: String,

    /// List of symbols
    #[arg(short = 's', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

pub async fn run(command: WalletsCommand, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    match command {
        WalletsCommand::Create(args) => create_wallet(args, client, pretty).await,
        WalletsCommand::Get(args) => get_wallet(args, client, pretty).await,
        WalletsCommand::List(args) => list_wallets(args, client, pretty).await,
        WalletsCommand::Balance(args) => get_wallet_balance(args, client, pretty).await,
        WalletsCommand::DepositInstructions(args) => {
            get_deposit_instructions(args, client, pretty).await
        }
    }
}

async fn create_wallet(
    args: CreateWalletArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let idempotency_key = if args.idempotency_key.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        validation::validate_uuid(&args.idempotency_key)?;
        args.idempotency_key
    };

    let network = if args.network_id.is_empty() && args.network_type.is_empty() {
        None
    } else {
        Some(NetworkDetails {
            id: args.network_id,
            network_type: args.network_type,
        })
    };

    let request = CreateWalletRequest {
        name: args.name,
        wallet_type: args.wallet_type,
        symbol: args.symbol,
        network_family: args.network_family,
        network,
        idempotency_key,
    };

    let service = WalletsService::new(client);
    let response = service
        .create_wallet(&portfolio_id, &request)
        .await
        .context("cannot create wallet")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn get_wallet(args: WalletIdArgs, client: &RestClient, pretty: bool) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = WalletsService::new(client);
    let response = service
        .get_wallet(&portfolio_id, &args.wallet_id)
        .await
        .context("cannot get wallet")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn list_wallets(
    args: ListWalletsArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = WalletsService::new(client);
    let mut prompt = TerminalPrompt::new();
    let wallet_type = args.wallet_type;
    let symbols = args.symbols;

    let service = &service;
    let portfolio_id = &portfolio_id;
    let wallet_type = &wallet_type;
    let symbols = &symbols;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_wallets(portfolio_id, wallet_type, symbols, &page)
            .await
            .context("cannot list wallets")?;
        print_json_docs(&response.wallets, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn get_wallet_balance(
    args: WalletIdArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = WalletsService::new(client);
    let response = service
        .get_wallet_balance(&portfolio_id, &args.wallet_id)
        .await
        .context("cannot get wallet balance")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn get_deposit_instructions(
    args: WalletIdArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = WalletsService::new(client);
    let response = service
        .get_wallet_deposit_instructions(&portfolio_id, &args.wallet_id)
        .await
        .context("cannot get wallet deposit instructions")?;

    print_json(&response, pretty)?;
    Ok(())
}

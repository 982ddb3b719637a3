//! Transaction commands: lookups, listings, and movement of funds.

use anyhow::Context;
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::common::{DateRangeArgs, PaginationArgs, PortfolioArg};
use crate::client::RestClient;
use crate::output::{print_json, print_json_docs};
use crate::pagination::{paginate, TerminalPrompt};
use crate::services::transactions::{
    BlockchainAddress, CreateConversionRequest, CreateTransferRequest, CreateWithdrawalRequest,
    ListTransactionsFilter, PaymentMethod, TransactionsService,
};
use crate::validation;

#[derive(Debug, Subcommand)]
pub enum TransactionsCommand {
    /// Get a transaction given a transaction ID
    Get(GetTransactionArgs),
    /// List portfolio transactions that meet filter criteria
    ListPortfolio(ListPortfolioTransactionsArgs),
    /// List transactions for a given wallet
    ListWallet(ListWalletTransactionsArgs),
    /// Convert between related currencies
    CreateConversion(CreateConversionArgs),
    /// Transfer funds between wallets in the same portfolio
    CreateTransfer(CreateTransferArgs),
    /// Create an external withdrawal
    CreateWithdrawal(CreateWithdrawalArgs),
}

#[derive(Debug, Args)]
pub struct GetTransactionArgs {
    /// Transaction ID (Required)
    #[arg(short = 'i', long = "transaction-id")]
    pub transaction_id: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct ListPortfolioTransactionsArgs {
    /// Asset symbols (Required)
    #[arg(short = 'y', long)]
    pub symbols: String,

    /// Types of transactions
    #[arg(short = 't', long, value_delimiter = ',')]
    pub types: Vec<String>,

    #[command(flatten)]
    pub date_range: DateRangeArgs,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct ListWalletTransactionsArgs {
    /// Wallet ID (Required)
    #[arg(short = 'i', long = "wallet-id")]
    pub wallet_id: String,

    /// Types of transactions
    #[arg(short = 't', long, value_delimiter = ',')]
    pub types: Vec<String>,

    #[command(flatten)]
    pub date_range: DateRangeArgs,

    #[command(flatten)]
    pub portfolio: PortfolioArg,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

#[derive(Debug, Args)]
pub struct CreateConversionArgs {
    /// ID of the source wallet (Required)
    #[arg(short = 'i', long = "source-wallet-id")]
    pub source_wallet_id: String,

    /// Symbol of the source wallet (Required)
    #[arg(short = 's', long = "source-symbol")]
    pub source_symbol: String,

    /// ID of the destination wallet (Required)
    #[arg(short = 'd', long = "destination-wallet-id")]
    pub destination_wallet_id: String,

    /// Symbol of the destination wallet (Required)
    #[arg(short = 'f', long = "destination-symbol")]
    pub destination_symbol: String,

    /// Conversion size (Required)
    #[arg(short = 'a', long)]
    pub amount: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct CreateTransferArgs {
    /// ID of the source wallet (Required)
    #[arg(short = 'i', long = "source-wallet-id")]
    pub source_wallet_id: String,

    /// Symbol of the currency (Required)
    #[arg(short = 's', long)]
    pub symbol: String,

    /// ID of the destination wallet (Required)
    #[arg(short = 'd', long = "destination-wallet-id")]
    pub destination_wallet_id: String,

    /// Amount to transfer (Required)
    #[arg(short = 'a', long)]
    pub amount: String,

    /// Idempotency key is a UUID; generated when not passed
    #[arg(long = "idempotency-key", default_value = "")]
    pub idempotency_key: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

#[derive(Debug, Args)]
pub struct CreateWithdrawalArgs {
    /// ID of the source wallet (Required)
    #[arg(long = "source-wallet-id")]
    pub source_wallet_id: String,

    /// Symbol of the currency (Required)
    #[arg(long)]
    pub symbol: String,

    /// Type of the destination (Required)
    #[arg(long = "destination-type")]
    pub destination_type: String,

    /// Amount to withdraw (Required)
    #[arg(long)]
    pub amount: String,

    /// ID of the payment method
    #[arg(long = "payment-method-id", default_value = "")]
    pub payment_method_id: String,

    /// Blockchain address
    #[arg(long = "blockchain-address", default_value = "")]
    pub blockchain_address: String,

    /// Account identifier
    #[arg(long = "account-identifier", default_value = "")]
    pub account_identifier: String,

    /// Idempotency key is a UUID; generated when not passed
    #[arg(long = "idempotency-key", default_value = "")]
    pub idempotency_key: String,

    #[command(flatten)]
    pub portfolio: PortfolioArg,
}

pub async fn run(
    command: TransactionsCommand,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    match command {
        TransactionsCommand::Get(args) => get_transaction(args, client, pretty).await,
        TransactionsCommand::ListPortfolio(args) => {
            list_portfolio_transactions(args, client, pretty).await
        }
        TransactionsCommand::ListWallet(args) => {
            list_wallet_transactions(args, client, pretty).await
        }
        TransactionsCommand::CreateConversion(args) => {
            create_conversion(args, client, pretty).await
        }
        TransactionsCommand::CreateTransfer(args) => create_transfer(args, client, pretty).await,
        TransactionsCommand::CreateWithdrawal(args) => {
            create_withdrawal(args, client, pretty).await
        }
    }
}

async fn get_transaction(
    args: GetTransactionArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let service = TransactionsService::new(client);
    let response = service
        .get_transaction(&portfolio_id, &args.transaction_id)
        .await
        .context("cannot get transaction")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn list_portfolio_transactions(
    args: ListPortfolioTransactionsArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let (start, end) = args.date_range.parse()?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let filter = ListTransactionsFilter {
        symbols: args.symbols,
        types: args.types,
        start,
        end,
    };

    let service = TransactionsService::new(client);
    let mut prompt = TerminalPrompt::new();

    let service = &service;
    let portfolio_id = &portfolio_id;
    let filter = &filter;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_portfolio_transactions(portfolio_id, filter, &page)
            .await
            .context("cannot list transactions")?;
        print_json_docs(&response.transactions, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn list_wallet_transactions(
    args: ListWalletTransactionsArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;
    let (start, end) = args.date_range.parse()?;
    let params = args.pagination.to_params()?;
    let options = args.pagination.list_options();

    let service = TransactionsService::new(client);
    let mut prompt = TerminalPrompt::new();
    let wallet_id = args.wallet_id;
    let types = args.types;

    let service = &service;
    let portfolio_id = &portfolio_id;
    let wallet_id = &wallet_id;
    let types = &types;
    paginate(options, params, &mut prompt, move |page| async move {
        let response = service
            .list_wallet_transactions(portfolio_id, wallet_id, types, start, end, &page)
            .await
            .context("cannot list wallet transactions")?;
        print_json_docs(&response.transactions, pretty)?;
        Ok(response.pagination.unwrap_or_default())
    })
    .await
}

async fn create_conversion(
    args: CreateConversionArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    validation::validate_uuid_flag("source-wallet-id", &args.source_wallet_id)?;
    validation::validate_uuid_flag("destination-wallet-id", &args.destination_wallet_id)?;

    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let request = CreateConversionRequest {
        source_symbol: args.source_symbol,
        destination: args.destination_wallet_id,
        destination_symbol: args.destination_symbol,
        idempotency_key: Uuid::new_v4().to_string(),
        amount: args.amount,
    };

    let service = TransactionsService::new(client);
    let response = service
        .create_conversion(&portfolio_id, &args.source_wallet_id, &request)
        .await
        .context("cannot create conversion")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn create_transfer(
    args: CreateTransferArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let idempotency_key = if args.idempotency_key.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        args.idempotency_key
    };

    let request = CreateTransferRequest {
        symbol: args.symbol,
        destination: args.destination_wallet_id,
        idempotency_key,
        amount: args.amount,
    };

    let service = TransactionsService::new(client);
    let response = service
        .create_transfer(&portfolio_id, &args.source_wallet_id, &request)
        .await
        .context("cannot create transfer")?;

    print_json(&response, pretty)?;
    Ok(())
}

async fn create_withdrawal(
    args: CreateWithdrawalArgs,
    client: &RestClient,
    pretty: bool,
) -> anyhow::Result<()> {
    let portfolio_id = client
        .credentials()
        .portfolio_id_or(args.portfolio.portfolio_id.as_deref())?;

    let idempotency_key = if args.idempotency_key.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        args.idempotency_key
    };

    let payment_method = if args.payment_method_id.is_empty() {
        None
    } else {
        Some(PaymentMethod {
            id: args.payment_method_id,
        })
    };

    let blockchain_address = if args.blockchain_address.is_empty() {
        None
    } else {
        Some(BlockchainAddress {
            address: args.blockchain_address,
            account_identifier: args.account_identifier,
        })
    };

    let request = CreateWithdrawalRequest {
        symbol: args.symbol,
        destination_type: args.destination_type,
        idempotency_key,
        amount: args.amount,
        payment_method,
        blockchain_address,
    };

    let service = TransactionsService::new(client);
    let response = service
        .create_withdrawal(&portfolio_id, &args.source_wallet_id, &request)
        .await
        .context("cannot create withdrawal")?;

    print_json(&response, pretty)?;
    Ok(())
}

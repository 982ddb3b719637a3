//! Transaction lookup, listing, and movement of funds (conversions,
//! transfers, withdrawals).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{push_param, push_repeated, push_time};
use crate::client::{ClientError, RestClient};
use crate::pagination::{Pagination, PaginationParams};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Transaction {
    pub id: String,
    pub wallet_id: String,
    pub portfolio_id: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub status: String,
    pub symbol: String,
    pub amount: String,
    pub created_at: String,
    pub completed_at: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetTransactionResponse {
    pub transaction: Transaction,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListTransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateConversionRequest {
    pub source_symbol: String,
    pub destination: String,
    pub destination_symbol: String,
    pub idempotency_key: String,
    pub amount: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateConversionResponse {
    pub activity_id: String,
    pub source_symbol: String,
    pub destination_symbol: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTransferRequest {
    pub symbol: String,
    pub destination: String,
    pub idempotency_key: String,
    pub amount: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateTransferResponse {
    pub activity_id: String,
    pub symbol: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethod {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockchainAddress {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub account_identifier: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWithdrawalRequest {
    pub symbol: String,
    pub destination_type: String,
    pub idempotency_key: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_address: Option<BlockchainAddress>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateWithdrawalResponse {
    pub activity_id: String,
    pub approval_url: String,
    pub symbol: String,
    pub amount: String,
    pub destination_address: String,
}

/// Server-side filters for portfolio transaction listings.
#[derive(Debug, Clone, Default)]
pub struct ListTransactionsFilter {
    pub symbols: String,
    pub types: Vec<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

pub struct TransactionsService<'a> {
    client: &'a RestClient,
}

impl<'a> TransactionsService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn get_transaction(
        &self,
        portfolio_id: &str,
        transaction_id: &str,
    ) -> Result<GetTransactionResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/transactions/{transaction_id}"),
                &[],
            )
            .await
    }

    pub async fn list_portfolio_transactions(
        &self,
        portfolio_id: &str,
        filter: &ListTransactionsFilter,
        pagination: &PaginationParams,
    ) -> Result<ListTransactionsResponse, ClientError> {
        let mut query = pagination.to_query();
        push_param(&mut query, "symbols", &filter.symbols);
        push_repeated(&mut query, "types", &filter.types);
        push_time(&mut query, "start_time", filter.start);
        push_time(&mut query, "end_time", filter.end);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/transactions"), &query)
            .await
    }

    pub async fn list_wallet_transactions(
        &self,
        portfolio_id: &str,
        wallet_id: &str,
        types: &[String],
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        pagination: &PaginationParams,
    ) -> Result<ListTransactionsResponse, ClientError> {
        let mut query = pagination.to_query();
        push_repeated(&mut query, "types", types);
        push_time(&mut query, "start_time", start);
        push_time(&mut query, "end_time", end);

        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{wallet_id}/transactions"),
                &query,
            )
            .await
    }

    pub async fn create_conversion(
        &self,
        portfolio_id: &str,
        source_wallet_id: &str,
        request: &CreateConversionRequest,
    ) -> Result<CreateConversionResponse, ClientError> {
        self.client
            .post(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{source_wallet_id}/conversion"),
                request,
            )
            .await
    }

    pub async fn create_transfer(
        &self,
        portfolio_id: &str,
        source_wallet_id: &str,
        request: &CreateTransferRequest,
    ) -> Result<CreateTransferResponse, ClientError> {
        self.client
            .post(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{source_wallet_id}/transfers"),
                request,
            )
            .await
    }

    pub async fn create_withdrawal(
        &self,
        portfolio_id: &str,
        source_wallet_id: &str,
        request: &CreateWithdrawalRequest,
    ) -> Result<CreateWithdrawalResponse, ClientError> {
        self.client
            .post(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{source_wallet_id}/withdrawals"),
                request,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::client::test_credentials;

    #[tokio::test]
    async fn list_portfolio_transactions_sends_time_window() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/portfolios/pid/transactions")
                .query_param("symbols", "BTC")
                .query_param_exists("start_time");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "transactions": [{"id": "t1", "symbol": "BTC", "status": "DONE"}],
                    "pagination": {"next_cursor": ""}
                }));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = TransactionsService::new(&client);
        let filter = ListTransactionsFilter {
            symbols: "BTC".to_owned(),
            start: Some(chrono::Utc::now()),
            ..ListTransactionsFilter::default()
        };
        let pagination = PaginationParams::from_flags("25", "").unwrap();

        let response = service
            .list_portfolio_transactions("pid", &filter, &pagination)
            .await
            .unwrap();

        assert_eq!(response.transactions[0].id, "t1");
        mock.assert();
    }

    #[tokio::test]
    async fn create_withdrawal_carries_destination_details() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/portfolios/pid/wallets/w1/withdrawals")
                .json_body(json!({
                    "symbol": "ETH",
                    "destination_type": "DESTINATION_BLOCKCHAIN",
                    "idempotency_key": "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d",
                    "amount": "0.5",
                    "blockchain_address": {"address": "0xabc"}
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"activity_id": "act-9"}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = TransactionsService::new(&client);
        let request = CreateWithdrawalRequest {
            symbol: "ETH".to_owned(),
            destination_type: "DESTINATION_BLOCKCHAIN".to_owned(),
            idempotency_key: "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d".to_owned(),
            amount: "0.5".to_owned(),
            blockchain_address: Some(BlockchainAddress {
                address: "0xabc".to_owned(),
                account_identifier: String::new(),
            }),
            ..CreateWithdrawalRequest::default()
        };

        let response = service.create_withdrawal("pid", "w1", &request).await.unwrap();

        assert_eq!(response.activity_id, "act-9");
        mock.assert();
    }
}

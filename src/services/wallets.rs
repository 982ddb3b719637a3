//! Wallet creation, lookup, balances, and deposit instructions.

use serde::{Deserialize, Serialize};

use super::{push_param, push_repeated};
use crate::client::{ClientError, RestClient};
use crate::pagination::{Pagination, PaginationParams};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub wallet_type: String,
    pub address: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDetails {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub network_type: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWalletRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub wallet_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub symbol: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkDetails>,
    pub idempotency_key: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateWalletResponse {
    pub activity_id: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub wallet_type: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetWalletResponse {
    pub wallet: Wallet,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListWalletsResponse {
    pub wallets: Vec<Wallet>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletBalance {
    pub symbol: String,
    pub amount: String,
    pub holds: String,
    pub bonded_amount: String,
    pub unbonded_amount: String,
    pub withdrawable_amount: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetWalletBalanceResponse {
    pub balance: WalletBalance,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DepositInstructions {
    pub id: String,
    pub name: String,
    pub address: String,
    pub account_identifier: String,
    #[serde(rename = "type")]
    pub instruction_type: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetWalletDepositInstructionsResponse {
    pub deposit_instructions: DepositInstructions,
}

pub struct WalletsService<'a> {
    client: &'a RestClient,
}

impl<'a> WalletsService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn create_wallet(
        &self,
        portfolio_id: &str,
        request: &CreateWalletRequest,
    ) -> Result<CreateWalletResponse, ClientError> {
        self.client
            .post(&format!("/v1/portfolios/{portfolio_id}/wallets"), request)
            .await
    }

    pub async fn get_wallet(
        &self,
        portfolio_id: &str,
        wallet_id: &str,
    ) -> Result<GetWalletResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{wallet_id}"),
                &[],
            )
            .await
    }

    pub async fn list_wallets(
        &self,
        portfolio_id: &str,
        wallet_type: &str,
        symbols: &[String],
        pagination: &PaginationParams,
    ) -> Result<ListWalletsResponse, ClientError> {
        let mut query = pagination.to_query();
        push_param(&mut query, "type", wallet_type);
        push_repeated(&mut query, "symbols", symbols);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/wallets"), &query)
            .await
    }

    pub async fn get_wallet_balance(
        &self,
        portfolio_id: &str,
        wallet_id: &str,
    ) -> Result<GetWalletBalanceResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{wallet_id}/balance"),
                &[],
            )
            .await
    }

    pub async fn get_wallet_deposit_instructions(
        &self,
        portfolio_id: &str,
        wallet_id: &str,
    ) -> Result<GetWalletDepositInstructionsResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{wallet_id}/deposit_instructions"),
                &[],
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
    async fn create_wallet_skips_absent_network_details() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/portfolios/pid/wallets").json_body(json!({
                "name": "cold-btc",
                "type": "VAULT",
                "symbol": "BTC",
                "idempotency_key": "2f9a1de2-54c1-4b10-8f0a-6a1f0a9b3c77"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"activity_id": "act-1", "name": "cold-btc"}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = WalletsService::new(&client);
        let request = CreateWalletRequest {
            name: "cold-btc".to_owned(),
            wallet_type: "VAULT".to_owned(),
            symbol: "BTC".to_owned(),
            idempotency_key: "2f9a1de2-54c1-4b10-8f0a-6a1f0a9b3c77".to_owned(),
            ..CreateWalletRequest::default()
        };

        let response = service.create_wallet("pid", &request).await.unwrap();

        assert_eq!(response.activity_id, "act-1");
        mock.assert();
    }

    #[tokio::test]
    async fn list_wallets_passes_type_and_symbols() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/portfolios/pid/wallets")
                .query_param("type", "VAULT")
                .query_param("symbols", "BTC");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "wallets": [{"id": "w1", "symbol": "BTC", "type": "VAULT"}],
                    "pagination": {"next_cursor": ""}
                }));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = WalletsService::new(&client);
        let pagination = PaginationParams::from_flags("25", "").unwrap();

        let response = service
            .list_wallets("pid", "VAULT", &["BTC".to_owned()], &pagination)
            .await
            .unwrap();

        assert_eq!(response.wallets.len(), 1);
        assert!(response.pagination.unwrap().next_cursor.is_empty());
        mock.assert();
    }
}

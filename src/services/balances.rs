//! Portfolio and onchain wallet balances.

use serde::{Deserialize, Serialize};

use super::{push_param, push_repeated};
use crate::client::{ClientError, RestClient};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Balance {
    pub symbol: String,
    pub amount: String,
    pub holds: String,
    pub bonded_amount: String,
    pub unbonded_amount: String,
    pub withdrawable_amount: String,
    pub fiat_amount: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BalanceSummary {
    pub total_balance: String,
    pub total_holds: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListPortfolioBalancesResponse {
    pub balances: Vec<Balance>,
    #[serde(rename = "type")]
    pub balance_type: String,
    pub trading_balances: BalanceSummary,
    pub vault_balances: BalanceSummary,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListOnchainWalletBalancesResponse {
    pub balances: Vec<Balance>,
}

pub struct BalancesService<'a> {
    client: &'a RestClient,
}

impl<'a> BalancesService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn list_portfolio_balances(
        &self,
        portfolio_id: &str,
        balance_type: &str,
        symbols: &[String],
    ) -> Result<ListPortfolioBalancesResponse, ClientError> {
        let mut query = Vec::new();
        push_param(&mut query, "balance_type", balance_type);
        push_repeated(&mut query, "symbols", symbols);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/balances"), &query)
            .await
    }

    pub async fn list_onchain_wallet_balances(
        &self,
        portfolio_id: &str,
        wallet_id: &str,
    ) -> Result<ListOnchainWalletBalancesResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{wallet_id}/web3_balances"),
                &[],
            )
            .await
    }
}

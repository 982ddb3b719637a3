//! Portfolio lookup and listing.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, RestClient};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub entity_id: String,
    pub organization_id: String,
    pub entity_name: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListPortfoliosResponse {
    pub portfolios: Vec<Portfolio>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetPortfolioResponse {
    pub portfolio: Portfolio,
}

pub struct PortfoliosService<'a> {
    client: &'a RestClient,
}

impl<'a> PortfoliosService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// The endpoint returns every portfolio visible to the API key in one
    /// response; callers window the result locally.
    pub async fn list_portfolios(&self) -> Result<ListPortfoliosResponse, ClientError> {
        self.client.get("/v1/portfolios", &[]).await
    }

    pub async fn get_portfolio(
        &self,
        portfolio_id: &str,
    ) -> Result<GetPortfolioResponse, ClientError> {
        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}"), &[])
            .await
    }
}

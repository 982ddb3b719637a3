//! Entity asset catalog.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, RestClient};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Asset {
    pub name: String,
    pub symbol: String,
    pub decimal_precision: String,
    pub trading_supported: bool,
    pub explorer_url: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListAssetsResponse {
    pub assets: Vec<Asset>,
}

pub struct AssetsService<'a> {
    client: &'a RestClient,
}

impl<'a> AssetsService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Returns the full asset catalog in one response; callers window the
    /// result locally.
    pub async fn list_assets(&self, entity_id: &str) -> Result<ListAssetsResponse, ClientError> {
        self.client
            .get(&format!("/v1/entities/{entity_id}/assets"), &[])
            .await
    }
}

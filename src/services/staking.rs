//! Staking: delegate wallet funds to a validator.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, RestClient};

#[derive(Debug, Clone, Default, Serialize)]
pub struct StakeInputs {
    pub amount: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateStakeRequest {
    pub idempotency_key: String,
    /// Omitted inputs stake the maximum amount available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<StakeInputs>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateStakeResponse {
    pub activity_id: String,
}

pub struct StakingService<'a> {
    client: &'a RestClient,
}

impl<'a> StakingService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn create_stake(
        &self,
        portfolio_id: &str,
        wallet_id: &str,
        request: &CreateStakeRequest,
    ) -> Result<CreateStakeResponse, ClientError> {
        self.client
            .post(
                &format!("/v1/portfolios/{portfolio_id}/wallets/{wallet_id}/staking/initiate"),
                request,
            )
            .await
    }
}

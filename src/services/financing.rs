//! Margin and short-financing operations: margin information, withdrawal
//! power, locates, interest accruals, and margin conversions.

use serde::{Deserialize, Serialize};

use super::{push_param, push_repeated};
use crate::client::{ClientError, RestClient};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MarginInformation {
    pub margin_call_records: Vec<serde_json::Value>,
    pub margin_summary: serde_json::Value,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetMarginInformationResponse {
    pub margin_information: MarginInformation,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetWithdrawalPowerResponse {
    pub symbol: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateLocateRequest {
    pub symbol: String,
    pub amount: String,
    pub locate_date: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateLocateResponse {
    pub locate_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Locate {
    pub id: String,
    pub entity_id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub requested_amount: String,
    pub approved_amount: String,
    pub status: String,
    pub locate_date: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListLocatesResponse {
    pub locates: Vec<Locate>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListInterestAccrualsResponse {
    pub accruals: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListMarginCallSummariesResponse {
    pub margin_call_summaries: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListMarginConversionsResponse {
    pub conversions: Vec<serde_json::Value>,
}

pub struct FinancingService<'a> {
    client: &'a RestClient,
}

impl<'a> FinancingService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn get_margin_information(
        &self,
        entity_id: &str,
    ) -> Result<GetMarginInformationResponse, ClientError> {
        self.client
            .get(&format!("/v1/entities/{entity_id}/margin"), &[])
            .await
    }

    pub async fn get_withdrawal_power(
        &self,
        portfolio_id: &str,
        symbol: &str,
    ) -> Result<GetWithdrawalPowerResponse, ClientError> {
        let mut query = Vec::new();
        push_param(&mut query, "symbol", symbol);

        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/withdrawal_power"),
                &query,
            )
            .await
    }

    pub async fn create_locate(
        &self,
        portfolio_id: &str,
        request: &CreateLocateRequest,
    ) -> Result<CreateLocateResponse, ClientError> {
        self.client
            .post(&format!("/v1/portfolios/{portfolio_id}/locates"), request)
            .await
    }

    pub async fn list_locates(
        &self,
        portfolio_id: &str,
        locate_date: &str,
        locate_ids: &[String],
    ) -> Result<ListLocatesResponse, ClientError> {
        let mut query = Vec::new();
        push_param(&mut query, "locate_date", locate_date);
        push_repeated(&mut query, "locate_ids", locate_ids);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/locates"), &query)
            .await
    }

    pub async fn list_interest_accruals(
        &self,
        entity_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<ListInterestAccrualsResponse, ClientError> {
        let mut query = Vec::new();
        push_param(&mut query, "start_date", start_date);
        push_param(&mut query, "end_date", end_date);

        self.client
            .get(&format!("/v1/entities/{entity_id}/accruals"), &query)
            .await
    }

    pub async fn list_margin_call_summaries(
        &self,
        entity_id: &str,
    ) -> Result<ListMarginCallSummariesResponse, ClientError> {
        self.client
            .get(&format!("/v1/entities/{entity_id}/margin_summaries"), &[])
            .await
    }

    pub async fn list_margin_conversions(
        &self,
        portfolio_id: &str,
    ) -> Result<ListMarginConversionsResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/margin_conversions"),
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
    async fn list_locates_filters_by_date_and_ids() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/portfolios/pid/locates")
                .query_param("locate_date", "2026-08-07")
                .query_param("locate_ids", "l1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "locates": [{"id": "l1", "symbol": "GME", "status": "APPROVED"}]
                }));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = FinancingService::new(&client);

        let response = service
            .list_locates("pid", "2026-08-07", &["l1".to_owned()])
            .await
            .unwrap();

        assert_eq!(response.locates[0].status, "APPROVED");
        mock.assert();
    }
}

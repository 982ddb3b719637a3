//! Portfolio allocations: creating allocations of executed orders across
//! destination portfolios, plus lookups and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{push_param, push_repeated, push_time};
use crate::client::{ClientError, RestClient};
use crate::pagination::{Pagination, PaginationParams};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationLeg {
    pub allocation_leg_id: String,
    pub destination_portfolio_id: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Allocation {
    pub root_id: String,
    pub reversal_id: String,
    pub allocation_completed_at: String,
    pub user_id: String,
    pub product_id: String,
    pub side: String,
    pub average_price: String,
    pub base_quantity: String,
    pub quote_value: String,
    pub fees_allocated: String,
    pub status: String,
    pub source: String,
    pub order_ids: Vec<String>,
    pub destinations: Vec<AllocationLeg>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAllocationRequest {
    pub allocation_id: String,
    pub source_portfolio_id: String,
    pub product_id: String,
    pub order_ids: Vec<String>,
    pub allocation_legs: Vec<AllocationLeg>,
    pub size_type: String,
    pub remainder_destination_portfolio: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateAllocationResponse {
    pub success: bool,
    pub allocation_id: String,
    pub failure_reason: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetAllocationResponse {
    pub allocation: Allocation,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetNetAllocationResponse {
    pub allocations: Vec<Allocation>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListAllocationsResponse {
    pub allocations: Vec<Allocation>,
    pub pagination: Option<Pagination>,
}

/// Server-side filters for allocation listings.
#[derive(Debug, Clone, Default)]
pub struct ListAllocationsFilter {
    pub product_ids: Vec<String>,
    pub side: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

pub struct AllocationsService<'a> {
    client: &'a RestClient,
}

impl<'a> AllocationsService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn create_allocation(
        &self,
        request: &CreateAllocationRequest,
    ) -> Result<CreateAllocationResponse, ClientError> {
        self.client.post("/v1/allocations", request).await
    }

    pub async fn get_allocation(
        &self,
        portfolio_id: &str,
        allocation_id: &str,
    ) -> Result<GetAllocationResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/allocations/{allocation_id}"),
                &[],
            )
            .await
    }

    /// Net allocations share a netting ID across the buy and sell sides.
    pub async fn get_net_allocation(
        &self,
        portfolio_id: &str,
        netting_id: &str,
    ) -> Result<GetNetAllocationResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/allocations/net/{netting_id}"),
                &[],
            )
            .await
    }

    pub async fn list_allocations(
        &self,
        portfolio_id: &str,
        filter: &ListAllocationsFilter,
        pagination: &PaginationParams,
    ) -> Result<ListAllocationsResponse, ClientError> {
        let mut query = pagination.to_query();
        push_repeated(&mut query, "product_ids", &filter.product_ids);
        push_param(&mut query, "side", &filter.side);
        push_time(&mut query, "start_date", filter.start);
        push_time(&mut query, "end_date", filter.end);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/allocations"), &query)
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
    async fn create_allocation_serializes_legs() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/allocations").json_body(json!({
                "allocation_id": "a1",
                "source_portfolio_id": "src",
                "product_id": "BTC-USD",
                "order_ids": ["o1"],
                "allocation_legs": [
                    {
                        "allocation_leg_id": "leg1",
                        "destination_portfolio_id": "dst",
                        "amount": "1.5"
                    }
                ],
                "size_type": "BASE",
                "remainder_destination_portfolio": "rem"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"success": true, "allocation_id": "a1"}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = AllocationsService::new(&client);
        let request = CreateAllocationRequest {
            allocation_id: "a1".to_owned(),
            source_portfolio_id: "src".to_owned(),
            product_id: "BTC-USD".to_owned(),
            order_ids: vec!["o1".to_owned()],
            allocation_legs: vec![AllocationLeg {
                allocation_leg_id: "leg1".to_owned(),
                destination_portfolio_id: "dst".to_owned(),
                amount: "1.5".to_owned(),
            }],
            size_type: "BASE".to_owned(),
            remainder_destination_portfolio: "rem".to_owned(),
        };

        let response = service.create_allocation(&request).await.unwrap();

        assert!(response.success);
        mock.assert();
    }
}

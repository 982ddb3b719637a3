//! Order submission, quotes, and order listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{push_param, push_repeated, push_time, EmptyBody};
use crate::client::{ClientError, RestClient};
use crate::pagination::{Pagination, PaginationParams};

/// Order fields as the API speaks them. Quantities and prices travel as
/// decimal strings; empty fields are omitted from request bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub portfolio_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub side: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_order_id: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub order_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_quantity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub quote_value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub limit_price: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expiry_time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_in_force: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filled_quantity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub average_filled_price: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateOrderResponse {
    pub order_id: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderPreviewResponse {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub commission: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slippage: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub best_bid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub best_ask: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order_total: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetOrderResponse {
    pub order: Order,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListOrdersResponse {
    pub orders: Vec<Order>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CancelOrderResponse {
    pub order_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Fill {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub side: String,
    pub filled_quantity: String,
    pub filled_value: String,
    pub price: String,
    pub venue: String,
    pub commission: String,
    pub time: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListOrderFillsResponse {
    pub fills: Vec<Fill>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateQuoteRequest {
    pub product_id: String,
    pub client_quote_id: String,
    pub side: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_quantity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub quote_value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub limit_price: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub settle_currency: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateQuoteResponse {
    pub quote_id: String,
    pub best_price: String,
    pub order_total: String,
    pub expiration_time: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AcceptQuoteRequest {
    pub product_id: String,
    pub quote_id: String,
    pub client_order_id: String,
    pub side: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AcceptQuoteResponse {
    pub order_id: String,
}

/// Server-side filters for order listings.
#[derive(Debug, Clone, Default)]
pub struct ListOrdersFilter {
    pub statuses: Vec<String>,
    pub product_ids: Vec<String>,
    pub order_type: String,
    pub order_side: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

pub struct OrdersService<'a> {
    client: &'a RestClient,
}

impl<'a> OrdersService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn create_order(
        &self,
        portfolio_id: &str,
        order: &Order,
    ) -> Result<CreateOrderResponse, ClientError> {
        self.client
            .post(&format!("/v1/portfolios/{portfolio_id}/order"), order)
            .await
    }

    pub async fn preview_order(
        &self,
        portfolio_id: &str,
        order: &Order,
    ) -> Result<OrderPreviewResponse, ClientError> {
        self.client
            .post(&format!("/v1/portfolios/{portfolio_id}/order_preview"), order)
            .await
    }

    pub async fn get_order(
        &self,
        portfolio_id: &str,
        order_id: &str,
    ) -> Result<GetOrderResponse, ClientError> {
        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/orders/{order_id}"), &[])
            .await
    }

    pub async fn get_order_fills(
        &self,
        portfolio_id: &str,
        order_id: &str,
        pagination: &PaginationParams,
    ) -> Result<ListOrderFillsResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/orders/{order_id}/fills"),
                &pagination.to_query(),
            )
            .await
    }

    pub async fn list_orders(
        &self,
        portfolio_id: &str,
        filter: &ListOrdersFilter,
        pagination: &PaginationParams,
    ) -> Result<ListOrdersResponse, ClientError> {
        let mut query = pagination.to_query();
        push_repeated(&mut query, "order_statuses", &filter.statuses);
        push_repeated(&mut query, "product_ids", &filter.product_ids);
        push_param(&mut query, "order_type", &filter.order_type);
        push_param(&mut query, "order_side", &filter.order_side);
        push_time(&mut query, "start_date", filter.start);
        push_time(&mut query, "end_date", filter.end);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/orders"), &query)
            .await
    }

    pub async fn list_open_orders(
        &self,
        portfolio_id: &str,
        filter: &ListOrdersFilter,
        pagination: &PaginationParams,
    ) -> Result<ListOrdersResponse, ClientError> {
        let mut query = pagination.to_query();
        push_repeated(&mut query, "product_ids", &filter.product_ids);
        push_param(&mut query, "order_type", &filter.order_type);
        push_param(&mut query, "order_side", &filter.order_side);
        push_time(&mut query, "start_date", filter.start);
        push_time(&mut query, "end_date", filter.end);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/open_orders"), &query)
            .await
    }

    pub async fn cancel_order(
        &self,
        portfolio_id: &str,
        order_id: &str,
    ) -> Result<CancelOrderResponse, ClientError> {
        self.client
            .post(
                &format!("/v1/portfolios/{portfolio_id}/orders/{order_id}/cancel"),
                &EmptyBody {},
            )
            .await
    }

    pub async fn create_quote(
        &self,
        portfolio_id: &str,
        request: &CreateQuoteRequest,
    ) -> Result<CreateQuoteResponse, ClientError> {
        self.client
            .post(&format!("/v1/portfolios/{portfolio_id}/rfq"), request)
            .await
    }

    pub async fn accept_quote(
        &self,
        portfolio_id: &str,
        request: &AcceptQuoteRequest,
    ) -> Result<AcceptQuoteResponse, ClientError> {
        self.client
            .post(&format!("/v1/portfolios/{portfolio_id}/accept_quote"), request)
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
    async fn list_orders_sends_filters_and_decodes_pagination() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/portfolios/pid/orders")
                .query_param("limit", "25")
                .query_param("order_type", "LIMIT")
                .query_param("order_statuses", "FILLED");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "orders": [
                        {"id": "o1", "side": "BUY", "type": "LIMIT", "status": "FILLED"}
                    ],
                    "pagination": {"next_cursor": "c2", "has_next": true}
                }));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = OrdersService::new(&client);
        let filter = ListOrdersFilter {
            statuses: vec!["FILLED".to_owned()],
            order_type: "LIMIT".to_owned(),
            ..ListOrdersFilter::default()
        };
        let pagination = PaginationParams::from_flags("25", "").unwrap();

        let response = service.list_orders("pid", &filter, &pagination).await.unwrap();

        assert_eq!(response.orders.len(), 1);
        assert_eq!(response.orders[0].order_type, "LIMIT");
        assert_eq!(response.pagination.unwrap().next_cursor, "c2");
        mock.assert();
    }

    #[tokio::test]
    async fn create_order_omits_empty_fields_from_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/portfolios/pid/order").json_body(json!({
                "portfolio_id": "pid",
                "product_id": "BTC-USD",
                "side": "BUY",
                "client_order_id": "6f54a0e2-9c2b-4bd4-9e61-1b3a87b9a6cf",
                "type": "MARKET",
                "base_quantity": "1"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"order_id": "new-order"}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = OrdersService::new(&client);
        let order = Order {
            portfolio_id: "pid".to_owned(),
            product_id: "BTC-USD".to_owned(),
            side: "BUY".to_owned(),
            client_order_id: "6f54a0e2-9c2b-4bd4-9e61-1b3a87b9a6cf".to_owned(),
            order_type: "MARKET".to_owned(),
            base_quantity: "1".to_owned(),
            ..Order::default()
        };

        let response = service.create_order("pid", &order).await.unwrap();

        assert_eq!(response.order_id, "new-order");
        mock.assert();
    }

    #[tokio::test]
    async fn cancel_order_posts_to_cancel_endpoint() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/portfolios/pid/orders/o1/cancel");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"order_id": "o1"}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = OrdersService::new(&client);

        let response = service.cancel_order("pid", "o1").await.unwrap();

        assert_eq!(response.order_id, "o1");
        mock.assert();
    }
}

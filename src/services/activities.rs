//! Activity feed: audit records for portfolio and entity operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{push_repeated, push_time};
use crate::client::{ClientError, RestClient};
use crate::pagination::{Pagination, PaginationParams};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Activity {
    pub id: String,
    pub reference_id: String,
    pub category: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub status: String,
    pub created_by: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetActivityResponse {
    pub activity: Activity,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListActivitiesResponse {
    pub activities: Vec<Activity>,
    pub pagination: Option<Pagination>,
}

/// Server-side filters shared by the portfolio and entity activity feeds.
#[derive(Debug, Clone, Default)]
pub struct ListActivitiesFilter {
    pub symbols: Vec<String>,
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ListActivitiesFilter {
    fn apply(&self, query: &mut Vec<(String, String)>) {
        push_repeated(query, "symbols", &self.symbols);
        push_repeated(query, "categories", &self.categories);
        push_repeated(query, "statuses", &self.statuses);
        push_time(query, "start_time", self.start);
        push_time(query, "end_time", self.end);
    }
}

pub struct ActivitiesService<'a> {
    client: &'a RestClient,
}

impl<'a> ActivitiesService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn get_activity(&self, activity_id: &str) -> Result<GetActivityResponse, ClientError> {
        self.client
            .get(&format!("/v1/activities/{activity_id}"), &[])
            .await
    }

    pub async fn list_activities(
        &self,
        portfolio_id: &str,
        filter: &ListActivitiesFilter,
        pagination: &PaginationParams,
    ) -> Result<ListActivitiesResponse, ClientError> {
        let mut query = pagination.to_query();
        filter.apply(&mut query);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/activities"), &query)
            .await
    }

    pub async fn list_entity_activities(
        &self,
        entity_id: &str,
        filter: &ListActivitiesFilter,
        pagination: &PaginationParams,
    ) -> Result<ListActivitiesResponse, ClientError> {
        let mut query = pagination.to_query();
        filter.apply(&mut query);

        self.client
            .get(&format!("/v1/entities/{entity_id}/activities"), &query)
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
    async fn list_activities_sends_repeated_category_filter() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/portfolios/pid/activities")
                .query_param("categories", "ACTIVITY_CATEGORY_ORDER");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "activities": [{"id": "a1", "category": "ACTIVITY_CATEGORY_ORDER"}],
                    "pagination": {"next_cursor": "n1"}
                }));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let service = ActivitiesService::new(&client);
        let filter = ListActivitiesFilter {
            categories: vec!["ACTIVITY_CATEGORY_ORDER".to_owned()],
            ..ListActivitiesFilter::default()
        };
        let pagination = PaginationParams::from_flags("25", "").unwrap();

        let response = service
            .list_activities("pid", &filter, &pagination)
            .await
            .unwrap();

        assert_eq!(response.activities[0].id, "a1");
        assert_eq!(response.pagination.unwrap().next_cursor, "n1");
        mock.assert();
    }
}

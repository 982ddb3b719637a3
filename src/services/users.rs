//! Portfolio and entity user listings.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, RestClient};
use crate::pagination::{Pagination, PaginationParams};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub portfolio_id: String,
    pub entity_id: String,
    pub role: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub pagination: Option<Pagination>,
}

pub struct UsersService<'a> {
    client: &'a RestClient,
}

impl<'a> UsersService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn list_portfolio_users(
        &self,
        portfolio_id: &str,
        pagination: &PaginationParams,
    ) -> Result<ListUsersResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/portfolios/{portfolio_id}/users"),
                &pagination.to_query(),
            )
            .await
    }

    pub async fn list_entity_users(
        &self,
        entity_id: &str,
        pagination: &PaginationParams,
    ) -> Result<ListUsersResponse, ClientError> {
        self.client
            .get(
                &format!("/v1/entities/{entity_id}/users"),
                &pagination.to_query(),
            )
            .await
    }
}

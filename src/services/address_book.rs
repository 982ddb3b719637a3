//! Curated withdrawal address book.

use serde::{Deserialize, Serialize};

use super::push_param;
use crate::client::{ClientError, RestClient};
use crate::pagination::{Pagination, PaginationParams};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AddressBookEntry {
    pub id: String,
    pub currency_symbol: String,
    pub name: String,
    pub address: String,
    pub account_identifier: String,
    pub state: String,
    pub explorer_link: String,
    pub added_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAddressBookEntryRequest {
    pub address: String,
    pub currency_symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub account_identifier: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateAddressBookEntryResponse {
    pub activity_type: String,
    pub num_approvals_remaining: i32,
    pub activity_id: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListAddressBookResponse {
    pub addresses: Vec<AddressBookEntry>,
    pub pagination: Option<Pagination>,
}

pub struct AddressBookService<'a> {
    client: &'a RestClient,
}

impl<'a> AddressBookService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn create_address_book_entry(
        &self,
        portfolio_id: &str,
        request: &CreateAddressBookEntryRequest,
    ) -> Result<CreateAddressBookEntryResponse, ClientError> {
        self.client
            .post(&format!("/v1/portfolios/{portfolio_id}/address_book"), request)
            .await
    }

    pub async fn list_address_book(
        &self,
        portfolio_id: &str,
        currency_symbol: &str,
        search: &str,
        pagination: &PaginationParams,
    ) -> Result<ListAddressBookResponse, ClientError> {
        let mut query = pagination.to_query();
        push_param(&mut query, "currency_symbol", currency_symbol);
        push_param(&mut query, "search", search);

        self.client
            .get(&format!("/v1/portfolios/{portfolio_id}/address_book"), &query)
            .await
    }
}

//! One service per API domain, each a thin struct over [`RestClient`]
//! exposing a method per operation. Request and response models live next to
//! the service that owns them.
//!
//! [`RestClient`]: crate::client::RestClient

pub mod activities;
pub mod address_book;
pub mod allocations;
pub mod assets;
pub mod balances;
pub mod financing;
pub mod onchain_address_book;
pub mod orders;
pub mod portfolios;
pub mod staking;
pub mod transactions;
pub mod users;
pub mod wallets;

use chrono::{DateTime, Utc};

pub(crate) fn push_param(query: &mut Vec<(String, String)>, name: &str, value: &str) {
    if !value.is_empty() {
        query.push((name.to_owned(), value.to_owned()));
    }
}

pub(crate) fn push_repeated(query: &mut Vec<(String, String)>, name: &str, values: &[String]) {
    for value in values {
        push_param(query, name, value);
    }
}

pub(crate) fn push_time(query: &mut Vec<(String, String)>, name: &str, value: Option<DateTime<Utc>>) {
    if let Some(value) = value {
        query.push((name.to_owned(), value.to_rfc3339()));
    }
}

/// Body for POST endpoints that take no payload.
#[derive(serde::Serialize)]
pub(crate) struct EmptyBody {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_param_skips_empty_values() {
        let mut query = Vec::new();

        push_param(&mut query, "symbol", "");
        push_param(&mut query, "symbol", "BTC-USD");

        assert_eq!(query, vec![("symbol".to_owned(), "BTC-USD".to_owned())]);
    }

    #[test]
    fn push_repeated_emits_one_pair_per_value() {
        let mut query = Vec::new();

        push_repeated(
            &mut query,
            "product_ids",
            &["BTC-USD".to_owned(), "ETH-USD".to_owned()],
        );

        assert_eq!(query.len(), 2);
        assert_eq!(query[0].0, "product_ids");
        assert_eq!(query[1].1, "ETH-USD");
    }
}

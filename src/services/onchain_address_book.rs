//! Onchain address groups: named sets of blockchain addresses scoped to a
//! network type.

use serde::{Deserialize, Serialize};

use crate::client::{ClientError, RestClient};
use crate::validation::ValidationError;

/// Recognized network type tokens for onchain address groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnchainNetworkType {
    #[serde(rename = "NETWORK_TYPE_EVM")]
    Evm,
    #[serde(rename = "NETWORK_TYPE_SOLANA")]
    Solana,
    #[serde(rename = "NETWORK_TYPE_UNSPECIFIED")]
    Unspecified,
}

impl OnchainNetworkType {
    /// Maps the flag token to the enum, rejecting anything unrecognized.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        match token {
            "NETWORK_TYPE_EVM" => Ok(Self::Evm),
            "NETWORK_TYPE_SOLANA" => Ok(Self::Solana),
            "NETWORK_TYPE_UNSPECIFIED" => Ok(Self::Unspecified),
            _ => Err(ValidationError::InvalidNetworkType(token.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OnchainAddress {
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnchainAddressGroup {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub network_type: OnchainNetworkType,
    pub addresses: Vec<OnchainAddress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpsertAddressGroupRequest {
    pub address_group: OnchainAddressGroup,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpsertAddressGroupResponse {
    pub activity_id: String,
    pub address_group_id: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeleteAddressGroupResponse {
    pub activity_id: String,
}

pub struct OnchainAddressBookService<'a> {
    client: &'a RestClient,
}

impl<'a> OnchainAddressBookService<'a> {
    pub fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    pub async fn create_address_group(
        &self,
        portfolio_id: &str,
        request: &UpsertAddressGroupRequest,
    ) -> Result<UpsertAddressGroupResponse, ClientError> {
        self.client
            .post(
                &format!("/v1/portfolios/{portfolio_id}/onchain_address_groups"),
                request,
            )
            .await
    }

    pub async fn update_address_group(
        &self,
        portfolio_id: &str,
        request: &UpsertAddressGroupRequest,
    ) -> Result<UpsertAddressGroupResponse, ClientError> {
        self.client
            .put(
                &format!("/v1/portfolios/{portfolio_id}/onchain_address_groups"),
                request,
            )
            .await
    }

    pub async fn delete_address_group(
        &self,
        portfolio_id: &str,
        address_group_id: &str,
    ) -> Result<DeleteAddressGroupResponse, ClientError> {
        self.client
            .delete(&format!(
                "/v1/portfolios/{portfolio_id}/onchain_address_groups/{address_group_id}"
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_type_parses_recognized_tokens() {
        assert_eq!(
            OnchainNetworkType::parse("NETWORK_TYPE_EVM").unwrap(),
            OnchainNetworkType::Evm
        );
        assert_eq!(
            OnchainNetworkType::parse("NETWORK_TYPE_SOLANA").unwrap(),
            OnchainNetworkType::Solana
        );
    }

    #[test]
    fn network_type_rejects_unknown_tokens() {
        let err = OnchainNetworkType::parse("NETWORK_TYPE_BITCOIN").unwrap_err();
        assert!(err.to_string().contains("NETWORK_TYPE_BITCOIN"));
    }

    #[test]
    fn network_type_serializes_to_wire_token() {
        let group = OnchainAddressGroup {
            id: "g1".to_owned(),
            name: String::new(),
            network_type: OnchainNetworkType::Evm,
            addresses: vec![],
        };

        let rendered = serde_json::to_string(&group).unwrap();

        assert!(rendered.contains("\"NETWORK_TYPE_EVM\""));
        assert!(!rendered.contains("\"name\""));
    }
}

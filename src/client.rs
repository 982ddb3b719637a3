//! Signed REST client and environment-sourced credentials.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::{Method, StatusCode};
use ring::hmac;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Environment variable holding the serialized API credentials.
pub const CREDENTIALS_ENV: &str = "PRIME_CREDENTIALS";

/// Environment variable overriding the per-request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "PRIME_CLI_TIMEOUT";

pub const DEFAULT_BASE_URL: &str = "https://api.prime.coinbase.com";

const DEFAULT_TIMEOUT_SECS: u64 = 7;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("PRIME_CREDENTIALS environment variable is not set")]
    MissingCredentials,
    #[error("cannot unmarshal credentials: {0}")]
    InvalidCredentials(serde_json::Error),
    #[error("cannot serialize request body: {0}")]
    SerializeBody(#[from] serde_json::Error),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {body}")]
    Api { status: StatusCode, body: String },
    #[error("portfolio ID is not provided in both flag and client credentials")]
    MissingPortfolioId,
    #[error("entity ID is not provided in both flag and client credentials")]
    MissingEntityId,
}

/// API key material and default identifiers, deserialized from the JSON
/// document in `PRIME_CREDENTIALS`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key: String,
    pub passphrase: String,
    pub signing_key: String,
    #[serde(default)]
    pub portfolio_id: String,
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub svc_account_id: String,
}

impl Credentials {
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        serde_json::from_str(raw).map_err(ClientError::InvalidCredentials)
    }

    /// Portfolio ID from an explicit flag, falling back to the credentials.
    pub fn portfolio_id_or(&self, flag: Option<&str>) -> Result<String, ClientError> {
        match flag {
            Some(id) if !id.is_empty() => Ok(id.to_owned()),
            _ if !self.portfolio_id.is_empty() => Ok(self.portfolio_id.clone()),
            _ => Err(ClientError::MissingPortfolioId),
        }
    }

    /// Entity ID from an explicit flag, falling back to the credentials.
    pub fn entity_id_or(&self, flag: Option<&str>) -> Result<String, ClientError> {
        match flag {
            Some(id) if !id.is_empty() => Ok(id.to_owned()),
            _ if !self.entity_id.is_empty() => Ok(self.entity_id.clone()),
            _ => Err(ClientError::MissingEntityId),
        }
    }
}

/// HTTP client that signs every request with the credentials' signing key.
///
/// The signature covers `timestamp + method + path + body`; the path is
/// signed without its query string.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    pub fn from_env() -> Result<Self, ClientError> {
        let raw = std::env::var(CREDENTIALS_ENV).map_err(|_| ClientError::MissingCredentials)?;
        let credentials = Credentials::from_json(&raw)?;
        Self::new(credentials, DEFAULT_BASE_URL)
    }

    pub fn new(credentials: Credentials, base_url: &str) -> Result<Self, ClientError> {
        let base_url = url::Url::parse(base_url)?;

        let http = reqwest::Client::builder()
            .timeout(request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let request = self.http.get(&url).query(query);
        let request = self.sign(request, Method::GET, path, "");

        handle_response(request.send().await?).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {url}");

        let request = self.http.delete(&url);
        let request = self.sign(request, Method::DELETE, path, "");

        handle_response(request.send().await?).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let payload = serde_json::to_string(body)?;
        debug!("{method} {url}");

        let request = self
            .http
            .request(method.clone(), &url)
            .header("Content-Type", "application/json")
            .body(payload.clone());
        let request = self.sign(request, method, path, &payload);

        handle_response(request.send().await?).await
    }

    fn sign(
        &self,
        request: reqwest::RequestBuilder,
        method: Method,
        path: &str,
        body: &str,
    ) -> reqwest::RequestBuilder {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let message = format!("{timestamp}{method}{path}{body}");

        let key = hmac::Key::new(hmac::HMAC_SHA256, self.credentials.signing_key.as_bytes());
        let signature = BASE64_STANDARD.encode(hmac::sign(&key, message.as_bytes()).as_ref());

        request
            .header("X-CB-ACCESS-KEY", self.credentials.access_key.as_str())
            .header("X-CB-ACCESS-PASSPHRASE", self.credentials.passphrase.as_str())
            .header("X-CB-ACCESS-SIGNATURE", signature)
            .header("X-CB-ACCESS-TIMESTAMP", timestamp)
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();

    Err(ClientError::Api { status, body })
}

fn request_timeout() -> Duration {
    if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
        if let Ok(secs) = raw.parse::<u64>() {
            if secs > 0 {
                return Duration::from_secs(secs);
            }
        }
    }
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

#[cfg(test)]
pub(crate) fn test_credentials() -> Credentials {
    Credentials {
        access_key: "test_access_key".to_owned(),
        passphrase: "test_passphrase".to_owned(),
        signing_key: "test_signing_key".to_owned(),
        portfolio_id: "28a04ae6-3a5f-4f5a-b0c3-b17e0a0b2a9f".to_owned(),
        entity_id: "3f6ac1b2-9d43-4d52-87c9-1f0c6a9b7d11".to_owned(),
        svc_account_id: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn credentials_parse_from_json() {
        let raw = r#"{
            "accessKey": "ak",
            "passphrase": "pp",
            "signingKey": "sk",
            "portfolioId": "pid",
            "entityId": "eid",
            "svcAccountId": "sid"
        }"#;

        let creds = Credentials::from_json(raw).unwrap();

        assert_eq!(creds.access_key, "ak");
        assert_eq!(creds.passphrase, "pp");
        assert_eq!(creds.signing_key, "sk");
        assert_eq!(creds.portfolio_id, "pid");
        assert_eq!(creds.entity_id, "eid");
        assert_eq!(creds.svc_account_id, "sid");
    }

    #[test]
    fn credentials_parse_defaults_optional_ids() {
        let raw = r#"{"accessKey": "ak", "passphrase": "pp", "signingKey": "sk"}"#;

        let creds = Credentials::from_json(raw).unwrap();

        assert!(creds.portfolio_id.is_empty());
        assert!(creds.entity_id.is_empty());
    }

    #[test]
    fn credentials_parse_rejects_garbage() {
        Credentials::from_json("not json").unwrap_err();
    }

    #[test]
    fn portfolio_id_flag_wins_over_credentials() {
        let creds = test_credentials();

        let resolved = creds.portfolio_id_or(Some("from-flag")).unwrap();

        assert_eq!(resolved, "from-flag");
    }

    #[test]
    fn portfolio_id_falls_back_to_credentials() {
        let creds = test_credentials();

        let resolved = creds.portfolio_id_or(None).unwrap();

        assert_eq!(resolved, creds.portfolio_id);
    }

    #[test]
    fn portfolio_id_missing_everywhere_is_an_error() {
        let mut creds = test_credentials();
        creds.portfolio_id = String::new();

        let err = creds.portfolio_id_or(None).unwrap_err();

        assert!(matches!(err, ClientError::MissingPortfolioId));
    }

    #[test]
    fn entity_id_missing_everywhere_is_an_error() {
        let mut creds = test_credentials();
        creds.entity_id = String::new();

        let err = creds.entity_id_or(Some("")).unwrap_err();

        assert!(matches!(err, ClientError::MissingEntityId));
    }

    #[tokio::test]
    async fn get_sends_signed_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/portfolios")
                .header("X-CB-ACCESS-KEY", "test_access_key")
                .header("X-CB-ACCESS-PASSPHRASE", "test_passphrase")
                .header_exists("X-CB-ACCESS-SIGNATURE")
                .header_exists("X-CB-ACCESS-TIMESTAMP");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"portfolios": []}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let _: serde_json::Value = client.get("/v1/portfolios", &[]).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn get_passes_query_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/portfolios/pid/orders")
                .query_param("limit", "25")
                .query_param("cursor", "abc");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"orders": []}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let query = vec![
            ("limit".to_owned(), "25".to_owned()),
            ("cursor".to_owned(), "abc".to_owned()),
        ];
        let _: serde_json::Value = client
            .get("/v1/portfolios/pid/orders", &query)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/portfolios/pid/order")
                .header("content-type", "application/json")
                .json_body(json!({"side": "BUY"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"order_id": "123"}));
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let _: serde_json::Value = client
            .post("/v1/portfolios/pid/order", &json!({"side": "BUY"}))
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/portfolios/bad");
            then.status(404).body("portfolio not found");
        });

        let client = RestClient::new(test_credentials(), &server.base_url()).unwrap();
        let err = client
            .get::<serde_json::Value>("/v1/portfolios/bad", &[])
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "portfolio not found");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}

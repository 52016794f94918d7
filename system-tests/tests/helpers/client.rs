// system-tests/tests/helpers/client.rs
// ============================================================================
// Module: Kantine API Client
// Description: Typed reqwest client for the Kantine wire contract.
// Purpose: Issue JSON requests and fail fast on unexpected statuses.
// Dependencies: kantine-contract, reqwest, serde, serde_json, system-tests
// ============================================================================

use reqwest::Method;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use system_tests::config::client_timeout;

/// JSON API client bound to one base URL and optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Server base URL without a trailing slash.
    base_url: String,
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Bearer token attached to every request when set.
    token: Option<String>,
}

impl ApiClient {
    /// Builds an unauthenticated client for a base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .timeout(client_timeout())
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            base_url: base_url.into(),
            http,
            token: None,
        })
    }

    /// Returns a clone of this client carrying a bearer token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.token = Some(token.into());
        client
    }

    /// Sends a request and returns status plus parsed JSON body.
    ///
    /// Use this variant to assert on non-200 statuses; the body parses to
    /// `Value::Null` when empty or not JSON.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(StatusCode, Value), String> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| format!("{url}: {err}"))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| format!("{url}: {err}"))?;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok((status, value))
    }

    /// Sends a request, requires 200, and deserializes the response body.
    async fn expect_ok<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<R, String> {
        let label = format!("{method} {path}");
        let (status, value) = self.send_raw(method, path, body).await?;
        if status != StatusCode::OK {
            return Err(format!("{label} returned {status}: {value}"));
        }
        serde_json::from_value(value).map_err(|err| format!("{label} body mismatch: {err}"))
    }

    /// GET expecting 200.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, String> {
        self.expect_ok(Method::GET, path, None).await
    }

    /// POST expecting 200.
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, String> {
        let body = serde_json::to_value(body).map_err(|err| err.to_string())?;
        self.expect_ok(Method::POST, path, Some(&body)).await
    }

    /// PUT expecting 200.
    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, String> {
        let body = serde_json::to_value(body).map_err(|err| err.to_string())?;
        self.expect_ok(Method::PUT, path, Some(&body)).await
    }

    /// DELETE expecting 200.
    pub async fn delete_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, String> {
        self.expect_ok(Method::DELETE, path, None).await
    }

    /// POST returning status and raw body for rejection assertions.
    pub async fn post_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, Value), String> {
        let body = serde_json::to_value(body).map_err(|err| err.to_string())?;
        self.send_raw(Method::POST, path, Some(&body)).await
    }

    /// PUT returning status and raw body for rejection assertions.
    pub async fn put_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, Value), String> {
        let body = serde_json::to_value(body).map_err(|err| err.to_string())?;
        self.send_raw(Method::PUT, path, Some(&body)).await
    }

    /// DELETE returning status and raw body for rejection assertions.
    pub async fn delete_raw(&self, path: &str) -> Result<(StatusCode, Value), String> {
        self.send_raw(Method::DELETE, path, None).await
    }

    /// GET returning status and raw body for rejection assertions.
    pub async fn get_raw(&self, path: &str) -> Result<(StatusCode, Value), String> {
        self.send_raw(Method::GET, path, None).await
    }
}

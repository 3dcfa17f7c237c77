//! HTTP client for the map service API.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use mapview::map::{MapId, MapRecord, MapSummary, SaveMapRequest, SavedMap};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::CliError;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub async fn health(&self) -> Result<(), CliError> {
        self.send(Method::GET, "/healthz", None).await.map(|_| ())
    }

    pub async fn list_maps(&self) -> Result<Vec<MapSummary>, CliError> {
        let body = self.send(Method::GET, "/api/maps", None).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn get_map(&self, id: MapId) -> Result<MapRecord, CliError> {
        let body = self.send(Method::GET, &format!("/api/maps/{id}"), None).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn delete_map(&self, id: MapId) -> Result<(), CliError> {
        self.send(Method::DELETE, &format!("/api/maps/{id}"), None).await.map(|_| ())
    }

    pub async fn save_map(&self, req: &SaveMapRequest) -> Result<SavedMap, CliError> {
        let body = self.send(Method::POST, "/api/maps", Some(serde_json::to_value(req)?)).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, CliError> {
        let url = endpoint(&self.base_url, path);
        debug!(%method, %url, "request");

        let request = self.http.request(method, &url);
        let request = if let Some(json) = body { request.json(&json) } else { request };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "response");

        if !status.is_success() {
            return Err(CliError::Server { status: status.as_u16(), message: error_message(status, &text) });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Join the base URL and an API path.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// The service's `{ "error": .. }` message, or a fallback naming the status.
#[must_use]
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| {
            let reason = status.canonical_reason().unwrap_or("error");
            format!("HTTP {} {reason}", status.as_u16())
        })
}

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::dto::talent_dto::{MaybeEnveloped, ServerListResponse, ServerQueryParams, ServerRecord};
use crate::error::{Error, Result};

pub const TALENT_API: &str = "/api/v2/talentpool/handler";

/// Client for the talent-pool backend. One endpoint, the verb selects the
/// operation: GET query, POST create, PUT update, PATCH batch status,
/// DELETE batch delete.
#[derive(Clone)]
pub struct RemoteTalentClient {
    client: Client,
    endpoint: String,
}

impl RemoteTalentClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), TALENT_API),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn query(&self, params: &ServerQueryParams) -> Result<ServerListResponse> {
        debug!(?params, "Querying talent backend");
        let request = self.client.get(&self.endpoint).query(params);
        self.send_json(request).await
    }

    /// Returns the record echoed by the backend, which carries the new id.
    pub async fn create(&self, record: &ServerRecord) -> Result<ServerRecord> {
        let request = self.client.post(&self.endpoint).json(record);
        self.send_json(request).await
    }

    pub async fn update(&self, record: &ServerRecord) -> Result<()> {
        if record.id.is_none() {
            return Err(Error::validation("Talent id is required for updates"));
        }
        let request = self.client.put(&self.endpoint).json(record);
        self.send(request).await
    }

    pub async fn delete(&self, ids: &[i64]) -> Result<()> {
        let request = self.client.delete(&self.endpoint).json(&json!({ "ids": ids }));
        self.send(request).await
    }

    pub async fn update_status(&self, ids: &[i64], statue: &str) -> Result<()> {
        let request = self
            .client
            .patch(&self.endpoint)
            .json(&json!({ "ids": ids, "statue": statue }));
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = check_status(request.send().await?).await?;
        let body = response.json::<MaybeEnveloped<T>>().await?;
        Ok(body.into_inner())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(%status, body = %body, "Talent backend returned an error");
    let message = error_message(&body).unwrap_or_else(|| status.to_string());

    Err(match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
        _ => Error::Transport(format!("{}: {}", status, message)),
    })
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message", "msg"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

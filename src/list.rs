//! Outbound marketing-list client: upsert-by-email into a fixed list.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Per-call timeout for the upstream API, so a slow upstream cannot hold a
/// request slot indefinitely.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum ListError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream status {status}: {body}")]
    Upstream { status: u16, body: String },
}

/// Create-or-update semantics keyed on email address.
#[async_trait]
pub trait ListSync: Send + Sync {
    async fn upsert_contact(&self, email: &str, name: &str) -> Result<(), ListError>;
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    email: &'a str,
    attributes: Attributes<'a>,
    #[serde(rename = "listIds")]
    list_ids: [i64; 1],
    #[serde(rename = "updateEnabled")]
    update_enabled: bool,
}

#[derive(Serialize)]
struct Attributes<'a> {
    #[serde(rename = "PRENOM")]
    prenom: &'a str,
}

/// HTTP client for the hosted list API, authenticated via an `api-key` header.
pub struct HttpListClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    list_id: i64,
}

impl HttpListClient {
    pub fn new(url: String, api_key: String, list_id: i64) -> Result<Self, ListError> {
        let http = reqwest::Client::builder().timeout(CALL_TIMEOUT).build()?;
        Ok(Self {
            http,
            url,
            api_key,
            list_id,
        })
    }
}

#[async_trait]
impl ListSync for HttpListClient {
    async fn upsert_contact(&self, email: &str, name: &str) -> Result<(), ListError> {
        let response = self
            .http
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&UpsertRequest {
                email,
                attributes: Attributes { prenom: name },
                list_ids: [self.list_id],
                update_enabled: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ListError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_payload_matches_the_list_api_shape() {
        let payload = serde_json::to_value(UpsertRequest {
            email: "al@example.com",
            attributes: Attributes { prenom: "Al" },
            list_ids: [7],
            update_enabled: true,
        })
        .unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "email": "al@example.com",
                "attributes": { "PRENOM": "Al" },
                "listIds": [7],
                "updateEnabled": true
            })
        );
    }
}

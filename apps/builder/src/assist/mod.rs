//! AI Bullet-Point Assistant Adapter.
//!
//! Sends a free-text description to the bullet generation endpoint and
//! returns candidate bullets. Every failure (transport, non-2xx status,
//! unreadable body) degrades to an empty list: the editor stays usable and
//! the caller cannot tell "no suggestions" from "call failed". Failures are
//! logged, never surfaced.

pub mod handlers;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Experience,
    Project,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Experience => "experience",
            ContentKind::Project => "project",
        }
    }
}

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bullet endpoint returned status {0}")]
    Status(u16),

    #[error("malformed bullet response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Wire request for the bullet endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct BulletRequest {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

/// Wire response from the bullet endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletResponse {
    pub bullet_points: Vec<String>,
}

/// Where bullet suggestions come from. `HttpBulletSource` in production;
/// tests swap in canned sources.
#[async_trait]
pub trait BulletSource: Send + Sync {
    async fn fetch(&self, description: &str, kind: ContentKind) -> Result<Vec<String>, AssistError>;
}

/// Calls the bullet endpoint over HTTP.
#[derive(Clone)]
pub struct HttpBulletSource {
    client: Client,
    endpoint: String,
}

impl HttpBulletSource {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, AssistError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl BulletSource for HttpBulletSource {
    async fn fetch(&self, description: &str, kind: ContentKind) -> Result<Vec<String>, AssistError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&BulletRequest {
                description: description.to_string(),
                kind,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: BulletResponse = serde_json::from_str(&body)?;
        Ok(parsed.bullet_points)
    }
}

/// Fail-soft wrapper around a `BulletSource`.
#[derive(Clone)]
pub struct BulletAssistant {
    source: Arc<dyn BulletSource>,
}

impl BulletAssistant {
    pub fn new(source: Arc<dyn BulletSource>) -> Self {
        Self { source }
    }

    pub async fn generate(&self, description: &str, kind: ContentKind) -> Vec<String> {
        match self.source.fetch(description, kind).await {
            Ok(bullets) => {
                debug!(kind = kind.as_str(), count = bullets.len(), "bullet suggestions received");
                bullets
            }
            Err(e) => {
                warn!(kind = kind.as_str(), "bullet generation failed: {e}");
                Vec::new()
            }
        }
    }
}

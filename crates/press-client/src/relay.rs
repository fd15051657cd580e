//! Backend relay client: community publishing and trend fetch.

use std::time::Duration;

use async_trait::async_trait;
use press_config::RelayConfig;
use press_core::collaborators::{PublishRelay, RelayArticle, RelayReceipt, TrendSource};
use press_core::entities::TrendItem;
use press_core::errors::CollaboratorError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::ClientError;
use crate::http::{check_response, reason};

const SERVICE: &str = "relay";

#[derive(Deserialize)]
struct PublishResponse {
    status: Option<String>,
}

#[derive(Deserialize)]
struct RelayErrorBody {
    message: Option<String>,
}

/// HTTP client for the publishing worker.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RelayClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &RelayConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent("pressroom/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn post(&self, route: &str) -> reqwest::RequestBuilder {
        let request = self.http.post(format!("{}/{route}", self.base_url));
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Hand a cleaned article to the worker for publication.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status;
    /// the message comes from the worker's `message` field when present.
    pub async fn publish_article(&self, article: &RelayArticle) -> Result<RelayReceipt, ClientError> {
        tracing::debug!(subreddit = %article.subreddit, title = %article.title, "sending article to relay");
        let resp = self.post("publish-reddit").json(article).send().await?;
        let resp = check_response(resp, relay_error_message).await?;
        let body: PublishResponse = resp.json().await?;
        Ok(receipt_from(body))
    }

    /// Fetch popular posts for `subreddit`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-success status, or
    /// a body that is not a list of posts.
    pub async fn trends(&self, subreddit: &str) -> Result<Vec<TrendItem>, ClientError> {
        tracing::debug!(%subreddit, "fetching trends");
        let resp = self
            .post("fetch-trends")
            .json(&json!({ "subreddit": subreddit }))
            .send()
            .await?;
        let resp = check_response(resp, relay_error_message).await?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl PublishRelay for RelayClient {
    async fn publish(&self, article: &RelayArticle) -> Result<RelayReceipt, CollaboratorError> {
        self.publish_article(article)
            .await
            .map_err(|e| e.into_collaborator(SERVICE))
    }
}

#[async_trait]
impl TrendSource for RelayClient {
    async fn fetch_trends(&self, community: &str) -> Result<Vec<TrendItem>, CollaboratorError> {
        self.trends(community)
            .await
            .map_err(|e| e.into_collaborator(SERVICE))
    }
}

fn receipt_from(body: PublishResponse) -> RelayReceipt {
    RelayReceipt {
        status: body
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Success".to_string()),
    }
}

fn relay_error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<RelayErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| reason(status))
}

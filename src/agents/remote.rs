//! HTTP-backed agent invoker.
//!
//! Talks to a remote agent service that accepts `{"message": "..."}`
//! and answers `{"text": "..."}`. Network, HTTP-status and parse
//! failures are mapped to distinct [`InvocationError`] variants so
//! callers can report them without inspecting reqwest internals.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{AgentInvoker, InvocationError};

/// Agent invoker backed by a remote HTTP agent service.
pub struct RemoteAgent {
    name: String,
    endpoint: String,
    client: Client,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct AgentResponse {
    text: String,
}

impl RemoteAgent {
    /// Create a remote agent pointing at `endpoint`.
    ///
    /// `timeout` bounds each individual request; cancellation can abort
    /// earlier via the token passed to [`AgentInvoker::invoke`].
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            client: Client::new(),
            timeout,
        }
    }

    async fn execute_request(&self, prompt: &str) -> Result<String, InvocationError> {
        let response = match self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&AgentRequest { message: prompt })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("request timeout: {}", e)
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                return Err(InvocationError::Network {
                    agent: self.name.clone(),
                    message,
                });
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(InvocationError::Status {
                agent: self.name.clone(),
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: AgentResponse = serde_json::from_str(&body).map_err(|e| {
            InvocationError::BadResponse {
                agent: self.name.clone(),
                message: format!("failed to parse response: {}, body: {}", e, body),
            }
        })?;

        if parsed.text.trim().is_empty() {
            return Err(InvocationError::BadResponse {
                agent: self.name.clone(),
                message: "agent returned empty text".to_string(),
            });
        }

        Ok(parsed.text)
    }
}

#[async_trait]
impl AgentInvoker for RemoteAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, InvocationError> {
        tracing::debug!(agent = %self.name, endpoint = %self.endpoint, "invoking remote agent");

        tokio::select! {
            _ = cancel.cancelled() => Err(InvocationError::Cancelled {
                agent: self.name.clone(),
            }),
            result = self.execute_request(prompt) => result,
        }
    }
}

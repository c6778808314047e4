use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{LAUNCHER_TOKEN_HEADER, REGISTER_PATH, REGISTER_TIMEOUT_SECS};

const GENERIC_FAILURE_MESSAGE: &str = "Registration failed.";

/// JSON body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pc_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// The single HTTP exchange the launcher performs.
#[async_trait]
pub trait RegistrationTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: String,
    ) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(REGISTER_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RegistrationTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: String,
    ) -> Result<TransportResponse, TransportError> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Api,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered { username: String },
    Failed { kind: FailureKind, message: String },
}

/// Reads a top-level string `error` field. Anything else, malformed JSON included, yields `None`.
pub fn read_api_error(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed.get("error")?.as_str().map(str::to_string)
}

pub fn register_url(api_base: &str) -> String {
    format!("{api_base}{REGISTER_PATH}")
}

pub struct RegistrationClient<T> {
    transport: T,
    pc_name: Option<String>,
}

impl<T> RegistrationClient<T>
where
    T: RegistrationTransport,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pc_name: None,
        }
    }

    /// Sends `pcName` with every request.
    pub fn with_pc_name(mut self, pc_name: impl Into<String>) -> Self {
        self.pc_name = Some(pc_name.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_request(&self, username: &str, password: &str) -> RegistrationRequest {
        RegistrationRequest {
            username: username.to_string(),
            password: password.to_string(),
            pc_name: self.pc_name.clone(),
        }
    }

    async fn exchange(
        &self,
        url: &str,
        username: &str,
        password: &str,
        launcher_token: Option<&str>,
    ) -> Result<TransportResponse, TransportError> {
        let payload = serde_json::to_string(&self.build_request(username, password))
            .map_err(|error| TransportError::Other(error.to_string()))?;
        let headers: Vec<(&'static str, String)> = launcher_token
            .map(|token| vec![(LAUNCHER_TOKEN_HEADER, token.trim().to_string())])
            .unwrap_or_default();

        self.transport.post_json(url, &headers, payload).await
    }

    /// Posts one registration. Inputs must already be validated and `api_base` normalized.
    pub async fn register(
        &self,
        api_base: &str,
        username: &str,
        password: &str,
        launcher_token: Option<&str>,
    ) -> RegistrationOutcome {
        let url = register_url(api_base);
        debug!(%url, username, with_token = launcher_token.is_some(), "posting registration");

        let response = match self
            .exchange(&url, username, password, launcher_token)
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%url, %error, "registration request failed");
                return RegistrationOutcome::Failed {
                    kind: FailureKind::Transport,
                    message: format!("Request failed: {error}"),
                };
            }
        };

        if !response.is_success() {
            debug!(status = response.status, "registration rejected");
            return RegistrationOutcome::Failed {
                kind: FailureKind::Api,
                message: read_api_error(&response.body)
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            };
        }

        RegistrationOutcome::Registered {
            username: username.to_string(),
        }
    }
}

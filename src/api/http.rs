use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use super::DataSource;
use crate::config::{Config, ConfigError};
use crate::error::FetchError;

/// reqwest-backed [`DataSource`] rooted at the configured API base URL.
#[derive(Clone)]
pub struct HttpDataSource {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl fmt::Debug for HttpDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDataSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpDataSource {
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let base_url = cfg.base_url()?;
        let http = Client::builder()
            .user_agent(cfg.api.user_agent.clone())
            .timeout(Duration::from_millis(cfg.api.timeout_ms))
            .build()
            .map_err(|_| ConfigError::Invalid("failed to build HTTP client"))?;
        Ok(Self {
            http,
            base_url,
            token: cfg.api.token.clone(),
        })
    }

    /// Resolve a resource path against the base URL. Leading slashes are
    /// dropped so `/courses` stays under the API prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| FetchError::Url {
                path: path.to_string(),
                reason: err.to_string(),
            })
    }

    pub fn build_request(&self, method: Method, path: &str) -> Result<reqwest::Request, FetchError> {
        let endpoint = self.endpoint(path)?;
        let mut builder = self
            .http
            .request(method, endpoint)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.build().map_err(|source| FetchError::Transport {
            path: path.to_string(),
            source,
        })
    }

    async fn execute(&self, method: Method, path: &str) -> Result<reqwest::Response, FetchError> {
        let request = self.build_request(method, path)?;
        debug!(method=%request.method(), url=%request.url(), "sending request");
        let res = self
            .http
            .execute(request)
            .await
            .map_err(|source| FetchError::Transport {
                path: path.to_string(),
                source,
            })?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            warn!(%status, path, "backend returned error status");
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(res)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn request(&self, path: &str) -> Result<Value, FetchError> {
        let res = self.execute(Method::GET, path).await?;
        let text = res.text().await.map_err(|source| FetchError::Transport {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn delete(&self, path: &str) -> Result<(), FetchError> {
        self.execute(Method::DELETE, path).await?;
        Ok(())
    }
}

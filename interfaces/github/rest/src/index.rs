use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, error, warn};
use utils_rate_limit::{RateLimiter, RateLimiterError};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
pub const USER_AGENT: &str = "github-api-explorer";

pub const CALLS_PER_PERIOD: u32 = 60;
pub const PERIOD: Duration = Duration::from_secs(60);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared handle to the upstream API. Cloning is cheap: the connection pool
/// and the limiter are shared between clones.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    limiter: Arc<RateLimiter>,
}

#[derive(Debug, Error)]
pub enum BuildGitHubClientError {
    #[error("InvalidToken: token contains characters not allowed in a header")]
    InvalidToken {
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("InvalidApiUrl: {url} cannot be used as a base URL")]
    InvalidApiUrl { url: String },

    #[error("RateLimiter: {source}")]
    RateLimiter {
        #[from]
        source: RateLimiterError,
    },

    #[error("HttpClientBuild: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("RequestSend: {source}")]
    RequestSend {
        #[source]
        source: reqwest::Error,
    },

    #[error("UpstreamStatus: {status} for url ({url}): {message}")]
    UpstreamStatus {
        status: StatusCode,
        url: String,
        message: String,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        #[source]
        source: reqwest::Error,
    },
}

impl GitHubClient {
    /// Client with the default 60 calls / 60 s limiter and 10 s timeout.
    pub fn new(token: &str, api_url: Url) -> Result<Self, BuildGitHubClientError> {
        let limiter = Arc::new(RateLimiter::new(CALLS_PER_PERIOD, PERIOD)?);
        Self::with_options(token, api_url, REQUEST_TIMEOUT, limiter)
    }

    pub fn with_options(
        token: &str,
        api_url: Url,
        timeout: Duration,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, BuildGitHubClientError> {
        if api_url.cannot_be_a_base() {
            return Err(BuildGitHubClientError::InvalidApiUrl {
                url: api_url.to_string(),
            });
        }

        let mut auth = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|source| BuildGitHubClientError::InvalidToken { source })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| BuildGitHubClientError::HttpClientBuild { source })?;

        Ok(Self {
            http,
            api_url,
            limiter,
        })
    }

    /// `GET /user/repos`
    pub fn user_repos_url(&self) -> Url {
        self.endpoint(&["user", "repos"])
    }

    /// `GET /repos/{owner}/{repo}/commits`
    pub fn repo_commits_url(&self, owner: &str, repo: &str) -> Url {
        self.endpoint(&["repos", owner, repo, "commits"])
    }

    /// `GET /repos/{owner}/{repo}/issues`
    pub fn repo_issues_url(&self, owner: &str, repo: &str) -> Url {
        self.endpoint(&["repos", owner, repo, "issues"])
    }

    // Each entry becomes exactly one percent-encoded path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issues one rate-limited GET and returns the JSON body as-is.
    ///
    /// Waits for the limiter rather than failing when the window is full.
    /// Transport errors, timeouts, non-2xx statuses and undecodable bodies
    /// all come back as [`FetchError`].
    pub async fn fetch_json(&self, url: Url) -> Result<serde_json::Value, FetchError> {
        self.limiter.acquire().await;

        debug!(%url, "GitHub API request");

        let result = self.send(url.clone()).await;
        if let Err(err) = &result {
            error!(%url, error = %err, "API request failed");
        }
        result
    }

    async fn send(&self, url: Url) -> Result<serde_json::Value, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::RequestSend { source })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => upstream_message(&body),
                Err(err) => {
                    warn!(%url, error = %err, "Failed to read upstream error body");
                    String::new()
                }
            };
            return Err(FetchError::UpstreamStatus {
                status,
                url: url.to_string(),
                message: non_empty_message(message, status),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| FetchError::ResponseRead { source })
    }
}

/// GitHub error bodies look like `{"message": "...", "documentation_url": ...}`.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}

/// An empty or unreadable error body falls back to the status reason phrase.
fn non_empty_message(message: String, status: StatusCode) -> String {
    if !message.is_empty() {
        return message;
    }
    status
        .canonical_reason()
        .unwrap_or(status.as_str())
        .to_owned()
}

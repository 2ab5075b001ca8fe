use axum::{
    body::Body,
    extract::rejection::QueryRejection,
    http::{header, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use interfaces_github_rest::FetchError;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::error;

pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("FetchFromGitHub: {source}")]
    FetchFromGitHub {
        #[from]
        source: FetchError,
    },

    #[error("MapUpstreamPayload: {source}")]
    MapUpstreamPayload {
        #[from]
        source: serde_json::Error,
    },

    #[error("BuildResponse: {source}")]
    BuildResponse {
        #[from]
        source: axum::http::Error,
    },

    #[error("InvalidQuery: {source}")]
    InvalidQuery {
        #[from]
        source: QueryRejection,
    },

    #[error("EmptyParameter: {name} must not be empty")]
    EmptyParameter { name: &'static str },
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        let (status, detail) = match &self {
            HandlerError::FetchFromGitHub { source } => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("GitHub API error: {source}"),
            ),
            HandlerError::MapUpstreamPayload { .. } | HandlerError::BuildResponse { .. } => {
                error!(error = %self, "Unexpected error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_owned(),
                )
            }
            HandlerError::InvalidQuery { source } => (StatusCode::BAD_REQUEST, source.body_text()),
            HandlerError::EmptyParameter { name } => (
                StatusCode::BAD_REQUEST,
                format!("{name} must not be empty"),
            ),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Query for `/get-repos`.
#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub as_json: bool,
}

/// Query for the per-repository listings.
#[derive(Debug, Deserialize)]
pub struct RepoQuery {
    pub owner: String,
    pub repo: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub as_json: bool,
}

impl RepoQuery {
    pub fn ensure_not_empty(&self) -> Result<(), HandlerError> {
        if self.owner.trim().is_empty() {
            return Err(HandlerError::EmptyParameter { name: "owner" });
        }
        if self.repo.trim().is_empty() {
            return Err(HandlerError::EmptyParameter { name: "repo" });
        }
        Ok(())
    }
}

/// Accepts the usual spellings of a boolean query flag.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid boolean value `{raw}` for as_json"))
    })
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

pub fn json_response<T: Serialize>(items: &[T]) -> Result<axum::response::Response, HandlerError> {
    let json = serde_json::to_vec(items)?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json))?;

    Ok(response)
}

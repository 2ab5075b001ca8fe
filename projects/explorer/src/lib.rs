//! GitHub API Explorer
//!
//! - HTTP endpoints in `endpoints/`, rendered as JSON or HTML
//! - View models reduced from GitHub payloads in `models/`
//! - HTML templates in `views/` (sources under `templates/`)
//! - Requires GITHUB_TOKEN env var for API access

pub mod config;
pub mod endpoints;
pub mod models;
pub mod views;

use axum::{routing::get, Extension, Router};
use interfaces_github_rest::GitHubClient;

use endpoints::github::{commits, issues, repos};

pub fn router(github: GitHubClient) -> Router {
    Router::new()
        .route("/get-repos", get(repos::index::handler))
        .route("/get-commits", get(commits::index::handler))
        .route("/get-issues", get(issues::index::handler))
        .layer(Extension(github))
}

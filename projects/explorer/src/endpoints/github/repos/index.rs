use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::{Html, IntoResponse, Response},
};
use interfaces_github_rest::GitHubClient;
use tracing::info;

use crate::endpoints::github::common::{json_response, FormatQuery, HandlerError};
use crate::models::repo_summaries;
use crate::views::repos_page;

/// Axum handler: GET /get-repos
///
/// Lists every repository visible to the configured token.
pub async fn handler(
    Extension(github): Extension<GitHubClient>,
    query: Result<Query<FormatQuery>, QueryRejection>,
) -> Result<Response, HandlerError> {
    let Query(query) = query?;
    let payload = github.fetch_json(github.user_repos_url()).await?;
    let repos = repo_summaries(payload)?;

    info!(count = repos.len(), as_json = query.as_json, "Listed repositories");

    if query.as_json {
        return json_response(&repos);
    }
    Ok(Html(repos_page(&repos)).into_response())
}

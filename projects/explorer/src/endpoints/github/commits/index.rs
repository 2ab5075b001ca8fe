use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::{Html, IntoResponse, Response},
};
use interfaces_github_rest::GitHubClient;
use tracing::info;

use crate::endpoints::github::common::{json_response, HandlerError, RepoQuery};
use crate::models::commit_summaries;
use crate::views::commits_page;

/// Axum handler: GET /get-commits?owner=..&repo=..
pub async fn handler(
    Extension(github): Extension<GitHubClient>,
    query: Result<Query<RepoQuery>, QueryRejection>,
) -> Result<Response, HandlerError> {
    let Query(query) = query?;
    query.ensure_not_empty()?;

    let url = github.repo_commits_url(&query.owner, &query.repo);
    let commits = commit_summaries(github.fetch_json(url).await?)?;

    info!(
        owner = %query.owner,
        repo = %query.repo,
        count = commits.len(),
        "Listed commits"
    );

    if query.as_json {
        return json_response(&commits);
    }
    Ok(Html(commits_page(&query.owner, &query.repo, &commits)).into_response())
}

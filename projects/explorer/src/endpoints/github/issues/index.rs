use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::{Html, IntoResponse, Response},
};
use interfaces_github_rest::GitHubClient;
use tracing::info;

use crate::endpoints::github::common::{json_response, HandlerError, RepoQuery};
use crate::models::issue_summaries;
use crate::views::issues_page;

/// Axum handler: GET /get-issues?owner=..&repo=..
///
/// GitHub's default filter applies, so only open issues (pull requests
/// included) come back.
pub async fn handler(
    Extension(github): Extension<GitHubClient>,
    query: Result<Query<RepoQuery>, QueryRejection>,
) -> Result<Response, HandlerError> {
    let Query(query) = query?;
    query.ensure_not_empty()?;

    let url = github.repo_issues_url(&query.owner, &query.repo);
    let issues = issue_summaries(github.fetch_json(url).await?)?;

    info!(
        owner = %query.owner,
        repo = %query.repo,
        count = issues.len(),
        "Listed issues"
    );

    if query.as_json {
        return json_response(&issues);
    }
    Ok(Html(issues_page(&query.owner, &query.repo, &issues)).into_response())
}

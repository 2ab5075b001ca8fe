use reqwest::Url;

use super::{escape, fill, format_timestamp, layout};
use crate::models::{CommitSummary, IssueSummary, RepoSummary};

const REPOS: &str = include_str!("../../templates/repos.html");
const COMMITS: &str = include_str!("../../templates/commits.html");
const ISSUES: &str = include_str!("../../templates/issues.html");

pub fn repos_page(repos: &[RepoSummary]) -> String {
    let rows = rows(repos, 4, "No repositories found.", repo_row);
    let body = fill(REPOS, &[("rows", rows.as_str())]);
    layout("Repositories", "Your repositories", &body)
}

pub fn commits_page(owner: &str, repo: &str, commits: &[CommitSummary]) -> String {
    let rows = rows(commits, 3, "No commits found.", commit_row);
    let (owner_html, repo_html) = (escape(owner), escape(repo));
    let issues_link = escape(&explorer_link("/get-issues", owner, repo));
    let body = fill(
        COMMITS,
        &[
            ("owner", owner_html.as_str()),
            ("repo", repo_html.as_str()),
            ("issues_link", issues_link.as_str()),
            ("rows", rows.as_str()),
        ],
    );
    layout(
        &format!("Commits - {owner}/{repo}"),
        &format!("Commits in {owner}/{repo}"),
        &body,
    )
}

pub fn issues_page(owner: &str, repo: &str, issues: &[IssueSummary]) -> String {
    let rows = rows(issues, 3, "No issues found.", issue_row);
    let (owner_html, repo_html) = (escape(owner), escape(repo));
    let commits_link = escape(&explorer_link("/get-commits", owner, repo));
    let body = fill(
        ISSUES,
        &[
            ("owner", owner_html.as_str()),
            ("repo", repo_html.as_str()),
            ("commits_link", commits_link.as_str()),
            ("rows", rows.as_str()),
        ],
    );
    layout(
        &format!("Issues - {owner}/{repo}"),
        &format!("Issues in {owner}/{repo}"),
        &body,
    )
}

fn rows<T>(items: &[T], columns: usize, empty: &str, row: fn(&T) -> String) -> String {
    if items.is_empty() {
        return format!(
            "        <tr><td class=\"empty\" colspan=\"{columns}\">{}</td></tr>",
            escape(empty)
        );
    }
    items.iter().map(row).collect::<Vec<_>>().join("\n")
}

fn repo_row(repo: &RepoSummary) -> String {
    let browse = match owner_and_name(&repo.url) {
        Some((owner, name)) => format!(
            "<a href=\"{}\">commits</a> | <a href=\"{}\">issues</a>",
            escape(&explorer_link("/get-commits", &owner, &name)),
            escape(&explorer_link("/get-issues", &owner, &name)),
        ),
        None => String::new(),
    };

    format!(
        "        <tr><td><a href=\"{url}\">{name}</a></td><td>{description}</td><td>{language}</td><td>{browse}</td></tr>",
        url = escape(&repo.url),
        name = escape(&repo.name),
        description = escape(&repo.description),
        language = escape(&repo.language),
    )
}

fn commit_row(commit: &CommitSummary) -> String {
    format!(
        "        <tr><td><pre>{message}</pre></td><td>{author}</td><td>{date}</td></tr>",
        message = escape(&commit.message),
        author = escape(&commit.author),
        date = escape(&format_timestamp(&commit.date)),
    )
}

fn issue_row(issue: &IssueSummary) -> String {
    let class = match issue.state.as_str() {
        "open" => " class=\"state-open\"",
        "closed" => " class=\"state-closed\"",
        _ => "",
    };

    format!(
        "        <tr><td><a href=\"{url}\">{title}</a></td><td{class}>{state}</td><td>{created}</td></tr>",
        url = escape(&issue.url),
        title = escape(&issue.title),
        state = escape(&issue.state),
        created = escape(&format_timestamp(&issue.created_at)),
    )
}

/// `https://github.com/octocat/Hello-World` -> `("octocat", "Hello-World")`
fn owner_and_name(html_url: &str) -> Option<(String, String)> {
    let url = Url::parse(html_url).ok()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?.to_owned();
    let name = segments.next()?.to_owned();
    Some((owner, name))
}

/// Relative link back into this service, with owner/repo query-encoded.
fn explorer_link(path: &str, owner: &str, repo: &str) -> String {
    let base = format!("http://explorer.local{path}");
    match Url::parse_with_params(&base, &[("owner", owner), ("repo", repo)]) {
        Ok(url) => format!("{}?{}", url.path(), url.query().unwrap_or_default()),
        Err(_) => path.to_owned(),
    }
}

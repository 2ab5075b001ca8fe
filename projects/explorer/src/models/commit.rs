use serde::{Deserialize, Serialize};

/// One element of `GET /repos/{owner}/{repo}/commits`. Only the git-level
/// commit object is read; the GitHub user fields are ignored.
#[derive(Debug, Deserialize)]
pub struct UpstreamCommit {
    pub commit: GitCommit,
}

#[derive(Debug, Deserialize)]
pub struct GitCommit {
    pub message: String,
    pub author: GitSignature,
}

#[derive(Debug, Deserialize)]
pub struct GitSignature {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub message: String,
    pub author: String,
    pub date: String,
}

impl From<UpstreamCommit> for CommitSummary {
    fn from(upstream: UpstreamCommit) -> Self {
        let GitCommit { message, author } = upstream.commit;
        Self {
            message,
            author: author.name,
            date: author.date,
        }
    }
}

pub fn commit_summaries(
    payload: serde_json::Value,
) -> Result<Vec<CommitSummary>, serde_json::Error> {
    let commits: Vec<UpstreamCommit> = serde_json::from_value(payload)?;
    Ok(commits.into_iter().map(CommitSummary::from).collect())
}

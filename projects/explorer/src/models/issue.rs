use serde::{Deserialize, Serialize};

/// Fields read from one element of `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Deserialize)]
pub struct UpstreamIssue {
    pub title: String,
    pub html_url: String,
    pub state: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub title: String,
    pub url: String,
    pub state: String,
    pub created_at: String,
}

impl From<UpstreamIssue> for IssueSummary {
    fn from(issue: UpstreamIssue) -> Self {
        Self {
            title: issue.title,
            url: issue.html_url,
            state: issue.state,
            created_at: issue.created_at,
        }
    }
}

pub fn issue_summaries(payload: serde_json::Value) -> Result<Vec<IssueSummary>, serde_json::Error> {
    let issues: Vec<UpstreamIssue> = serde_json::from_value(payload)?;
    Ok(issues.into_iter().map(IssueSummary::from).collect())
}

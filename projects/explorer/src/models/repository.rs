use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description provided";
pub const NO_LANGUAGE: &str = "Not specified";

/// Fields read from one element of `GET /user/repos`.
#[derive(Debug, Deserialize)]
pub struct UpstreamRepository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: String,
    pub url: String,
    pub language: String,
}

impl From<UpstreamRepository> for RepoSummary {
    fn from(repo: UpstreamRepository) -> Self {
        Self {
            name: repo.name,
            description: repo
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_owned()),
            url: repo.html_url,
            language: repo.language.unwrap_or_else(|| NO_LANGUAGE.to_owned()),
        }
    }
}

pub fn repo_summaries(payload: serde_json::Value) -> Result<Vec<RepoSummary>, serde_json::Error> {
    let repos: Vec<UpstreamRepository> = serde_json::from_value(payload)?;
    Ok(repos.into_iter().map(RepoSummary::from).collect())
}

pub mod commit;
pub mod issue;
pub mod repository;

pub use commit::{commit_summaries, CommitSummary};
pub use issue::{issue_summaries, IssueSummary};
pub use repository::{repo_summaries, RepoSummary};

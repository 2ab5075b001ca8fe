//! Rate-limited client for the GitHub REST v3 API.

pub mod index;

pub use index::{BuildGitHubClientError, FetchError, GitHubClient};

use interfaces_github_rest::{BuildGitHubClientError, GitHubClient};
use projects_explorer::config::{Config, ConfigError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MainError {
    #[error("TracingInit: {source}")]
    TracingInit {
        #[from]
        source: utils_trace::TracingInitError,
    },
    #[error("LoadConfig: {source}")]
    LoadConfig {
        #[from]
        source: ConfigError,
    },
    #[error("BuildGitHubClient: {source}")]
    BuildGitHubClient {
        #[from]
        source: BuildGitHubClientError,
    },
    #[error("TcpListenerBind: {source}")]
    TcpListenerBind {
        #[source]
        source: std::io::Error,
    },
    #[error("Serve: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    // Before tracing so a RUST_LOG in .env is honoured.
    let dotenv = dotenvy::dotenv();

    utils_trace::init("info")?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = Config::from_env()?;
    let github = GitHubClient::new(&config.github_token, config.github_api_url.clone())?;

    let app = projects_explorer::router(github);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| MainError::TcpListenerBind { source })?;

    info!(upstream = %config.github_api_url, "Server running on addr: {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|source| MainError::Serve { source })?;

    Ok(())
}

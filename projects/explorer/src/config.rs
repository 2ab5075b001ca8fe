use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use interfaces_github_rest::index::DEFAULT_API_URL;
use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Process settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub github_token: String,
    pub github_api_url: Url,
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingEnvVar: {name} not found in environment variables")]
    MissingEnvVar { name: &'static str },

    #[error("InvalidValue: {name}={value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Config {
    /// Reads `GITHUB_TOKEN` (required), `API_PORT`, `API_HOST` and
    /// `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = lookup("GITHUB_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingEnvVar {
                name: "GITHUB_TOKEN",
            })?;

        let github_api_url = match lookup("GITHUB_API_URL") {
            Some(value) => Url::parse(&value).map_err(|_| ConfigError::InvalidValue {
                name: "GITHUB_API_URL",
                value,
            })?,
            None => Url::parse(DEFAULT_API_URL).map_err(|_| ConfigError::InvalidValue {
                name: "GITHUB_API_URL",
                value: DEFAULT_API_URL.to_owned(),
            })?,
        };

        let host = match lookup("API_HOST") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "API_HOST",
                value,
            })?,
            None => DEFAULT_HOST,
        };

        let port = match lookup("API_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "API_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            github_token,
            github_api_url,
            host,
            port,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// The token never shows up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &"<redacted>")
            .field("github_api_url", &self.github_api_url.as_str())
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

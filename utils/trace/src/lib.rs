use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when it is set and valid; otherwise `level` is used as
/// the filter directive (e.g. `"info"` or `"projects_explorer=debug"`).
pub fn init(level: &str) -> Result<(), TracingInitError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| fallback_filter(level))?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact());

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn fallback_filter(level: &str) -> Result<EnvFilter, TracingInitError> {
    EnvFilter::try_new(level).map_err(|source| TracingInitError::InvalidFilter { source })
}

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("Invalid filter config: {source}")]
    InvalidFilter {
        #[from]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to set global default subscriber: {source}")]
    SetGlobalDefault {
        #[from]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_filter_accepts_plain_level() {
        assert!(fallback_filter("info").is_ok());
    }

    #[test]
    fn fallback_filter_accepts_target_directive() {
        assert!(fallback_filter("projects_explorer=debug,tower=warn").is_ok());
    }

    #[test]
    fn fallback_filter_rejects_bad_level() {
        let err = fallback_filter("projects_explorer=loud").unwrap_err();
        assert!(matches!(err, TracingInitError::InvalidFilter { .. }));
    }
}

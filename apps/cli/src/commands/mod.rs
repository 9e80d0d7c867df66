//! Subcommand implementations.
//!
//! Each command builds the view state it needs from [`Context`], drives it
//! to completion, and renders the final `ResourceState` as text.

pub mod auth;
pub mod order;
pub mod products;

use anyhow::{bail, Context as _};
use std::path::PathBuf;
use tracing::debug;

use kasir_client::{ClientConfig, Clients};
use kasir_core::ResourceState;

/// Loaded configuration plus the wired REST clients.
pub struct Context {
    pub config: ClientConfig,
    pub clients: Clients,
}

impl Context {
    pub fn load(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = ClientConfig::load(config_path).context("failed to load configuration")?;
        debug!(base_url = %config.api.base_url, "Configuration loaded");

        let clients = Clients::from_config(&config).context("failed to set up API clients")?;
        Ok(Context { config, clients })
    }
}

/// Unwraps a settled state into its data, turning `Error` into an error.
pub(crate) fn settled<T>(state: ResourceState<T>) -> anyhow::Result<T> {
    match state {
        ResourceState::Success { data: Some(data) } => Ok(data),
        ResourceState::Success { data: None } => bail!("request produced no result"),
        ResourceState::Error { message, .. } => bail!(message),
        ResourceState::Loading => bail!("request did not settle"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled() {
        assert_eq!(settled(ResourceState::success(3)).unwrap(), 3);

        let err = settled(ResourceState::<u8>::error("HTTP 500", None)).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");

        assert!(settled(ResourceState::<u8>::idle()).is_err());
        assert!(settled(ResourceState::<u8>::Loading).is_err());
    }
}

//! Process configuration.
//!
//! Everything the bot needs from the environment is resolved once at
//! startup into a [`Config`] that is passed by reference from then on, so a
//! misconfigured workflow fails before any remote call is made. The token
//! is only ever handed to `bearer_auth()` and is never logged.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const WORKSPACE_ENV_VAR: &str = "GITHUB_WORKSPACE";
pub const EVENT_PATH_ENV_VAR: &str = "GITHUB_EVENT_PATH";
pub const GRAPHQL_URL_ENV_VAR: &str = "GITHUB_GRAPHQL_URL";
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    /// Checkout root the triggering workflow runs in.
    pub workspace: PathBuf,
    /// Path of the JSON event payload describing the pull request.
    pub event_path: PathBuf,
    /// GraphQL endpoint, e.g. `https://api.github.com/graphql`.
    pub graphql_url: String,
    /// Bearer token for the GraphQL endpoint.
    pub token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| {
            lookup(name).with_context(|| format!("missing required environment variable {name}"))
        };

        Ok(Self {
            workspace: PathBuf::from(require(WORKSPACE_ENV_VAR)?),
            event_path: PathBuf::from(require(EVENT_PATH_ENV_VAR)?),
            graphql_url: require(GRAPHQL_URL_ENV_VAR)?,
            token: require(TOKEN_ENV_VAR)?,
        })
    }
}

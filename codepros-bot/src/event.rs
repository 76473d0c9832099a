//! Decoding of the GitHub event payload.
//!
//! Workflows hand the triggering event to the bot as a JSON file. Only the
//! `pull_request` object matters here; leaf fields default when absent so a
//! partial payload still yields a usable context, but a payload without a
//! `pull_request` at all means the workflow is wired to the wrong event.

use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// The slice of the event payload the run needs, read-only thereafter.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    pub is_draft: bool,
    pub base_sha: String,
    pub head_sha: String,
    pub node_id: String,
    pub author_login: String,
}

#[derive(Debug, Deserialize)]
struct Event {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Default, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    base: CommitRef,
    #[serde(default)]
    head: CommitRef,
    #[serde(default)]
    node_id: String,
    #[serde(default)]
    user: Author,
}

#[derive(Debug, Default, Deserialize)]
struct CommitRef {
    #[serde(default)]
    sha: String,
}

#[derive(Debug, Default, Deserialize)]
struct Author {
    #[serde(default)]
    login: String,
}

pub fn read_event(path: &Path) -> Result<PullRequestContext> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read event payload at {}", path.display()))?;
    parse_event(&raw)
}

pub fn parse_event(raw: &str) -> Result<PullRequestContext> {
    let event: Event = serde_json::from_str(raw)
        .map_err(|err| anyhow!("event payload cannot be deserialized: {err}"))?;
    let pull_request = event
        .pull_request
        .ok_or_else(|| anyhow!("event payload missing pull request data"))?;

    Ok(PullRequestContext {
        is_draft: pull_request.draft,
        base_sha: pull_request.base.sha,
        head_sha: pull_request.head.sha,
        node_id: pull_request.node_id,
        author_login: pull_request.user.login,
    })
}

//! Change-set resolution.
//!
//! Workflow checkouts are shallow, so the diff endpoints of the pull
//! request are usually not both present locally. The commit count from the
//! GraphQL API bounds how far the fetch has to deepen before
//! `git diff --name-only` can walk from base to head.

use std::{collections::BTreeSet, path::Path, process::Command};

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::github::{GraphqlTransport, GRAPHQL_PR_COMMITS};

/// List the files that differ between `base_sha` and `head_sha` in the
/// checkout at `workspace`, as repository-relative paths. An empty diff is
/// a legitimate outcome; unreachable refs are fatal.
pub fn changed_files(
    transport: &dyn GraphqlTransport,
    workspace: &Path,
    node_id: &str,
    base_sha: &str,
    head_sha: &str,
) -> Result<BTreeSet<String>> {
    let response = transport.request(
        "pull request commit count",
        GRAPHQL_PR_COMMITS,
        json!({ "nodeId": node_id }),
    )?;
    let commit_count = response
        .pointer("/data/node/commits/totalCount")
        .and_then(Value::as_u64)
        .context("commit count missing from GraphQL response")?;

    // Deepen past the PR's own commits to reach the merge base.
    let fetch = Command::new("git")
        .current_dir(workspace)
        .args(["fetch", "--no-tags", "--depth"])
        .arg((commit_count + 1).to_string())
        .args(["origin", base_sha, head_sha])
        .output()
        .context("failed to run git fetch")?;
    if !fetch.status.success() {
        warn!(
            status = %fetch.status,
            stderr = %String::from_utf8_lossy(&fetch.stderr),
            "git fetch failed, diffing against the existing checkout"
        );
    }

    let diff = Command::new("git")
        .current_dir(workspace)
        .args(["diff", "--name-only", base_sha, head_sha])
        .output()
        .context("failed to run git diff")?;
    if !diff.status.success() {
        bail!(
            "git diff --name-only {base_sha} {head_sha} failed: {}",
            String::from_utf8_lossy(&diff.stderr).trim()
        );
    }

    let files: BTreeSet<String> = String::from_utf8_lossy(&diff.stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    debug!(count = files.len(), "resolved changed files");
    Ok(files)
}

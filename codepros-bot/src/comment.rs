//! Pull-request comment reconciliation.
//!
//! The bot owns at most one comment per pull request. Each run queries the
//! thread, updates the existing bot-authored comment if one is there, and
//! adds a fresh one otherwise, so exactly one mutation happens either way.
//! Bot authorship is decided by `viewerDidAuthor`, never by comment content.

use std::collections::BTreeSet;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

use crate::github::{
    GraphqlTransport, GRAPHQL_ADD_PR_COMMENT, GRAPHQL_PR_COMMENTS, GRAPHQL_UPDATE_PR_COMMENT,
};

pub const DEFAULT_COMMENT_TITLE: &str = "Code pros";
pub const DEFAULT_PR_COMMENT: &str =
    "The following pros are responsible for files changed in this pull request.";

pub fn reconcile(
    transport: &dyn GraphqlTransport,
    node_id: &str,
    title: &str,
    message: &str,
    pros: &BTreeSet<String>,
    matched_files: &BTreeSet<String>,
) -> Result<()> {
    let body = compose_body(title, message, pros, matched_files);

    match find_bot_comment(transport, node_id)? {
        Some(comment_id) => {
            info!("updating existing pull request comment");
            transport.request(
                "update pull request comment",
                GRAPHQL_UPDATE_PR_COMMENT,
                json!({ "commentId": comment_id, "body": body }),
            )?;
        }
        None => {
            info!("adding pull request comment");
            transport.request(
                "add pull request comment",
                GRAPHQL_ADD_PR_COMMENT,
                json!({ "subjectId": node_id, "body": body }),
            )?;
        }
    }
    Ok(())
}

fn find_bot_comment(transport: &dyn GraphqlTransport, node_id: &str) -> Result<Option<Value>> {
    let response = transport.request(
        "list pull request comments",
        GRAPHQL_PR_COMMENTS,
        json!({ "nodeId": node_id }),
    )?;

    let comment_id = response
        .pointer("/data/node/comments/nodes")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find(|node| node["viewerDidAuthor"].as_bool().unwrap_or(false))
        .map(|node| node["id"].clone());
    Ok(comment_id)
}

/// Compose the comment body. Empty title and message fall back to the
/// defaults; the pro and file lists are appended in set order so the same
/// resolution always produces the same body.
pub fn compose_body(
    title: &str,
    message: &str,
    pros: &BTreeSet<String>,
    matched_files: &BTreeSet<String>,
) -> String {
    let title = if title.is_empty() {
        DEFAULT_COMMENT_TITLE
    } else {
        title
    };
    let message = if message.is_empty() {
        DEFAULT_PR_COMMENT
    } else {
        message
    };

    let mut body = format!("## {title}\n\n{message}\n");
    if !pros.is_empty() {
        let listed = pros.iter().cloned().collect::<Vec<_>>().join(", ");
        body.push_str(&format!("\n**Pros:** {listed}\n"));
    }
    if !matched_files.is_empty() {
        body.push_str("\n**Files:**\n");
        for file in matched_files {
            body.push_str(&format!("- `{file}`\n"));
        }
    }
    body
}

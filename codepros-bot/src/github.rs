//! GitHub GraphQL client.
//!
//! One request, one response: any non-200 status aborts the run with an
//! error naming the failing call, and there are no retries. The token is
//! passed only to `bearer_auth()` and never appears in errors or logs.

use anyhow::{bail, Context, Result};
use reqwest::{blocking::Client, StatusCode};
use serde_json::{json, Value};

use crate::config::Config;

pub const GRAPHQL_PR_COMMITS: &str = "\
query($nodeId: ID!) {
  node(id: $nodeId) {
    ... on PullRequest {
      commits { totalCount }
    }
  }
}";

pub const GRAPHQL_PR_COMMENTS: &str = "\
query($nodeId: ID!) {
  node(id: $nodeId) {
    ... on PullRequest {
      comments(first: 100) {
        nodes { id body viewerDidAuthor }
      }
    }
  }
}";

pub const GRAPHQL_ADD_PR_COMMENT: &str = "\
mutation($subjectId: ID!, $body: String!) {
  addComment(input: {subjectId: $subjectId, body: $body}) {
    commentEdge { node { id } }
  }
}";

pub const GRAPHQL_UPDATE_PR_COMMENT: &str = "\
mutation($commentId: ID!, $body: String!) {
  updateIssueComment(input: {id: $commentId, body: $body}) {
    issueComment { id }
  }
}";

/// Seam between protocol logic and the wire. The bot's reconciliation and
/// change-detection code only ever sees this trait; tests substitute a
/// recording fake.
pub trait GraphqlTransport {
    /// Execute one GraphQL request. `context` names the logical call for
    /// error messages.
    fn request(&self, context: &str, query: &str, variables: Value) -> Result<Value>;
}

pub struct GithubGraphqlClient {
    client: Client,
    url: String,
    token: String,
}

impl GithubGraphqlClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            url: config.graphql_url.clone(),
            token: config.token.clone(),
        }
    }
}

impl GraphqlTransport for GithubGraphqlClient {
    fn request(&self, context: &str, query: &str, variables: Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .header("User-Agent", "codepros-bot")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .with_context(|| format!("GitHub GraphQL request failed for {context}"))?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("GitHub GraphQL Non-200 Response ({status}) for {context}");
        }

        response
            .json()
            .with_context(|| format!("GitHub GraphQL response for {context} is not valid JSON"))
    }
}

//! Run orchestration.
//!
//! A run is a straight line with two early exits: draft pull requests and
//! empty ownership tables stop before any change detection or notification
//! happens, keeping CI runs cheap and PR threads quiet.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use codepros_rs::{OwnershipTable, Resolution, PRO_MARKER};

use crate::changes;
use crate::comment;
use crate::config::Config;
use crate::event::PullRequestContext;
use crate::github::GithubGraphqlClient;

/// The three steps the orchestrator sequences. The production
/// implementation is [`Bot`]; tests substitute recording fakes to assert
/// the early-exit gates never reach further steps.
pub trait Collaborators {
    fn load_ownership(&mut self, excluded_pros: &BTreeSet<String>) -> Result<OwnershipTable>;
    fn changed_files(&mut self, pr: &PullRequestContext) -> Result<BTreeSet<String>>;
    fn notify(
        &mut self,
        pr: &PullRequestContext,
        table: &OwnershipTable,
        resolution: &Resolution,
    ) -> Result<()>;
}

/// How a run ended. Every variant is a success exit; failures propagate as
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    DraftSkipped,
    NoRules,
    Notified,
}

pub fn run(pr: &PullRequestContext, collaborators: &mut dyn Collaborators) -> Result<Outcome> {
    if pr.is_draft {
        info!("pull request is a draft, nothing to do");
        return Ok(Outcome::DraftSkipped);
    }

    let excluded = BTreeSet::from([pro_handle(&pr.author_login)]);
    let table = collaborators.load_ownership(&excluded)?;
    if table.is_empty() {
        info!("no ownership rules configured, nothing to do");
        return Ok(Outcome::NoRules);
    }

    let changed = collaborators.changed_files(pr)?;
    let resolution = table.resolve(&changed);
    info!(
        pros = resolution.pros.len(),
        files = resolution.matched_files.len(),
        "resolved ownership"
    );

    collaborators.notify(pr, &table, &resolution)?;
    Ok(Outcome::Notified)
}

/// The author's CODEPROS handle: payload logins come without the marker,
/// rule tokens always carry it.
fn pro_handle(login: &str) -> String {
    if login.starts_with(PRO_MARKER) {
        login.to_string()
    } else {
        format!("{PRO_MARKER}{login}")
    }
}

/// Production wiring of the three steps: the CODEPROS file on disk, `git`
/// plus the GraphQL API for change detection, and comment reconciliation.
pub struct Bot<'a> {
    pub config: &'a Config,
    pub client: &'a GithubGraphqlClient,
    pub codepros_path: PathBuf,
}

impl Collaborators for Bot<'_> {
    fn load_ownership(&mut self, excluded_pros: &BTreeSet<String>) -> Result<OwnershipTable> {
        Ok(codepros_rs::from_path(&self.codepros_path, excluded_pros)?)
    }

    fn changed_files(&mut self, pr: &PullRequestContext) -> Result<BTreeSet<String>> {
        changes::changed_files(
            self.client,
            &self.config.workspace,
            &pr.node_id,
            &pr.base_sha,
            &pr.head_sha,
        )
    }

    fn notify(
        &mut self,
        pr: &PullRequestContext,
        table: &OwnershipTable,
        resolution: &Resolution,
    ) -> Result<()> {
        comment::reconcile(
            self.client,
            &pr.node_id,
            &table.title,
            &table.message,
            &resolution.pros,
            &resolution.matched_files,
        )
    }
}

#[cfg(test)]
mod tests {
    use codepros_rs::OwnershipRule;

    use super::*;

    #[derive(Default)]
    struct Recording {
        table: OwnershipTable,
        changed: BTreeSet<String>,
        calls: Vec<&'static str>,
        excluded_seen: Option<BTreeSet<String>>,
        notified: Option<Resolution>,
    }

    impl Collaborators for Recording {
        fn load_ownership(&mut self, excluded_pros: &BTreeSet<String>) -> Result<OwnershipTable> {
            self.calls.push("load_ownership");
            self.excluded_seen = Some(excluded_pros.clone());
            Ok(self.table.clone())
        }

        fn changed_files(&mut self, _pr: &PullRequestContext) -> Result<BTreeSet<String>> {
            self.calls.push("changed_files");
            Ok(self.changed.clone())
        }

        fn notify(
            &mut self,
            _pr: &PullRequestContext,
            _table: &OwnershipTable,
            resolution: &Resolution,
        ) -> Result<()> {
            self.calls.push("notify");
            self.notified = Some(resolution.clone());
            Ok(())
        }
    }

    fn pr(is_draft: bool) -> PullRequestContext {
        PullRequestContext {
            is_draft,
            base_sha: "40b282f968ce0593773dc8e10cd1897ebd390114".to_string(),
            head_sha: "8ef970e3b8682ef36bf0bf1586999bafca42231e".to_string(),
            node_id: "MDExOlB1bGxSZXF1ZXN0NjU3NTE0MzY1".to_string(),
            author_login: "pro".to_string(),
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_draft_skips_everything() {
        let mut recording = Recording::default();

        let outcome = run(&pr(true), &mut recording).unwrap();

        assert_eq!(outcome, Outcome::DraftSkipped);
        assert!(recording.calls.is_empty());
    }

    #[test]
    fn test_no_rules_skips_change_detection() {
        let mut recording = Recording::default();

        let outcome = run(&pr(false), &mut recording).unwrap();

        assert_eq!(outcome, Outcome::NoRules);
        assert_eq!(recording.calls, vec!["load_ownership"]);
    }

    #[test]
    fn test_full_flow() {
        let mut recording = Recording {
            table: OwnershipTable {
                title: "Test title".to_string(),
                message: "Test message".to_string(),
                rules: vec![OwnershipRule::new("*", set(&["@pro"]))],
            },
            changed: set(&["main.py"]),
            ..Recording::default()
        };

        let outcome = run(&pr(false), &mut recording).unwrap();

        assert_eq!(outcome, Outcome::Notified);
        assert_eq!(
            recording.calls,
            vec!["load_ownership", "changed_files", "notify"]
        );
        let resolution = recording.notified.unwrap();
        assert_eq!(resolution.pros, set(&["@pro"]));
        assert_eq!(resolution.matched_files, set(&["main.py"]));
    }

    #[test]
    fn test_author_is_excluded_with_marker() {
        let mut recording = Recording::default();

        run(&pr(false), &mut recording).unwrap();

        assert_eq!(recording.excluded_seen.unwrap(), set(&["@pro"]));
    }
}

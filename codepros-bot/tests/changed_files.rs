//! Change-set resolution against a real git repository.
//!
//! Builds a throwaway repo with two commits and diffs them. The fetch step
//! has no remote to talk to here, which the resolver tolerates by design
//! (it logs and diffs the existing checkout).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use serde_json::{json, Value};

use codepros_bot::changes::changed_files;
use codepros_bot::github::GraphqlTransport;

struct CommitCountTransport(u64);

impl GraphqlTransport for CommitCountTransport {
    fn request(&self, _context: &str, _query: &str, _variables: Value) -> Result<Value> {
        Ok(json!({ "data": { "node": { "commits": { "totalCount": self.0 } } } }))
    }
}

fn git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo)
        .args([
            "-c",
            "user.email=bot@example.com",
            "-c",
            "user.name=codepros-bot",
        ])
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_diff_between_two_commits() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();

    git(repo, &["init", "-q"]);
    fs::write(repo.join("main.py"), "print('one')\n").unwrap();
    fs::write(repo.join("untouched.py"), "pass\n").unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", "one"]);
    let base_sha = git(repo, &["rev-parse", "HEAD"]);

    fs::write(repo.join("main.py"), "print('two')\n").unwrap();
    fs::write(repo.join("test_main.py"), "assert True\n").unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", "two"]);
    let head_sha = git(repo, &["rev-parse", "HEAD"]);

    let transport = CommitCountTransport(1);
    let files = changed_files(&transport, repo, "PR_node", &base_sha, &head_sha).unwrap();

    let expected: BTreeSet<String> = ["main.py", "test_main.py"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(files, expected);
}

#[test]
fn test_empty_diff_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();

    git(repo, &["init", "-q"]);
    fs::write(repo.join("main.py"), "print('one')\n").unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", "one"]);
    let sha = git(repo, &["rev-parse", "HEAD"]);

    let transport = CommitCountTransport(1);
    let files = changed_files(&transport, repo, "PR_node", &sha, &sha).unwrap();

    assert!(files.is_empty());
}

#[test]
fn test_unreachable_refs_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path();

    git(repo, &["init", "-q"]);
    fs::write(repo.join("main.py"), "print('one')\n").unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", "one"]);

    let transport = CommitCountTransport(1);
    let err = changed_files(
        &transport,
        repo,
        "PR_node",
        "ffc33a2baaebb4aa1e8ab035f89050b186a2ad36",
        "d51184732797cbf1e3fc39b618e6f1688cc34a03",
    )
    .unwrap_err();

    assert!(err.to_string().contains("git diff"));
}

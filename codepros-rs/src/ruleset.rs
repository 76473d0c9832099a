use std::collections::BTreeSet;

use crate::glob;

/// A single CODEPROS rule: a normalized glob and the pros responsible for
/// paths it matches. The pro set may be empty, either because the rule was
/// written without pros (purely informational) or because every listed pro
/// was excluded at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRule {
    pub glob: String,
    pub pros: BTreeSet<String>,
}

impl OwnershipRule {
    pub fn new(glob: impl Into<String>, pros: BTreeSet<String>) -> Self {
        Self {
            glob: glob.into(),
            pros,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        glob::matches(&self.glob, path)
    }
}

/// The parsed form of a CODEPROS file: optional header text and the rules
/// in file order. Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipTable {
    pub title: String,
    pub message: String,
    pub rules: Vec<OwnershipRule>,
}

impl OwnershipTable {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve which pros are responsible for a set of changed files.
    ///
    /// Every rule is evaluated against every file: multiple rules may claim
    /// the same file and multiple files may be claimed by disjoint rules, so
    /// the union over the whole cross product is the only correct aggregate.
    /// A file matching no rule contributes nothing.
    pub fn resolve(&self, changed_files: &BTreeSet<String>) -> Resolution {
        let mut resolution = Resolution::default();
        for rule in &self.rules {
            for path in changed_files {
                if rule.matches(path) {
                    resolution.pros.extend(rule.pros.iter().cloned());
                    resolution.matched_files.insert(path.clone());
                }
            }
        }
        resolution
    }
}

/// The outcome of resolving an [`OwnershipTable`] against a change-set.
/// Both sets are kept separately: a file can be matched while conferring no
/// pros, and the notifier decides how to report that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub pros: BTreeSet<String>,
    pub matched_files: BTreeSet<String>,
}

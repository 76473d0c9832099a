//! CODEPROS pull request bot.
//!
//! Invoked once per pull-request event from CI: reads the event payload,
//! loads the CODEPROS ownership file, resolves which pros own the changed
//! files, and keeps exactly one summary comment on the pull request up to
//! date.

pub mod changes;
pub mod comment;
pub mod config;
pub mod event;
pub mod github;
pub mod run;

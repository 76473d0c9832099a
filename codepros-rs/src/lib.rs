//! Parsing and resolution for CODEPROS ownership files.
//!
//! A CODEPROS file maps path globs to the "pros" responsible for reviewing
//! changes under them, with optional `TITLE=`/`MESSAGE=` header lines used
//! when reporting. This crate turns that file into an [`OwnershipTable`]
//! and resolves it against a set of changed paths.

pub mod glob;
pub mod parser;
mod ruleset;

use std::{collections::BTreeSet, fs, io, path::Path};

use thiserror::Error;

pub use parser::{ParseError, PRO_MARKER};
pub use ruleset::{OwnershipRule, OwnershipTable, Resolution};

/// Well-known location of the ownership file, relative to the repository
/// root.
pub const CODEPROS_FILE: &str = "CODEPROS";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Load an [`OwnershipTable`] from a CODEPROS file, removing
/// `excluded_pros` from every rule. A missing file is not an error: it
/// yields an empty table, meaning no one owns anything.
pub fn from_path(
    path: impl AsRef<Path>,
    excluded_pros: &BTreeSet<String>,
) -> Result<OwnershipTable, Error> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(parser::parse(&source, excluded_pros)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(OwnershipTable::default()),
        Err(err) => Err(err.into()),
    }
}

//! Entry point for the codepros-bot CI binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codepros_bot::config::Config;
use codepros_bot::event;
use codepros_bot::github::GithubGraphqlClient;
use codepros_bot::run::{self, Bot};
use codepros_rs::CODEPROS_FILE;

#[derive(Parser)]
#[command(version, about = "Comment pull requests with the code pros owning the changed files")]
struct Cli {
    /// Path of the CODEPROS file, relative to the workspace root.
    #[clap(short = 'f', long = "file")]
    codepros_file: Option<PathBuf>,

    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = Config::from_env()?;
    let pr = event::read_event(&config.event_path)?;
    let client = GithubGraphqlClient::new(&config);
    let codepros_path = config
        .workspace
        .join(cli.codepros_file.unwrap_or_else(|| CODEPROS_FILE.into()));

    let mut bot = Bot {
        config: &config,
        client: &client,
        codepros_path,
    };
    let outcome = run::run(&pr, &mut bot)?;
    info!(?outcome, "run finished");
    Ok(())
}

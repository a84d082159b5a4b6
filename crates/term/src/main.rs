//! `notepane` command-line driver.
//!
//! Each invocation hydrates the workspace from the JSON data directory,
//! applies one command, writes back whatever it changed and prints the
//! result. Logs go to stderr.

mod cli;
mod logging;
mod report;
mod run;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Command};
use notepane_config::Config;
use notepane_store::JsonStore;
use notepane_workspace::persist::run_jobs;
use notepane_workspace::{Workspace, WorkspaceOptions};
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let config = Config::discover(cli.config.as_deref()).context("failed to load configuration")?;
	logging::init(&config.log.filter, cli.verbose);

	let data_dir = match cli.data_dir {
		Some(dir) => dir,
		None => config.resolve_data_dir().context("failed to resolve the data directory")?,
	};
	info!(data_dir = %data_dir.display(), "starting");
	let store = JsonStore::new(data_dir);
	let mut ws = Workspace::hydrate(WorkspaceOptions::from(&config), &store).await;

	let report = run::execute(&mut ws, cli.command.unwrap_or(Command::Status))?;

	let jobs = ws.take_persist_jobs();
	debug!(jobs = jobs.len(), "persisting");
	let failed = run_jobs(&store, jobs).await;

	if cli.json {
		println!("{}", serde_json::to_string_pretty(&report).context("failed to encode output")?);
	} else {
		print!("{report}");
	}

	if failed > 0 {
		bail!("{failed} collection write(s) failed under {}", store.root().display());
	}
	Ok(())
}

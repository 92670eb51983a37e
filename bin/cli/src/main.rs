// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod args;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use zupsql::{Result, config::load_dotenv, ledger::LOG_FILE, sub_tracing::TracingBuilder};

use crate::args::Cli;

fn main() -> ExitCode {
	let cli = Cli::parse();

	let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
		Ok(runtime) => runtime,
		Err(err) => {
			eprintln!("error: failed to start the async runtime: {err}");
			return ExitCode::FAILURE;
		}
	};

	match runtime.block_on(run(cli)) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{err}");
			eprintln!("error: {err}");
			ExitCode::from(err.exit_code())
		}
	}
}

async fn run(cli: Cli) -> Result<()> {
	load_dotenv(&cli.work_dir)?;
	TracingBuilder::new().with_log_file(cli.work_dir.join(LOG_FILE)).init()?;

	let config = cli.resolve(|key| std::env::var(key).ok())?;

	let summary = zupsql::run(&config, &cli.options()).await?;
	if let Some(report) = &summary.report {
		let failed = report.failure_count();
		if failed > 0 {
			eprintln!("{failed} statement(s) failed, see {}", cli.work_dir.join(LOG_FILE).display());
		}
	}
	Ok(())
}

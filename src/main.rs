mod app;
mod cli;
mod client;
mod config;
mod context;
mod error;
mod extra;
mod http;
mod output;
mod resource;

use clap::Parser;

use crate::error::CliError;

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let cli = cli::Cli::parse();
	if let Err(err) = app::run(cli).await {
		// Dry-run already printed the request; it is not a failure.
		if matches!(err, CliError::DryRunPrinted) {
			return;
		}
		eprintln!("Error: {err}");
		std::process::exit(err.exit_code());
	}
}

use clap::CommandFactory;

use crate::cli::{Cli, Command};
use crate::error::CliError;

mod api;
mod common;
mod config_cmd;
mod firewall;
mod floatingip;
mod lbaas;
mod network;
mod port;
mod router;
mod security;
mod subnet;

pub async fn run(cli: Cli) -> Result<(), CliError> {
	let Cli { global, command } = cli;

	match command {
		Command::Completion(args) => {
			let mut cmd = Cli::command();
			clap_complete::generate(args.shell, &mut cmd, "neutronctl", &mut std::io::stdout());
			Ok(())
		}
		Command::Config { command } => config_cmd::run(&global, command).await,
		Command::Api { command } => api::run(&global, command).await,
		Command::Net { command } => network::run(&global, command).await,
		Command::Subnet { command } => subnet::run(&global, command).await,
		Command::Port { command } => port::run(&global, command).await,
		Command::Router { command } => router::run(&global, command).await,
		Command::Floatingip { command } => floatingip::run(&global, command).await,
		Command::SecurityGroup { command } => security::run_group(&global, command).await,
		Command::SecurityGroupRule { command } => security::run_rule(&global, command).await,
		Command::FirewallRule { command } => firewall::run_rule(&global, command).await,
		Command::FirewallPolicy { command } => firewall::run_policy(&global, command).await,
		Command::Healthmonitor { command } => lbaas::run(&global, command).await,
	}
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

mod api;
mod completion;
mod config_cmd;
mod firewall;
mod floatingip;
mod lbaas;
mod network;
mod port;
mod router;
mod security;
mod subnet;

pub use api::*;
pub use completion::*;
pub use config_cmd::*;
pub use firewall::*;
pub use floatingip::*;
pub use lbaas::*;
pub use network::*;
pub use port::*;
pub use router::*;
pub use security::*;
pub use subnet::*;

#[derive(Parser, Debug)]
#[command(
	name = "neutronctl",
	version,
	about = "Neutron CLI — manage OpenStack networking resources"
)]
pub struct Cli {
	#[command(flatten)]
	pub global: GlobalOpts,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
	#[arg(long, value_name = "URL", help = "Neutron endpoint URL (OS_URL)")]
	pub os_url: Option<String>,

	#[arg(long, value_name = "TOKEN", help = "Auth token (OS_TOKEN)")]
	pub os_token: Option<String>,

	#[arg(long, value_name = "URL", help = "Keystone auth URL (OS_AUTH_URL)")]
	pub os_auth_url: Option<String>,

	#[arg(long, value_name = "NAME", help = "User name (OS_USERNAME)")]
	pub os_username: Option<String>,

	#[arg(long, value_name = "PASSWORD", help = "Password (OS_PASSWORD)")]
	pub os_password: Option<String>,

	#[arg(long, value_name = "NAME", help = "Tenant name (OS_TENANT_NAME)")]
	pub os_tenant_name: Option<String>,

	#[arg(long, value_name = "NAME", help = "Region name (OS_REGION_NAME)")]
	pub os_region_name: Option<String>,

	#[arg(long, value_name = "PATH", help = "CA certificate bundle (OS_CACERT)")]
	pub os_cacert: Option<PathBuf>,

	#[arg(
		short = 'k',
		long,
		help = "Skip TLS certificate verification (NEUTRONCLIENT_INSECURE)"
	)]
	pub insecure: bool,

	#[arg(long, value_name = "NAME")]
	pub profile: Option<String>,

	#[arg(long, help = "Output JSON (shortcut for --format json)")]
	pub json: bool,

	#[arg(short = 'f', long, value_name = "FORMAT")]
	pub format: Option<OutputFormat>,

	#[arg(short = 'c', long, value_name = "COLUMN", help = "Restrict output to the given columns (repeatable)")]
	pub column: Vec<String>,

	#[arg(long, help = "Only print machine output (no prompts)")]
	pub quiet: bool,

	#[arg(short = 'v', long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	#[arg(long, value_name = "DURATION")]
	pub timeout: Option<String>,

	#[arg(long, value_name = "N")]
	pub retries: Option<u32>,

	#[arg(long, value_name = "BYTES", help = "URI length limit before list filters are chunked")]
	pub max_uri_len: Option<usize>,

	#[arg(long, help = "Print the HTTP request and exit (no network calls)")]
	pub dry_run: bool,

	#[arg(short = 'y', long, help = "Skip confirmation prompts")]
	pub yes: bool,
}

#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	#[default]
	Table,
	Json,
	Yaml,
	Csv,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let value = match self {
			OutputFormat::Table => "table",
			OutputFormat::Json => "json",
			OutputFormat::Yaml => "yaml",
			OutputFormat::Csv => "csv",
		};
		write!(f, "{value}")
	}
}

#[derive(Subcommand, Debug)]
pub enum Command {
	Net {
		#[command(subcommand)]
		command: NetworkCommand,
	},
	Subnet {
		#[command(subcommand)]
		command: SubnetCommand,
	},
	Port {
		#[command(subcommand)]
		command: PortCommand,
	},
	Router {
		#[command(subcommand)]
		command: RouterCommand,
	},
	Floatingip {
		#[command(subcommand)]
		command: FloatingipCommand,
	},
	SecurityGroup {
		#[command(subcommand)]
		command: SecurityGroupCommand,
	},
	SecurityGroupRule {
		#[command(subcommand)]
		command: SecurityGroupRuleCommand,
	},
	FirewallRule {
		#[command(subcommand)]
		command: FirewallRuleCommand,
	},
	FirewallPolicy {
		#[command(subcommand)]
		command: FirewallPolicyCommand,
	},
	Healthmonitor {
		#[command(subcommand)]
		command: HealthmonitorCommand,
	},
	Api {
		#[command(subcommand)]
		command: ApiCommand,
	},
	Config {
		#[command(subcommand)]
		command: ConfigCommand,
	},
	Completion(CompletionArgs),
}

// Shared verb shapes. Every list/create/update command takes trailing
// extra-values-spec tokens after `--`.

#[derive(Args, Debug, Default)]
pub struct ListArgs {
	#[arg(long, value_name = "NAME", help = "Filter by exact name")]
	pub name: Option<String>,

	#[arg(last = true, value_name = "EXTRA", help = "Extra filters: -- --key[=type] value")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
	#[arg(value_name = "RESOURCE", help = "Name or ID")]
	pub resource: String,

	#[arg(long, value_name = "FIELD", help = "Only fetch the given fields (repeatable)")]
	pub fields: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
	#[arg(value_name = "RESOURCE", required = true, help = "Names or IDs (bulk delete)")]
	pub resources: Vec<String>,
}

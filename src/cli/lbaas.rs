use clap::{Args, Subcommand};

// LBaaS v2 health monitors moved from /healthmonitors to /lbaas/healthmonitors
// across API generations; --legacy-path selects the old location.

#[derive(Subcommand, Debug)]
pub enum HealthmonitorCommand {
	List(HealthmonitorListArgs),
	Show(HealthmonitorShowArgs),
	Create(HealthmonitorCreateArgs),
	Update(HealthmonitorUpdateArgs),
	Delete(HealthmonitorDeleteArgs),
}

#[derive(Args, Debug)]
pub struct HealthmonitorListArgs {
	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, help = "Address the pre-LBaaS-v2 resource path")]
	pub legacy_path: bool,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct HealthmonitorShowArgs {
	#[arg(value_name = "MONITOR", help = "ID")]
	pub monitor: String,

	#[arg(long, value_name = "FIELD", help = "Only fetch the given fields (repeatable)")]
	pub fields: Vec<String>,

	#[arg(long, help = "Address the pre-LBaaS-v2 resource path")]
	pub legacy_path: bool,
}

#[derive(Args, Debug)]
pub struct HealthmonitorCreateArgs {
	#[arg(long, value_name = "PING|TCP|HTTP|HTTPS")]
	pub kind: String,

	#[arg(long, value_name = "SECONDS")]
	pub delay: u32,

	#[arg(long = "probe-timeout", value_name = "SECONDS")]
	pub probe_timeout: u32,

	#[arg(long, value_name = "N")]
	pub max_retries: u32,

	#[arg(long, value_name = "POOL")]
	pub pool: Option<String>,

	#[arg(long, help = "Address the pre-LBaaS-v2 resource path")]
	pub legacy_path: bool,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct HealthmonitorUpdateArgs {
	#[arg(value_name = "MONITOR", help = "ID")]
	pub monitor: String,

	#[arg(long, value_name = "SECONDS")]
	pub delay: Option<u32>,

	#[arg(long, value_name = "N")]
	pub max_retries: Option<u32>,

	#[arg(long, help = "Address the pre-LBaaS-v2 resource path")]
	pub legacy_path: bool,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct HealthmonitorDeleteArgs {
	#[arg(value_name = "MONITOR", required = true, help = "IDs (bulk delete)")]
	pub monitors: Vec<String>,

	#[arg(long, help = "Address the pre-LBaaS-v2 resource path")]
	pub legacy_path: bool,
}

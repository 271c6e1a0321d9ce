use clap::{Args, Subcommand};

use super::{DeleteArgs, ListArgs, ShowArgs};

#[derive(Subcommand, Debug)]
pub enum PortCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(PortCreateArgs),
	Update(PortUpdateArgs),
	Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct PortCreateArgs {
	#[arg(value_name = "NETWORK", help = "Parent network name or ID")]
	pub network: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long)]
	pub admin_state_down: bool,

	#[arg(long, value_name = "MAC")]
	pub mac_address: Option<String>,

	#[arg(
		long,
		value_name = "SPEC",
		help = "Fixed IP: subnet_id=<id>,ip_address=<ip> (repeatable)"
	)]
	pub fixed_ip: Vec<String>,

	#[arg(long, value_name = "GROUP", help = "Security group ID (repeatable)")]
	pub security_group: Vec<String>,

	#[arg(long, value_name = "DEVICE")]
	pub device_id: Option<String>,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PortUpdateArgs {
	#[arg(value_name = "PORT", help = "Name or ID")]
	pub port: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, conflicts_with = "admin_state_down")]
	pub admin_state_up: bool,

	#[arg(long, conflicts_with = "admin_state_up")]
	pub admin_state_down: bool,

	#[arg(long, value_name = "GROUP", help = "Replace the security group list (repeatable)")]
	pub security_group: Vec<String>,

	#[arg(long, help = "Clear all security groups from the port")]
	pub no_security_groups: bool,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

use clap::{Args, Subcommand};

use super::{DeleteArgs, ListArgs, ShowArgs};

#[derive(Subcommand, Debug)]
pub enum SubnetCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(SubnetCreateArgs),
	Update(SubnetUpdateArgs),
	Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct SubnetCreateArgs {
	#[arg(value_name = "NETWORK", help = "Parent network name or ID")]
	pub network: String,

	#[arg(value_name = "CIDR")]
	pub cidr: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, value_name = "4|6", default_value_t = 4)]
	pub ip_version: u8,

	#[arg(long, value_name = "IP", conflicts_with = "no_gateway")]
	pub gateway: Option<String>,

	#[arg(long, conflicts_with = "gateway", help = "Create the subnet without a gateway")]
	pub no_gateway: bool,

	#[arg(long, help = "Disable DHCP on the subnet")]
	pub disable_dhcp: bool,

	#[arg(long, value_name = "IP", help = "DNS nameserver (repeatable)")]
	pub dns_nameserver: Vec<String>,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SubnetUpdateArgs {
	#[arg(value_name = "SUBNET", help = "Name or ID")]
	pub subnet: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, value_name = "IP", conflicts_with = "no_gateway")]
	pub gateway: Option<String>,

	#[arg(long, conflicts_with = "gateway")]
	pub no_gateway: bool,

	#[arg(long, value_name = "IP", help = "Replace the DNS nameserver list (repeatable)")]
	pub dns_nameserver: Vec<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

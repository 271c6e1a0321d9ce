use clap::{Args, Subcommand};

use super::{DeleteArgs, ListArgs, ShowArgs};

#[derive(Subcommand, Debug)]
pub enum SecurityGroupCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(SecurityGroupCreateArgs),
	Update(SecurityGroupUpdateArgs),
	Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct SecurityGroupCreateArgs {
	#[arg(value_name = "NAME")]
	pub name: String,

	#[arg(long, value_name = "TEXT")]
	pub description: Option<String>,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SecurityGroupUpdateArgs {
	#[arg(value_name = "GROUP", help = "Name or ID")]
	pub group: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, value_name = "TEXT")]
	pub description: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum SecurityGroupRuleCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(SecurityGroupRuleCreateArgs),
	Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct SecurityGroupRuleCreateArgs {
	#[arg(value_name = "GROUP", help = "Security group name or ID")]
	pub group: String,

	#[arg(long, value_name = "ingress|egress", default_value = "ingress")]
	pub direction: String,

	#[arg(long, value_name = "ETHERTYPE", default_value = "IPv4")]
	pub ethertype: String,

	#[arg(long, value_name = "PROTO", help = "tcp, udp, icmp or a protocol number")]
	pub protocol: Option<String>,

	#[arg(long, value_name = "PORT")]
	pub port_range_min: Option<u16>,

	#[arg(long, value_name = "PORT")]
	pub port_range_max: Option<u16>,

	#[arg(long, value_name = "CIDR", conflicts_with = "remote_group")]
	pub remote_ip_prefix: Option<String>,

	#[arg(long, value_name = "GROUP", conflicts_with = "remote_ip_prefix")]
	pub remote_group: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

use clap::{Args, Subcommand};

use super::{DeleteArgs, ListArgs, ShowArgs};

#[derive(Subcommand, Debug)]
pub enum FloatingipCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(FloatingipCreateArgs),
	Delete(DeleteArgs),
	Associate(FloatingipAssociateArgs),
	Disassociate(FloatingipDisassociateArgs),
}

#[derive(Args, Debug)]
pub struct FloatingipCreateArgs {
	#[arg(value_name = "NETWORK", help = "External network name or ID")]
	pub network: String,

	#[arg(long, value_name = "PORT", help = "Port to associate at creation")]
	pub port: Option<String>,

	#[arg(long, value_name = "IP")]
	pub fixed_ip_address: Option<String>,

	#[arg(long, value_name = "IP")]
	pub floating_ip_address: Option<String>,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct FloatingipAssociateArgs {
	#[arg(value_name = "FLOATINGIP", help = "Floating IP ID")]
	pub floatingip: String,

	#[arg(value_name = "PORT", help = "Port name or ID")]
	pub port: String,

	#[arg(long, value_name = "IP")]
	pub fixed_ip_address: Option<String>,
}

#[derive(Args, Debug)]
pub struct FloatingipDisassociateArgs {
	#[arg(value_name = "FLOATINGIP", help = "Floating IP ID")]
	pub floatingip: String,
}

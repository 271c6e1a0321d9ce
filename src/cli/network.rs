use clap::{Args, Subcommand};

use super::{DeleteArgs, ListArgs, ShowArgs};

#[derive(Subcommand, Debug)]
pub enum NetworkCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(NetworkCreateArgs),
	Update(NetworkUpdateArgs),
	Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct NetworkCreateArgs {
	#[arg(value_name = "NAME")]
	pub name: String,

	#[arg(long, help = "Make the network shared across tenants")]
	pub shared: bool,

	#[arg(long, help = "Create the network administratively down")]
	pub admin_state_down: bool,

	#[arg(long, help = "Make the network external (router:external)")]
	pub external: bool,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct NetworkUpdateArgs {
	#[arg(value_name = "NETWORK", help = "Name or ID")]
	pub network: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, conflicts_with = "no_shared")]
	pub shared: bool,

	#[arg(long, conflicts_with = "shared")]
	pub no_shared: bool,

	#[arg(long, conflicts_with = "admin_state_down")]
	pub admin_state_up: bool,

	#[arg(long, conflicts_with = "admin_state_up")]
	pub admin_state_down: bool,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

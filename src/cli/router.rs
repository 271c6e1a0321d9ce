use clap::{Args, Subcommand};

use super::{DeleteArgs, ListArgs, ShowArgs};

#[derive(Subcommand, Debug)]
pub enum RouterCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(RouterCreateArgs),
	Update(RouterUpdateArgs),
	Delete(DeleteArgs),
	InterfaceAdd(RouterInterfaceArgs),
	InterfaceRemove(RouterInterfaceArgs),
	GatewaySet(RouterGatewaySetArgs),
	GatewayClear(RouterGatewayClearArgs),
}

#[derive(Args, Debug)]
pub struct RouterCreateArgs {
	#[arg(value_name = "NAME")]
	pub name: String,

	#[arg(long)]
	pub admin_state_down: bool,

	#[arg(long, help = "Create a distributed router")]
	pub distributed: bool,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RouterUpdateArgs {
	#[arg(value_name = "ROUTER", help = "Name or ID")]
	pub router: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, conflicts_with = "admin_state_down")]
	pub admin_state_up: bool,

	#[arg(long, conflicts_with = "admin_state_up")]
	pub admin_state_down: bool,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RouterInterfaceArgs {
	#[arg(value_name = "ROUTER", help = "Name or ID")]
	pub router: String,

	#[arg(long, value_name = "SUBNET", conflicts_with = "port")]
	pub subnet: Option<String>,

	#[arg(long, value_name = "PORT", conflicts_with = "subnet")]
	pub port: Option<String>,
}

#[derive(Args, Debug)]
pub struct RouterGatewaySetArgs {
	#[arg(value_name = "ROUTER", help = "Name or ID")]
	pub router: String,

	#[arg(value_name = "NETWORK", help = "External network name or ID")]
	pub network: String,

	#[arg(long, help = "Disable source NAT on the gateway")]
	pub disable_snat: bool,
}

#[derive(Args, Debug)]
pub struct RouterGatewayClearArgs {
	#[arg(value_name = "ROUTER", help = "Name or ID")]
	pub router: String,
}

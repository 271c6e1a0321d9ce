use clap::{Args, Subcommand};

use super::{DeleteArgs, ListArgs, ShowArgs};

#[derive(Subcommand, Debug)]
pub enum FirewallRuleCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(FirewallRuleCreateArgs),
	Update(FirewallRuleUpdateArgs),
	Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct FirewallRuleCreateArgs {
	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, value_name = "allow|deny|reject")]
	pub action: String,

	#[arg(long, value_name = "PROTO", help = "tcp, udp, icmp or any")]
	pub protocol: Option<String>,

	#[arg(long, value_name = "CIDR")]
	pub source_ip_address: Option<String>,

	#[arg(long, value_name = "CIDR")]
	pub destination_ip_address: Option<String>,

	#[arg(long, value_name = "PORT[:PORT]")]
	pub source_port: Option<String>,

	#[arg(long, value_name = "PORT[:PORT]")]
	pub destination_port: Option<String>,

	#[arg(long, help = "Create the rule disabled")]
	pub disabled: bool,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct FirewallRuleUpdateArgs {
	#[arg(value_name = "RULE", help = "Name or ID")]
	pub rule: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, value_name = "allow|deny|reject")]
	pub action: Option<String>,

	#[arg(long, conflicts_with = "disabled")]
	pub enabled: bool,

	#[arg(long, conflicts_with = "enabled")]
	pub disabled: bool,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum FirewallPolicyCommand {
	List(ListArgs),
	Show(ShowArgs),
	Create(FirewallPolicyCreateArgs),
	Update(FirewallPolicyUpdateArgs),
	Delete(DeleteArgs),
	InsertRule(FirewallPolicyInsertRuleArgs),
	RemoveRule(FirewallPolicyRemoveRuleArgs),
}

#[derive(Args, Debug)]
pub struct FirewallPolicyCreateArgs {
	#[arg(value_name = "NAME")]
	pub name: String,

	#[arg(long, value_name = "TEXT")]
	pub description: Option<String>,

	#[arg(long, value_name = "RULE", help = "Initial rule name or ID (repeatable, ordered)")]
	pub firewall_rule: Vec<String>,

	#[arg(long, help = "Audit the policy on creation")]
	pub audited: bool,

	#[arg(long, value_name = "TENANT")]
	pub tenant_id: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct FirewallPolicyUpdateArgs {
	#[arg(value_name = "POLICY", help = "Name or ID")]
	pub policy: String,

	#[arg(long, value_name = "NAME")]
	pub name: Option<String>,

	#[arg(long, value_name = "TEXT")]
	pub description: Option<String>,

	#[arg(last = true, value_name = "EXTRA")]
	pub extra: Vec<String>,
}

#[derive(Args, Debug)]
pub struct FirewallPolicyInsertRuleArgs {
	#[arg(value_name = "POLICY", help = "Name or ID")]
	pub policy: String,

	#[arg(value_name = "RULE", help = "Rule name or ID to insert")]
	pub rule: String,

	#[arg(long, value_name = "RULE", conflicts_with = "insert_before")]
	pub insert_after: Option<String>,

	#[arg(long, value_name = "RULE", conflicts_with = "insert_after")]
	pub insert_before: Option<String>,
}

#[derive(Args, Debug)]
pub struct FirewallPolicyRemoveRuleArgs {
	#[arg(value_name = "POLICY", help = "Name or ID")]
	pub policy: String,

	#[arg(value_name = "RULE", help = "Rule name or ID to remove")]
	pub rule: String,
}

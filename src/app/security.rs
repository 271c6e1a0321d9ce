use serde_json::{json, Map, Value};

use crate::cli::{
	GlobalOpts, SecurityGroupCommand, SecurityGroupCreateArgs, SecurityGroupRuleCommand,
	SecurityGroupRuleCreateArgs, SecurityGroupUpdateArgs,
};
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::resource::{SECURITY_GROUP, SECURITY_GROUP_RULE};

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, run_update,
	set_if_some,
};

pub(super) async fn run_group(
	global: &GlobalOpts,
	command: SecurityGroupCommand,
) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		SecurityGroupCommand::List(args) => {
			run_list(&client, &SECURITY_GROUP, args, global, &effective).await
		}
		SecurityGroupCommand::Show(args) => {
			run_show(&client, &SECURITY_GROUP, &args.resource, &args.fields, global, &effective)
				.await
		}
		SecurityGroupCommand::Create(args) => {
			let attrs = group_create_attrs(&args)?;
			run_create(&client, &SECURITY_GROUP, attrs, global, &effective).await
		}
		SecurityGroupCommand::Update(args) => {
			let attrs = group_update_attrs(&args)?;
			run_update(&client, &SECURITY_GROUP, &args.group, attrs, global, &effective).await
		}
		SecurityGroupCommand::Delete(args) => {
			run_delete(&client, &SECURITY_GROUP, args.resources, global).await
		}
	}
}

pub(super) async fn run_rule(
	global: &GlobalOpts,
	command: SecurityGroupRuleCommand,
) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		SecurityGroupRuleCommand::List(args) => {
			run_list(&client, &SECURITY_GROUP_RULE, args, global, &effective).await
		}
		SecurityGroupRuleCommand::Show(args) => {
			run_show(
				&client,
				&SECURITY_GROUP_RULE,
				&args.resource,
				&args.fields,
				global,
				&effective,
			)
			.await
		}
		SecurityGroupRuleCommand::Create(args) => {
			let group_id = client
				.find_resource_by_name_or_id(&SECURITY_GROUP, &args.group)
				.await?;
			let remote_group_id = match &args.remote_group {
				Some(group) => Some(
					client
						.find_resource_by_name_or_id(&SECURITY_GROUP, group)
						.await?,
				),
				None => None,
			};
			let attrs = rule_create_attrs(&group_id, remote_group_id, &args)?;
			run_create(&client, &SECURITY_GROUP_RULE, attrs, global, &effective).await
		}
		SecurityGroupRuleCommand::Delete(args) => {
			run_delete(&client, &SECURITY_GROUP_RULE, args.resources, global).await
		}
	}
}

fn group_create_attrs(args: &SecurityGroupCreateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	attrs.insert("name".to_string(), json!(args.name));
	set_if_some(&mut attrs, "description", args.description.clone());
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn group_update_attrs(args: &SecurityGroupUpdateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	set_if_some(&mut attrs, "description", args.description.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn rule_create_attrs(
	group_id: &str,
	remote_group_id: Option<String>,
	args: &SecurityGroupRuleCreateArgs,
) -> Result<Map<String, Value>, CliError> {
	let direction = args.direction.to_ascii_lowercase();
	if direction != "ingress" && direction != "egress" {
		return Err(CliError::InvalidArgument(format!(
			"invalid direction '{}' (expected ingress or egress)",
			args.direction
		)));
	}

	let mut attrs = Map::new();
	attrs.insert("security_group_id".to_string(), json!(group_id));
	attrs.insert("direction".to_string(), json!(direction));
	attrs.insert("ethertype".to_string(), json!(args.ethertype));
	set_if_some(&mut attrs, "protocol", args.protocol.clone());
	if let Some(min) = args.port_range_min {
		attrs.insert("port_range_min".to_string(), json!(min));
	}
	if let Some(max) = args.port_range_max {
		attrs.insert("port_range_max".to_string(), json!(max));
	}
	set_if_some(&mut attrs, "remote_ip_prefix", args.remote_ip_prefix.clone());
	set_if_some(&mut attrs, "remote_group_id", remote_group_id);

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_rule() -> SecurityGroupRuleCreateArgs {
		SecurityGroupRuleCreateArgs {
			group: "web".to_string(),
			direction: "ingress".to_string(),
			ethertype: "IPv4".to_string(),
			protocol: None,
			port_range_min: None,
			port_range_max: None,
			remote_ip_prefix: None,
			remote_group: None,
			extra: Vec::new(),
		}
	}

	#[test]
	fn tcp_rule_carries_port_range() {
		let mut args = base_rule();
		args.protocol = Some("tcp".to_string());
		args.port_range_min = Some(80);
		args.port_range_max = Some(443);
		args.remote_ip_prefix = Some("0.0.0.0/0".to_string());

		let attrs = rule_create_attrs("sg-1", None, &args).unwrap();
		assert_eq!(
			Value::Object(attrs),
			json!({
				"security_group_id": "sg-1",
				"direction": "ingress",
				"ethertype": "IPv4",
				"protocol": "tcp",
				"port_range_min": 80,
				"port_range_max": 443,
				"remote_ip_prefix": "0.0.0.0/0",
			})
		);
	}

	#[test]
	fn direction_is_validated() {
		let mut args = base_rule();
		args.direction = "sideways".to_string();
		assert!(matches!(
			rule_create_attrs("sg-1", None, &args),
			Err(CliError::InvalidArgument(_))
		));
	}

	#[test]
	fn remote_group_resolution_lands_in_the_body() {
		let args = base_rule();
		let attrs = rule_create_attrs("sg-1", Some("sg-2".to_string()), &args).unwrap();
		assert_eq!(attrs["remote_group_id"], json!("sg-2"));
	}
}

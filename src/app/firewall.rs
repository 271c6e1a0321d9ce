use serde_json::{json, Map, Value};

use crate::cli::{
	FirewallPolicyCommand, FirewallPolicyCreateArgs, FirewallPolicyUpdateArgs,
	FirewallRuleCommand, FirewallRuleCreateArgs, FirewallRuleUpdateArgs, GlobalOpts,
};
use crate::client::NeutronClient;
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::output;
use crate::resource::{FIREWALL_POLICY, FIREWALL_RULE};

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, run_update,
	set_if_some,
};

pub(super) async fn run_rule(
	global: &GlobalOpts,
	command: FirewallRuleCommand,
) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		FirewallRuleCommand::List(args) => {
			run_list(&client, &FIREWALL_RULE, args, global, &effective).await
		}
		FirewallRuleCommand::Show(args) => {
			run_show(&client, &FIREWALL_RULE, &args.resource, &args.fields, global, &effective)
				.await
		}
		FirewallRuleCommand::Create(args) => {
			let attrs = rule_create_attrs(&args)?;
			run_create(&client, &FIREWALL_RULE, attrs, global, &effective).await
		}
		FirewallRuleCommand::Update(args) => {
			let attrs = rule_update_attrs(&args)?;
			run_update(&client, &FIREWALL_RULE, &args.rule, attrs, global, &effective).await
		}
		FirewallRuleCommand::Delete(args) => {
			run_delete(&client, &FIREWALL_RULE, args.resources, global).await
		}
	}
}

pub(super) async fn run_policy(
	global: &GlobalOpts,
	command: FirewallPolicyCommand,
) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		FirewallPolicyCommand::List(args) => {
			run_list(&client, &FIREWALL_POLICY, args, global, &effective).await
		}
		FirewallPolicyCommand::Show(args) => {
			run_show(&client, &FIREWALL_POLICY, &args.resource, &args.fields, global, &effective)
				.await
		}
		FirewallPolicyCommand::Create(args) => {
			let mut rule_ids = Vec::with_capacity(args.firewall_rule.len());
			for rule in &args.firewall_rule {
				rule_ids.push(
					client
						.find_resource_by_name_or_id(&FIREWALL_RULE, rule)
						.await?,
				);
			}
			let attrs = policy_create_attrs(rule_ids, &args)?;
			run_create(&client, &FIREWALL_POLICY, attrs, global, &effective).await
		}
		FirewallPolicyCommand::Update(args) => {
			let attrs = policy_update_attrs(&args)?;
			run_update(&client, &FIREWALL_POLICY, &args.policy, attrs, global, &effective).await
		}
		FirewallPolicyCommand::Delete(args) => {
			run_delete(&client, &FIREWALL_POLICY, args.resources, global).await
		}
		FirewallPolicyCommand::InsertRule(args) => {
			let policy_id = client
				.find_resource_by_name_or_id(&FIREWALL_POLICY, &args.policy)
				.await?;
			let rule_id = client
				.find_resource_by_name_or_id(&FIREWALL_RULE, &args.rule)
				.await?;
			// The API wants both anchors present, empty when unused.
			let insert_after = resolve_anchor(&client, args.insert_after.as_deref()).await?;
			let insert_before = resolve_anchor(&client, args.insert_before.as_deref()).await?;

			let body = json!({
				"firewall_rule_id": rule_id,
				"insert_after": insert_after,
				"insert_before": insert_before,
			});
			let result = client
				.put_action(&FIREWALL_POLICY, &policy_id, "insert_rule", body)
				.await?;
			output::print_item(&result, &global.column, effective.format)
		}
		FirewallPolicyCommand::RemoveRule(args) => {
			let policy_id = client
				.find_resource_by_name_or_id(&FIREWALL_POLICY, &args.policy)
				.await?;
			let rule_id = client
				.find_resource_by_name_or_id(&FIREWALL_RULE, &args.rule)
				.await?;

			let body = json!({"firewall_rule_id": rule_id});
			let result = client
				.put_action(&FIREWALL_POLICY, &policy_id, "remove_rule", body)
				.await?;
			output::print_item(&result, &global.column, effective.format)
		}
	}
}

async fn resolve_anchor(
	client: &NeutronClient,
	anchor: Option<&str>,
) -> Result<String, CliError> {
	match anchor {
		Some(rule) => client.find_resource_by_name_or_id(&FIREWALL_RULE, rule).await,
		None => Ok(String::new()),
	}
}

fn rule_create_attrs(args: &FirewallRuleCreateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	attrs.insert("action".to_string(), json!(validate_action(&args.action)?));
	// "any" means no protocol constraint on the wire.
	match args.protocol.as_deref() {
		Some("any") => {
			attrs.insert("protocol".to_string(), Value::Null);
		}
		Some(proto) => {
			attrs.insert("protocol".to_string(), json!(proto));
		}
		None => {}
	}
	set_if_some(&mut attrs, "source_ip_address", args.source_ip_address.clone());
	set_if_some(
		&mut attrs,
		"destination_ip_address",
		args.destination_ip_address.clone(),
	);
	set_if_some(&mut attrs, "source_port", args.source_port.clone());
	set_if_some(&mut attrs, "destination_port", args.destination_port.clone());
	if args.disabled {
		attrs.insert("enabled".to_string(), json!(false));
	}
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn rule_update_attrs(args: &FirewallRuleUpdateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	if let Some(action) = &args.action {
		attrs.insert("action".to_string(), json!(validate_action(action)?));
	}
	if args.enabled {
		attrs.insert("enabled".to_string(), json!(true));
	}
	if args.disabled {
		attrs.insert("enabled".to_string(), json!(false));
	}

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn policy_create_attrs(
	rule_ids: Vec<String>,
	args: &FirewallPolicyCreateArgs,
) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	attrs.insert("name".to_string(), json!(args.name));
	set_if_some(&mut attrs, "description", args.description.clone());
	if !rule_ids.is_empty() {
		attrs.insert("firewall_rules".to_string(), json!(rule_ids));
	}
	if args.audited {
		attrs.insert("audited".to_string(), json!(true));
	}
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn policy_update_attrs(args: &FirewallPolicyUpdateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	set_if_some(&mut attrs, "description", args.description.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn validate_action(action: &str) -> Result<String, CliError> {
	let action = action.to_ascii_lowercase();
	match action.as_str() {
		"allow" | "deny" | "reject" => Ok(action),
		_ => Err(CliError::InvalidArgument(format!(
			"invalid firewall action '{action}' (expected allow, deny or reject)"
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_rule() -> FirewallRuleCreateArgs {
		FirewallRuleCreateArgs {
			name: None,
			action: "allow".to_string(),
			protocol: None,
			source_ip_address: None,
			destination_ip_address: None,
			source_port: None,
			destination_port: None,
			disabled: false,
			tenant_id: None,
			extra: Vec::new(),
		}
	}

	#[test]
	fn any_protocol_becomes_null() {
		let mut args = base_rule();
		args.protocol = Some("any".to_string());
		let attrs = rule_create_attrs(&args).unwrap();
		assert_eq!(attrs["protocol"], Value::Null);
	}

	#[test]
	fn action_is_case_insensitive_but_checked() {
		assert_eq!(validate_action("ALLOW").unwrap(), "allow");
		assert!(validate_action("drop").is_err());
	}

	#[test]
	fn policy_create_keeps_rule_order() {
		let args = FirewallPolicyCreateArgs {
			name: "edge".to_string(),
			description: None,
			firewall_rule: vec!["a".to_string(), "b".to_string()],
			audited: true,
			tenant_id: None,
			extra: Vec::new(),
		};
		let attrs =
			policy_create_attrs(vec!["id-a".to_string(), "id-b".to_string()], &args).unwrap();
		assert_eq!(attrs["firewall_rules"], json!(["id-a", "id-b"]));
		assert_eq!(attrs["audited"], json!(true));
	}

	#[test]
	fn disabled_rule_sends_enabled_false() {
		let mut args = base_rule();
		args.disabled = true;
		let attrs = rule_create_attrs(&args).unwrap();
		assert_eq!(attrs["enabled"], json!(false));
	}
}

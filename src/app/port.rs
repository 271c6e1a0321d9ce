use serde_json::{json, Map, Value};

use crate::cli::{GlobalOpts, PortCommand, PortCreateArgs, PortUpdateArgs};
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::resource::{NETWORK, PORT};

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, run_update,
	set_if_some,
};

pub(super) async fn run(global: &GlobalOpts, command: PortCommand) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		PortCommand::List(args) => run_list(&client, &PORT, args, global, &effective).await,
		PortCommand::Show(args) => {
			run_show(&client, &PORT, &args.resource, &args.fields, global, &effective).await
		}
		PortCommand::Create(args) => {
			let network_id = client
				.find_resource_by_name_or_id(&NETWORK, &args.network)
				.await?;
			let attrs = create_attrs(&network_id, &args)?;
			run_create(&client, &PORT, attrs, global, &effective).await
		}
		PortCommand::Update(args) => {
			let attrs = update_attrs(&args)?;
			run_update(&client, &PORT, &args.port, attrs, global, &effective).await
		}
		PortCommand::Delete(args) => run_delete(&client, &PORT, args.resources, global).await,
	}
}

fn create_attrs(network_id: &str, args: &PortCreateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	attrs.insert("network_id".to_string(), json!(network_id));
	set_if_some(&mut attrs, "name", args.name.clone());
	if args.admin_state_down {
		attrs.insert("admin_state_up".to_string(), json!(false));
	}
	set_if_some(&mut attrs, "mac_address", args.mac_address.clone());
	if !args.fixed_ip.is_empty() {
		let fixed_ips = args
			.fixed_ip
			.iter()
			.map(|spec| extra::parse_kv_object("fixed-ip", spec))
			.collect::<Result<Vec<Value>, CliError>>()?;
		attrs.insert("fixed_ips".to_string(), Value::Array(fixed_ips));
	}
	if !args.security_group.is_empty() {
		attrs.insert("security_groups".to_string(), json!(args.security_group));
	}
	set_if_some(&mut attrs, "device_id", args.device_id.clone());
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn update_attrs(args: &PortUpdateArgs) -> Result<Map<String, Value>, CliError> {
	if args.no_security_groups && !args.security_group.is_empty() {
		return Err(CliError::InvalidArgument(
			"--no-security-groups cannot be combined with --security-group".to_string(),
		));
	}

	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	if args.admin_state_up {
		attrs.insert("admin_state_up".to_string(), json!(true));
	}
	if args.admin_state_down {
		attrs.insert("admin_state_up".to_string(), json!(false));
	}
	if args.no_security_groups {
		attrs.insert("security_groups".to_string(), json!([]));
	} else if !args.security_group.is_empty() {
		attrs.insert("security_groups".to_string(), json!(args.security_group));
	}

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_create() -> PortCreateArgs {
		PortCreateArgs {
			network: "net1".to_string(),
			name: None,
			admin_state_down: false,
			mac_address: None,
			fixed_ip: Vec::new(),
			security_group: Vec::new(),
			device_id: None,
			tenant_id: None,
			extra: Vec::new(),
		}
	}

	#[test]
	fn fixed_ip_specs_become_objects() {
		let mut args = base_create();
		args.fixed_ip = vec!["subnet_id=sub1,ip_address=10.0.0.5".to_string()];
		let attrs = create_attrs("n1", &args).unwrap();
		assert_eq!(
			attrs["fixed_ips"],
			json!([{"subnet_id": "sub1", "ip_address": "10.0.0.5"}])
		);
	}

	#[test]
	fn malformed_fixed_ip_is_rejected() {
		let mut args = base_create();
		args.fixed_ip = vec!["subnet_id".to_string()];
		assert!(matches!(
			create_attrs("n1", &args),
			Err(CliError::InvalidArgument(_))
		));
	}

	#[test]
	fn no_security_groups_clears_the_list() {
		let args = PortUpdateArgs {
			port: "p1".to_string(),
			name: None,
			admin_state_up: false,
			admin_state_down: false,
			security_group: Vec::new(),
			no_security_groups: true,
			extra: Vec::new(),
		};
		let attrs = update_attrs(&args).unwrap();
		assert_eq!(attrs["security_groups"], json!([]));
	}

	#[test]
	fn clearing_and_replacing_groups_conflict() {
		let args = PortUpdateArgs {
			port: "p1".to_string(),
			name: None,
			admin_state_up: false,
			admin_state_down: false,
			security_group: vec!["sg1".to_string()],
			no_security_groups: true,
			extra: Vec::new(),
		};
		assert!(matches!(
			update_attrs(&args),
			Err(CliError::InvalidArgument(_))
		));
	}
}

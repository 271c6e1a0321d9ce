use serde_json::{json, Map, Value};

use crate::cli::{GlobalOpts, SubnetCommand, SubnetCreateArgs, SubnetUpdateArgs};
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::resource::{NETWORK, SUBNET};

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, run_update,
	set_if_some,
};

pub(super) async fn run(global: &GlobalOpts, command: SubnetCommand) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		SubnetCommand::List(args) => run_list(&client, &SUBNET, args, global, &effective).await,
		SubnetCommand::Show(args) => {
			run_show(&client, &SUBNET, &args.resource, &args.fields, global, &effective).await
		}
		SubnetCommand::Create(args) => {
			let network_id = client
				.find_resource_by_name_or_id(&NETWORK, &args.network)
				.await?;
			let attrs = create_attrs(&network_id, &args)?;
			run_create(&client, &SUBNET, attrs, global, &effective).await
		}
		SubnetCommand::Update(args) => {
			let attrs = update_attrs(&args)?;
			run_update(&client, &SUBNET, &args.subnet, attrs, global, &effective).await
		}
		SubnetCommand::Delete(args) => run_delete(&client, &SUBNET, args.resources, global).await,
	}
}

fn create_attrs(network_id: &str, args: &SubnetCreateArgs) -> Result<Map<String, Value>, CliError> {
	if args.ip_version != 4 && args.ip_version != 6 {
		return Err(CliError::InvalidArgument(format!(
			"invalid ip version '{}' (expected 4 or 6)",
			args.ip_version
		)));
	}

	let mut attrs = Map::new();
	attrs.insert("network_id".to_string(), json!(network_id));
	attrs.insert("cidr".to_string(), json!(args.cidr));
	attrs.insert("ip_version".to_string(), json!(args.ip_version));
	set_if_some(&mut attrs, "name", args.name.clone());
	if args.no_gateway {
		attrs.insert("gateway_ip".to_string(), Value::Null);
	} else {
		set_if_some(&mut attrs, "gateway_ip", args.gateway.clone());
	}
	if args.disable_dhcp {
		attrs.insert("enable_dhcp".to_string(), json!(false));
	}
	if !args.dns_nameserver.is_empty() {
		attrs.insert("dns_nameservers".to_string(), json!(args.dns_nameserver));
	}
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn update_attrs(args: &SubnetUpdateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	if args.no_gateway {
		attrs.insert("gateway_ip".to_string(), Value::Null);
	} else {
		set_if_some(&mut attrs, "gateway_ip", args.gateway.clone());
	}
	if !args.dns_nameserver.is_empty() {
		attrs.insert("dns_nameservers".to_string(), json!(args.dns_nameserver));
	}

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_create() -> SubnetCreateArgs {
		SubnetCreateArgs {
			network: "net1".to_string(),
			cidr: "10.0.0.0/24".to_string(),
			name: None,
			ip_version: 4,
			gateway: None,
			no_gateway: false,
			disable_dhcp: false,
			dns_nameserver: Vec::new(),
			tenant_id: None,
			extra: Vec::new(),
		}
	}

	#[test]
	fn create_carries_network_id_and_cidr() {
		let attrs = create_attrs("abc-123", &base_create()).unwrap();
		assert_eq!(
			Value::Object(attrs),
			json!({"network_id": "abc-123", "cidr": "10.0.0.0/24", "ip_version": 4})
		);
	}

	#[test]
	fn no_gateway_sends_an_explicit_null() {
		let mut args = base_create();
		args.no_gateway = true;
		let attrs = create_attrs("abc", &args).unwrap();
		assert_eq!(attrs["gateway_ip"], Value::Null);
	}

	#[test]
	fn rejects_bad_ip_version() {
		let mut args = base_create();
		args.ip_version = 5;
		assert!(matches!(
			create_attrs("abc", &args),
			Err(CliError::InvalidArgument(_))
		));
	}

	#[test]
	fn update_replaces_nameserver_list() {
		let args = SubnetUpdateArgs {
			subnet: "s1".to_string(),
			name: None,
			gateway: None,
			no_gateway: false,
			dns_nameserver: vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()],
			extra: Vec::new(),
		};
		let attrs = update_attrs(&args).unwrap();
		assert_eq!(attrs["dns_nameservers"], json!(["8.8.8.8", "1.1.1.1"]));
	}
}

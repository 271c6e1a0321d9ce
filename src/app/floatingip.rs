use serde_json::{json, Map, Value};

use crate::cli::{FloatingipCommand, FloatingipCreateArgs, GlobalOpts};
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::output;
use crate::resource::{FLOATINGIP, NETWORK, PORT};

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, set_if_some,
};

pub(super) async fn run(global: &GlobalOpts, command: FloatingipCommand) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		FloatingipCommand::List(args) => {
			run_list(&client, &FLOATINGIP, args, global, &effective).await
		}
		FloatingipCommand::Show(args) => {
			run_show(&client, &FLOATINGIP, &args.resource, &args.fields, global, &effective).await
		}
		FloatingipCommand::Create(args) => {
			let network_id = client
				.find_resource_by_name_or_id(&NETWORK, &args.network)
				.await?;
			let port_id = match &args.port {
				Some(port) => Some(client.find_resource_by_name_or_id(&PORT, port).await?),
				None => None,
			};
			let attrs = create_attrs(&network_id, port_id, &args)?;
			run_create(&client, &FLOATINGIP, attrs, global, &effective).await
		}
		FloatingipCommand::Delete(args) => {
			run_delete(&client, &FLOATINGIP, args.resources, global).await
		}
		FloatingipCommand::Associate(args) => {
			let fip_id = client
				.find_resource_by_name_or_id(&FLOATINGIP, &args.floatingip)
				.await?;
			let port_id = client.find_resource_by_name_or_id(&PORT, &args.port).await?;

			let mut attrs = Map::new();
			attrs.insert("port_id".to_string(), json!(port_id));
			set_if_some(&mut attrs, "fixed_ip_address", args.fixed_ip_address);

			let item = client.update(&FLOATINGIP, &fip_id, attrs).await?;
			output::print_item(&item, &global.column, effective.format)
		}
		FloatingipCommand::Disassociate(args) => {
			let fip_id = client
				.find_resource_by_name_or_id(&FLOATINGIP, &args.floatingip)
				.await?;

			let mut attrs = Map::new();
			attrs.insert("port_id".to_string(), Value::Null);

			let item = client.update(&FLOATINGIP, &fip_id, attrs).await?;
			output::print_item(&item, &global.column, effective.format)
		}
	}
}

fn create_attrs(
	network_id: &str,
	port_id: Option<String>,
	args: &FloatingipCreateArgs,
) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	attrs.insert("floating_network_id".to_string(), json!(network_id));
	set_if_some(&mut attrs, "port_id", port_id);
	set_if_some(&mut attrs, "fixed_ip_address", args.fixed_ip_address.clone());
	set_if_some(
		&mut attrs,
		"floating_ip_address",
		args.floating_ip_address.clone(),
	);
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn create_targets_the_external_network() {
		let args = FloatingipCreateArgs {
			network: "ext-net".to_string(),
			port: None,
			fixed_ip_address: None,
			floating_ip_address: None,
			tenant_id: None,
			extra: Vec::new(),
		};
		let attrs = create_attrs("net-9", None, &args).unwrap();
		assert_eq!(Value::Object(attrs), json!({"floating_network_id": "net-9"}));
	}

	#[test]
	fn create_with_port_associates_immediately() {
		let args = FloatingipCreateArgs {
			network: "ext-net".to_string(),
			port: Some("web".to_string()),
			fixed_ip_address: Some("10.0.0.5".to_string()),
			floating_ip_address: None,
			tenant_id: None,
			extra: Vec::new(),
		};
		let attrs = create_attrs("net-9", Some("port-1".to_string()), &args).unwrap();
		assert_eq!(
			Value::Object(attrs),
			json!({
				"floating_network_id": "net-9",
				"port_id": "port-1",
				"fixed_ip_address": "10.0.0.5",
			})
		);
	}
}

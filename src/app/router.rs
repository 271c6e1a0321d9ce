use serde_json::{json, Map, Value};

use crate::cli::{
	GlobalOpts, RouterCommand, RouterCreateArgs, RouterInterfaceArgs, RouterUpdateArgs,
};
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::output;
use crate::resource::{NETWORK, PORT, ROUTER, SUBNET};

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, run_update,
	set_if_some,
};

pub(super) async fn run(global: &GlobalOpts, command: RouterCommand) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		RouterCommand::List(args) => run_list(&client, &ROUTER, args, global, &effective).await,
		RouterCommand::Show(args) => {
			run_show(&client, &ROUTER, &args.resource, &args.fields, global, &effective).await
		}
		RouterCommand::Create(args) => {
			let attrs = create_attrs(&args)?;
			run_create(&client, &ROUTER, attrs, global, &effective).await
		}
		RouterCommand::Update(args) => {
			let attrs = update_attrs(&args)?;
			run_update(&client, &ROUTER, &args.router, attrs, global, &effective).await
		}
		RouterCommand::Delete(args) => run_delete(&client, &ROUTER, args.resources, global).await,
		RouterCommand::InterfaceAdd(args) => {
			run_interface(&client, args, "add_router_interface", global, &effective).await
		}
		RouterCommand::InterfaceRemove(args) => {
			run_interface(&client, args, "remove_router_interface", global, &effective).await
		}
		RouterCommand::GatewaySet(args) => {
			let router_id = client
				.find_resource_by_name_or_id(&ROUTER, &args.router)
				.await?;
			let network_id = client
				.find_resource_by_name_or_id(&NETWORK, &args.network)
				.await?;

			let mut gateway = Map::new();
			gateway.insert("network_id".to_string(), json!(network_id));
			if args.disable_snat {
				gateway.insert("enable_snat".to_string(), json!(false));
			}

			let mut attrs = Map::new();
			attrs.insert(
				"external_gateway_info".to_string(),
				Value::Object(gateway),
			);
			let item = client.update(&ROUTER, &router_id, attrs).await?;
			output::print_item(&item, &global.column, effective.format)
		}
		RouterCommand::GatewayClear(args) => {
			let router_id = client
				.find_resource_by_name_or_id(&ROUTER, &args.router)
				.await?;

			let mut attrs = Map::new();
			attrs.insert("external_gateway_info".to_string(), Value::Null);
			let item = client.update(&ROUTER, &router_id, attrs).await?;
			output::print_item(&item, &global.column, effective.format)
		}
	}
}

async fn run_interface(
	client: &crate::client::NeutronClient,
	args: RouterInterfaceArgs,
	action: &str,
	global: &GlobalOpts,
	effective: &crate::context::EffectiveConfig,
) -> Result<(), CliError> {
	let router_id = client
		.find_resource_by_name_or_id(&ROUTER, &args.router)
		.await?;

	let body = match (&args.subnet, &args.port) {
		(Some(subnet), None) => {
			let subnet_id = client.find_resource_by_name_or_id(&SUBNET, subnet).await?;
			json!({"subnet_id": subnet_id})
		}
		(None, Some(port)) => {
			let port_id = client.find_resource_by_name_or_id(&PORT, port).await?;
			json!({"port_id": port_id})
		}
		_ => {
			return Err(CliError::InvalidArgument(
				"pass exactly one of --subnet or --port".to_string(),
			))
		}
	};

	let result = client.put_action(&ROUTER, &router_id, action, body).await?;
	output::print_item(&result, &global.column, effective.format)
}

fn create_attrs(args: &RouterCreateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	attrs.insert("name".to_string(), json!(args.name));
	if args.admin_state_down {
		attrs.insert("admin_state_up".to_string(), json!(false));
	}
	if args.distributed {
		attrs.insert("distributed".to_string(), json!(true));
	}
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn update_attrs(args: &RouterUpdateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	if args.admin_state_up {
		attrs.insert("admin_state_up".to_string(), json!(true));
	}
	if args.admin_state_down {
		attrs.insert("admin_state_up".to_string(), json!(false));
	}

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distributed_create_sets_the_flag() {
		let args = RouterCreateArgs {
			name: "edge".to_string(),
			admin_state_down: false,
			distributed: true,
			tenant_id: None,
			extra: Vec::new(),
		};
		let attrs = create_attrs(&args).unwrap();
		assert_eq!(
			Value::Object(attrs),
			json!({"name": "edge", "distributed": true})
		);
	}

	#[test]
	fn update_with_only_admin_state() {
		let args = RouterUpdateArgs {
			router: "r1".to_string(),
			name: None,
			admin_state_up: true,
			admin_state_down: false,
			extra: Vec::new(),
		};
		let attrs = update_attrs(&args).unwrap();
		assert_eq!(Value::Object(attrs), json!({"admin_state_up": true}));
	}
}

use serde_json::{json, Map, Value};

use crate::cli::{GlobalOpts, NetworkCommand, NetworkCreateArgs, NetworkUpdateArgs};
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::resource::NETWORK;

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, run_update,
	set_if_some,
};

pub(super) async fn run(global: &GlobalOpts, command: NetworkCommand) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		NetworkCommand::List(args) => run_list(&client, &NETWORK, args, global, &effective).await,
		NetworkCommand::Show(args) => {
			run_show(&client, &NETWORK, &args.resource, &args.fields, global, &effective).await
		}
		NetworkCommand::Create(args) => {
			let attrs = create_attrs(&args)?;
			run_create(&client, &NETWORK, attrs, global, &effective).await
		}
		NetworkCommand::Update(args) => {
			let attrs = update_attrs(&args)?;
			run_update(&client, &NETWORK, &args.network, attrs, global, &effective).await
		}
		NetworkCommand::Delete(args) => {
			run_delete(&client, &NETWORK, args.resources, global).await
		}
	}
}

fn create_attrs(args: &NetworkCreateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	attrs.insert("name".to_string(), json!(args.name));
	if args.shared {
		attrs.insert("shared".to_string(), json!(true));
	}
	if args.admin_state_down {
		attrs.insert("admin_state_up".to_string(), json!(false));
	}
	if args.external {
		attrs.insert("router:external".to_string(), json!(true));
	}
	set_if_some(&mut attrs, "tenant_id", args.tenant_id.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn update_attrs(args: &NetworkUpdateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	set_if_some(&mut attrs, "name", args.name.clone());
	if args.shared {
		attrs.insert("shared".to_string(), json!(true));
	}
	if args.no_shared {
		attrs.insert("shared".to_string(), json!(false));
	}
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

	fn base_create(name: &str) -> NetworkCreateArgs {
		NetworkCreateArgs {
			name: name.to_string(),
			shared: false,
			admin_state_down: false,
			external: false,
			tenant_id: None,
			extra: Vec::new(),
		}
	}

	#[test]
	fn shared_create_body_matches_api_shape() {
		let mut args = base_create("foo");
		args.shared = true;
		let attrs = create_attrs(&args).unwrap();
		assert_eq!(Value::Object(attrs), json!({"name": "foo", "shared": true}));
	}

	#[test]
	fn plain_create_sends_only_the_name() {
		let attrs = create_attrs(&base_create("bar")).unwrap();
		assert_eq!(Value::Object(attrs), json!({"name": "bar"}));
	}

	#[test]
	fn extras_land_beside_typed_flags() {
		let mut args = base_create("foo");
		args.extra = vec![
			"--mtu".to_string(),
			"type=int".to_string(),
			"1450".to_string(),
		];
		let attrs = create_attrs(&args).unwrap();
		assert_eq!(Value::Object(attrs), json!({"name": "foo", "mtu": 1450}));
	}

	#[test]
	fn update_admin_state_flags_set_the_bool() {
		let args = NetworkUpdateArgs {
			network: "net1".to_string(),
			name: None,
			shared: false,
			no_shared: true,
			admin_state_up: false,
			admin_state_down: true,
			extra: Vec::new(),
		};
		let attrs = update_attrs(&args).unwrap();
		assert_eq!(
			Value::Object(attrs),
			json!({"shared": false, "admin_state_up": false})
		);
	}
}

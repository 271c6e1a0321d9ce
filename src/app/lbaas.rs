use serde_json::{json, Map, Value};

use crate::cli::{
	GlobalOpts, HealthmonitorCommand, HealthmonitorCreateArgs, HealthmonitorUpdateArgs,
	ListArgs,
};
use crate::context::resolve_effective_config;
use crate::error::CliError;
use crate::extra;
use crate::resource::{ResourceSpec, HEALTHMONITOR};

use super::common::{
	build_client, load_config_store, run_create, run_delete, run_list, run_show, run_update,
	set_if_some,
};

const MONITOR_KINDS: [&str; 4] = ["PING", "TCP", "HTTP", "HTTPS"];

fn monitor_spec(legacy_path: bool) -> ResourceSpec {
	if legacy_path {
		HEALTHMONITOR.shadowed()
	} else {
		HEALTHMONITOR
	}
}

pub(super) async fn run(
	global: &GlobalOpts,
	command: HealthmonitorCommand,
) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		HealthmonitorCommand::List(args) => {
			let spec = monitor_spec(args.legacy_path);
			let list_args = ListArgs {
				name: args.name,
				extra: args.extra,
			};
			run_list(&client, &spec, list_args, global, &effective).await
		}
		HealthmonitorCommand::Show(args) => {
			let spec = monitor_spec(args.legacy_path);
			run_show(&client, &spec, &args.monitor, &args.fields, global, &effective).await
		}
		HealthmonitorCommand::Create(args) => {
			let spec = monitor_spec(args.legacy_path);
			let attrs = create_attrs(&args)?;
			run_create(&client, &spec, attrs, global, &effective).await
		}
		HealthmonitorCommand::Update(args) => {
			let spec = monitor_spec(args.legacy_path);
			let attrs = update_attrs(&args)?;
			run_update(&client, &spec, &args.monitor, attrs, global, &effective).await
		}
		HealthmonitorCommand::Delete(args) => {
			let spec = monitor_spec(args.legacy_path);
			run_delete(&client, &spec, args.monitors, global).await
		}
	}
}

fn create_attrs(args: &HealthmonitorCreateArgs) -> Result<Map<String, Value>, CliError> {
	let kind = args.kind.to_ascii_uppercase();
	if !MONITOR_KINDS.contains(&kind.as_str()) {
		return Err(CliError::InvalidArgument(format!(
			"invalid monitor type '{}' (expected one of {})",
			args.kind,
			MONITOR_KINDS.join(", ")
		)));
	}

	let mut attrs = Map::new();
	attrs.insert("type".to_string(), json!(kind));
	attrs.insert("delay".to_string(), json!(args.delay));
	attrs.insert("timeout".to_string(), json!(args.probe_timeout));
	attrs.insert("max_retries".to_string(), json!(args.max_retries));
	set_if_some(&mut attrs, "pool_id", args.pool.clone());

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

fn update_attrs(args: &HealthmonitorUpdateArgs) -> Result<Map<String, Value>, CliError> {
	let mut attrs = Map::new();
	if let Some(delay) = args.delay {
		attrs.insert("delay".to_string(), json!(delay));
	}
	if let Some(max_retries) = args.max_retries {
		attrs.insert("max_retries".to_string(), json!(max_retries));
	}

	let extras = extra::parse_extra_args(&args.extra)?;
	extra::merge_into_body(extras, &mut attrs);
	Ok(attrs)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_create() -> HealthmonitorCreateArgs {
		HealthmonitorCreateArgs {
			kind: "http".to_string(),
			delay: 5,
			probe_timeout: 3,
			max_retries: 2,
			pool: None,
			legacy_path: false,
			extra: Vec::new(),
		}
	}

	#[test]
	fn create_normalizes_the_monitor_type() {
		let attrs = create_attrs(&base_create()).unwrap();
		assert_eq!(
			Value::Object(attrs),
			json!({"type": "HTTP", "delay": 5, "timeout": 3, "max_retries": 2})
		);
	}

	#[test]
	fn unknown_monitor_type_is_rejected() {
		let mut args = base_create();
		args.kind = "SSH".to_string();
		assert!(matches!(
			create_attrs(&args),
			Err(CliError::InvalidArgument(_))
		));
	}

	#[test]
	fn legacy_flag_switches_the_collection_path() {
		assert_eq!(monitor_spec(false).collection_path(), "v2.0/lbaas/healthmonitors");
		assert_eq!(monitor_spec(true).collection_path(), "v2.0/healthmonitors");
	}

	#[test]
	fn show_honors_the_legacy_path_flag() {
		use crate::cli::HealthmonitorShowArgs;

		let args = HealthmonitorShowArgs {
			monitor: "hm-1".to_string(),
			fields: Vec::new(),
			legacy_path: true,
		};
		let spec = monitor_spec(args.legacy_path);
		assert_eq!(spec.item_path(&args.monitor), "v2.0/healthmonitors/hm-1");
	}
}

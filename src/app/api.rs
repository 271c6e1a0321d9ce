use std::path::Path;

use reqwest::Method;
use serde_json::Value;

use crate::cli::{ApiBodyArgs, ApiCommand, ApiGetArgs, GlobalOpts};
use crate::context::{resolve_effective_config, EffectiveConfig};
use crate::error::CliError;
use crate::output;

use super::common::{build_client, load_config_store};

// Raw passthrough for API surfaces the typed subcommands do not cover.
pub(super) async fn run(global: &GlobalOpts, command: ApiCommand) -> Result<(), CliError> {
	let (_config_path, cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;
	let client = build_client(global, &effective)?;

	match command {
		ApiCommand::Request(args) => {
			let method = parse_method(&args.method)?;
			let body = read_body(args.body.as_deref(), args.body_file.as_deref())?;
			let response = client
				.http()
				.request_json(method, &args.path, &[], body, !args.no_auth)
				.await?;
			print_response(&response, global, &effective)
		}
		ApiCommand::Get(ApiGetArgs { path }) => {
			let response = client
				.http()
				.request_json(Method::GET, &path, &[], None, true)
				.await?;
			print_response(&response, global, &effective)
		}
		ApiCommand::Post(args) => run_with_body(&client, Method::POST, args, global, &effective).await,
		ApiCommand::Put(args) => run_with_body(&client, Method::PUT, args, global, &effective).await,
		ApiCommand::Delete(ApiGetArgs { path }) => {
			let response = client
				.http()
				.request_json(Method::DELETE, &path, &[], None, true)
				.await?;
			print_response(&response, global, &effective)
		}
	}
}

async fn run_with_body(
	client: &crate::client::NeutronClient,
	method: Method,
	args: ApiBodyArgs,
	global: &GlobalOpts,
	effective: &EffectiveConfig,
) -> Result<(), CliError> {
	let body = read_body(args.body.as_deref(), args.body_file.as_deref())?;
	let response = client
		.http()
		.request_json(method, &args.path, &[], body, true)
		.await?;
	print_response(&response, global, effective)
}

fn parse_method(raw: &str) -> Result<Method, CliError> {
	Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
		.map_err(|_| CliError::InvalidArgument(format!("invalid http method '{raw}'")))
}

fn read_body(inline: Option<&str>, file: Option<&Path>) -> Result<Option<Value>, CliError> {
	let raw = match (inline, file) {
		(Some(raw), None) => raw.to_string(),
		(None, Some(path)) => std::fs::read_to_string(path)?,
		(None, None) => return Ok(None),
		// clap's conflicts_with guards this, but keep the invariant local.
		(Some(_), Some(_)) => {
			return Err(CliError::InvalidArgument(
				"pass either --body or --body-file, not both".to_string(),
			))
		}
	};
	let value: Value = serde_json::from_str(&raw)?;
	Ok(Some(value))
}

fn print_response(
	response: &Value,
	global: &GlobalOpts,
	effective: &EffectiveConfig,
) -> Result<(), CliError> {
	match response {
		Value::Null => Ok(()),
		Value::Array(items) => output::print_list(items, &global.column, effective.format),
		other => output::print_item(other, &global.column, effective.format),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn method_parse_accepts_lowercase() {
		assert_eq!(parse_method("get").unwrap(), Method::GET);
		assert_eq!(parse_method("PATCH").unwrap(), Method::PATCH);
		assert!(parse_method("not a method").is_err());
	}

	#[test]
	fn inline_body_must_be_json() {
		let body = read_body(Some(r#"{"port": {"name": "x"}}"#), None).unwrap();
		assert_eq!(body, Some(json!({"port": {"name": "x"}})));
		assert!(read_body(Some("{nope"), None).is_err());
	}

	#[test]
	fn missing_body_is_none() {
		assert_eq!(read_body(None, None).unwrap(), None);
	}
}

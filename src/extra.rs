use serde_json::{Map, Value};

use crate::error::CliError;

// Parser for the extra-values spec: tokens after a literal `--` on any
// list/create/update command. Keys are undeclared server attributes; the
// mini-language carries type hints so the request body gets proper JSON
// values instead of strings everywhere.
//
//   -- --shared type=bool true
//   -- --dns-nameservers list=true 8.8.8.8 8.8.4.4
//   -- --allocation-pools type=dict start=10.0.0.2,end=10.0.0.254
//   -- --description action=clear

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtraType {
	Str,
	Bool,
	Int,
	Dict,
}

#[derive(Debug)]
struct ExtraSpec {
	key: String,
	value_type: Option<ExtraType>,
	list: bool,
	clear: bool,
	values: Vec<String>,
}

pub fn parse_extra_args(tokens: &[String]) -> Result<Map<String, Value>, CliError> {
	let mut specs: Vec<ExtraSpec> = Vec::new();

	for token in tokens {
		if token.starts_with("---") {
			return Err(CliError::InvalidArgument(format!(
				"invalid extra argument '{token}' (at most two leading dashes)"
			)));
		}

		if let Some(rest) = token.strip_prefix("--") {
			if rest.is_empty() {
				return Err(CliError::InvalidArgument(
					"empty extra argument key '--'".to_string(),
				));
			}

			let (key, inline) = match rest.split_once('=') {
				Some((key, inline)) => (key, Some(inline)),
				None => (rest, None),
			};
			if key.is_empty() {
				return Err(CliError::InvalidArgument(format!(
					"invalid extra argument '{token}' (missing key)"
				)));
			}

			let key = key.replace('-', "_");
			// Multiple values belong after one key (or list=true); a second
			// --key for the same attribute is a malformed spec.
			if specs.iter().any(|s| s.key == key) {
				return Err(CliError::InvalidArgument(format!(
					"duplicate extra argument '--{key}'"
				)));
			}

			let mut spec = ExtraSpec {
				key,
				value_type: None,
				list: false,
				clear: false,
				values: Vec::new(),
			};
			if let Some(inline) = inline {
				apply_value_token(&mut spec, inline)?;
			}
			specs.push(spec);
			continue;
		}

		let Some(current) = specs.last_mut() else {
			return Err(CliError::InvalidArgument(format!(
				"unexpected extra value '{token}' (no preceding --key)"
			)));
		};
		apply_value_token(current, token)?;
	}

	let mut out = Map::new();
	for spec in specs {
		let value = finalize_spec(&spec)?;
		out.insert(spec.key, value);
	}
	Ok(out)
}

// Modifier tokens (`type=`, `list=`, `action=`) may appear inline after `=`
// or as leading value tokens; anything else is a plain value.
fn apply_value_token(spec: &mut ExtraSpec, token: &str) -> Result<(), CliError> {
	if let Some(type_name) = token.strip_prefix("type=") {
		let parsed = match type_name {
			"str" => ExtraType::Str,
			"bool" => ExtraType::Bool,
			"int" => ExtraType::Int,
			"dict" => ExtraType::Dict,
			other => {
				return Err(CliError::InvalidArgument(format!(
					"unknown type '{other}' for extra argument '--{}' (expected bool, dict, int or str)",
					spec.key
				)))
			}
		};
		if spec.value_type.is_some_and(|t| t != parsed) {
			return Err(CliError::InvalidArgument(format!(
				"conflicting type specs for extra argument '--{}'",
				spec.key
			)));
		}
		spec.value_type = Some(parsed);
		return Ok(());
	}

	if let Some(flag) = token.strip_prefix("list=") {
		match flag {
			"true" => spec.list = true,
			"false" => {}
			other => {
				return Err(CliError::InvalidArgument(format!(
					"invalid list spec 'list={other}' for extra argument '--{}'",
					spec.key
				)))
			}
		}
		return Ok(());
	}

	if let Some(action) = token.strip_prefix("action=") {
		if action != "clear" {
			return Err(CliError::InvalidArgument(format!(
				"unknown action '{action}' for extra argument '--{}'",
				spec.key
			)));
		}
		spec.clear = true;
		return Ok(());
	}

	spec.values.push(token.to_string());
	Ok(())
}

fn finalize_spec(spec: &ExtraSpec) -> Result<Value, CliError> {
	if spec.clear {
		if !spec.values.is_empty() {
			return Err(CliError::InvalidArgument(format!(
				"extra argument '--{}' combines action=clear with a value",
				spec.key
			)));
		}
		return Ok(Value::Null);
	}

	if spec.values.is_empty() {
		return Err(CliError::InvalidArgument(format!(
			"extra argument '--{}' is missing a value",
			spec.key
		)));
	}

	let value_type = spec.value_type.unwrap_or(ExtraType::Str);
	if spec.list && value_type == ExtraType::Dict {
		// The upstream mini-language never defined this combination; reject it
		// instead of guessing.
		return Err(CliError::InvalidArgument(format!(
			"extra argument '--{}' combines list=true with type=dict",
			spec.key
		)));
	}

	let mut coerced = Vec::with_capacity(spec.values.len());
	for raw in &spec.values {
		coerced.push(coerce_value(&spec.key, raw, value_type)?);
	}

	if spec.list || coerced.len() > 1 {
		Ok(Value::Array(coerced))
	} else {
		Ok(coerced.remove(0))
	}
}

fn coerce_value(key: &str, raw: &str, value_type: ExtraType) -> Result<Value, CliError> {
	match value_type {
		ExtraType::Str => Ok(Value::String(raw.to_string())),
		ExtraType::Bool => match raw.to_ascii_lowercase().as_str() {
			"true" => Ok(Value::Bool(true)),
			"false" => Ok(Value::Bool(false)),
			_ => Err(CliError::InvalidArgument(format!(
				"invalid bool value '{raw}' for extra argument '--{key}'"
			))),
		},
		ExtraType::Int => raw
			.parse::<i64>()
			.map(|n| Value::Number(n.into()))
			.map_err(|_| {
				CliError::InvalidArgument(format!(
					"invalid int value '{raw}' for extra argument '--{key}'"
				))
			}),
		ExtraType::Dict => parse_kv_object(key, raw),
	}
}

// Shared with the typed flags that accept `k=v,k2=v2` specs (e.g. port
// --fixed-ip).
pub(crate) fn parse_kv_object(key: &str, raw: &str) -> Result<Value, CliError> {
	let mut map = Map::new();
	for pair in raw.split(',') {
		let (k, v) = pair.split_once('=').ok_or_else(|| {
			CliError::InvalidArgument(format!(
				"invalid dict entry '{pair}' for extra argument '--{key}' (expected k=v,k2=v2)"
			))
		})?;
		if k.is_empty() {
			return Err(CliError::InvalidArgument(format!(
				"invalid dict entry '{pair}' for extra argument '--{key}' (empty key)"
			)));
		}
		map.insert(k.to_string(), Value::String(v.to_string()));
	}
	Ok(Value::Object(map))
}

pub fn merge_into_body(extras: Map<String, Value>, body: &mut Map<String, Value>) {
	for (key, value) in extras {
		body.insert(key, value);
	}
}

// Query-string rendition: arrays repeat the key, nulls are dropped, scalars
// render bare.
pub fn to_query_pairs(extras: &Map<String, Value>) -> Vec<(String, String)> {
	let mut pairs = Vec::new();
	for (key, value) in extras {
		match value {
			Value::Null => {}
			Value::Array(items) => {
				for item in items {
					pairs.push((key.clone(), query_scalar(item)));
				}
			}
			other => pairs.push((key.clone(), query_scalar(other))),
		}
	}
	pairs
}

pub(crate) fn query_scalar(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn toks(args: &[&str]) -> Vec<String> {
		args.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn parses_plain_string_values() {
		let extras = parse_extra_args(&toks(&["--description", "front net"])).unwrap();
		assert_eq!(extras["description"], json!("front net"));
	}

	#[test]
	fn inline_equals_value_form() {
		let extras = parse_extra_args(&toks(&["--name=foo"])).unwrap();
		assert_eq!(extras["name"], json!("foo"));
	}

	#[test]
	fn coerces_bool_int_and_dict() {
		let extras = parse_extra_args(&toks(&[
			"--shared",
			"type=bool",
			"true",
			"--mtu",
			"type=int",
			"1450",
			"--allocation-pools",
			"type=dict",
			"start=10.0.0.2,end=10.0.0.254",
		]))
		.unwrap();

		assert_eq!(extras["shared"], json!(true));
		assert_eq!(extras["mtu"], json!(1450));
		assert_eq!(
			extras["allocation_pools"],
			json!({"start": "10.0.0.2", "end": "10.0.0.254"})
		);
	}

	#[test]
	fn list_spec_always_yields_array() {
		let extras =
			parse_extra_args(&toks(&["--dns-nameservers", "list=true", "8.8.8.8"])).unwrap();
		assert_eq!(extras["dns_nameservers"], json!(["8.8.8.8"]));
	}

	#[test]
	fn multiple_values_yield_array() {
		let extras = parse_extra_args(&toks(&["--tags", "red", "blue"])).unwrap();
		assert_eq!(extras["tags"], json!(["red", "blue"]));
	}

	#[test]
	fn repeated_key_is_rejected() {
		let err = parse_extra_args(&toks(&["--mtu=1400", "--mtu=1500"])).unwrap_err();
		match err {
			CliError::InvalidArgument(message) => assert!(message.contains("duplicate")),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn action_clear_produces_null() {
		let extras = parse_extra_args(&toks(&["--description", "action=clear"])).unwrap();
		assert_eq!(extras["description"], Value::Null);
	}

	#[test]
	fn clear_with_value_is_rejected() {
		let err =
			parse_extra_args(&toks(&["--description", "action=clear", "oops"])).unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn missing_value_is_rejected() {
		let err = parse_extra_args(&toks(&["--shared"])).unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn triple_dash_is_rejected() {
		let err = parse_extra_args(&toks(&["---shared", "true"])).unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn unknown_type_is_rejected() {
		let err = parse_extra_args(&toks(&["--mtu", "type=float", "1.5"])).unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn conflicting_types_are_rejected() {
		let err = parse_extra_args(&toks(&["--mtu", "type=int", "type=str", "1450"]))
			.unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn list_with_dict_is_rejected() {
		let err = parse_extra_args(&toks(&[
			"--pools",
			"list=true",
			"type=dict",
			"a=b",
		]))
		.unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn value_without_key_is_rejected() {
		let err = parse_extra_args(&toks(&["stray"])).unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn parse_then_serialize_round_trips() {
		let extras = parse_extra_args(&toks(&[
			"--name=foo",
			"--shared",
			"type=bool",
			"true",
			"--dns-nameservers",
			"list=true",
			"8.8.8.8",
			"8.8.4.4",
		]))
		.unwrap();

		let mut body = Map::new();
		merge_into_body(extras, &mut body);

		assert_eq!(
			Value::Object(body),
			json!({
				"name": "foo",
				"shared": true,
				"dns_nameservers": ["8.8.8.8", "8.8.4.4"],
			})
		);
	}

	#[test]
	fn query_pairs_repeat_arrays_and_drop_nulls() {
		let extras = parse_extra_args(&toks(&[
			"--status=ACTIVE",
			"--id",
			"list=true",
			"a",
			"b",
			"--gone",
			"action=clear",
		]))
		.unwrap();

		// serde_json maps iterate in key order.
		let pairs = to_query_pairs(&extras);
		assert_eq!(
			pairs,
			vec![
				("id".to_string(), "a".to_string()),
				("id".to_string(), "b".to_string()),
				("status".to_string(), "ACTIVE".to_string()),
			]
		);
	}
}

use serde_json::Value;

use crate::cli::{ConfigCommand, ConfigProfilesCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::context::{parse_output_format, resolve_effective_config};
use crate::error::CliError;
use crate::http::redact_token;
use crate::output;

use super::common::load_config_store;

pub(super) async fn run(global: &GlobalOpts, command: ConfigCommand) -> Result<(), CliError> {
	let (config_path, mut cfg) = load_config_store()?;
	let effective = resolve_effective_config(global, &cfg)?;

	match command {
		ConfigCommand::Path => {
			println!("{}", config_path.display());
			Ok(())
		}
		ConfigCommand::Get(args) => {
			let key = qualify_key(&args.key, &effective.profile);
			let value = get_config_key(&cfg, &key)?;
			if matches!(effective.format, OutputFormat::Table) {
				println!("{}", render_scalar(&value));
				return Ok(());
			}
			output::print_item(&value, &[], effective.format)
		}
		ConfigCommand::Set(args) => {
			let key = qualify_key(&args.key, &effective.profile);
			set_config_key(&mut cfg, &key, &args.value)?;
			config::save_config(&config_path, &cfg)?;
			if !global.quiet {
				eprintln!("Set {key}.");
			}
			Ok(())
		}
		ConfigCommand::Unset(args) => {
			let key = qualify_key(&args.key, &effective.profile);
			unset_config_key(&mut cfg, &key)?;
			config::save_config(&config_path, &cfg)?;
			if !global.quiet {
				eprintln!("Unset {key}.");
			}
			Ok(())
		}
		ConfigCommand::List => {
			let mut value = serde_json::to_value(&cfg)?;
			redact_tokens(&mut value);
			output::print_item(&value, &[], effective.format)
		}
		ConfigCommand::Profiles { command } => match command {
			ConfigProfilesCommand::List => {
				if matches!(effective.format, OutputFormat::Table) {
					for name in cfg.profiles.keys() {
						if *name == effective.profile {
							println!("{name} (active)");
						} else {
							println!("{name}");
						}
					}
					return Ok(());
				}
				let names: Vec<Value> = cfg
					.profiles
					.keys()
					.map(|name| Value::String(name.clone()))
					.collect();
				output::print_list(&names, &[], effective.format)
			}
			ConfigProfilesCommand::Use(args) => {
				cfg.active_profile = Some(args.name.clone());
				// Materialize the profile so `config list` shows it.
				cfg.profile_mut(&args.name);
				config::save_config(&config_path, &cfg)?;
				if !global.quiet {
					eprintln!("Switched to profile '{}'.", args.name);
				}
				Ok(())
			}
		},
	}
}

// Bare field names address the active profile.
fn qualify_key(key: &str, active_profile: &str) -> String {
	if key == "active_profile" || key == "profiles" || key.starts_with("profiles.") {
		key.to_string()
	} else {
		format!("profiles.{active_profile}.{key}")
	}
}

fn get_config_key(cfg: &Config, key: &str) -> Result<Value, CliError> {
	let parts: Vec<&str> = key.split('.').collect();
	match parts.as_slice() {
		["active_profile"] => Ok(opt_string(cfg.active_profile.clone())),
		["profiles"] => {
			let mut value = serde_json::to_value(&cfg.profiles)?;
			redact_tokens(&mut value);
			Ok(value)
		}
		["profiles", profile] => {
			let mut value = serde_json::to_value(cfg.profile(profile))?;
			redact_tokens(&mut value);
			Ok(value)
		}
		["profiles", profile, field] => {
			let p = cfg.profile(profile);
			let value = match *field {
				"os_url" => opt_string(p.os_url),
				"os_token" => opt_string(p.os_token.map(|t| redact_token(&t))),
				"os_auth_url" => opt_string(p.os_auth_url),
				"os_username" => opt_string(p.os_username),
				"os_password" => opt_string(p.os_password.map(|t| redact_token(&t))),
				"os_tenant_name" => opt_string(p.os_tenant_name),
				"os_region_name" => opt_string(p.os_region_name),
				"os_cacert" => opt_string(p.os_cacert),
				"insecure" => p.insecure.map(Value::Bool).unwrap_or(Value::Null),
				"format" => p
					.format
					.map(|f| Value::String(f.to_string()))
					.unwrap_or(Value::Null),
				"timeout" => opt_string(p.timeout),
				"retries" => p
					.retries
					.map(|n| Value::Number(n.into()))
					.unwrap_or(Value::Null),
				"max_uri_len" => p
					.max_uri_len
					.map(|n| Value::Number(n.into()))
					.unwrap_or(Value::Null),
				_ => return Err(unsupported_key(key)),
			};
			Ok(value)
		}
		_ => Err(unsupported_key(key)),
	}
}

fn set_config_key(cfg: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
	let parts: Vec<&str> = key.split('.').collect();
	match parts.as_slice() {
		["active_profile"] => {
			cfg.active_profile = Some(value.to_string());
			Ok(())
		}
		["profiles", profile, field] => {
			let p = cfg.profile_mut(profile);
			match *field {
				"os_url" => p.os_url = Some(value.to_string()),
				"os_token" => p.os_token = Some(value.to_string()),
				"os_auth_url" => p.os_auth_url = Some(value.to_string()),
				"os_username" => p.os_username = Some(value.to_string()),
				"os_password" => p.os_password = Some(value.to_string()),
				"os_tenant_name" => p.os_tenant_name = Some(value.to_string()),
				"os_region_name" => p.os_region_name = Some(value.to_string()),
				"os_cacert" => p.os_cacert = Some(value.to_string()),
				"insecure" => {
					let flag = parse_bool(value).ok_or_else(|| {
						CliError::InvalidArgument(format!("invalid insecure value: {value}"))
					})?;
					p.insecure = Some(flag);
				}
				"format" => p.format = Some(parse_output_format(value)?),
				"timeout" => {
					humantime::parse_duration(value).map_err(|_| {
						CliError::InvalidArgument(format!("invalid timeout value: {value}"))
					})?;
					p.timeout = Some(value.to_string());
				}
				"retries" => {
					let n = value.parse::<u32>().map_err(|_| {
						CliError::InvalidArgument(format!("invalid retries value: {value}"))
					})?;
					p.retries = Some(n);
				}
				"max_uri_len" => {
					let n = value.parse::<usize>().map_err(|_| {
						CliError::InvalidArgument(format!("invalid max_uri_len value: {value}"))
					})?;
					p.max_uri_len = Some(n);
				}
				_ => return Err(unsupported_key(key)),
			}
			Ok(())
		}
		_ => Err(unsupported_key(key)),
	}
}

fn unset_config_key(cfg: &mut Config, key: &str) -> Result<(), CliError> {
	let parts: Vec<&str> = key.split('.').collect();
	match parts.as_slice() {
		["active_profile"] => {
			cfg.active_profile = None;
			Ok(())
		}
		["profiles", profile, field] => {
			let p = cfg.profile_mut(profile);
			match *field {
				"os_url" => p.os_url = None,
				"os_token" => p.os_token = None,
				"os_auth_url" => p.os_auth_url = None,
				"os_username" => p.os_username = None,
				"os_password" => p.os_password = None,
				"os_tenant_name" => p.os_tenant_name = None,
				"os_region_name" => p.os_region_name = None,
				"os_cacert" => p.os_cacert = None,
				"insecure" => p.insecure = None,
				"format" => p.format = None,
				"timeout" => p.timeout = None,
				"retries" => p.retries = None,
				"max_uri_len" => p.max_uri_len = None,
				_ => return Err(unsupported_key(key)),
			}
			Ok(())
		}
		_ => Err(unsupported_key(key)),
	}
}

fn unsupported_key(key: &str) -> CliError {
	CliError::InvalidArgument(format!("unsupported key: {key}"))
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

fn opt_string(value: Option<String>) -> Value {
	value.map(Value::String).unwrap_or(Value::Null)
}

fn render_scalar(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(v) => v.to_string(),
		Value::Number(v) => v.to_string(),
		Value::String(v) => v.clone(),
		_ => value.to_string(),
	}
}

// Stored credentials never leave the file verbatim.
fn redact_tokens(value: &mut Value) {
	match value {
		Value::Object(obj) => {
			for (key, nested) in obj.iter_mut() {
				if key == "os_token" || key == "os_password" {
					if let Value::String(token) = nested {
						*nested = Value::String(redact_token(token));
					}
					continue;
				}
				redact_tokens(nested);
			}
		}
		Value::Array(items) => {
			for item in items.iter_mut() {
				redact_tokens(item);
			}
		}
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn bare_keys_address_the_active_profile() {
		assert_eq!(qualify_key("os_url", "prod"), "profiles.prod.os_url");
		assert_eq!(qualify_key("active_profile", "prod"), "active_profile");
		assert_eq!(
			qualify_key("profiles.dev.os_url", "prod"),
			"profiles.dev.os_url"
		);
	}

	#[test]
	fn set_then_get_round_trips_a_profile_field() {
		let mut cfg = Config::default();
		set_config_key(&mut cfg, "profiles.dev.os_url", "http://neutron:9696").unwrap();
		let value = get_config_key(&cfg, "profiles.dev.os_url").unwrap();
		assert_eq!(value, json!("http://neutron:9696"));
	}

	#[test]
	fn get_redacts_stored_tokens() {
		let mut cfg = Config::default();
		set_config_key(
			&mut cfg,
			"profiles.dev.os_token",
			"gAAAAABsecretsecretsecret",
		)
		.unwrap();
		let value = get_config_key(&cfg, "profiles.dev.os_token").unwrap();
		let rendered = value.as_str().unwrap();
		assert!(!rendered.contains("secretsecret"));
	}

	#[test]
	fn password_is_stored_and_redacted() {
		let mut cfg = Config::default();
		set_config_key(&mut cfg, "profiles.dev.os_password", "hunter2hunter2").unwrap();
		assert_eq!(
			cfg.profile("dev").os_password.as_deref(),
			Some("hunter2hunter2")
		);

		let value = get_config_key(&cfg, "profiles.dev.os_password").unwrap();
		assert_ne!(value, json!("hunter2hunter2"));

		let mut listed = serde_json::to_value(&cfg).unwrap();
		redact_tokens(&mut listed);
		assert!(!listed.to_string().contains("hunter2hunter2"));

		unset_config_key(&mut cfg, "profiles.dev.os_password").unwrap();
		assert_eq!(
			get_config_key(&cfg, "profiles.dev.os_password").unwrap(),
			Value::Null
		);
	}

	#[test]
	fn set_validates_typed_fields() {
		let mut cfg = Config::default();
		assert!(set_config_key(&mut cfg, "profiles.dev.timeout", "banana").is_err());
		assert!(set_config_key(&mut cfg, "profiles.dev.retries", "-1").is_err());
		assert!(set_config_key(&mut cfg, "profiles.dev.format", "xml").is_err());
		assert!(set_config_key(&mut cfg, "profiles.dev.timeout", "45s").is_ok());
		assert!(set_config_key(&mut cfg, "profiles.dev.format", "yaml").is_ok());
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let cfg = Config::default();
		assert!(get_config_key(&cfg, "profiles.dev.password").is_err());
		assert!(get_config_key(&cfg, "nonsense.key").is_err());
	}

	#[test]
	fn unset_clears_the_field() {
		let mut cfg = Config::default();
		set_config_key(&mut cfg, "profiles.dev.retries", "5").unwrap();
		unset_config_key(&mut cfg, "profiles.dev.retries").unwrap();
		assert_eq!(
			get_config_key(&cfg, "profiles.dev.retries").unwrap(),
			Value::Null
		);
	}
}

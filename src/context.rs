use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::DEFAULT_MAX_URI_LEN;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::config::{Config, ConfigError};
use crate::error::CliError;

// Settings after merging CLI flags, OS_* environment variables, the active
// profile and built-in defaults, in that order of precedence.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
	pub profile: String,
	pub os_url: Option<String>,
	pub os_token: Option<String>,
	pub os_auth_url: Option<String>,
	pub os_username: Option<String>,
	pub os_password: Option<String>,
	pub os_tenant_name: Option<String>,
	pub os_region_name: Option<String>,
	pub os_cacert: Option<PathBuf>,
	pub insecure: bool,
	pub format: OutputFormat,
	pub timeout: Duration,
	pub retries: u32,
	pub max_uri_len: usize,
}

impl EffectiveConfig {
	// Session management is delegated; this client talks to the endpoint
	// directly and requires OS_URL.
	pub fn endpoint(&self) -> Result<&str, CliError> {
		self.os_url
			.as_deref()
			.ok_or(CliError::MissingConfig("endpoint url (--os-url or OS_URL)"))
	}
}

pub fn resolve_effective_config(
	global: &GlobalOpts,
	config: &Config,
) -> Result<EffectiveConfig, CliError> {
	let profile = global
		.profile
		.clone()
		.or_else(|| env::var("NEUTRONCTL_PROFILE").ok())
		.or_else(|| config.active_profile.clone())
		.unwrap_or_else(|| "default".to_string());

	let profile_cfg = config.profile(&profile);

	let os_url = global
		.os_url
		.clone()
		.or_else(|| env::var("OS_URL").ok())
		.or_else(|| empty_to_none(profile_cfg.os_url.clone()));

	let os_token = global
		.os_token
		.clone()
		.or_else(|| env::var("OS_TOKEN").ok())
		.or_else(|| empty_to_none(profile_cfg.os_token.clone()));

	let os_auth_url = global
		.os_auth_url
		.clone()
		.or_else(|| env::var("OS_AUTH_URL").ok())
		.or_else(|| empty_to_none(profile_cfg.os_auth_url.clone()));

	let os_username = global
		.os_username
		.clone()
		.or_else(|| env::var("OS_USERNAME").ok())
		.or_else(|| empty_to_none(profile_cfg.os_username.clone()));

	let os_password = global
		.os_password
		.clone()
		.or_else(|| env::var("OS_PASSWORD").ok())
		.or_else(|| empty_to_none(profile_cfg.os_password.clone()));

	let os_tenant_name = global
		.os_tenant_name
		.clone()
		.or_else(|| env::var("OS_TENANT_NAME").ok())
		.or_else(|| empty_to_none(profile_cfg.os_tenant_name.clone()));

	let os_region_name = global
		.os_region_name
		.clone()
		.or_else(|| env::var("OS_REGION_NAME").ok())
		.or_else(|| empty_to_none(profile_cfg.os_region_name.clone()));

	let os_cacert = global
		.os_cacert
		.clone()
		.or_else(|| env::var("OS_CACERT").ok().map(PathBuf::from))
		.or_else(|| empty_to_none(profile_cfg.os_cacert.clone()).map(PathBuf::from));

	let insecure = global.insecure
		|| env::var("NEUTRONCLIENT_INSECURE")
			.map(|v| is_truthy(&v))
			.unwrap_or(false)
		|| profile_cfg.insecure.unwrap_or(false);

	let format = if global.json {
		OutputFormat::Json
	} else if let Some(format) = global.format {
		format
	} else if let Ok(value) = env::var("NEUTRONCTL_FORMAT") {
		parse_output_format(&value)?
	} else {
		profile_cfg.format.unwrap_or(OutputFormat::Table)
	};

	let timeout_str = global
		.timeout
		.clone()
		.or_else(|| empty_to_none(profile_cfg.timeout.clone()))
		.unwrap_or_else(|| "30s".to_string());

	let timeout = humantime::parse_duration(&timeout_str)
		.map_err(|_| ConfigError::InvalidTimeout(timeout_str))?;

	let retries = global.retries.or(profile_cfg.retries).unwrap_or(3);

	let max_uri_len = global
		.max_uri_len
		.or(profile_cfg.max_uri_len)
		.unwrap_or(DEFAULT_MAX_URI_LEN);

	Ok(EffectiveConfig {
		profile,
		os_url,
		os_token,
		os_auth_url,
		os_username,
		os_password,
		os_tenant_name,
		os_region_name,
		os_cacert,
		insecure,
		format,
		timeout,
		retries,
		max_uri_len,
	})
}

pub fn parse_output_format(value: &str) -> Result<OutputFormat, ConfigError> {
	let normalized = value.trim().to_ascii_lowercase();
	match normalized.as_str() {
		"table" => Ok(OutputFormat::Table),
		"json" => Ok(OutputFormat::Json),
		"yaml" | "yml" => Ok(OutputFormat::Yaml),
		"csv" => Ok(OutputFormat::Csv),
		_ => Err(ConfigError::InvalidOutputFormat(value.to_string())),
	}
}

fn is_truthy(value: &str) -> bool {
	matches!(
		value.trim().to_ascii_lowercase().as_str(),
		"1" | "true" | "yes" | "on"
	)
}

fn empty_to_none(value: Option<String>) -> Option<String> {
	match value {
		Some(v) if v.trim().is_empty() => None,
		other => other,
	}
}

use std::io::{self, Write};
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::cli::{GlobalOpts, ListArgs};
use crate::client::NeutronClient;
use crate::config::{self, Config};
use crate::context::EffectiveConfig;
use crate::error::CliError;
use crate::extra;
use crate::http::HttpClient;
use crate::output;
use crate::resource::ResourceSpec;

pub(super) fn load_config_store() -> Result<(PathBuf, Config), CliError> {
	let config_path = config::default_config_path()?;
	let cfg = config::load_config(&config_path)?;
	Ok((config_path, cfg))
}

pub(super) fn build_client(
	global: &GlobalOpts,
	effective: &EffectiveConfig,
) -> Result<NeutronClient, CliError> {
	let endpoint = effective.endpoint()?;
	if global.verbose > 0 {
		eprintln!("Using endpoint {endpoint} (profile '{}').", effective.profile);
		eprintln!("{}", identity_note(effective));
	}

	let http = HttpClient::new(
		endpoint,
		effective.os_token.clone(),
		effective.timeout,
		effective.retries,
		global.dry_run,
		effective.insecure,
		effective.os_cacert.as_deref(),
	)?;
	Ok(NeutronClient::new(http, effective.max_uri_len))
}

// Keystone identity context for the verbose banner. The password itself never
// appears, only whether one is configured.
pub(super) fn identity_note(effective: &EffectiveConfig) -> String {
	format!(
		"Identity: auth_url={} user={} tenant={} region={} password={}",
		effective.os_auth_url.as_deref().unwrap_or("-"),
		effective.os_username.as_deref().unwrap_or("-"),
		effective.os_tenant_name.as_deref().unwrap_or("-"),
		effective.os_region_name.as_deref().unwrap_or("-"),
		if effective.os_password.is_some() {
			"set"
		} else {
			"unset"
		},
	)
}

pub(super) fn confirm(global: &GlobalOpts, prompt: &str) -> Result<bool, CliError> {
	if global.dry_run {
		return Ok(true);
	}
	if global.yes {
		return Ok(true);
	}
	if global.quiet {
		return Err(CliError::InvalidArgument(
			"refusing to prompt in --quiet mode (pass --yes)".to_string(),
		));
	}

	eprint!("{prompt} [y/N]: ");
	io::stderr().flush()?;

	let mut input = String::new();
	io::stdin().read_line(&mut input)?;
	let input = input.trim().to_ascii_lowercase();
	Ok(matches!(input.as_str(), "y" | "yes"))
}

// Shared `list` verb: trailing extras become query filters, with the largest
// repeated filter routed through the chunked path so big ID batches survive
// proxy URI limits.
pub(super) async fn run_list(
	client: &NeutronClient,
	spec: &ResourceSpec,
	args: ListArgs,
	global: &GlobalOpts,
	effective: &EffectiveConfig,
) -> Result<(), CliError> {
	let extras = extra::parse_extra_args(&args.extra)?;
	let (mut query, chunked) = split_chunked_filter(&extras);
	if let Some(name) = args.name {
		query.push(("name".to_string(), name));
	}

	let items = match chunked {
		Some((key, values)) => client.list_chunked(spec, &key, &values, &query).await?,
		None => client.list(spec, &query).await?,
	};
	output::print_list(&items, &global.column, effective.format)
}

pub(super) async fn run_show(
	client: &NeutronClient,
	spec: &ResourceSpec,
	name_or_id: &str,
	fields: &[String],
	global: &GlobalOpts,
	effective: &EffectiveConfig,
) -> Result<(), CliError> {
	let id = client.find_resource_by_name_or_id(spec, name_or_id).await?;
	let item = client.show(spec, &id, fields).await?;
	output::print_item(&item, &global.column, effective.format)
}

pub(super) async fn run_create(
	client: &NeutronClient,
	spec: &ResourceSpec,
	attrs: Map<String, Value>,
	global: &GlobalOpts,
	effective: &EffectiveConfig,
) -> Result<(), CliError> {
	let item = client.create(spec, attrs).await?;
	output::print_item(&item, &global.column, effective.format)
}

pub(super) async fn run_update(
	client: &NeutronClient,
	spec: &ResourceSpec,
	name_or_id: &str,
	attrs: Map<String, Value>,
	global: &GlobalOpts,
	effective: &EffectiveConfig,
) -> Result<(), CliError> {
	if attrs.is_empty() {
		return Err(CliError::InvalidArgument(format!(
			"nothing to update; pass at least one attribute for the {}",
			spec.display()
		)));
	}
	let id = client.find_resource_by_name_or_id(spec, name_or_id).await?;
	let item = client.update(spec, &id, attrs).await?;
	output::print_item(&item, &global.column, effective.format)
}

// Bulk delete: every target is attempted, outcomes are bucketed and reported
// together, and the exit status is non-zero iff anything failed.
pub(super) async fn run_delete(
	client: &NeutronClient,
	spec: &ResourceSpec,
	targets: Vec<String>,
	global: &GlobalOpts,
) -> Result<(), CliError> {
	let noun = if targets.len() == 1 {
		spec.display()
	} else {
		format!("{} {}s", targets.len(), spec.display())
	};
	if !confirm(global, &format!("Delete {noun} ({})?", targets.join(", ")))? {
		return Ok(());
	}

	let mut report = DeleteReport::new(spec);
	for target in targets {
		match delete_one(client, spec, &target).await {
			Ok(()) => report.deleted.push(target),
			// Dry-run prints the first request and stops the whole batch.
			Err(CliError::DryRunPrinted) => return Err(CliError::DryRunPrinted),
			Err(CliError::NotFound { .. }) => report.not_found.push(target),
			Err(CliError::HttpStatus { status, .. })
				if status == reqwest::StatusCode::NOT_FOUND =>
			{
				report.not_found.push(target)
			}
			Err(CliError::NoUniqueMatch { .. }) => report.ambiguous.push(target),
			Err(err) => report.failed.push((target, err.to_string())),
		}
	}

	report.finish(global.quiet)
}

async fn delete_one(
	client: &NeutronClient,
	spec: &ResourceSpec,
	target: &str,
) -> Result<(), CliError> {
	let id = client.find_resource_by_name_or_id(spec, target).await?;
	client.delete(spec, &id).await
}

pub(super) struct DeleteReport {
	resource: &'static str,
	pub(super) deleted: Vec<String>,
	pub(super) not_found: Vec<String>,
	pub(super) ambiguous: Vec<String>,
	pub(super) failed: Vec<(String, String)>,
}

impl DeleteReport {
	pub(super) fn new(spec: &ResourceSpec) -> Self {
		Self {
			resource: spec.name,
			deleted: Vec::new(),
			not_found: Vec::new(),
			ambiguous: Vec::new(),
			failed: Vec::new(),
		}
	}

	fn failure_count(&self) -> usize {
		self.not_found.len() + self.ambiguous.len() + self.failed.len()
	}

	fn total(&self) -> usize {
		self.deleted.len() + self.failure_count()
	}

	pub(super) fn finish(self, quiet: bool) -> Result<(), CliError> {
		if !self.deleted.is_empty() && !quiet {
			println!("{}", deleted_line(self.resource, &self.deleted));
		}
		if !self.not_found.is_empty() {
			eprintln!("{}", not_found_line(self.resource, &self.not_found));
		}
		if !self.ambiguous.is_empty() {
			eprintln!("{}", ambiguous_line(self.resource, &self.ambiguous));
		}
		for (target, message) in &self.failed {
			eprintln!("Unable to delete {} '{target}': {message}", self.resource);
		}

		let failures = self.failure_count();
		if failures == 0 {
			return Ok(());
		}
		Err(CliError::BulkDelete {
			summary: format!(
				"unable to delete {failures} of {} {}(s)",
				self.total(),
				self.resource
			),
		})
	}
}

pub(super) fn deleted_line(resource: &str, targets: &[String]) -> String {
	format!("Deleted {resource}(s): {}", targets.join(", "))
}

pub(super) fn not_found_line(resource: &str, targets: &[String]) -> String {
	format!(
		"Unable to find {resource}(s) with id(s) '{}'",
		targets.join("', '")
	)
}

pub(super) fn ambiguous_line(resource: &str, targets: &[String]) -> String {
	format!(
		"Multiple {resource} matches for '{}'; use an ID to be more specific",
		targets.join("', '")
	)
}

// Pull the longest array-valued filter out of the extras; its values go to the
// chunked list path and everything else stays a plain query pair.
pub(super) fn split_chunked_filter(
	extras: &Map<String, Value>,
) -> (Vec<(String, String)>, Option<(String, Vec<String>)>) {
	let chunk_key = extras
		.iter()
		.filter_map(|(key, value)| match value {
			Value::Array(items) if items.len() > 1 => Some((key.clone(), items.len())),
			_ => None,
		})
		.max_by_key(|(_, len)| *len)
		.map(|(key, _)| key);

	let Some(chunk_key) = chunk_key else {
		return (extra::to_query_pairs(extras), None);
	};

	let mut rest = extras.clone();
	let values = match rest.remove(&chunk_key) {
		Some(Value::Array(items)) => items.iter().map(extra::query_scalar).collect(),
		_ => Vec::new(),
	};
	(extra::to_query_pairs(&rest), Some((chunk_key, values)))
}

pub(super) fn set_if_some(attrs: &mut Map<String, Value>, key: &str, value: Option<String>) {
	if let Some(value) = value {
		attrs.insert(key.to_string(), Value::String(value));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resource::PORT;
	use serde_json::json;

	fn ids(targets: &[&str]) -> Vec<String> {
		targets.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn deleted_line_joins_with_commas() {
		assert_eq!(
			deleted_line("port", &ids(&["p1", "p3"])),
			"Deleted port(s): p1, p3"
		);
	}

	#[test]
	fn not_found_line_quotes_each_id() {
		assert_eq!(
			not_found_line("port", &ids(&["p2"])),
			"Unable to find port(s) with id(s) 'p2'"
		);
		assert_eq!(
			not_found_line("port", &ids(&["p2", "p4"])),
			"Unable to find port(s) with id(s) 'p2', 'p4'"
		);
	}

	#[test]
	fn report_with_failures_is_an_error() {
		let mut report = DeleteReport::new(&PORT);
		report.deleted.push("p1".to_string());
		report.not_found.push("p2".to_string());
		let err = report.finish(true).unwrap_err();
		match err {
			CliError::BulkDelete { summary } => {
				assert_eq!(summary, "unable to delete 1 of 2 port(s)");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn report_without_failures_is_ok() {
		let mut report = DeleteReport::new(&PORT);
		report.deleted.push("p1".to_string());
		assert!(report.finish(true).is_ok());
	}

	#[test]
	fn identity_note_never_reveals_the_password() {
		use crate::cli::OutputFormat;
		use std::time::Duration;

		let effective = EffectiveConfig {
			profile: "test".to_string(),
			os_url: Some("http://neutron:9696".to_string()),
			os_token: None,
			os_auth_url: Some("http://keystone:5000".to_string()),
			os_username: Some("demo".to_string()),
			os_password: Some("hunter2".to_string()),
			os_tenant_name: Some("demo-project".to_string()),
			os_region_name: None,
			os_cacert: None,
			insecure: false,
			format: OutputFormat::Table,
			timeout: Duration::from_secs(30),
			retries: 3,
			max_uri_len: 8192,
		};

		let note = identity_note(&effective);
		assert!(note.contains("user=demo"));
		assert!(note.contains("region=-"));
		assert!(note.contains("password=set"));
		assert!(!note.contains("hunter2"));
	}

	#[test]
	fn splits_largest_array_filter_for_chunking() {
		let extras: Map<String, Value> = serde_json::from_value(json!({
			"network_id": ["n1", "n2", "n3"],
			"status": "ACTIVE",
			"device_id": ["d1", "d2"],
		}))
		.unwrap();

		let (pairs, chunked) = split_chunked_filter(&extras);
		let (key, values) = chunked.unwrap();
		assert_eq!(key, "network_id");
		assert_eq!(values, ids(&["n1", "n2", "n3"]));
		// serde_json maps iterate in key order
		assert_eq!(
			pairs,
			vec![
				("device_id".to_string(), "d1".to_string()),
				("device_id".to_string(), "d2".to_string()),
				("status".to_string(), "ACTIVE".to_string()),
			]
		);
	}

	#[test]
	fn scalar_only_filters_skip_chunking() {
		let extras: Map<String, Value> =
			serde_json::from_value(json!({"status": "ACTIVE"})).unwrap();
		let (pairs, chunked) = split_chunked_filter(&extras);
		assert!(chunked.is_none());
		assert_eq!(pairs, vec![("status".to_string(), "ACTIVE".to_string())]);
	}
}

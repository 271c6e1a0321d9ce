use reqwest::Method;
use serde_json::{Map, Value};

use crate::error::CliError;
use crate::http::HttpClient;
use crate::resource::ResourceSpec;

pub const DEFAULT_MAX_URI_LEN: usize = 8192;

// Thin SDK over the Neutron REST conventions: singular-key body envelopes,
// plural-key list envelopes, `<plural>_links` pagination.
#[derive(Debug, Clone)]
pub struct NeutronClient {
	http: HttpClient,
	max_uri_len: usize,
}

impl NeutronClient {
	pub fn new(http: HttpClient, max_uri_len: usize) -> Self {
		Self { http, max_uri_len }
	}

	pub fn http(&self) -> &HttpClient {
		&self.http
	}

	pub async fn list(
		&self,
		spec: &ResourceSpec,
		query: &[(String, String)],
	) -> Result<Vec<Value>, CliError> {
		self.list_at(&spec.collection_path(), spec, query).await
	}

	async fn list_at(
		&self,
		path: &str,
		spec: &ResourceSpec,
		query: &[(String, String)],
	) -> Result<Vec<Value>, CliError> {
		let mut items = Vec::new();
		let mut response = self
			.http
			.request_json(Method::GET, path, query, None, true)
			.await?;

		loop {
			match response.get_mut(spec.plural).map(Value::take) {
				Some(Value::Array(page)) => items.extend(page),
				Some(other) => {
					return Err(CliError::InvalidArgument(format!(
						"unexpected list payload under '{}': {other}",
						spec.plural
					)))
				}
				None => {
					// Some extensions skip the envelope and return the array
					// directly.
					if let Value::Array(page) = response {
						items.extend(page);
					}
					return Ok(items);
				}
			}

			let Some(next) = next_page_url(&response, spec.plural) else {
				return Ok(items);
			};
			response = self
				.http
				.request_json(Method::GET, &next, &[], None, true)
				.await?;
		}
	}

	pub async fn show(
		&self,
		spec: &ResourceSpec,
		id: &str,
		fields: &[String],
	) -> Result<Value, CliError> {
		let query: Vec<(String, String)> = fields
			.iter()
			.map(|f| ("fields".to_string(), f.clone()))
			.collect();
		let response = self
			.http
			.request_json(Method::GET, &spec.item_path(id), &query, None, true)
			.await?;
		Ok(unwrap_item(response, spec))
	}

	pub async fn create(
		&self,
		spec: &ResourceSpec,
		attrs: Map<String, Value>,
	) -> Result<Value, CliError> {
		let body = wrap_body(spec, attrs);
		let response = self
			.http
			.request_json(
				Method::POST,
				&spec.collection_path(),
				&[],
				Some(body),
				true,
			)
			.await?;
		Ok(unwrap_item(response, spec))
	}

	pub async fn update(
		&self,
		spec: &ResourceSpec,
		id: &str,
		attrs: Map<String, Value>,
	) -> Result<Value, CliError> {
		let body = wrap_body(spec, attrs);
		let response = self
			.http
			.request_json(Method::PUT, &spec.item_path(id), &[], Some(body), true)
			.await?;
		Ok(unwrap_item(response, spec))
	}

	pub async fn delete(&self, spec: &ResourceSpec, id: &str) -> Result<(), CliError> {
		self.http
			.request_json(Method::DELETE, &spec.item_path(id), &[], None, true)
			.await?;
		Ok(())
	}

	// PUT against a sub-action path, e.g. routers/{id}/add_router_interface or
	// fw/firewall_policies/{id}/insert_rule.
	pub async fn put_action(
		&self,
		spec: &ResourceSpec,
		id: &str,
		action: &str,
		body: Value,
	) -> Result<Value, CliError> {
		let path = format!("{}/{action}", spec.item_path(id));
		self.http
			.request_json(Method::PUT, &path, &[], Some(body), true)
			.await
	}

	// Exact-ID lookup first; on 404 fall back to a name-filtered list. Zero
	// matches is NotFound, more than one is NoUniqueMatch.
	pub async fn find_resource_by_name_or_id(
		&self,
		spec: &ResourceSpec,
		name_or_id: &str,
	) -> Result<String, CliError> {
		let name_or_id = name_or_id.trim();
		if name_or_id.is_empty() {
			return Err(CliError::InvalidArgument(format!(
				"{} name or id cannot be empty",
				spec.display()
			)));
		}

		match self.show(spec, name_or_id, &[]).await {
			Ok(item) => {
				let id = item
					.get("id")
					.and_then(|v| v.as_str())
					.unwrap_or(name_or_id);
				return Ok(id.to_string());
			}
			Err(CliError::HttpStatus { status, .. })
				if status == reqwest::StatusCode::NOT_FOUND => {}
			Err(err) => return Err(err),
		}

		let query = vec![
			("name".to_string(), name_or_id.to_string()),
			("fields".to_string(), "id".to_string()),
		];
		let matches = self.list(spec, &query).await?;
		classify_matches(spec, name_or_id, &matches)
	}

	// List with an ID-filter batch, split into as many requests as needed to
	// keep each URI under the server limit. A 414 from a server with a lower
	// limit than ours triggers a recursive split.
	pub async fn list_chunked(
		&self,
		spec: &ResourceSpec,
		filter_key: &str,
		ids: &[String],
		extra_query: &[(String, String)],
	) -> Result<Vec<Value>, CliError> {
		if ids.is_empty() {
			return self.list(spec, extra_query).await;
		}

		let path = spec.collection_path();
		let base_len = self.http.encoded_url_len(&path, extra_query)?;
		let max_id_len = ids.iter().map(|id| id.len()).max().unwrap_or(0);
		let chunk_size = compute_chunk_size(self.max_uri_len, base_len, filter_key.len(), max_id_len);

		let mut pending: std::collections::VecDeque<Vec<String>> =
			ids.chunks(chunk_size).map(|c| c.to_vec()).collect();

		let mut items = Vec::new();
		while let Some(chunk) = pending.pop_front() {
			match self.list_ids_once(spec, filter_key, &chunk, extra_query).await {
				Ok(page) => items.extend(page),
				Err(CliError::RequestUriTooLong) if chunk.len() > 1 => {
					// Server limit is tighter than ours; halve and retry.
					let mid = chunk.len() / 2;
					pending.push_front(chunk[mid..].to_vec());
					pending.push_front(chunk[..mid].to_vec());
				}
				Err(err) => return Err(err),
			}
		}
		Ok(items)
	}

	async fn list_ids_once(
		&self,
		spec: &ResourceSpec,
		filter_key: &str,
		ids: &[String],
		extra_query: &[(String, String)],
	) -> Result<Vec<Value>, CliError> {
		let mut query: Vec<(String, String)> = extra_query.to_vec();
		for id in ids {
			query.push((filter_key.to_string(), id.clone()));
		}
		self.list(spec, &query).await
	}
}

fn wrap_body(spec: &ResourceSpec, attrs: Map<String, Value>) -> Value {
	let mut envelope = Map::new();
	envelope.insert(spec.name.to_string(), Value::Object(attrs));
	Value::Object(envelope)
}

fn unwrap_item(response: Value, spec: &ResourceSpec) -> Value {
	match response {
		Value::Object(mut obj) => obj.remove(spec.name).unwrap_or(Value::Object(obj)),
		other => other,
	}
}

fn next_page_url(response: &Value, plural: &str) -> Option<String> {
	let links = response.get(format!("{plural}_links"))?.as_array()?;
	links
		.iter()
		.find(|link| link.get("rel").and_then(|v| v.as_str()) == Some("next"))
		.and_then(|link| link.get("href").and_then(|v| v.as_str()))
		.map(str::to_string)
}

fn classify_matches(
	spec: &ResourceSpec,
	name: &str,
	matches: &[Value],
) -> Result<String, CliError> {
	match matches {
		[] => Err(CliError::NotFound {
			resource: spec.name,
			name: name.to_string(),
		}),
		[single] => {
			let id = single
				.get("id")
				.and_then(|v| v.as_str())
				.ok_or_else(|| {
					CliError::InvalidArgument(format!(
						"{} list entry is missing an id",
						spec.display()
					))
				})?;
			Ok(id.to_string())
		}
		_ => Err(CliError::NoUniqueMatch {
			resource: spec.name,
			name: name.to_string(),
		}),
	}
}

// Each appended filter costs "&key=<id>". Always admit at least one ID so a
// pathological limit still makes progress (the server gets the final say via
// 414).
pub fn compute_chunk_size(
	max_uri_len: usize,
	base_len: usize,
	key_len: usize,
	max_id_len: usize,
) -> usize {
	let per_id = key_len + max_id_len + 2;
	let budget = max_uri_len.saturating_sub(base_len);
	(budget / per_id.max(1)).max(1)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resource::{NETWORK, PORT};
	use serde_json::json;

	#[test]
	fn wrap_body_nests_attrs_under_singular_key() {
		let mut attrs = Map::new();
		attrs.insert("name".to_string(), json!("foo"));
		attrs.insert("shared".to_string(), json!(true));
		assert_eq!(
			wrap_body(&NETWORK, attrs),
			json!({"network": {"name": "foo", "shared": true}})
		);
	}

	#[test]
	fn unwrap_item_peels_singular_envelope() {
		let wrapped = json!({"network": {"id": "n1", "name": "foo"}});
		assert_eq!(unwrap_item(wrapped, &NETWORK), json!({"id": "n1", "name": "foo"}));
	}

	#[test]
	fn unwrap_item_passes_through_unwrapped_payloads() {
		let bare = json!({"id": "n1"});
		assert_eq!(unwrap_item(bare.clone(), &NETWORK), bare);
	}

	#[test]
	fn next_page_url_follows_rel_next() {
		let response = json!({
			"ports": [],
			"ports_links": [
				{"rel": "previous", "href": "http://x/prev"},
				{"rel": "next", "href": "http://x/next"},
			],
		});
		assert_eq!(next_page_url(&response, "ports").as_deref(), Some("http://x/next"));
		assert_eq!(next_page_url(&json!({"ports": []}), "ports"), None);
	}

	#[test]
	fn classify_matches_zero_is_not_found() {
		let err = classify_matches(&PORT, "web", &[]).unwrap_err();
		assert!(matches!(err, CliError::NotFound { resource: "port", .. }));
	}

	#[test]
	fn classify_matches_one_returns_its_id() {
		let matches = vec![json!({"id": "p-1"})];
		assert_eq!(classify_matches(&PORT, "web", &matches).unwrap(), "p-1");
	}

	#[test]
	fn classify_matches_many_is_ambiguous() {
		let matches = vec![json!({"id": "p-1"}), json!({"id": "p-2"})];
		let err = classify_matches(&PORT, "web", &matches).unwrap_err();
		assert!(matches!(err, CliError::NoUniqueMatch { resource: "port", .. }));
	}

	#[test]
	fn chunk_size_respects_uri_budget() {
		// base 100, limit 1000: budget 900; per id = 10 (key) + 36 (uuid) + 2.
		let size = compute_chunk_size(1000, 100, 10, 36);
		assert_eq!(size, 900 / 48);

		// Every chunk of that size fits under the limit.
		assert!(100 + size * 48 <= 1000);
	}

	#[test]
	fn chunk_size_never_drops_below_one() {
		assert_eq!(compute_chunk_size(10, 100, 9, 36), 1);
		assert_eq!(compute_chunk_size(0, 0, 0, 0), 1);
	}

	#[test]
	fn chunking_splits_hundred_ids() {
		// 100 uuid filters on subnet_id at an 8 KiB limit need several chunks;
		// chunks must cover all ids with no overlap.
		let ids: Vec<String> = (0..100).map(|i| format!("{i:0>36}")).collect();
		let size = compute_chunk_size(DEFAULT_MAX_URI_LEN, 60, "subnet_id".len(), 36);
		let chunks: Vec<&[String]> = ids.chunks(size).collect();
		assert!(chunks.len() >= 1);
		let total: usize = chunks.iter().map(|c| c.len()).sum();
		assert_eq!(total, 100);
	}
}

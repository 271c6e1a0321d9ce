use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::CliError;

const AUTH_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone)]
pub struct HttpClient {
	base_url: Url,
	token: Option<String>,
	retries: u32,
	dry_run: bool,
	client: reqwest::Client,
}

impl HttpClient {
	pub fn new(
		base_url: &str,
		token: Option<String>,
		timeout: Duration,
		retries: u32,
		dry_run: bool,
		insecure: bool,
		cacert: Option<&Path>,
	) -> Result<Self, CliError> {
		let base_url = normalize_base_url(base_url)?;

		let mut builder = reqwest::Client::builder().timeout(timeout);
		if insecure {
			builder = builder.danger_accept_invalid_certs(true);
		}
		if let Some(path) = cacert {
			let pem = std::fs::read(path)?;
			let cert = reqwest::Certificate::from_pem(&pem)
				.map_err(|err| CliError::InvalidArgument(format!("invalid ca cert: {err}")))?;
			builder = builder.add_root_certificate(cert);
		}

		let client = builder.build()?;
		Ok(Self {
			base_url,
			token,
			retries,
			dry_run,
			client,
		})
	}

	pub fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, CliError> {
		let mut url = if path.starts_with("http://") || path.starts_with("https://") {
			Url::parse(path)?
		} else {
			self.base_url.join(path.trim_start_matches('/'))?
		};

		if !query.is_empty() {
			let mut pairs = url.query_pairs_mut();
			for (k, v) in query {
				pairs.append_pair(k, v);
			}
		}
		Ok(url)
	}

	// Encoded length the URL would have, without sending anything. The
	// chunking layer uses this to stay under server URI limits.
	pub fn encoded_url_len(&self, path: &str, query: &[(String, String)]) -> Result<usize, CliError> {
		Ok(self.build_url(path, query)?.as_str().len())
	}

	pub async fn request_json(
		&self,
		method: Method,
		path: &str,
		query: &[(String, String)],
		body: Option<Value>,
		include_auth: bool,
	) -> Result<Value, CliError> {
		let url = self.build_url(path, query)?;
		let body_bytes = match body {
			Some(v) => Some(serde_json::to_vec(&v)?),
			None => None,
		};

		if self.dry_run {
			print_dry_run(
				&method,
				&url,
				include_auth.then(|| self.token.as_deref()).flatten(),
				body_bytes.as_deref(),
			);
			return Err(CliError::DryRunPrinted);
		}

		// POST is not idempotent; creates are never replayed (the server may
		// have applied the first attempt).
		let retries = if method_is_idempotent(&method) {
			self.retries
		} else {
			0
		};

		let mut backoff = Duration::from_millis(200);
		let mut attempt = 0;
		loop {
			let mut request_headers = HeaderMap::new();
			request_headers.insert("accept", HeaderValue::from_static("application/json"));

			if include_auth {
				let token = self.token.as_deref().ok_or(CliError::MissingConfig(
					"token (--os-token or OS_TOKEN)",
				))?;
				request_headers.insert(
					HeaderName::from_static(AUTH_HEADER),
					HeaderValue::from_str(token).map_err(|_| {
						CliError::InvalidArgument("token contains invalid characters".to_string())
					})?,
				);
			}

			let mut request = self
				.client
				.request(method.clone(), url.clone())
				.headers(request_headers);
			if let Some(bytes) = body_bytes.clone() {
				request = request
					.header("content-type", "application/json")
					.body(bytes);
			}

			match request.send().await {
				Ok(resp) => {
					let status = resp.status();
					if status.is_success() {
						return parse_success_body(resp).await;
					}

					if status == StatusCode::URI_TOO_LONG {
						return Err(CliError::RequestUriTooLong);
					}

					if status.is_server_error() && attempt < retries {
						tokio::time::sleep(backoff).await;
						backoff = (backoff * 2).min(Duration::from_secs(5));
						attempt += 1;
						continue;
					}

					let body = resp.text().await.ok();
					let message = extract_error_message(body.as_deref())
						.unwrap_or_else(|| "request failed".to_string());
					return Err(CliError::HttpStatus {
						status,
						message,
						body,
					});
				}
				Err(err) => {
					if attempt < retries && should_retry_error(&err) {
						tokio::time::sleep(backoff).await;
						backoff = (backoff * 2).min(Duration::from_secs(5));
						attempt += 1;
						continue;
					}
					return Err(CliError::Request(err));
				}
			}
		}
	}
}

async fn parse_success_body(resp: reqwest::Response) -> Result<Value, CliError> {
	// DELETE returns 204 with an empty body.
	if resp.status() == StatusCode::NO_CONTENT {
		return Ok(Value::Null);
	}
	let text = resp.text().await?;
	if text.trim().is_empty() {
		return Ok(Value::Null);
	}
	Ok(serde_json::from_str(&text)?)
}

fn method_is_idempotent(method: &Method) -> bool {
	*method == Method::GET
		|| *method == Method::PUT
		|| *method == Method::DELETE
		|| *method == Method::HEAD
}

fn should_retry_error(err: &reqwest::Error) -> bool {
	err.is_timeout() || err.is_connect() || err.is_request()
}

// Neutron wraps failures as {"NeutronError": {"message": ..., "type": ...}};
// some deployments use a bare {"message": ...} instead.
fn extract_error_message(body: Option<&str>) -> Option<String> {
	let value = serde_json::from_str::<Value>(body?).ok()?;
	let inner = value.get("NeutronError").unwrap_or(&value);

	if let Some(message) = inner.get("message").and_then(|v| v.as_str()) {
		return Some(message.to_string());
	}
	inner.as_str().map(str::to_string)
}

fn normalize_base_url(raw: &str) -> Result<Url, CliError> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Err(CliError::MissingConfig("endpoint url (--os-url or OS_URL)"));
	}

	let mut url = Url::parse(trimmed)?;
	let scheme = url.scheme();
	if scheme != "http" && scheme != "https" {
		return Err(CliError::InvalidArgument(format!(
			"unsupported endpoint scheme '{scheme}' (expected http or https)"
		)));
	}

	url.set_query(None);
	url.set_fragment(None);

	// Joining relative paths drops the last segment unless the base ends in a
	// slash.
	if !url.path().ends_with('/') {
		let mut path = url.path().to_string();
		path.push('/');
		url.set_path(&path);
	}
	Ok(url)
}

fn print_dry_run(method: &Method, url: &Url, token: Option<&str>, body: Option<&[u8]>) {
	println!("{method} {url}");

	if let Some(token) = token {
		println!("{AUTH_HEADER}: {}", redact_token(token));
	}

	if let Some(body) = body {
		if let Ok(json) = serde_json::from_slice::<Value>(body) {
			if let Ok(pretty) = serde_json::to_string_pretty(&json) {
				println!();
				println!("{pretty}");
				return;
			}
		}

		if let Ok(text) = std::str::from_utf8(body) {
			println!();
			println!("{text}");
		}
	}
}

pub fn redact_token(token: &str) -> String {
	const KEEP: usize = 4;
	// Count chars, not bytes: byte slicing panics on multibyte tokens.
	if token.chars().count() <= KEEP * 2 {
		return "REDACTED".to_string();
	}
	let head: String = token.chars().take(KEEP).collect();
	let tail: String = token
		.chars()
		.rev()
		.take(KEEP)
		.collect::<Vec<_>>()
		.into_iter()
		.rev()
		.collect();
	format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn client(base: &str) -> HttpClient {
		HttpClient::new(
			base,
			Some("secret".to_string()),
			Duration::from_secs(5),
			0,
			false,
			false,
			None,
		)
		.unwrap()
	}

	#[test]
	fn build_url_joins_relative_paths() {
		let c = client("http://neutron.example.com:9696");
		let url = c.build_url("v2.0/networks", &[]).unwrap();
		assert_eq!(url.as_str(), "http://neutron.example.com:9696/v2.0/networks");
	}

	#[test]
	fn build_url_keeps_endpoint_path_prefix() {
		let c = client("http://neutron.example.com/network");
		let url = c.build_url("v2.0/ports", &[]).unwrap();
		assert_eq!(url.as_str(), "http://neutron.example.com/network/v2.0/ports");
	}

	#[test]
	fn build_url_appends_query_pairs() {
		let c = client("http://neutron.example.com:9696");
		let url = c
			.build_url(
				"v2.0/ports",
				&[
					("name".to_string(), "web".to_string()),
					("fields".to_string(), "id".to_string()),
				],
			)
			.unwrap();
		assert_eq!(
			url.as_str(),
			"http://neutron.example.com:9696/v2.0/ports?name=web&fields=id"
		);
	}

	#[test]
	fn normalize_base_url_rejects_non_http_schemes() {
		let err = HttpClient::new(
			"ftp://example.com",
			None,
			Duration::from_secs(1),
			0,
			false,
			false,
			None,
		)
		.unwrap_err();
		assert!(matches!(err, CliError::InvalidArgument(_)));
	}

	#[test]
	fn method_idempotency_gates_retries() {
		assert!(method_is_idempotent(&Method::GET));
		assert!(method_is_idempotent(&Method::PUT));
		assert!(method_is_idempotent(&Method::DELETE));
		assert!(!method_is_idempotent(&Method::POST));
	}

	#[test]
	fn extracts_neutron_error_message() {
		let body = r#"{"NeutronError": {"message": "Network nope could not be found.", "type": "NetworkNotFound"}}"#;
		assert_eq!(
			extract_error_message(Some(body)).as_deref(),
			Some("Network nope could not be found.")
		);

		let bare = r#"{"message": "bad request"}"#;
		assert_eq!(extract_error_message(Some(bare)).as_deref(), Some("bad request"));
		assert_eq!(extract_error_message(Some("not json")), None);
	}

	#[test]
	fn redact_token_keeps_edges_only() {
		assert_eq!(redact_token("abcd"), "REDACTED");
		assert_eq!(redact_token("abcdefghijkl"), "abcd…ijkl");
		// Multibyte tokens must not be sliced mid-char.
		assert_eq!(redact_token("€€€€"), "REDACTED");
		assert_eq!(redact_token("€€€€€€€€€"), "€€€€…€€€€");
	}
}

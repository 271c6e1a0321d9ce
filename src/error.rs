use std::io;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error("missing required configuration: {0}")]
	MissingConfig(&'static str),

	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("dry-run: request printed")]
	DryRunPrinted,

	#[error("unable to find {resource} with name or id '{name}'")]
	NotFound { resource: &'static str, name: String },

	#[error("multiple {resource} matches found for name '{name}'; use an ID to be more specific")]
	NoUniqueMatch { resource: &'static str, name: String },

	#[error("{summary}")]
	BulkDelete { summary: String },

	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("http {status}: {message}")]
	HttpStatus {
		status: StatusCode,
		message: String,
		body: Option<String>,
	},

	#[error("request uri too long")]
	RequestUriTooLong,

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("failed to parse json: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid url: {0}")]
	Url(#[from] url::ParseError),
}

impl CliError {
	pub fn exit_code(&self) -> i32 {
		match self {
			CliError::DryRunPrinted => 0,
			CliError::MissingConfig(_) | CliError::InvalidArgument(_) => 2,
			_ => 1,
		}
	}
}

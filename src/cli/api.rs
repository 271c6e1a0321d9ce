use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ApiCommand {
	Request(ApiRequestArgs),
	Get(ApiGetArgs),
	Post(ApiBodyArgs),
	Put(ApiBodyArgs),
	Delete(ApiGetArgs),
}

#[derive(Args, Debug)]
pub struct ApiRequestArgs {
	#[arg(value_name = "METHOD")]
	pub method: String,

	#[arg(value_name = "PATH")]
	pub path: String,

	#[arg(long, value_name = "JSON", conflicts_with = "body_file")]
	pub body: Option<String>,

	#[arg(long, value_name = "PATH", conflicts_with = "body")]
	pub body_file: Option<PathBuf>,

	#[arg(long)]
	pub no_auth: bool,
}

#[derive(Args, Debug)]
pub struct ApiGetArgs {
	#[arg(value_name = "PATH")]
	pub path: String,
}

#[derive(Args, Debug)]
pub struct ApiBodyArgs {
	#[arg(value_name = "PATH")]
	pub path: String,

	#[arg(long, value_name = "JSON", conflicts_with = "body_file")]
	pub body: Option<String>,

	#[arg(long, value_name = "PATH", conflicts_with = "body")]
	pub body_file: Option<PathBuf>,
}

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
	Path,
	Get(ConfigGetArgs),
	Set(ConfigSetArgs),
	Unset(ConfigUnsetArgs),
	List,
	Profiles {
		#[command(subcommand)]
		command: ConfigProfilesCommand,
	},
}

#[derive(Args, Debug)]
pub struct ConfigGetArgs {
	#[arg(value_name = "KEY")]
	pub key: String,
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
	#[arg(value_name = "KEY")]
	pub key: String,

	#[arg(value_name = "VALUE")]
	pub value: String,
}

#[derive(Args, Debug)]
pub struct ConfigUnsetArgs {
	#[arg(value_name = "KEY")]
	pub key: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigProfilesCommand {
	List,
	Use(ConfigProfilesUseArgs),
}

#[derive(Args, Debug)]
pub struct ConfigProfilesUseArgs {
	#[arg(value_name = "NAME")]
	pub name: String,
}

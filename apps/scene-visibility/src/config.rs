use clap::{Parser, Subcommand};
use obs_websocket::ObsConfig;
use std::time::Duration;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Show, hide or toggle a source in an OBS scene", long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log filter directives
	#[arg(long, env = "RUST_LOG", default_value = "info")]
	pub rust_log: String,

	/// OBS WebSocket host
	#[arg(long, env = "OBS_HOST", default_value = "localhost")]
	pub obs_host: String,

	/// OBS WebSocket port
	#[arg(long, env = "OBS_PORT", default_value = "4455")]
	pub obs_port: u16,

	/// OBS WebSocket password, empty when authentication is disabled
	#[arg(long, env = "OBS_PASSWORD", default_value = "", hide_env_values = true)]
	pub obs_password: String,

	/// Seconds to wait for any single OBS response
	#[arg(long, env = "OBS_REQUEST_TIMEOUT_SECS", default_value = "5")]
	pub request_timeout_secs: u64,

	/// Identity the action is mounted under
	#[arg(long, env = "ACTION_ID", default_value = "scene-visibility")]
	pub action_id: String,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
	/// Print every scene and its sources
	Scenes,

	/// Print the fields offered for a partial configuration
	Props {
		#[arg(long)]
		scene: Option<String>,

		#[arg(long)]
		source: Option<String>,
	},

	/// Apply the visibility change
	Run {
		#[arg(long)]
		scene: String,

		#[arg(long)]
		source: String,

		/// toggle, show or hide
		#[arg(long, default_value = "toggle")]
		visibility: String,
	},
}

impl Config {
	pub fn obs_config(&self) -> ObsConfig {
		ObsConfig {
			host: self.obs_host.clone(),
			port: self.obs_port,
			password: self.obs_password.clone(),
			request_timeout: Duration::from_secs(self.request_timeout_secs),
		}
	}
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsConfig {
	pub host: String,
	pub port: u16,
	pub password: String,
	/// Upper bound on a single request/response round trip
	#[serde(default = "default_request_timeout")]
	pub request_timeout: Duration,
}

const fn default_request_timeout() -> Duration {
	Duration::from_secs(5)
}

impl Default for ObsConfig {
	fn default() -> Self {
		Self {
			host: "localhost".to_string(),
			port: 4455,
			password: String::new(),
			request_timeout: default_request_timeout(),
		}
	}
}

impl ObsConfig {
	/// Load configuration from environment variables, falling back to defaults
	pub fn from_env() -> Self {
		let defaults = Self::default();
		Self {
			host: std::env::var("OBS_HOST").unwrap_or(defaults.host),
			port: std::env::var("OBS_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
			password: std::env::var("OBS_PASSWORD").unwrap_or(defaults.password),
			request_timeout: std::env::var("OBS_REQUEST_TIMEOUT_SECS")
				.ok()
				.and_then(|t| t.parse().ok())
				.map_or(defaults.request_timeout, Duration::from_secs),
		}
	}

	pub fn url(&self) -> String {
		format!("ws://{}:{}", self.host, self.port)
	}
}

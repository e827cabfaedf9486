use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures the action reports to its host
#[derive(Debug, Error)]
pub enum Error {
	#[error("Remote state unavailable: {0}")]
	RemoteUnavailable(#[source] BoxError),

	#[error("Scene not found: {0}")]
	SceneNotFound(String),

	#[error("Source {source_name} not found in scene {scene}")]
	SourceNotFound { scene: String, source_name: String },

	#[error("Action used before it was mounted")]
	NotMounted,
}

impl Error {
	pub fn remote_unavailable(err: impl Into<BoxError>) -> Self {
		Self::RemoteUnavailable(err.into())
	}

	pub fn source_not_found(scene: &str, source: &str) -> Self {
		Self::SourceNotFound {
			scene: scene.to_string(),
			source_name: source.to_string(),
		}
	}
}

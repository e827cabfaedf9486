use std::time::Duration;
use thiserror::Error;

/// Request status code OBS answers with when a named scene, source or item does not exist
pub const RESOURCE_NOT_FOUND: u16 = 600;

pub type Result<T> = std::result::Result<T, ObsClientError>;

/// Errors raised by the OBS WebSocket client
#[derive(Debug, Error)]
pub enum ObsClientError {
	#[error("WebSocket error: {0}")]
	WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

	#[error("Handshake failed: {0}")]
	Handshake(String),

	#[error("Authentication failed: {0}")]
	Authentication(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("{request_type} failed with status {code}: {}", .comment.as_deref().unwrap_or("no comment"))]
	RequestFailed { request_type: String, code: u16, comment: Option<String> },

	#[error("{request_type} timed out after {timeout:?}")]
	Timeout { request_type: String, timeout: Duration },

	#[error("Not connected to OBS")]
	NotConnected,

	#[error("Connection closed before a response arrived")]
	ConnectionClosed,
}

impl ObsClientError {
	/// Whether OBS rejected the request because a named resource does not exist
	pub const fn is_not_found(&self) -> bool {
		matches!(self, Self::RequestFailed { code: RESOURCE_NOT_FOUND, .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_not_found_classification() {
		let missing = ObsClientError::RequestFailed {
			request_type: "GetSceneItemId".to_string(),
			code: RESOURCE_NOT_FOUND,
			comment: Some("No scene items were found in the specified scene by that name or offset.".to_string()),
		};
		assert!(missing.is_not_found());

		let invalid = ObsClientError::RequestFailed {
			request_type: "SetSceneItemEnabled".to_string(),
			code: 400,
			comment: None,
		};
		assert!(!invalid.is_not_found());
		assert!(!ObsClientError::NotConnected.is_not_found());
	}

	#[test]
	fn test_request_failed_display_includes_comment() {
		let err = ObsClientError::RequestFailed {
			request_type: "GetSceneItemList".to_string(),
			code: 600,
			comment: Some("No source was found".to_string()),
		};
		assert_eq!(err.to_string(), "GetSceneItemList failed with status 600: No source was found");
	}
}

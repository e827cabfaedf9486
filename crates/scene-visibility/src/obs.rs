#![cfg(feature = "obs")]

use crate::error::{Error, Result};
use crate::remote::RemoteStateClient;
use crate::snapshot::Scene;
use async_trait::async_trait;
use obs_websocket::{ObsClient, ObsClientError};

#[async_trait]
impl RemoteStateClient for ObsClient {
	async fn list_scenes(&self) -> Result<Vec<Scene>> {
		let scenes = ObsClient::list_scenes(self).await.map_err(Error::remote_unavailable)?;
		Ok(scenes.into_iter().map(|scene| Scene::new(scene.name, scene.sources)).collect())
	}

	async fn source_visibility(&self, scene: &str, source: &str) -> Result<bool> {
		ObsClient::source_visibility(self, scene, source).await.map_err(|e| item_error(e, scene, source))
	}

	async fn set_source_visibility(&self, scene: &str, source: &str, visible: bool) -> Result<()> {
		ObsClient::set_source_visibility(self, scene, source, visible).await.map_err(|e| item_error(e, scene, source))
	}
}

fn item_error(err: ObsClientError, scene: &str, source: &str) -> Error {
	if err.is_not_found() {
		Error::source_not_found(scene, source)
	} else {
		Error::remote_unavailable(err)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use obs_websocket::RESOURCE_NOT_FOUND;
	use std::time::Duration;

	#[test]
	fn test_missing_item_maps_to_source_not_found() {
		let err = item_error(
			ObsClientError::RequestFailed {
				request_type: "GetSceneItemId".to_string(),
				code: RESOURCE_NOT_FOUND,
				comment: None,
			},
			"Scene A",
			"Cam",
		);
		assert!(matches!(err, Error::SourceNotFound { .. }));
	}

	#[test]
	fn test_transport_failures_map_to_remote_unavailable() {
		let err = item_error(
			ObsClientError::Timeout {
				request_type: "GetSceneItemEnabled".to_string(),
				timeout: Duration::from_secs(5),
			},
			"Scene A",
			"Cam",
		);
		assert!(matches!(err, Error::RemoteUnavailable(_)));

		let err = item_error(ObsClientError::NotConnected, "Scene A", "Cam");
		assert_eq!(err.to_string(), "Remote state unavailable: Not connected to OBS");
	}
}

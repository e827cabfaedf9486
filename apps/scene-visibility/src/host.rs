use async_trait::async_trait;
use obs_websocket::{ObsClient, ObsClientError, ObsConfig};
use scene_visibility::{ActionHost, ActionIdentity, Error, RemoteStateClient};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the OBS connection and lends it to mounted actions
pub struct ObsHost {
	client: Arc<ObsClient>,
}

impl ObsHost {
	pub async fn connect(config: ObsConfig) -> Result<Self, ObsClientError> {
		let client = ObsClient::connect(config).await?;
		Ok(Self { client: Arc::new(client) })
	}

	pub fn client(&self) -> &ObsClient {
		&self.client
	}

	pub async fn shutdown(&self) {
		if let Err(e) = self.client.disconnect().await {
			warn!("Error disconnecting from OBS: {}", e);
		}
	}
}

#[async_trait]
impl ActionHost for ObsHost {
	async fn transport(&self, identity: &ActionIdentity) -> scene_visibility::Result<Arc<dyn RemoteStateClient>> {
		if !self.client.is_connected() {
			return Err(Error::remote_unavailable(ObsClientError::NotConnected));
		}
		debug!(action = %identity, "Lending OBS connection");
		Ok(self.client.clone())
	}
}

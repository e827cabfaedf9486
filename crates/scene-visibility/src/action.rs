use crate::error::{Error, Result};
use crate::executor::{self, RunOutcome};
use crate::fields::FieldSet;
use crate::remote::RemoteStateClient;
use crate::resolver;
use crate::stage::Stage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

/// Persistent identity the host assigns to an installed action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionIdentity {
	pub id: String,
}

impl ActionIdentity {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into() }
	}
}

impl std::fmt::Display for ActionIdentity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.id)
	}
}

/// What the automation host provides to its actions
#[async_trait]
pub trait ActionHost: Send + Sync {
	/// The remote state handle bound to `identity`
	async fn transport(&self, identity: &ActionIdentity) -> Result<Arc<dyn RemoteStateClient>>;
}

/// Lifecycle the host drives. `mounted` must complete before anything else is called.
#[async_trait]
pub trait Action: Send + Sync {
	fn identity(&self) -> &ActionIdentity;

	async fn mounted(&mut self, host: &dyn ActionHost) -> Result<()>;

	/// Fields to offer for the configuration entered so far
	async fn prepare_props(&self, stage: &Stage) -> Result<FieldSet>;

	/// Apply the configured change. `input` is the trigger's output and is not consulted.
	async fn run(&self, props: &Stage, input: &Value) -> Result<RunOutcome>;
}

/// Shows, hides or toggles one source in one scene
pub struct SourceVisibilityAction {
	identity: ActionIdentity,
	client: Option<Arc<dyn RemoteStateClient>>,
}

impl SourceVisibilityAction {
	pub const fn new(identity: ActionIdentity) -> Self {
		Self { identity, client: None }
	}

	/// An action whose transport handle is already known
	pub fn with_client(identity: ActionIdentity, client: Arc<dyn RemoteStateClient>) -> Self {
		Self {
			identity,
			client: Some(client),
		}
	}

	pub const fn is_mounted(&self) -> bool {
		self.client.is_some()
	}

	fn client(&self) -> Result<&dyn RemoteStateClient> {
		self.client.as_deref().ok_or(Error::NotMounted)
	}
}

#[async_trait]
impl Action for SourceVisibilityAction {
	fn identity(&self) -> &ActionIdentity {
		&self.identity
	}

	#[instrument(skip(self, host), fields(action = %self.identity))]
	async fn mounted(&mut self, host: &dyn ActionHost) -> Result<()> {
		let client = host.transport(&self.identity).await?;
		self.client = Some(client);
		info!("Action mounted");
		Ok(())
	}

	async fn prepare_props(&self, stage: &Stage) -> Result<FieldSet> {
		resolver::resolve(self.client()?, stage).await
	}

	async fn run(&self, props: &Stage, _input: &Value) -> Result<RunOutcome> {
		executor::execute(self.client()?, props).await
	}
}

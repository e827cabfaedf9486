use crate::error::{Error, Result};
use crate::remote::RemoteStateClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
	pub name: String,
}

impl Source {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
	pub name: String,
	pub sources: Vec<Source>,
}

impl Scene {
	pub fn new<I, S>(name: impl Into<String>, sources: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			name: name.into(),
			sources: sources.into_iter().map(Source::new).collect(),
		}
	}
}

/// Point-in-time view of the remote scene graph. Built per call, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
	scenes: Vec<Scene>,
}

impl Snapshot {
	pub const fn new(scenes: Vec<Scene>) -> Self {
		Self { scenes }
	}

	pub fn scenes(&self) -> &[Scene] {
		&self.scenes
	}

	/// Look a scene up by name. If the remote ever reports a name twice the last one wins.
	pub fn scene(&self, name: &str) -> Option<&Scene> {
		self.scenes.iter().rev().find(|scene| scene.name == name)
	}

	pub fn scene_names(&self) -> impl Iterator<Item = &str> {
		self.scenes.iter().map(|scene| scene.name.as_str())
	}

	pub fn len(&self) -> usize {
		self.scenes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.scenes.is_empty()
	}

	pub fn into_scenes(self) -> Vec<Scene> {
		self.scenes
	}
}

/// Fetch a fresh snapshot of every scene and its sources
#[instrument(skip(client))]
pub async fn fetch_scenes(client: &dyn RemoteStateClient) -> Result<Snapshot> {
	let snapshot = Snapshot::new(client.list_scenes().await?);
	debug!(scene_count = snapshot.len(), "Fetched scene graph");
	Ok(snapshot)
}

/// Sources of `scene_name`, taken from a fresh snapshot
#[instrument(skip(client))]
pub async fn fetch_sources_of(client: &dyn RemoteStateClient, scene_name: &str) -> Result<Vec<Source>> {
	let snapshot = fetch_scenes(client).await?;
	snapshot
		.scene(scene_name)
		.map(|scene| scene.sources.clone())
		.ok_or_else(|| Error::SceneNotFound(scene_name.to_string()))
}

use crate::error::{Error, Result};
use crate::fields::{self, FieldDescriptor, FieldSet};
use crate::remote::RemoteStateClient;
use crate::snapshot::{fetch_scenes, fetch_sources_of, Snapshot, Source};
use crate::stage::{Stage, VisibilityMode};
use tracing::{debug, instrument};

const SOURCE_ICON: &str = "widgets";

/// Build the fields to offer for the current stage.
///
/// `scene` and `visibility` are always present. `source` is added only when a
/// scene is selected and that scene still exists remotely. Every call reads the
/// remote scene graph again.
#[instrument(skip(client, stage), fields(scene = ?stage.scene_name()))]
pub async fn resolve(client: &dyn RemoteStateClient, stage: &Stage) -> Result<FieldSet> {
	let snapshot = fetch_scenes(client).await?;

	let mut fields = FieldSet::new();
	fields.insert(fields::SCENE.to_string(), scene_field(&snapshot));

	if let Some(scene) = stage.scene_name() {
		match fetch_sources_of(client, scene).await {
			Ok(sources) => {
				fields.insert(fields::SOURCE.to_string(), source_field(&sources));
			}
			Err(Error::SceneNotFound(_)) => {
				debug!(scene, "Selected scene no longer exists, omitting source field");
			}
			Err(e) => return Err(e),
		}
	}

	fields.insert(fields::VISIBILITY.to_string(), visibility_field());

	Ok(fields)
}

fn scene_field(snapshot: &Snapshot) -> FieldDescriptor {
	snapshot
		.scene_names()
		.fold(FieldDescriptor::select("Scene", "Select the scene containing the source").required().watched(), |field, name| {
			field.with_option(name, name, None)
		})
}

fn source_field(sources: &[Source]) -> FieldDescriptor {
	sources
		.iter()
		.fold(FieldDescriptor::select("Source", "Select a source to toggle").required().watched(), |field, source| {
			field.with_option(source.name.as_str(), source.name.as_str(), Some(SOURCE_ICON))
		})
}

fn visibility_field() -> FieldDescriptor {
	VisibilityMode::ALL.into_iter().fold(
		FieldDescriptor::select("State", "Hide, show or toggle the source visibility")
			.required()
			.with_default(VisibilityMode::default().as_str()),
		|field, mode| field.with_option(mode.as_str(), mode.label(), Some(mode.icon())),
	)
}

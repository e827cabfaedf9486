use crate::error::Result;
use crate::remote::RemoteStateClient;
use crate::stage::{Stage, VisibilityCommand};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Result of running the action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
	Applied { scene: String, source: String, visible: bool },
	Skipped { reason: SkipReason },
}

/// Why a run finished without touching the remote state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SkipReason {
	/// Scene or source not selected yet
	IncompleteConfiguration,
	UnrecognizedVisibilityMode(String),
}

impl RunOutcome {
	pub const fn is_applied(&self) -> bool {
		matches!(self, Self::Applied { .. })
	}
}

/// Read the source's visibility, then write the visibility the stage asks for.
///
/// The read always happens first, for `show` and `hide` as well, so a missing
/// source or dead connection fails before anything is written. The write is
/// never skipped when the source is already in the requested state.
#[instrument(skip(client, stage), fields(scene = ?stage.scene_name(), source = ?stage.source_name()))]
pub async fn execute(client: &dyn RemoteStateClient, stage: &Stage) -> Result<RunOutcome> {
	let (Some(scene), Some(source)) = (stage.scene_name(), stage.source_name()) else {
		debug!("Scene or source not configured, nothing to do");
		return Ok(RunOutcome::Skipped {
			reason: SkipReason::IncompleteConfiguration,
		});
	};

	let current = client.source_visibility(scene, source).await?;

	let desired = match stage.visibility_mode() {
		Ok(mode) => mode,
		Err(e) => {
			debug!("{}, leaving source untouched", e);
			return Ok(RunOutcome::Skipped {
				reason: SkipReason::UnrecognizedVisibilityMode(e.0),
			});
		}
	};

	let command = VisibilityCommand {
		scene: scene.to_string(),
		source: source.to_string(),
		desired,
	};
	write(client, command, current).await
}

/// Run an already resolved command: read, then write
#[instrument(skip(client))]
pub async fn execute_command(client: &dyn RemoteStateClient, command: VisibilityCommand) -> Result<RunOutcome> {
	let current = client.source_visibility(&command.scene, &command.source).await?;
	write(client, command, current).await
}

async fn write(client: &dyn RemoteStateClient, command: VisibilityCommand, current: bool) -> Result<RunOutcome> {
	let visible = command.desired.apply(current);
	client.set_source_visibility(&command.scene, &command.source, visible).await?;

	info!(scene = %command.scene, source = %command.source, mode = %command.desired, from = current, to = visible, "Source visibility set");

	Ok(RunOutcome::Applied {
		scene: command.scene,
		source: command.source,
		visible,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use crate::remote::MockRemoteStateClient;
	use crate::stage::VisibilityMode;
	use mockall::{predicate::eq, Sequence};

	fn stage(mode: &str) -> Stage {
		Stage::default().with_scene("Scene A").with_source("Cam").with_visibility(mode)
	}

	/// Expect exactly one read returning `current`, followed by one write of `written`
	fn client_expecting(current: bool, written: bool) -> MockRemoteStateClient {
		let mut client = MockRemoteStateClient::new();
		let mut seq = Sequence::new();
		client.expect_list_scenes().never();
		client
			.expect_source_visibility()
			.withf(|scene, source| scene == "Scene A" && source == "Cam")
			.times(1)
			.in_sequence(&mut seq)
			.returning(move |_, _| Ok(current));
		client
			.expect_set_source_visibility()
			.with(eq("Scene A"), eq("Cam"), eq(written))
			.times(1)
			.in_sequence(&mut seq)
			.returning(|_, _, _| Ok(()));
		client
	}

	#[tokio::test]
	async fn test_toggle_inverts_current_state() {
		let client = client_expecting(false, true);
		let outcome = execute(&client, &stage("toggle")).await.unwrap();
		assert!(matches!(outcome, RunOutcome::Applied { visible: true, .. }));

		let client = client_expecting(true, false);
		let outcome = execute(&client, &stage("toggle")).await.unwrap();
		assert!(matches!(outcome, RunOutcome::Applied { visible: false, .. }));
	}

	#[tokio::test]
	async fn test_show_and_hide_always_write() {
		for current in [true, false] {
			let client = client_expecting(current, true);
			execute(&client, &stage("show")).await.unwrap();

			let client = client_expecting(current, false);
			execute(&client, &stage("hide")).await.unwrap();
		}
	}

	#[tokio::test]
	async fn test_missing_visibility_toggles() {
		let client = client_expecting(true, false);
		let outcome = execute(&client, &Stage::default().with_scene("Scene A").with_source("Cam")).await.unwrap();
		assert!(outcome.is_applied());
	}

	#[tokio::test]
	async fn test_incomplete_configuration_is_a_silent_noop() {
		let mut client = MockRemoteStateClient::new();
		client.expect_list_scenes().never();
		client.expect_source_visibility().never();
		client.expect_set_source_visibility().never();

		for stage in [
			Stage::default(),
			Stage::default().with_scene("Scene A"),
			Stage::default().with_source("Cam"),
			Stage::default().with_scene("Scene A").with_source(""),
		] {
			let outcome = execute(&client, &stage).await.unwrap();
			assert_eq!(
				outcome,
				RunOutcome::Skipped {
					reason: SkipReason::IncompleteConfiguration
				}
			);
		}
	}

	#[tokio::test]
	async fn test_unrecognized_mode_reads_but_never_writes() {
		let mut client = MockRemoteStateClient::new();
		client.expect_source_visibility().times(1).returning(|_, _| Ok(true));
		client.expect_set_source_visibility().never();

		let outcome = execute(&client, &stage("flip")).await.unwrap();

		assert_eq!(
			outcome,
			RunOutcome::Skipped {
				reason: SkipReason::UnrecognizedVisibilityMode("flip".to_string())
			}
		);
	}

	#[tokio::test]
	async fn test_failed_read_aborts_before_write() {
		let mut client = MockRemoteStateClient::new();
		client.expect_source_visibility().times(1).returning(|scene, source| Err(Error::source_not_found(scene, source)));
		client.expect_set_source_visibility().never();

		let err = execute(&client, &stage("show")).await.unwrap_err();

		assert!(matches!(err, Error::SourceNotFound { ref scene, ref source_name } if scene == "Scene A" && source_name == "Cam"));
	}

	#[tokio::test]
	async fn test_failed_write_surfaces_as_is() {
		let mut client = MockRemoteStateClient::new();
		client.expect_source_visibility().returning(|_, _| Ok(false));
		client.expect_set_source_visibility().times(1).returning(|_, _, _| Err(Error::remote_unavailable("timed out")));

		let err = execute(&client, &stage("toggle")).await.unwrap_err();

		assert!(matches!(err, Error::RemoteUnavailable(_)));
	}

	#[tokio::test]
	async fn test_execute_command_reads_then_writes() {
		let client = client_expecting(false, false);
		let command = VisibilityCommand {
			scene: "Scene A".to_string(),
			source: "Cam".to_string(),
			desired: VisibilityMode::Hide,
		};

		let outcome = execute_command(&client, command).await.unwrap();

		assert_eq!(
			outcome,
			RunOutcome::Applied {
				scene: "Scene A".to_string(),
				source: "Cam".to_string(),
				visible: false,
			}
		);
	}
}

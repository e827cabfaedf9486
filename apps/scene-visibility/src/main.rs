use anyhow::Result;
use clap::Parser;
use scene_visibility::{fetch_scenes, Action, ActionIdentity, SourceVisibilityAction, Stage};
use scene_visibility_cli::{init_tracing, Command, Config, ObsHost};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();
	init_tracing(&config)?;

	tracing::info!("Connecting to OBS at {}:{}", config.obs_host, config.obs_port);
	let host = ObsHost::connect(config.obs_config()).await?;

	let mut action = SourceVisibilityAction::new(ActionIdentity::new(config.action_id.clone()));
	action.mounted(&host).await?;

	let result = tokio::select! {
		result = run_command(&host, &action, config.command) => result,
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Shutdown signal received");
			Ok(())
		}
	};

	host.shutdown().await;
	result
}

async fn run_command(host: &ObsHost, action: &SourceVisibilityAction, command: Command) -> Result<()> {
	match command {
		Command::Scenes => {
			let snapshot = fetch_scenes(host.client()).await?;
			println!("{}", serde_json::to_string_pretty(&snapshot)?);
		}
		Command::Props { scene, source } => {
			let stage = Stage {
				scene,
				source,
				visibility: None,
			};
			let fields = action.prepare_props(&stage).await?;
			println!("{}", serde_json::to_string_pretty(&fields)?);
		}
		Command::Run { scene, source, visibility } => {
			let props = Stage::default().with_scene(scene).with_source(source).with_visibility(visibility);
			let outcome = action.run(&props, &Value::Null).await?;
			tracing::info!(?outcome, "Action finished");
			println!("{}", serde_json::to_string_pretty(&outcome)?);
		}
	}
	Ok(())
}

use crate::error::Result;
use crate::types::*;
use serde::Serialize;
use uuid::Uuid;

/// A serialized request ready to go on the wire, with the id its response will carry
#[derive(Debug, Clone)]
pub struct PreparedRequest {
	pub request_type: ObsRequestType,
	pub request_id: String,
	pub body: serde_json::Value,
}

/// Utility functions for the OBS requests this client issues
pub struct ObsRequestBuilder;

impl ObsRequestBuilder {
	/// Generate a unique request ID
	fn generate_id(prefix: &str) -> String {
		format!("{}-{}", prefix, Uuid::new_v4().simple())
	}

	/// Create a generic OBS request
	pub fn create_request<T>(request_type: ObsRequestType, params: Option<T>) -> Result<PreparedRequest>
	where
		T: Serialize,
	{
		let request_id = Self::generate_id("req");

		let body = serde_json::to_value(ObsRequest {
			op_code: op::REQUEST,
			d: RequestData {
				t: request_type,
				id: request_id.clone(),
				p: params,
			},
		})?;

		Ok(PreparedRequest { request_type, request_id, body })
	}

	/// List every scene
	pub fn get_scene_list() -> Result<PreparedRequest> {
		Self::create_request(ObsRequestType::GetSceneList, None::<()>)
	}

	/// List the items placed in a scene
	pub fn get_scene_item_list(scene_name: &str) -> Result<PreparedRequest> {
		Self::create_request(
			ObsRequestType::GetSceneItemList,
			Some(SceneParams {
				scene_name: scene_name.to_string(),
			}),
		)
	}

	/// Resolve a source name to its item id within a scene
	pub fn get_scene_item_id(scene_name: &str, source_name: &str) -> Result<PreparedRequest> {
		Self::create_request(
			ObsRequestType::GetSceneItemId,
			Some(SceneItemIdParams {
				scene_name: scene_name.to_string(),
				source_name: source_name.to_string(),
			}),
		)
	}

	/// Read whether a scene item is visible
	pub fn get_scene_item_enabled(scene_name: &str, scene_item_id: i64) -> Result<PreparedRequest> {
		Self::create_request(
			ObsRequestType::GetSceneItemEnabled,
			Some(SceneItemParams {
				scene_name: scene_name.to_string(),
				scene_item_id,
			}),
		)
	}

	/// Show or hide a scene item
	pub fn set_scene_item_enabled(scene_name: &str, scene_item_id: i64, enabled: bool) -> Result<PreparedRequest> {
		Self::create_request(
			ObsRequestType::SetSceneItemEnabled,
			Some(SetSceneItemEnabledParams {
				scene_name: scene_name.to_string(),
				scene_item_id,
				scene_item_enabled: enabled,
			}),
		)
	}
}

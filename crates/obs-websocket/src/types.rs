use serde::{Deserialize, Serialize};
use serde_json::Value;

/// obs-websocket v5 message op codes
pub mod op {
	pub const HELLO: u64 = 0;
	pub const IDENTIFY: u64 = 1;
	pub const IDENTIFIED: u64 = 2;
	pub const EVENT: u64 = 5;
	pub const REQUEST: u8 = 6;
	pub const REQUEST_RESPONSE: u64 = 7;
}

/// Requests this client issues against OBS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObsRequestType {
	GetSceneList,
	GetSceneItemList,
	GetSceneItemId,
	GetSceneItemEnabled,
	SetSceneItemEnabled,
}

impl ObsRequestType {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::GetSceneList => "GetSceneList",
			Self::GetSceneItemList => "GetSceneItemList",
			Self::GetSceneItemId => "GetSceneItemId",
			Self::GetSceneItemEnabled => "GetSceneItemEnabled",
			Self::SetSceneItemEnabled => "SetSceneItemEnabled",
		}
	}
}

impl std::fmt::Display for ObsRequestType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct ObsRequest<T>
where
	T: Serialize,
{
	#[serde(rename = "op")]
	pub op_code: u8,
	pub d: RequestData<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestData<T>
where
	T: Serialize,
{
	#[serde(rename = "requestType")]
	pub t: ObsRequestType,
	#[serde(rename = "requestId")]
	pub id: String,
	#[serde(rename = "requestData")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub p: Option<T>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneParams {
	pub scene_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemIdParams {
	pub scene_name: String,
	pub source_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemParams {
	pub scene_name: String,
	pub scene_item_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSceneItemEnabledParams {
	pub scene_name: String,
	pub scene_item_id: i64,
	pub scene_item_enabled: bool,
}

/// Server `Hello` payload (op 0)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloData {
	#[serde(default)]
	pub obs_web_socket_version: Option<String>,
	#[serde(default = "default_rpc_version")]
	pub rpc_version: u32,
	#[serde(default)]
	pub authentication: Option<AuthChallenge>,
}

const fn default_rpc_version() -> u32 {
	1
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthChallenge {
	pub challenge: String,
	pub salt: String,
}

/// Envelope every server message arrives in
#[derive(Debug, Clone, Deserialize)]
pub struct ServerMessage {
	pub op: u64,
	#[serde(default)]
	pub d: Value,
}

/// Payload of a `RequestResponse` (op 7)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
	pub request_type: String,
	pub request_id: String,
	pub request_status: RequestStatus,
	#[serde(default)]
	pub response_data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestStatus {
	pub result: bool,
	pub code: u16,
	#[serde(default)]
	pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneListResponse {
	pub scenes: Vec<SceneListEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneListEntry {
	pub scene_name: String,
	#[serde(default)]
	pub scene_index: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemListResponse {
	pub scene_items: Vec<SceneItemEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemEntry {
	pub source_name: String,
	#[serde(default)]
	pub scene_item_index: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemIdResponse {
	pub scene_item_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemEnabledResponse {
	pub scene_item_enabled: bool,
}

/// A scene and the names of the sources placed in it, top-most first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObsScene {
	pub name: String,
	pub sources: Vec<String>,
}

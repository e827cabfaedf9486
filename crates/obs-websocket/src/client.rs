use crate::auth::identify;
use crate::config::ObsConfig;
use crate::error::{ObsClientError, Result};
use crate::request_builder::{ObsRequestBuilder, PreparedRequest};
use crate::types::*;
use futures_util::{
	sink::SinkExt,
	stream::{SplitSink, SplitStream, StreamExt},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc,
};
use std::time::{Duration, Instant};
use tokio::{
	net::TcpStream,
	sync::{oneshot, Mutex},
	task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as TungsteniteMessage, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, instrument, trace, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, TungsteniteMessage>;
type PendingRequests = Arc<Mutex<HashMap<String, oneshot::Sender<Result<Value>>>>>;

const PING_INTERVAL: Duration = Duration::from_secs(30);
const IDLE_LIMIT: Duration = Duration::from_secs(120);

/// A message received after the handshake, reduced to what the client acts on
#[derive(Debug)]
pub enum Incoming {
	Response { request_id: String, result: Result<Value> },
	Event { event_type: Option<String> },
	Other { op: u64 },
}

impl Incoming {
	pub fn parse(text: &str) -> Result<Self> {
		let message: ServerMessage = serde_json::from_str(text)?;

		match message.op {
			op::REQUEST_RESPONSE => {
				let response: RequestResponse = serde_json::from_value(message.d)?;
				let result = if response.request_status.result {
					Ok(response.response_data.unwrap_or(Value::Null))
				} else {
					Err(ObsClientError::RequestFailed {
						request_type: response.request_type,
						code: response.request_status.code,
						comment: response.request_status.comment,
					})
				};
				Ok(Self::Response {
					request_id: response.request_id,
					result,
				})
			}
			op::EVENT => Ok(Self::Event {
				event_type: message.d.get("eventType").and_then(Value::as_str).map(String::from),
			}),
			other => Ok(Self::Other { op: other }),
		}
	}
}

/// Request/response client for a single identified OBS WebSocket session
pub struct ObsClient {
	config: ObsConfig,
	sink: Arc<Mutex<WsSink>>,
	pending: PendingRequests,
	connected: Arc<AtomicBool>,
	reader: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl ObsClient {
	/// Open the socket, identify, and start routing responses
	#[instrument(skip(config), fields(host = %config.host, port = config.port))]
	pub async fn connect(config: ObsConfig) -> Result<Self> {
		let (ws_stream, _) = connect_async(config.url()).await.map_err(|e| {
			error!("Failed to connect to OBS WebSocket: {}", e);
			ObsClientError::WebSocket(e)
		})?;

		let (mut sink, mut stream) = ws_stream.split();
		identify(&config.password, &mut sink, &mut stream).await?;

		let sink = Arc::new(Mutex::new(sink));
		let pending = PendingRequests::default();
		let connected = Arc::new(AtomicBool::new(true));

		let reader = tokio::spawn(message_processing_loop(stream, sink.clone(), pending.clone(), connected.clone()));

		info!("Connected to OBS WebSocket");

		Ok(Self {
			config,
			sink,
			pending,
			connected,
			reader: std::sync::Mutex::new(Some(reader)),
		})
	}

	pub fn is_connected(&self) -> bool {
		self.connected.load(Ordering::Acquire)
	}

	pub const fn config(&self) -> &ObsConfig {
		&self.config
	}

	/// Close the socket and fail anything still waiting on a response
	pub async fn disconnect(&self) -> Result<()> {
		if !self.connected.swap(false, Ordering::AcqRel) {
			return Ok(());
		}

		{
			let mut sink = self.sink.lock().await;
			if let Err(e) = sink.send(TungsteniteMessage::Close(None)).await {
				warn!("Failed to send close frame: {}", e);
			}
		}

		self.abort_reader();
		fail_pending(&self.pending).await;

		info!("Disconnected from OBS WebSocket");
		Ok(())
	}

	/// Scenes in UI order, each with its sources top-most first
	#[instrument(skip(self))]
	pub async fn list_scenes(&self) -> Result<Vec<ObsScene>> {
		let mut list: SceneListResponse = self.request(ObsRequestBuilder::get_scene_list()?).await?;
		list.scenes.sort_by_key(|scene| std::cmp::Reverse(scene.scene_index));

		let mut scenes = Vec::with_capacity(list.scenes.len());
		for entry in list.scenes {
			let items = match self.request::<SceneItemListResponse>(ObsRequestBuilder::get_scene_item_list(&entry.scene_name)?).await {
				Ok(items) => items,
				Err(e) if e.is_not_found() => {
					debug!(scene = %entry.scene_name, "Scene removed while listing, skipping");
					continue;
				}
				Err(e) => return Err(e),
			};

			let mut scene_items = items.scene_items;
			scene_items.sort_by_key(|item| std::cmp::Reverse(item.scene_item_index));

			scenes.push(ObsScene {
				name: entry.scene_name,
				sources: scene_items.into_iter().map(|item| item.source_name).collect(),
			});
		}

		debug!(scene_count = scenes.len(), "Listed scenes");
		Ok(scenes)
	}

	#[instrument(skip(self))]
	pub async fn source_visibility(&self, scene: &str, source: &str) -> Result<bool> {
		let scene_item_id = self.scene_item_id(scene, source).await?;
		let response: SceneItemEnabledResponse = self.request(ObsRequestBuilder::get_scene_item_enabled(scene, scene_item_id)?).await?;
		Ok(response.scene_item_enabled)
	}

	#[instrument(skip(self))]
	pub async fn set_source_visibility(&self, scene: &str, source: &str, visible: bool) -> Result<()> {
		let scene_item_id = self.scene_item_id(scene, source).await?;
		self.request::<Value>(ObsRequestBuilder::set_scene_item_enabled(scene, scene_item_id, visible)?).await?;
		Ok(())
	}

	async fn scene_item_id(&self, scene: &str, source: &str) -> Result<i64> {
		let response: SceneItemIdResponse = self.request(ObsRequestBuilder::get_scene_item_id(scene, source)?).await?;
		Ok(response.scene_item_id)
	}

	/// Send a request and wait for the response carrying its id
	pub async fn request<R>(&self, request: PreparedRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let data = self.request_value(request).await?;
		Ok(serde_json::from_value(data)?)
	}

	async fn request_value(&self, request: PreparedRequest) -> Result<Value> {
		let PreparedRequest { request_type, request_id, body } = request;
		let (tx, rx) = oneshot::channel();

		// `fail_pending` drains under this lock; check and insert together
		{
			let mut pending = self.pending.lock().await;
			if !self.is_connected() {
				return Err(ObsClientError::NotConnected);
			}
			pending.insert(request_id.clone(), tx);
		}

		trace!("Sending request: {} ({})", request_type, request_id);

		let sent = {
			let mut sink = self.sink.lock().await;
			sink.send(TungsteniteMessage::Text(body.to_string().into())).await
		};
		if let Err(e) = sent {
			self.pending.lock().await.remove(&request_id);
			return Err(e.into());
		}

		match tokio::time::timeout(self.config.request_timeout, rx).await {
			Ok(Ok(result)) => result,
			Ok(Err(_)) => Err(ObsClientError::ConnectionClosed),
			Err(_) => {
				self.pending.lock().await.remove(&request_id);
				warn!("Request {} ({}) timed out", request_type, request_id);
				Err(ObsClientError::Timeout {
					request_type: request_type.to_string(),
					timeout: self.config.request_timeout,
				})
			}
		}
	}

	fn abort_reader(&self) {
		if let Ok(mut reader) = self.reader.lock() {
			if let Some(handle) = reader.take() {
				handle.abort();
			}
		}
	}
}

impl Drop for ObsClient {
	fn drop(&mut self) {
		self.abort_reader();
	}
}

async fn fail_pending(pending: &PendingRequests) {
	let mut pending = pending.lock().await;
	for (_, tx) in pending.drain() {
		let _ = tx.send(Err(ObsClientError::ConnectionClosed));
	}
}

async fn message_processing_loop(mut stream: SplitStream<WsStream>, sink: Arc<Mutex<WsSink>>, pending: PendingRequests, connected: Arc<AtomicBool>) {
	let mut last_activity = Instant::now();
	let mut ping_interval = tokio::time::interval(PING_INTERVAL);
	ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

	loop {
		tokio::select! {
			msg = stream.next() => {
				match msg {
					Some(Ok(TungsteniteMessage::Text(text))) => {
						last_activity = Instant::now();
						match Incoming::parse(&text) {
							Ok(Incoming::Response { request_id, result }) => {
								match pending.lock().await.remove(&request_id) {
									Some(tx) => {
										let _ = tx.send(result);
									}
									None => debug!("Response for unknown request {}", request_id),
								}
							}
							Ok(Incoming::Event { event_type }) => trace!(?event_type, "Ignoring event"),
							Ok(Incoming::Other { op }) => debug!(op, "Ignoring message"),
							Err(e) => warn!("Failed to parse OBS message: {}", e),
						}
					}
					Some(Ok(TungsteniteMessage::Ping(payload))) => {
						last_activity = Instant::now();
						let mut sink_guard = sink.lock().await;
						let _ = sink_guard.send(TungsteniteMessage::Pong(payload)).await;
					}
					Some(Ok(TungsteniteMessage::Pong(_))) => {
						last_activity = Instant::now();
					}
					Some(Ok(TungsteniteMessage::Close(_))) => {
						info!("WebSocket close frame received");
						break;
					}
					Some(Err(e)) => {
						error!("WebSocket error: {}", e);
						break;
					}
					None => {
						info!("WebSocket stream ended");
						break;
					}
					_ => {}
				}
			}
			_ = ping_interval.tick() => {
				if last_activity.elapsed() > IDLE_LIMIT {
					error!("Connection appears dead (no activity for {:?}), breaking", IDLE_LIMIT);
					break;
				}

				let mut sink_guard = sink.lock().await;
				if sink_guard.send(TungsteniteMessage::Ping(vec![].into())).await.is_err() {
					error!("Failed to send ping, connection likely dead");
					break;
				}
			}
		}
	}

	connected.store(false, Ordering::Release);
	fail_pending(&pending).await;
	info!("Message processing loop ended");
}

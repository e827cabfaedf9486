use crate::error::{ObsClientError, Result};
use crate::types::{op, AuthChallenge, HelloData, ServerMessage};
use base64::engine::{general_purpose::STANDARD as BASE64_STANDARD, Engine};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio_tungstenite::tungstenite::{
	self,
	protocol::{CloseFrame, Message as TungsteniteMessage},
};
use tracing::{debug, info, instrument, warn};

/// Event subscription mask sent on Identify; this client only issues requests
const NO_EVENTS: u32 = 0;

/// Close code OBS sends when the Identify authentication string is wrong
const AUTHENTICATION_FAILED: u16 = 4009;

/// Compute the Identify `authentication` string for an OBS 5.0+ challenge.
///
/// `base64(sha256(base64(sha256(password + salt)) + challenge))`
pub fn auth_response(password: &str, challenge: &AuthChallenge) -> String {
	let mut hasher = Sha256::new();
	hasher.update(password.as_bytes());
	hasher.update(challenge.salt.as_bytes());
	let secret = BASE64_STANDARD.encode(hasher.finalize());

	let mut second_hasher = Sha256::new();
	second_hasher.update(secret.as_bytes());
	second_hasher.update(challenge.challenge.as_bytes());
	BASE64_STANDARD.encode(second_hasher.finalize())
}

pub fn identify_message(hello: &HelloData, password: &str) -> Value {
	let mut d = json!({
		"rpcVersion": hello.rpc_version,
		"eventSubscriptions": NO_EVENTS
	});

	if let Some(challenge) = &hello.authentication {
		d["authentication"] = Value::String(auth_response(password, challenge));
	}

	json!({ "op": op::IDENTIFY, "d": d })
}

/// Run the Hello / Identify / Identified exchange on a freshly opened socket
#[instrument(skip_all)]
pub async fn identify<S, R>(password: &str, sink: &mut S, stream: &mut R) -> Result<()>
where
	S: Sink<TungsteniteMessage, Error = tungstenite::Error> + Unpin,
	R: Stream<Item = std::result::Result<TungsteniteMessage, tungstenite::Error>> + Unpin,
{
	let hello = wait_for_op(stream, op::HELLO).await?;
	let hello: HelloData = serde_json::from_value(hello)?;

	debug!(obs_websocket_version = ?hello.obs_web_socket_version, "Received hello");

	if hello.authentication.is_some() {
		if password.is_empty() {
			return Err(ObsClientError::Authentication("OBS requires a password but none is configured".to_string()));
		}
	} else {
		warn!("No authentication required");
	}

	let identify = identify_message(&hello, password);
	sink.send(TungsteniteMessage::Text(identify.to_string().into())).await?;

	wait_for_op(stream, op::IDENTIFIED).await.map_err(|e| match e {
		ObsClientError::ConnectionClosed => ObsClientError::Authentication("OBS closed the connection during identify".to_string()),
		other => other,
	})?;

	info!("Successfully identified with OBS WebSocket");
	Ok(())
}

async fn wait_for_op<R>(stream: &mut R, expected: u64) -> Result<Value>
where
	R: Stream<Item = std::result::Result<TungsteniteMessage, tungstenite::Error>> + Unpin,
{
	while let Some(msg) = stream.next().await {
		match msg? {
			TungsteniteMessage::Text(text) => {
				let message: ServerMessage = serde_json::from_str(&text)?;

				if message.op == expected {
					return Ok(message.d);
				}
				debug!(op = message.op, expected, "Skipping message during handshake");
			}
			TungsteniteMessage::Close(frame) => return Err(close_error(frame)),
			_ => {}
		}
	}

	Err(ObsClientError::ConnectionClosed)
}

fn close_error(frame: Option<CloseFrame>) -> ObsClientError {
	match frame {
		Some(frame) if u16::from(frame.code) == AUTHENTICATION_FAILED => ObsClientError::Authentication(format!("OBS rejected the password: {}", frame.reason.as_str())),
		Some(frame) => ObsClientError::Handshake(format!("closed with code {}: {}", frame.code, frame.reason.as_str())),
		None => ObsClientError::ConnectionClosed,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::{channel::mpsc, stream};
	use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

	fn challenge() -> AuthChallenge {
		AuthChallenge {
			challenge: "+IxH4CnCiqpX1rM9scsNynZzbOe4KhDeYcTNS3PDaeY=".to_string(),
			salt: "lM1GncleQOaCu9lT1yeUZhFYnqhsLLP1G5lAGo3ixaI=".to_string(),
		}
	}

	#[test]
	fn test_auth_response_matches_protocol_example() {
		assert_eq!(auth_response("supersecretpassword", &challenge()), "1Ct943GAT+6YQUUX47Ia/ncufilbe6+oD6lY+5kaCu4=");
	}

	#[test]
	fn test_identify_without_challenge_has_no_authentication() {
		let hello = HelloData {
			obs_web_socket_version: Some("5.0.1".to_string()),
			rpc_version: 1,
			authentication: None,
		};
		let msg = identify_message(&hello, "ignored");
		assert_eq!(msg["op"], 1);
		assert_eq!(msg["d"]["rpcVersion"], 1);
		assert_eq!(msg["d"]["eventSubscriptions"], 0);
		assert!(msg["d"].get("authentication").is_none());
	}

	#[test]
	fn test_identify_with_challenge_carries_hash() {
		let hello = HelloData {
			obs_web_socket_version: None,
			rpc_version: 1,
			authentication: Some(challenge()),
		};
		let msg = identify_message(&hello, "supersecretpassword");
		assert_eq!(msg["d"]["authentication"], "1Ct943GAT+6YQUUX47Ia/ncufilbe6+oD6lY+5kaCu4=");
	}

	fn text(value: Value) -> TungsteniteMessage {
		TungsteniteMessage::Text(value.to_string().into())
	}

	fn hello(authentication: Option<AuthChallenge>) -> TungsteniteMessage {
		let mut d = json!({ "obsWebSocketVersion": "5.5.0", "rpcVersion": 1 });
		if let Some(auth) = authentication {
			d["authentication"] = json!({ "challenge": auth.challenge, "salt": auth.salt });
		}
		text(json!({ "op": 0, "d": d }))
	}

	fn identified() -> TungsteniteMessage {
		text(json!({ "op": 2, "d": { "negotiatedRpcVersion": 1 } }))
	}

	fn close(code: u16, reason: &'static str) -> TungsteniteMessage {
		TungsteniteMessage::Close(Some(CloseFrame {
			code: CloseCode::from(code),
			reason: reason.into(),
		}))
	}

	/// Drive `identify` against scripted server messages, returning what the client sent
	async fn handshake(password: &str, server: Vec<TungsteniteMessage>) -> (Result<()>, Vec<Value>) {
		let (tx, rx) = mpsc::unbounded::<TungsteniteMessage>();
		let mut sink = tx.sink_map_err(|_| tungstenite::Error::ConnectionClosed);
		let mut stream = stream::iter(server.into_iter().map(Ok::<_, tungstenite::Error>));

		let result = identify(password, &mut sink, &mut stream).await;
		drop(sink);

		let sent = rx.map(|msg| serde_json::from_str(msg.to_text().unwrap()).unwrap()).collect().await;
		(result, sent)
	}

	#[tokio::test]
	async fn test_identify_without_authentication() {
		let (result, sent) = handshake("", vec![hello(None), identified()]).await;

		result.unwrap();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0]["op"], 1);
		assert!(sent[0]["d"].get("authentication").is_none());
	}

	#[tokio::test]
	async fn test_identify_answers_challenge() {
		let (result, sent) = handshake("supersecretpassword", vec![hello(Some(challenge())), identified()]).await;

		result.unwrap();
		assert_eq!(sent[0]["d"]["authentication"], "1Ct943GAT+6YQUUX47Ia/ncufilbe6+oD6lY+5kaCu4=");
	}

	#[tokio::test]
	async fn test_identify_skips_messages_before_hello() {
		let event = text(json!({ "op": 5, "d": { "eventType": "ExitStarted" } }));

		let (result, sent) = handshake("", vec![event, hello(None), identified()]).await;

		result.unwrap();
		assert_eq!(sent.len(), 1);
	}

	#[tokio::test]
	async fn test_challenge_without_password_sends_nothing() {
		let (result, sent) = handshake("", vec![hello(Some(challenge())), identified()]).await;

		assert!(matches!(result, Err(ObsClientError::Authentication(_))));
		assert!(sent.is_empty());
	}

	#[tokio::test]
	async fn test_rejected_password_is_authentication_error() {
		let (result, sent) = handshake("wrong", vec![hello(Some(challenge())), close(4009, "Authentication failed.")]).await;

		assert_eq!(sent.len(), 1);
		match result {
			Err(ObsClientError::Authentication(message)) => assert!(message.contains("Authentication failed.")),
			other => panic!("Expected authentication error, got {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_other_close_during_handshake() {
		let (result, _) = handshake("", vec![hello(None), close(4010, "Unsupported RPC version.")]).await;
		assert!(matches!(result, Err(ObsClientError::Handshake(ref m)) if m.contains("4010")));

		let (result, _) = handshake("", vec![hello(None), TungsteniteMessage::Close(None)]).await;
		assert!(matches!(result, Err(ObsClientError::Authentication(_))));
	}

	#[tokio::test]
	async fn test_stream_ending_before_hello() {
		let (result, sent) = handshake("", Vec::new()).await;

		assert!(matches!(result, Err(ObsClientError::ConnectionClosed)));
		assert!(sent.is_empty());
	}
}

//! Scriptable in-process TV speaking the SSAP subset used by the client.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use lgtv_protocol::{Envelope, MessageKind};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

/// How the fake answers a register frame.
#[derive(Debug, Clone)]
pub(crate) enum Pairing {
	/// Issue `key`. Shows the prompt first unless the client already presents `key`.
	Accept { key: String },
	/// Answer with an error frame.
	Reject(String),
	/// Show the prompt and never resolve it.
	Ignore,
}

/// Scripted reply for a request URI.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
	Payload(Value),
	Error(String),
	Silent,
}

pub(crate) struct FakeTv {
	pub addr: SocketAddr,
	pub received: Arc<Mutex<Vec<Envelope>>>,
	handle: JoinHandle<()>,
}

impl FakeTv {
	/// Binds a localhost port and serves one connection.
	pub async fn start(pairing: Pairing, replies: HashMap<String, Reply>) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let received = Arc::new(Mutex::new(Vec::new()));
		let log = Arc::clone(&received);

		let handle = tokio::spawn(async move {
			let Ok((stream, _)) = listener.accept().await else {
				return;
			};
			let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
				return;
			};
			let (mut tx, mut rx) = ws.split();

			while let Some(Ok(frame)) = rx.next().await {
				let Message::Text(text) = frame else {
					continue;
				};
				let Ok(envelope) = serde_json::from_str::<Envelope>(&text) else {
					continue;
				};
				log.lock().push(envelope.clone());

				let id = envelope.id.clone().unwrap_or_default();
				let outgoing = match envelope.kind {
					MessageKind::Register => register_replies(&pairing, &id, &envelope),
					MessageKind::Request => {
						let uri = envelope.uri.clone().unwrap_or_default();
						match replies.get(&uri) {
							Some(Reply::Payload(payload)) => {
								vec![json!({ "type": "response", "id": id, "payload": payload })]
							}
							Some(Reply::Error(message)) => {
								vec![json!({ "type": "error", "id": id, "error": message, "payload": {} })]
							}
							Some(Reply::Silent) => Vec::new(),
							None => vec![json!({
								"type": "error",
								"id": id,
								"error": "404 no such service or method",
								"payload": {}
							})],
						}
					}
					_ => Vec::new(),
				};

				for value in outgoing {
					if tx.send(Message::Text(value.to_string())).await.is_err() {
						return;
					}
				}
			}
		});

		Self { addr, received, handle }
	}

	pub fn url(&self) -> String {
		format!("ws://{}", self.addr)
	}

	/// Frames of `kind` received so far.
	pub fn received_of(&self, kind: MessageKind) -> Vec<Envelope> {
		self.received.lock().iter().filter(|e| e.kind == kind).cloned().collect()
	}
}

impl Drop for FakeTv {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

fn register_replies(pairing: &Pairing, id: &str, envelope: &Envelope) -> Vec<Value> {
	let prompt = json!({
		"type": "response",
		"id": id,
		"payload": { "pairingType": "PROMPT", "returnValue": true }
	});

	match pairing {
		Pairing::Accept { key } => {
			let registered = json!({ "type": "registered", "id": id, "payload": { "client-key": key } });
			let presented = envelope.payload.as_ref().and_then(|p| p.get("client-key")).and_then(Value::as_str);
			if presented == Some(key.as_str()) {
				vec![registered]
			} else {
				vec![prompt, registered]
			}
		}
		Pairing::Reject(message) => vec![json!({ "type": "error", "id": id, "error": message, "payload": "" })],
		Pairing::Ignore => vec![prompt],
	}
}

//! Fake webOS TV for binary tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

pub fn lgtv_binary() -> PathBuf {
	PathBuf::from(env!("CARGO_BIN_EXE_lgtv"))
}

/// Accepts any number of connections. Pairs by prompt, issuing `key`,
/// unless the client presents `key` already.
pub struct FakeTv {
	pub addr: SocketAddr,
	/// `client-key` presented in each register frame, in order.
	pub presented_keys: Arc<Mutex<Vec<Option<String>>>>,
	/// Input ids passed to `switchInput`.
	pub switched_to: Arc<Mutex<Vec<String>>>,
	handle: JoinHandle<()>,
}

impl FakeTv {
	pub async fn start(key: &str) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let presented_keys = Arc::new(Mutex::new(Vec::new()));
		let switched_to = Arc::new(Mutex::new(Vec::new()));

		let key = key.to_string();
		let keys_log = Arc::clone(&presented_keys);
		let switch_log = Arc::clone(&switched_to);
		let handle = tokio::spawn(async move {
			while let Ok((stream, _)) = listener.accept().await {
				let key = key.clone();
				let keys_log = Arc::clone(&keys_log);
				let switch_log = Arc::clone(&switch_log);
				tokio::spawn(async move {
					let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
						return;
					};
					let (mut tx, mut rx) = ws.split();
					while let Some(Ok(Message::Text(text))) = rx.next().await {
						let Ok(frame) = serde_json::from_str::<Value>(&text) else {
							continue;
						};
						for reply in answer(&frame, &key, &keys_log, &switch_log) {
							if tx.send(Message::Text(reply.to_string())).await.is_err() {
								return;
							}
						}
					}
				});
			}
		});

		Self {
			addr,
			presented_keys,
			switched_to,
			handle,
		}
	}

	/// Device argument for the binary.
	pub fn device(&self) -> String {
		format!("ws://{}", self.addr)
	}
}

impl Drop for FakeTv {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

fn answer(
	frame: &Value,
	key: &str,
	keys_log: &Mutex<Vec<Option<String>>>,
	switch_log: &Mutex<Vec<String>>,
) -> Vec<Value> {
	let id = frame["id"].clone();
	match frame["type"].as_str() {
		Some("register") => {
			let presented = frame["payload"]["client-key"].as_str().map(str::to_string);
			let cached = presented.as_deref() == Some(key);
			keys_log.lock().unwrap().push(presented);

			let registered = json!({ "type": "registered", "id": id, "payload": { "client-key": key } });
			if cached {
				vec![registered]
			} else {
				let prompt = json!({ "type": "response", "id": id, "payload": { "pairingType": "PROMPT", "returnValue": true } });
				vec![prompt, registered]
			}
		}
		Some("request") => {
			let payload = match frame["uri"].as_str().unwrap_or_default() {
				"ssap://tv/getExternalInputList" => json!({
					"returnValue": true,
					"devices": [
						{ "id": "HDMI_1", "label": "HDMI 1", "appId": "com.webos.app.hdmi1", "connected": true },
						{ "id": "HDMI_2", "label": "Console", "appId": "com.webos.app.hdmi2", "connected": false }
					]
				}),
				"ssap://com.webos.applicationManager/getForegroundAppInfo" => {
					json!({ "returnValue": true, "appId": "com.webos.app.hdmi1" })
				}
				"ssap://tv/switchInput" => {
					let input = frame["payload"]["inputId"].as_str().unwrap_or_default().to_string();
					if input.starts_with("HDMI_") {
						switch_log.lock().unwrap().push(input);
						json!({ "returnValue": true })
					} else {
						return vec![json!({ "type": "error", "id": id, "error": "500 Application error", "payload": {} })];
					}
				}
				_ => {
					return vec![json!({ "type": "error", "id": id, "error": "404 no such service or method", "payload": {} })];
				}
			};
			vec![json!({ "type": "response", "id": id, "payload": payload })]
		}
		_ => Vec::new(),
	}
}

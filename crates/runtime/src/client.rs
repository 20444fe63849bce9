//! High-level webOS client: connect + register, then input commands.

use std::time::Duration;

use lgtv_protocol::{
	Envelope, ExternalInput, ExternalInputList, ForegroundAppInfo, MessageKind, REGISTER_ID, RegisterPayload,
	SwitchInput, uri,
};
use tracing::{debug, info};

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::transport::WebSocketTransport;

/// Default SSAP port (plain WebSocket).
pub const DEFAULT_PORT: u16 = 3000;

/// Connection settings for [`WebOsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
	/// Port used when the device is given as a bare host.
	pub port: u16,
	/// Bound on opening the WebSocket.
	pub connect_timeout: Duration,
	/// Bound on the registration exchange, including waiting for the user
	/// to accept the on-screen prompt.
	pub pairing_timeout: Duration,
	/// Bound on each request/reply.
	pub request_timeout: Duration,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			port: DEFAULT_PORT,
			connect_timeout: Duration::from_secs(10),
			pairing_timeout: Duration::from_secs(60),
			request_timeout: Duration::from_secs(10),
		}
	}
}

impl ClientConfig {
	/// Resolves the WebSocket URL for `device`.
	///
	/// A device already given as a `ws://` or `wss://` URL is used verbatim,
	/// and an explicit `host:port` keeps its port.
	pub fn endpoint(&self, device: &str) -> String {
		if device.starts_with("ws://") || device.starts_with("wss://") {
			return device.to_string();
		}
		if device.starts_with('[') {
			return if device.ends_with(']') {
				format!("ws://{device}:{}", self.port)
			} else {
				format!("ws://{device}")
			};
		}
		match device.matches(':').count() {
			0 => format!("ws://{device}:{}", self.port),
			1 => format!("ws://{device}"),
			// Bare IPv6 literal.
			_ => format!("ws://[{device}]:{}", self.port),
		}
	}
}

/// A registered connection to one TV.
pub struct WebOsClient {
	conn: Connection,
	client_key: String,
}

impl WebOsClient {
	/// Connects to `device` and registers, presenting `client_key` when known.
	///
	/// Without a valid key the TV shows an accept/deny prompt; this call
	/// waits up to [`ClientConfig::pairing_timeout`] for the user.
	pub async fn connect(device: &str, client_key: Option<&str>, config: &ClientConfig) -> Result<Self> {
		let url = config.endpoint(device);

		let parts = match tokio::time::timeout(config.connect_timeout, WebSocketTransport::connect(&url)).await {
			Ok(parts) => parts?,
			Err(_) => {
				return Err(Error::Timeout(format!(
					"could not reach {url} within {}ms",
					config.connect_timeout.as_millis()
				)));
			}
		};

		let mut conn = Connection::new(parts, config.request_timeout);
		match register(&conn, client_key, config.pairing_timeout).await {
			Ok(client_key) => {
				info!(target: "lgtv.runtime", %url, "registered");
				Ok(Self { conn, client_key })
			}
			Err(e) => {
				conn.close().await;
				Err(e)
			}
		}
	}

	/// Key the TV confirmed or issued during registration.
	pub fn client_key(&self) -> &str {
		&self.client_key
	}

	/// Returns the foreground app id, which identifies the active input
	/// (e.g. `com.webos.app.hdmi1`).
	pub async fn current_input(&self) -> Result<String> {
		let payload = self.conn.request(uri::FOREGROUND_APP_INFO, None).await?;
		let info: ForegroundAppInfo = serde_json::from_value(payload)?;
		Ok(info.app_id)
	}

	/// Lists external inputs in the order the TV reports them.
	pub async fn list_inputs(&self) -> Result<Vec<ExternalInput>> {
		let payload = self.conn.request(uri::EXTERNAL_INPUT_LIST, None).await?;
		let list: ExternalInputList = serde_json::from_value(payload)?;
		Ok(list.devices)
	}

	/// Switches to `input_id` (e.g. `HDMI_2`).
	pub async fn set_input(&self, input_id: &str) -> Result<()> {
		let payload = serde_json::to_value(SwitchInput {
			input_id: input_id.to_string(),
		})?;
		self.conn.request(uri::SWITCH_INPUT, Some(payload)).await?;
		Ok(())
	}

	/// Closes the socket. Idempotent.
	pub async fn disconnect(&mut self) {
		self.conn.close().await;
	}
}

async fn register(conn: &Connection, client_key: Option<&str>, pairing_timeout: Duration) -> Result<String> {
	let mut rx = conn.subscribe(REGISTER_ID);
	let frame = Envelope::register(&RegisterPayload::new(client_key))?;

	let exchange = async {
		conn.send(&frame).await?;
		loop {
			let reply = rx.recv().await.ok_or(Error::ChannelClosed)?;
			match reply.kind {
				MessageKind::Response if reply.is_pairing_prompt() => {
					info!(target: "lgtv.runtime", "waiting for pairing prompt to be accepted on the TV");
				}
				MessageKind::Registered => {
					return reply
						.client_key()
						.map(str::to_string)
						.ok_or_else(|| Error::ProtocolError("registered reply without client-key".into()));
				}
				MessageKind::Error => {
					return Err(Error::PairingRejected(
						reply.error_text().unwrap_or("registration refused").to_string(),
					));
				}
				kind => debug!(target: "lgtv.runtime", ?kind, "ignoring register frame"),
			}
		}
	};

	let result = match tokio::time::timeout(pairing_timeout, exchange).await {
		Ok(result) => result,
		Err(_) => Err(Error::PairingTimeout {
			secs: pairing_timeout.as_secs(),
		}),
	};

	conn.unsubscribe(REGISTER_ID);
	result
}

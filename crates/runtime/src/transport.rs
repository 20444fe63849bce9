//! WebSocket transport for SSAP frames.
//!
//! The transport only moves JSON values. Correlation lives in
//! [`Connection`](crate::Connection).

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace};

use crate::error::{Error, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Split halves of an open transport.
pub struct TransportParts {
	pub sender: TransportSender,
	pub receiver: TransportReceiver,
	/// Decoded inbound frames, fed by [`TransportReceiver::run`].
	pub message_rx: mpsc::UnboundedReceiver<Value>,
}

/// Opens WebSocket transports.
pub struct WebSocketTransport;

impl WebSocketTransport {
	/// Connects to `url` (`ws://` or `wss://`) and splits the stream.
	pub async fn connect(url: &str) -> Result<TransportParts> {
		debug!(target: "lgtv.runtime", %url, "opening websocket");
		let (stream, _response) = connect_async(url).await.map_err(|e| Error::ConnectionFailed {
			url: url.to_string(),
			reason: e.to_string(),
		})?;

		let (sink, stream) = stream.split();
		let (message_tx, message_rx) = mpsc::unbounded_channel();

		Ok(TransportParts {
			sender: TransportSender { sink },
			receiver: TransportReceiver { stream, message_tx },
			message_rx,
		})
	}
}

/// Write half.
pub struct TransportSender {
	sink: SplitSink<WsStream, Message>,
}

impl TransportSender {
	/// Serializes and sends one frame.
	pub async fn send(&mut self, message: &Value) -> Result<()> {
		let text = serde_json::to_string(message)?;
		trace!(target: "lgtv.runtime", %text, "send");
		self.sink
			.send(Message::Text(text))
			.await
			.map_err(|e| Error::TransportError(e.to_string()))
	}

	/// Sends a close frame. Errors are ignored; the peer may already be gone.
	pub async fn close(&mut self) {
		let _ = self.sink.close().await;
	}
}

/// Read half. Drive with [`run`](Self::run).
pub struct TransportReceiver {
	stream: SplitStream<WsStream>,
	message_tx: mpsc::UnboundedSender<Value>,
}

impl TransportReceiver {
	/// Reads frames until the socket closes, forwarding decoded JSON.
	///
	/// Non-JSON text frames are dropped. Returns `Ok(())` on a clean close.
	pub async fn run(mut self) -> Result<()> {
		while let Some(frame) = self.stream.next().await {
			let frame = frame.map_err(|e| Error::TransportError(e.to_string()))?;
			let value = match frame {
				Message::Text(text) => serde_json::from_str::<Value>(&text),
				Message::Binary(bytes) => serde_json::from_slice::<Value>(&bytes),
				Message::Close(_) => break,
				_ => continue,
			};

			match value {
				Ok(value) => {
					trace!(target: "lgtv.runtime", %value, "recv");
					if self.message_tx.send(value).is_err() {
						break;
					}
				}
				Err(e) => debug!(target: "lgtv.runtime", error = %e, "dropping non-json frame"),
			}
		}
		Ok(())
	}
}

//! Request/response correlation on top of the transport.
//!
//! SSAP replies echo the request `id`. A request may receive more than one
//! frame (registration sends a prompt notice before the key), so each
//! pending id owns an unbounded route rather than a oneshot.
//!
//! # Message Flow
//!
//! 1. Caller subscribes a route for an id and sends its frame
//! 2. The dispatch task decodes inbound frames into [`Envelope`]s
//! 3. Frames are forwarded to the route registered for their id
//! 4. Frames without a route (subscriptions, stray replies) are dropped
//! 5. When the socket closes every route is dropped, waking callers with
//!    [`Error::ChannelClosed`]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use lgtv_protocol::{Envelope, MessageKind};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{Mutex as TokioMutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::transport::{TransportParts, TransportSender};

type Routes = Arc<Mutex<HashMap<String, mpsc::UnboundedSender<Envelope>>>>;

/// Correlating connection to one TV.
pub struct Connection {
	last_id: AtomicU32,
	sender: TokioMutex<TransportSender>,
	routes: Routes,
	tasks: Vec<JoinHandle<()>>,
	request_timeout: Duration,
}

impl Connection {
	/// Starts the reader and dispatch tasks for `parts`.
	///
	/// Must be called from within a tokio runtime.
	pub fn new(parts: TransportParts, request_timeout: Duration) -> Self {
		let TransportParts {
			sender,
			receiver,
			mut message_rx,
		} = parts;

		let routes: Routes = Arc::new(Mutex::new(HashMap::new()));

		let reader = tokio::spawn(async move {
			if let Err(e) = receiver.run().await {
				debug!(target: "lgtv.runtime", error = %e, "transport reader stopped");
			}
		});

		let dispatch_routes = Arc::clone(&routes);
		let dispatcher = tokio::spawn(async move {
			while let Some(value) = message_rx.recv().await {
				dispatch(&dispatch_routes, value);
			}
			// Socket is gone: wake everyone still waiting.
			dispatch_routes.lock().clear();
		});

		Self {
			last_id: AtomicU32::new(1),
			sender: TokioMutex::new(sender),
			routes,
			tasks: vec![reader, dispatcher],
			request_timeout,
		}
	}

	/// Allocates a fresh request id.
	pub fn next_id(&self) -> String {
		self.last_id.fetch_add(1, Ordering::SeqCst).to_string()
	}

	/// Registers a route receiving every frame that carries `id`.
	pub fn subscribe(&self, id: &str) -> mpsc::UnboundedReceiver<Envelope> {
		let (tx, rx) = mpsc::unbounded_channel();
		self.routes.lock().insert(id.to_string(), tx);
		rx
	}

	/// Removes the route for `id`.
	pub fn unsubscribe(&self, id: &str) {
		self.routes.lock().remove(id);
	}

	/// Sends a frame without waiting for a reply.
	pub async fn send(&self, envelope: &Envelope) -> Result<()> {
		let value = serde_json::to_value(envelope)?;
		self.sender.lock().await.send(&value).await
	}

	/// Sends a request to `uri` and waits for its reply payload.
	///
	/// Error frames and payloads with `returnValue: false` become
	/// [`Error::Remote`] carrying the TV's text.
	pub async fn request(&self, uri: &str, payload: Option<Value>) -> Result<Value> {
		let id = self.next_id();
		let mut rx = self.subscribe(&id);

		debug!(target: "lgtv.runtime", %id, %uri, "request");

		let envelope = Envelope::request(&id, uri, payload);
		let exchange = async {
			self.send(&envelope).await?;
			let reply = rx.recv().await.ok_or(Error::ChannelClosed)?;
			reply_payload(uri, reply)
		};

		let result = match tokio::time::timeout(self.request_timeout, exchange).await {
			Ok(result) => result,
			Err(_) => Err(Error::Timeout(format!(
				"no reply to {uri} within {}ms",
				self.request_timeout.as_millis()
			))),
		};

		self.unsubscribe(&id);
		result
	}

	/// Sends a close frame and stops the background tasks. Idempotent.
	pub async fn close(&mut self) {
		self.sender.lock().await.close().await;
		for task in self.tasks.drain(..) {
			task.abort();
		}
		self.routes.lock().clear();
	}
}

impl Drop for Connection {
	fn drop(&mut self) {
		for task in &self.tasks {
			task.abort();
		}
	}
}

fn dispatch(routes: &Routes, value: Value) {
	let envelope = match serde_json::from_value::<Envelope>(value) {
		Ok(envelope) => envelope,
		Err(e) => {
			warn!(target: "lgtv.runtime", error = %e, "dropping malformed frame");
			return;
		}
	};

	let Some(id) = envelope.id.clone() else {
		debug!(target: "lgtv.runtime", kind = ?envelope.kind, "dropping frame without id");
		return;
	};

	let routes = routes.lock();
	match routes.get(&id) {
		Some(route) => {
			let _ = route.send(envelope);
		}
		None => debug!(target: "lgtv.runtime", %id, "no pending request for frame"),
	}
}

fn reply_payload(uri: &str, reply: Envelope) -> Result<Value> {
	let failed = reply.kind == MessageKind::Error || reply.return_value() == Some(false);
	if failed {
		return Err(Error::Remote {
			uri: uri.to_string(),
			message: reply.error_text().unwrap_or("unknown error").to_string(),
		});
	}
	Ok(reply.payload.unwrap_or(Value::Null))
}

//! Device session capability: the seam between orchestration and transport.
//!
//! [`SessionManager`](super::SessionManager) only sees these traits. The
//! webOS implementation lives in [`super::webos`]; unit tests use the
//! `MockConnector` from the crate's `testing` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One switchable source on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
	/// Opaque selectable id, passed back to [`DeviceSession::set_input`].
	pub id: String,
	/// Human-readable label.
	pub label: String,
	/// App rendering the input, when the device reports one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_id: Option<String>,
}

impl InputDescriptor {
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			app_id: None,
		}
	}
}

/// Structured cause reported by a device session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceErrorKind {
	/// Device demands (or refused) interactive pairing.
	Pairing,
	/// Device could not be reached.
	Unreachable,
	/// Device did not answer in time.
	Timeout,
	/// Device answered a command with an error.
	Rejected,
	/// Device spoke something we could not understand.
	Protocol,
	/// Connection dropped mid-operation.
	Closed,
	/// No structured cause available.
	Other,
}

/// Failure surfaced by a [`DeviceConnector`] or [`DeviceSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeviceError {
	pub kind: DeviceErrorKind,
	pub message: String,
}

impl DeviceError {
	pub fn new(kind: DeviceErrorKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
		}
	}

	/// Error with no structured cause; only its text is known.
	pub fn other(message: impl Into<String>) -> Self {
		Self::new(DeviceErrorKind::Other, message)
	}
}

/// A freshly opened session plus any key the device issued while opening it.
pub struct OpenedSession<S> {
	pub session: S,
	/// Key issued or confirmed during the handshake. The caller decides
	/// whether to persist it.
	pub issued_key: Option<String>,
}

/// Opens sessions to devices.
#[async_trait]
pub trait DeviceConnector: Send + Sync {
	type Session: DeviceSession;

	/// Connects to `device_id`, presenting `client_key` when one is cached.
	///
	/// Timeouts (unreachable device, unanswered prompt) are the
	/// implementation's responsibility and surface as errors here.
	async fn open(&self, device_id: &str, client_key: Option<&str>)
	-> Result<OpenedSession<Self::Session>, DeviceError>;
}

/// A live connection to one device.
#[async_trait]
pub trait DeviceSession: Send {
	/// Reads the active input.
	async fn current_input(&mut self) -> Result<String, DeviceError>;

	/// Lists selectable inputs in device order.
	async fn list_inputs(&mut self) -> Result<Vec<InputDescriptor>, DeviceError>;

	/// Switches the active input to `input_id`.
	async fn set_input(&mut self, input_id: &str) -> Result<(), DeviceError>;

	/// Releases the connection. Idempotent and infallible.
	async fn close(&mut self);
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::register::RegisterPayload;

/// Message id used for the registration exchange.
///
/// The TV answers a register frame with up to two frames (prompt, then
/// registered) that both echo this id.
pub const REGISTER_ID: &str = "register_0";

/// Frame type discriminator (`"type"` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
	/// Client registration (pairing) request.
	Register,
	/// Registration accepted; payload carries the `client-key`.
	Registered,
	/// Client command addressed by `uri`.
	Request,
	/// Reply to a request or an intermediate register reply.
	Response,
	/// Failure reply; `error` carries the device's text.
	Error,
	/// Any frame type this crate does not model.
	#[serde(other)]
	Unknown,
}

/// A single SSAP frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
	#[serde(rename = "type")]
	pub kind: MessageKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uri: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl Envelope {
	/// Builds a request frame for `uri`.
	pub fn request(id: impl Into<String>, uri: impl Into<String>, payload: Option<Value>) -> Self {
		Self {
			kind: MessageKind::Request,
			id: Some(id.into()),
			uri: Some(uri.into()),
			payload,
			error: None,
		}
	}

	/// Builds the registration frame.
	pub fn register(payload: &RegisterPayload) -> serde_json::Result<Self> {
		Ok(Self {
			kind: MessageKind::Register,
			id: Some(REGISTER_ID.to_string()),
			uri: None,
			payload: Some(serde_json::to_value(payload)?),
			error: None,
		})
	}

	/// Returns true if this is the intermediate reply announcing the on-screen prompt.
	pub fn is_pairing_prompt(&self) -> bool {
		self.kind == MessageKind::Response
			&& self
				.payload
				.as_ref()
				.and_then(|p| p.get("pairingType"))
				.and_then(Value::as_str)
				.is_some_and(|t| t.eq_ignore_ascii_case("PROMPT"))
	}

	/// Returns the `client-key` of a registered frame.
	pub fn client_key(&self) -> Option<&str> {
		self.payload.as_ref()?.get("client-key")?.as_str()
	}

	/// Returns the payload's `returnValue` flag when present.
	pub fn return_value(&self) -> Option<bool> {
		self.payload.as_ref()?.get("returnValue")?.as_bool()
	}

	/// Returns the most specific failure text carried by this frame.
	///
	/// Looks at the top-level `error`, then the payload's `errorText`.
	pub fn error_text(&self) -> Option<&str> {
		self.error.as_deref().filter(|e| !e.is_empty()).or_else(|| {
			self.payload
				.as_ref()?
				.get("errorText")?
				.as_str()
				.filter(|e| !e.is_empty())
		})
	}
}

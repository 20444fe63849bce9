//! Error types for the webOS runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a TV.
#[derive(Debug, Error)]
pub enum Error {
	/// Failed to open the WebSocket connection.
	#[error("Failed to connect to TV at {url}: {reason}")]
	ConnectionFailed { url: String, reason: String },

	/// The TV refused the registration (user pressed deny, or the key was revoked).
	#[error("Pairing rejected by TV: {0}")]
	PairingRejected(String),

	/// Nobody accepted the on-screen pairing prompt in time.
	#[error("Timed out after {secs}s waiting for the pairing prompt to be accepted on the TV")]
	PairingTimeout { secs: u64 },

	/// Timeout waiting for a connection or a reply.
	#[error("Timeout: {0}")]
	Timeout(String),

	/// The TV answered a request with an error.
	#[error("{uri} failed: {message}")]
	Remote { uri: String, message: String },

	/// Frame did not match the SSAP shape we expect.
	#[error("Protocol error: {0}")]
	ProtocolError(String),

	/// WebSocket-level failure after the connection was established.
	#[error("Transport error: {0}")]
	TransportError(String),

	/// Connection closed while a reply was pending.
	#[error("Connection to TV closed unexpectedly")]
	ChannelClosed,

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Returns true if the TV wants (or refused) interactive pairing.
	pub fn is_pairing(&self) -> bool {
		matches!(self, Error::PairingRejected(_) | Error::PairingTimeout { .. })
	}

	/// Returns true if this is a timeout error.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout(_) | Error::PairingTimeout { .. })
	}

	/// Returns true if the TV could not be reached at all.
	pub fn is_unreachable(&self) -> bool {
		matches!(self, Error::ConnectionFailed { .. })
	}
}

use thiserror::Error;

use crate::output::{CommandError, ErrorCode};
use crate::session::{DeviceErrorKind, FailureClass, SessionFailure};

pub type Result<T> = std::result::Result<T, LgtvError>;

#[derive(Debug, Error)]
pub enum LgtvError {
	/// Opening the session or running the operation failed.
	#[error("{failure}")]
	Session {
		command: &'static str,
		device: String,
		failure: SessionFailure,
		/// Soft warnings collected before the failure.
		warnings: Vec<String>,
	},

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl LgtvError {
	/// Command name for the failure envelope.
	pub fn command(&self) -> &'static str {
		match self {
			LgtvError::Session { command, .. } => *command,
			_ => "unknown",
		}
	}

	/// Warnings to report alongside the error.
	pub fn warnings(&self) -> &[String] {
		match self {
			LgtvError::Session { warnings, .. } => warnings.as_slice(),
			_ => &[],
		}
	}

	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, message, details) = match self {
			LgtvError::Session { device, failure, .. } => {
				let code = match (failure.class, failure.error.kind) {
					(FailureClass::PairingRequired, _) => ErrorCode::PairingRequired,
					(_, DeviceErrorKind::Unreachable) => ErrorCode::ConnectionFailed,
					(_, DeviceErrorKind::Timeout) => ErrorCode::Timeout,
					_ => ErrorCode::DeviceError,
				};
				let mut details = serde_json::json!({
					"device": device,
					"stage": failure.stage,
					"kind": failure.error.kind,
				});
				if failure.is_pairing_required() {
					details["guidance"] = serde_json::json!(failure.guidance());
				}
				(code, failure.error.message.clone(), Some(details))
			}
			LgtvError::Io(err) => (ErrorCode::IoError, err.to_string(), None),
			LgtvError::Json(err) => (ErrorCode::InternalError, format!("JSON error: {err}"), None),
		};

		CommandError {
			code,
			message,
			details,
		}
	}
}

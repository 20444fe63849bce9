//! Operation requests, progress events and per-run reports.

use std::fmt;

use serde::Serialize;

use super::classify::{FailureClass, classify};
use super::device::{DeviceError, InputDescriptor};

/// Whether a cached key was found for the target device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
	Cached,
	PairingRequired,
}

/// The single logical operation executed per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Enumerate inputs.
	ListInputs,
	/// Read the active input.
	CurrentInput,
	/// Switch to `input_id`, reading the previous input first (best effort).
	SwitchInput { input_id: String },
}

impl Operation {
	/// Command name used in output envelopes.
	pub fn name(&self) -> &'static str {
		match self {
			Operation::ListInputs => "list",
			Operation::CurrentInput => "current",
			Operation::SwitchInput { .. } => "switch",
		}
	}
}

/// Successful result of an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutput {
	/// Inputs in device order; may be empty.
	Inputs(Vec<InputDescriptor>),
	Current { input: String },
	Switched { input_id: String, previous: Option<String> },
}

/// Where in the run a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
	Open,
	Execute,
}

/// A classified failure from opening the session or running the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFailure {
	pub class: FailureClass,
	pub stage: Stage,
	pub error: DeviceError,
}

impl SessionFailure {
	pub fn new(stage: Stage, error: DeviceError) -> Self {
		Self {
			class: classify(&error),
			stage,
			error,
		}
	}

	pub fn is_pairing_required(&self) -> bool {
		self.class == FailureClass::PairingRequired
	}

	/// Remediation lines; empty unless pairing is required.
	pub fn guidance(&self) -> &'static [&'static str] {
		self.class.guidance()
	}
}

impl fmt::Display for SessionFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.error.message)
	}
}

/// Everything a run produced, success or not.
#[derive(Debug)]
pub struct SessionReport {
	pub device_id: String,
	pub credential: CredentialSource,
	/// A key differing from the cached one was issued and handed to the store.
	pub key_issued: bool,
	/// Soft failures: key file problems and unreadable current input.
	pub warnings: Vec<String>,
	pub outcome: Result<OperationOutput, SessionFailure>,
}

impl SessionReport {
	pub fn is_success(&self) -> bool {
		self.outcome.is_ok()
	}
}

/// Progress notifications emitted while a run advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
	CredentialLookup(CredentialSource),
	Connecting { device_id: String },
	Connected,
	KeyIssued,
	CurrentInput(String),
	CurrentInputUnavailable(String),
	Switching(String),
}

//! Structured output envelope for all CLI commands.
//!
//! ## Output Contract
//!
//! With `--format json|ndjson|toon` every command produces a result envelope
//! on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "switch",
//!   "inputs": { "device": "10.0.0.5", "input": "HDMI_2" },
//!   "data": { "device": "10.0.0.5", "input": "HDMI_2", "previous": "com.webos.app.hdmi1" },
//!   "timings": { "durationMs": 412 },
//!   "diagnostics": []
//! }
//! ```
//!
//! On failure:
//!
//! ```json
//! {
//!   "ok": false,
//!   "command": "switch",
//!   "error": {
//!     "code": "PAIRING_REQUIRED",
//!     "message": "Please accept the pairing prompt on your TV",
//!     "details": { "device": "10.0.0.5", "guidance": ["..."] }
//!   }
//! }
//! ```
//!
//! The default `text` format prints human lines on stdout and errors on stderr.


use std::io::{self, Write};
use std::time::{Duration, Instant};

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::session::{CredentialSource, InputDescriptor};

/// Current schema version for command output.
///
/// Increment this when making breaking changes to the output structure.
pub const SCHEMA_VERSION: u32 = 1;

/// Output format for CLI results.
///
/// Used both for clap argument parsing and internal formatting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text (default)
	#[default]
	Text,
	/// JSON output
	Json,
	/// Newline-delimited JSON (streaming)
	Ndjson,
	/// TOON output (token-efficient for LLMs)
	Toon,
}

/// The main result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	/// Schema version for output format compatibility.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<u32>,

	/// Whether the command succeeded
	pub ok: bool,

	/// Command name (e.g., "list", "switch")
	pub command: String,

	/// Inputs used for this command (for traceability)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inputs: Option<CommandInputs>,

	/// Command-specific result data (only present on success)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,

	/// Error information (only present on failure)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,

	/// Timing information
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,

	/// Diagnostic information (key file problems, soft read failures)
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub diagnostics: Vec<Diagnostic>,

	/// How the session was established
	#[serde(skip_serializing_if = "Option::is_none")]
	pub session: Option<SessionInfo>,
}

/// Inputs that were used for the command (for traceability)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommandInputs {
	pub device: String,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub input: Option<String>,
}

/// Error information for failed commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	/// Error code (e.g., "PAIRING_REQUIRED", "TIMEOUT")
	pub code: ErrorCode,

	/// Human-readable error message
	pub message: String,

	/// Additional error details (device, stage, remediation guidance)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

impl CommandError {
	/// Remediation lines carried in `details.guidance`, if any.
	pub fn guidance(&self) -> Vec<&str> {
		self.details
			.as_ref()
			.and_then(|d| d.get("guidance"))
			.and_then(|g| g.as_array())
			.map(|lines| lines.iter().filter_map(|l| l.as_str()).collect())
			.unwrap_or_default()
	}
}

/// Standardized error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// The TV wants the on-screen pairing prompt accepted
	PairingRequired,
	/// The TV answered with an error or dropped the session
	DeviceError,
	/// The TV could not be reached
	ConnectionFailed,
	/// Operation timed out
	Timeout,
	/// File I/O error
	IoError,
	/// Unknown/internal error
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::PairingRequired => write!(f, "PAIRING_REQUIRED"),
			ErrorCode::DeviceError => write!(f, "DEVICE_ERROR"),
			ErrorCode::ConnectionFailed => write!(f, "CONNECTION_FAILED"),
			ErrorCode::Timeout => write!(f, "TIMEOUT"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

/// Timing information for the command
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	/// Total duration in milliseconds
	pub duration_ms: u64,
}

impl From<Duration> for Timings {
	fn from(duration: Duration) -> Self {
		Timings {
			duration_ms: duration.as_millis() as u64,
		}
	}
}

/// Diagnostic messages attached to a result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
	/// Severity level
	pub level: DiagnosticLevel,

	/// Diagnostic message
	pub message: String,

	/// Source of the diagnostic (e.g., "keys", "session")
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

/// Diagnostic severity levels
///
/// Failures are reported through `error`, so diagnostics are only ever
/// warnings about things the command recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
	Warning,
}

/// How the session credential was obtained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
	/// `cached` or `pairing_required`
	pub credential: String,
	/// A new key was issued during this run
	pub key_issued: bool,
}

impl SessionInfo {
	pub fn new(credential: CredentialSource, key_issued: bool) -> Self {
		let credential = match credential {
			CredentialSource::Cached => "cached",
			CredentialSource::PairingRequired => "pairing_required",
		};
		Self {
			credential: credential.to_string(),
			key_issued,
		}
	}
}

/// Builder for constructing command results
pub struct ResultBuilder<T: Serialize> {
	schema_version: Option<u32>,
	command: String,
	inputs: Option<CommandInputs>,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Option<Instant>,
	diagnostics: Vec<Diagnostic>,
	session: Option<SessionInfo>,
}

impl<T: Serialize> ResultBuilder<T> {
	/// Create a new result builder for the given command.
	///
	/// The schema version is automatically set to [`SCHEMA_VERSION`].
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			schema_version: Some(SCHEMA_VERSION),
			command: command.into(),
			inputs: None,
			data: None,
			error: None,
			start_time: Some(Instant::now()),
			diagnostics: Vec::new(),
			session: None,
		}
	}

	/// Start timing from an earlier instant (e.g. before the session opened).
	pub fn started_at(mut self, start: Instant) -> Self {
		self.start_time = Some(start);
		self
	}

	/// Set the inputs used for this command
	pub fn inputs(mut self, inputs: CommandInputs) -> Self {
		self.inputs = Some(inputs);
		self
	}

	/// Set the successful result data
	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	/// Set a prepared error, keeping its details
	pub fn command_error(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	/// Add a diagnostic with source
	pub fn diagnostic_with_source(
		mut self,
		level: DiagnosticLevel,
		message: impl Into<String>,
		source: impl Into<String>,
	) -> Self {
		self.diagnostics.push(Diagnostic {
			level,
			message: message.into(),
			source: Some(source.into()),
		});
		self
	}

	/// Add each message as a warning diagnostic from `source`.
	pub fn warnings<I, S>(mut self, messages: I, source: &str) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for message in messages {
			self = self.diagnostic_with_source(DiagnosticLevel::Warning, message, source);
		}
		self
	}

	/// Record how the session was established
	pub fn session(mut self, session: SessionInfo) -> Self {
		self.session = Some(session);
		self
	}

	/// Build the final result
	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();

		let timings = self.start_time.map(|start| Timings::from(start.elapsed()));

		CommandResult {
			schema_version: self.schema_version,
			ok,
			command: self.command,
			inputs: self.inputs,
			data: self.data,
			error: self.error,
			timings,
			diagnostics: self.diagnostics,
			session: self.session,
		}
	}
}

/// Human rendering of a result payload for `--format text`.
pub trait TextOutput {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl TextOutput for () {
	fn write_text(&self, _out: &mut dyn Write) -> io::Result<()> {
		Ok(())
	}
}

/// Print a command result to stdout in the specified format
pub fn print_result<T: Serialize + TextOutput>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Toon => {
			if let Ok(json_value) = serde_json::to_value(result) {
				println!("{}", toon::encode(&json_value, None));
			}
		}
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Ndjson => {
			if let Ok(json) = serde_json::to_string(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => {
			let _ = write_result_text(result, &mut io::stdout().lock());
		}
	}
}

/// Write a command result in human-readable text format.
///
/// Diagnostics go to stderr so stdout stays the payload only.
pub fn write_result_text<T: Serialize + TextOutput>(result: &CommandResult<T>, out: &mut dyn Write) -> io::Result<()> {
	if let Some(ref data) = result.data {
		data.write_text(out)?;
	}

	for diag in &result.diagnostics {
		let prefix = match diag.level {
			DiagnosticLevel::Warning => "warning".yellow(),
		};
		eprintln!("{prefix}: {}", diag.message);
	}
	Ok(())
}

/// Print an error to stderr in human-readable format, with any guidance.
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("{} {}", "✗ Error:".red().bold(), error.message);

	let guidance = error.guidance();
	if error.code == ErrorCode::PairingRequired && !guidance.is_empty() {
		eprintln!();
		eprintln!("{}", "⚠ PAIRING REQUIRED:".yellow().bold());
		for (i, line) in guidance.iter().enumerate() {
			eprintln!("  {}. {line}", i + 1);
		}
	}
}

/// Result data for the list command
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsData {
	pub device: String,
	pub inputs: Vec<InputDescriptor>,
	pub count: usize,
}

impl InputsData {
	pub fn new(device: &str, inputs: Vec<InputDescriptor>) -> Self {
		Self {
			device: device.to_string(),
			count: inputs.len(),
			inputs,
		}
	}
}

impl TextOutput for InputsData {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		if self.inputs.is_empty() {
			return writeln!(out, "No inputs found on {}.", self.device);
		}

		let rule = "=".repeat(50);
		writeln!(out, "Available inputs on {}:", self.device)?;
		writeln!(out, "{rule}")?;
		for input in &self.inputs {
			match input.app_id {
				Some(ref app_id) => writeln!(out, "  • {:<20} → {}  ({app_id})", input.label, input.id)?,
				None => writeln!(out, "  • {:<20} → {}", input.label, input.id)?,
			}
		}
		writeln!(out, "{rule}")
	}
}

/// Result data for the current command
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentData {
	pub device: String,
	pub input: String,
}

impl TextOutput for CurrentData {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		writeln!(out, "Current input: {}", self.input)
	}
}

/// Result data for the switch command
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchData {
	pub device: String,
	pub input: String,
	/// Active input before the switch, when it could be read
	#[serde(skip_serializing_if = "Option::is_none")]
	pub previous: Option<String>,
}

impl TextOutput for SwitchData {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		writeln!(out, "✓ Successfully switched to {}!", self.input)
	}
}

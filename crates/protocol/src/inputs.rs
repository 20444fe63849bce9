use serde::{Deserialize, Serialize};

/// Request URIs used by this crate's consumers.
pub mod uri {
	/// Lists external inputs (HDMI, component, ...).
	pub const EXTERNAL_INPUT_LIST: &str = "ssap://tv/getExternalInputList";
	/// Returns the foreground app, which names the active input.
	pub const FOREGROUND_APP_INFO: &str = "ssap://com.webos.applicationManager/getForegroundAppInfo";
	/// Switches the active input by input id.
	pub const SWITCH_INPUT: &str = "ssap://tv/switchInput";
}

/// One switchable input source as reported by the TV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalInput {
	/// Selectable id, e.g. `HDMI_1`.
	pub id: String,
	/// User-facing label, e.g. `HDMI 1` or a renamed source.
	#[serde(default)]
	pub label: String,
	/// App that renders the input, e.g. `com.webos.app.hdmi1`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub connected: Option<bool>,
}

/// Payload of [`uri::EXTERNAL_INPUT_LIST`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalInputList {
	#[serde(default)]
	pub devices: Vec<ExternalInput>,
}

/// Payload of [`uri::FOREGROUND_APP_INFO`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForegroundAppInfo {
	#[serde(default)]
	pub app_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub window_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub process_id: Option<String>,
}

/// Payload of [`uri::SWITCH_INPUT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchInput {
	pub input_id: String,
}

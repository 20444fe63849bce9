//! Registration (pairing) handshake body.
//!
//! The TV only grants the permissions listed in the manifest, and only
//! accepts manifests signed by LG. The signed block below is the one LG
//! ships with its own remote app; it is what every third-party client sends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the TV should confirm a new client. Only the on-screen
/// accept/deny prompt is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PairingType {
	Prompt,
}

/// Payload of a [`MessageKind::Register`](crate::MessageKind::Register) frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
	pub force_pairing: bool,
	pub pairing_type: PairingType,
	/// Key issued by a previous successful pairing. Skips the prompt when valid.
	#[serde(rename = "client-key", default, skip_serializing_if = "Option::is_none")]
	pub client_key: Option<String>,
	pub manifest: Manifest,
}

impl RegisterPayload {
	/// Builds a prompt-paired registration, reusing `client_key` when known.
	pub fn new(client_key: Option<&str>) -> Self {
		Self {
			force_pairing: false,
			pairing_type: PairingType::Prompt,
			client_key: client_key.map(str::to_string),
			manifest: Manifest::remote_app(),
		}
	}
}

/// Application manifest presented during registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
	pub manifest_version: u32,
	pub app_version: String,
	pub signed: SignedManifest,
	pub permissions: Vec<String>,
	pub signatures: Vec<Signature>,
}

/// The LG-signed portion of the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedManifest {
	pub created: String,
	pub app_id: String,
	pub vendor_id: String,
	pub localized_app_names: BTreeMap<String, String>,
	pub localized_vendor_names: BTreeMap<String, String>,
	pub permissions: Vec<String>,
	pub serial: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
	pub signature_version: u32,
	pub signature: String,
}

const SIGNED_PERMISSIONS: &[&str] = &[
	"TEST_SECURE",
	"CONTROL_INPUT_TEXT",
	"CONTROL_MOUSE_AND_KEYBOARD",
	"READ_INSTALLED_APPS",
	"READ_LGE_SDX",
	"READ_NOTIFICATIONS",
	"SEARCH",
	"WRITE_SETTINGS",
	"WRITE_NOTIFICATION_ALERT",
	"CONTROL_POWER",
	"READ_CURRENT_CHANNEL",
	"READ_RUNNING_APPS",
	"READ_UPDATE_INFO",
	"UPDATE_FROM_REMOTE_APP",
	"READ_LGE_TV_INPUT_EVENTS",
	"READ_TV_CURRENT_TIME",
];

const PERMISSIONS: &[&str] = &[
	"LAUNCH",
	"LAUNCH_WEBAPP",
	"APP_TO_APP",
	"CLOSE",
	"TEST_OPEN",
	"TEST_PROTECTED",
	"CONTROL_AUDIO",
	"CONTROL_DISPLAY",
	"CONTROL_INPUT_JOYSTICK",
	"CONTROL_INPUT_MEDIA_RECORDING",
	"CONTROL_INPUT_MEDIA_PLAYBACK",
	"CONTROL_INPUT_TV",
	"CONTROL_POWER",
	"READ_APP_STATUS",
	"READ_CURRENT_CHANNEL",
	"READ_INPUT_DEVICE_LIST",
	"READ_NETWORK_STATE",
	"READ_RUNNING_APPS",
	"READ_TV_CHANNEL_LIST",
	"WRITE_NOTIFICATION_TOAST",
	"READ_POWER_STATE",
	"READ_COUNTRY_INFO",
];

const REMOTE_APP_SIGNATURE: &str = "eyJhbGdvcml0aG0iOiJSU0EtU0hBMjU2Iiwia2V5SWQiOiJ0ZXN0LXNpZ25pbmctY2VydCIsInNpZ25hdHVyZVZlcnNpb24iOjF9.hrVRgjCwXVvE2OOSpDZ58hR+59aFNwYDyjQgKk3auukd7pcegmE2CzPCa0bJ0ZsRAcKkCTJrWo5iDzNhMBWRyaMOv5zWSrthlf7G128qvIlpMT0YNY+n/FaOHE73uLrS/g7swl3/qH/BGFG2Hu4RlL48eb3lLKqTt2xKHdCs6Cd4RMfJPYnzgvI4BNrFUKsjkcu+WD4OO2A27Pq1n50cMchmcaXadJhGrOqH5YmHdOCj5NSHzJYrsW0HPlpuAx/ECMeIZYDh6RMqaFM2DXzdKX9NmmyqzJ3o/0lkk/N97gfVRLW5hA29yeAwaCViZNCP8iC9aO0q9fQojoa7NQnAtw==";

impl Manifest {
	/// The manifest of LG's own remote-control app.
	pub fn remote_app() -> Self {
		let owned = |list: &[&str]| list.iter().map(|p| p.to_string()).collect::<Vec<_>>();

		Self {
			manifest_version: 1,
			app_version: "1.1".to_string(),
			signed: SignedManifest {
				created: "20140509".to_string(),
				app_id: "com.lge.test".to_string(),
				vendor_id: "com.lge".to_string(),
				localized_app_names: BTreeMap::from([
					(String::new(), "LG Remote App".to_string()),
					("ko-KR".to_string(), "리모컨 앱".to_string()),
					("zxx-XX".to_string(), "ЛГ Rэмotэ AПП".to_string()),
				]),
				localized_vendor_names: BTreeMap::from([(String::new(), "LG Electronics".to_string())]),
				permissions: owned(SIGNED_PERMISSIONS),
				serial: "2f930e2d2cfe083771f68e4fe7bb07".to_string(),
			},
			permissions: owned(PERMISSIONS),
			signatures: vec![Signature {
				signature_version: 1,
				signature: REMOTE_APP_SIGNATURE.to_string(),
			}],
		}
	}
}

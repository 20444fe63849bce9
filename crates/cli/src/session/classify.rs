//! Classification of device failures into "needs pairing" vs everything else.

use serde::{Deserialize, Serialize};

use super::device::{DeviceError, DeviceErrorKind};

/// Words in a failure message that indicate the device wants the user to
/// confirm pairing on screen. Matched case-insensitively.
const PAIRING_VOCABULARY: &[&str] = &["pairing", "prompt"];

/// Remediation shown when a failure is classified [`FailureClass::PairingRequired`].
pub const PAIRING_GUIDANCE: &[&str] = &[
	"Make sure the TV and this computer are on the same network",
	"Enable 'LG Connect Apps' on the TV: Settings > Connection > LG Connect Apps > Enable",
	"Accept the prompt on the TV screen, then run the command again",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
	/// The device demands interactive confirmation before it will talk to us.
	PairingRequired,
	/// Anything else; surfaced verbatim.
	Other,
}

impl FailureClass {
	/// Remediation lines for this class (empty for [`FailureClass::Other`]).
	pub fn guidance(self) -> &'static [&'static str] {
		match self {
			FailureClass::PairingRequired => PAIRING_GUIDANCE,
			FailureClass::Other => &[],
		}
	}
}

/// Classifies a device failure.
///
/// A structured [`DeviceErrorKind::Pairing`] wins; otherwise the message text
/// is searched for pairing vocabulary.
pub fn classify(err: &DeviceError) -> FailureClass {
	if err.kind == DeviceErrorKind::Pairing {
		return FailureClass::PairingRequired;
	}
	classify_message(&err.message)
}

/// Text-only classification for collaborators that expose nothing richer.
pub fn classify_message(message: &str) -> FailureClass {
	let lower = message.to_lowercase();
	if PAIRING_VOCABULARY.iter().any(|word| lower.contains(word)) {
		FailureClass::PairingRequired
	} else {
		FailureClass::Other
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pairing_in_any_case_is_pairing_required() {
		for msg in [
			"pairing failed",
			"Please accept the PAIRING prompt on your TV",
			"PyLGTVPairException: Pairing rejected",
		] {
			assert_eq!(classify_message(msg), FailureClass::PairingRequired, "{msg}");
		}
	}

	#[test]
	fn prompt_alone_is_pairing_required() {
		assert_eq!(
			classify_message("Timed out waiting for Prompt acceptance"),
			FailureClass::PairingRequired
		);
	}

	#[test]
	fn other_messages_are_other() {
		for msg in ["Connection refused", "timeout", "401 insufficient permissions", ""] {
			assert_eq!(classify_message(msg), FailureClass::Other, "{msg}");
		}
	}

	#[test]
	fn structured_kind_wins_over_text() {
		let err = DeviceError::new(DeviceErrorKind::Pairing, "403 User denied access");
		assert_eq!(classify(&err), FailureClass::PairingRequired);

		let err = DeviceError::new(DeviceErrorKind::Unreachable, "connection refused");
		assert_eq!(classify(&err), FailureClass::Other);
	}

	#[test]
	fn text_fallback_applies_to_unstructured_errors() {
		let err = DeviceError::other("Please accept the pairing prompt on your TV");
		assert_eq!(classify(&err), FailureClass::PairingRequired);
	}

	#[test]
	fn only_pairing_carries_guidance() {
		assert_eq!(FailureClass::PairingRequired.guidance().len(), 3);
		assert!(FailureClass::Other.guidance().is_empty());
	}
}

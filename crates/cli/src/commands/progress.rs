//! Human progress lines for `--format text`, written to stderr.

use colored::Colorize;

use crate::session::{CredentialSource, SessionEvent};

pub fn print_event(event: &SessionEvent) {
	eprintln!("{}", render(event));
}

fn render(event: &SessionEvent) -> String {
	match event {
		SessionEvent::CredentialLookup(CredentialSource::Cached) => "✓ Using saved credentials".green().to_string(),
		SessionEvent::CredentialLookup(CredentialSource::PairingRequired) => format!(
			"{}\n  Accept the prompt on your TV!",
			"⚠ First time connection - pairing required".yellow()
		),
		SessionEvent::Connecting { device_id } => format!("Connecting to {device_id}..."),
		SessionEvent::Connected => "✓ Connected!".green().to_string(),
		SessionEvent::KeyIssued => "✓ Paired with the TV".green().to_string(),
		SessionEvent::CurrentInput(input) => format!("Current input: {input}"),
		SessionEvent::CurrentInputUnavailable(reason) => {
			format!("Could not read current input: {reason}").yellow().to_string()
		}
		SessionEvent::Switching(input) => format!("Switching to {input}..."),
	}
}

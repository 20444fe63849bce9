//! Pairing key cache that lets repeated invocations skip the TV prompt.
//!
//! The whole mapping is loaded once at [`KeyStore::open`] and written back
//! after every [`KeyStore::set`]. Neither step ever fails the command:
//! an unusable file starts the store empty, and a failed write leaves the
//! key usable for the rest of the run while surfacing a warning.
//!
//! There is no cross-process locking; concurrent writers race and the last
//! write wins.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;

pub use storage::{KEYS_FILE_ENV, KEYS_FILE_NAME, LoadStatus, default_keys_path};
pub use types::ClientKeys;

/// File-backed mapping of device address to client key.
#[derive(Debug)]
pub struct KeyStore {
	path: PathBuf,
	keys: ClientKeys,
	warnings: Vec<String>,
}

impl KeyStore {
	/// Loads the store from `path`.
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let (keys, status) = storage::load_keys(&path);
		let mut warnings = Vec::new();

		match &status {
			LoadStatus::Loaded(count) => {
				debug!(target: "lgtv.keys", path = %path.display(), count, "loaded pairing keys");
			}
			LoadStatus::Missing => {
				debug!(target: "lgtv.keys", path = %path.display(), "no key file yet");
			}
			LoadStatus::Unreadable(reason) => {
				warn!(target: "lgtv.keys", path = %path.display(), %reason, "key file unreadable; starting empty");
				warnings.push(format!(
					"Could not read saved keys from {}: {reason}",
					path.display()
				));
			}
			LoadStatus::Corrupt { reason, backup } => {
				warn!(target: "lgtv.keys", path = %path.display(), %reason, "key file corrupt; starting empty");
				let moved = match backup {
					Some(backup) => format!(" (moved to {})", backup.display()),
					None => String::new(),
				};
				warnings.push(format!(
					"Saved keys in {} were corrupt and have been reset{moved}",
					path.display()
				));
			}
		}

		Self { path, keys, warnings }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns the key stored for `device_id`.
	pub fn get(&self, device_id: &str) -> Option<&str> {
		self.keys.get(device_id)
	}

	/// Stores `key` for `device_id` and writes the file.
	///
	/// A failed write is recorded as a warning (see [`take_warnings`](Self::take_warnings));
	/// the in-memory value stays visible for the rest of the process.
	pub fn set(&mut self, device_id: &str, key: &str) {
		self.keys.insert(device_id, key);

		match storage::save_keys(&self.path, &self.keys) {
			Ok(()) => debug!(target: "lgtv.keys", device = device_id, path = %self.path.display(), "saved pairing key"),
			Err(e) => {
				warn!(target: "lgtv.keys", device = device_id, path = %self.path.display(), error = %e, "could not save pairing key");
				self.warnings.push(format!(
					"Could not save key to {}: {e}. Pairing may be required again next time.",
					self.path.display()
				));
			}
		}
	}

	/// Device addresses with a stored key.
	pub fn devices(&self) -> impl Iterator<Item = &str> {
		self.keys.devices()
	}

	/// Drains warnings collected while loading or saving.
	pub fn take_warnings(&mut self) -> Vec<String> {
		std::mem::take(&mut self.warnings)
	}
}

//! File storage for pairing keys.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::types::ClientKeys;
use crate::error::Result;

/// File name of the key file in the user's home directory.
pub const KEYS_FILE_NAME: &str = ".lg_tv_keys.json";

/// Environment variable overriding the key file location.
pub const KEYS_FILE_ENV: &str = "LGTV_KEYS_FILE";

/// Default key file: `~/.lg_tv_keys.json`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_keys_path() -> PathBuf {
	dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(KEYS_FILE_NAME)
}

/// What [`load_keys`] found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
	/// File parsed; holds this many keys.
	Loaded(usize),
	/// No file yet.
	Missing,
	/// File exists but could not be read.
	Unreadable(String),
	/// File was not UTF-8 JSON holding a flat string mapping. `backup` is
	/// where it was moved.
	Corrupt { reason: String, backup: Option<PathBuf> },
}

/// Loads keys from `path`. Never fails: anything but a valid file yields an
/// empty mapping.
///
/// A corrupt file is renamed to `<name>.corrupt` so the next save does not
/// destroy a possibly recoverable key. A path whose parent is a regular file
/// cannot hold a key file and counts as missing.
pub fn load_keys(path: &Path) -> (ClientKeys, LoadStatus) {
	let content = match fs::read(path) {
		Ok(content) => content,
		Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
			return (ClientKeys::new(), LoadStatus::Missing);
		}
		Err(e) => return (ClientKeys::new(), LoadStatus::Unreadable(e.to_string())),
	};

	match serde_json::from_slice::<ClientKeys>(&content) {
		Ok(keys) => {
			let count = keys.len();
			(keys, LoadStatus::Loaded(count))
		}
		Err(e) => {
			let backup = corrupt_backup_path(path);
			let backup = fs::rename(path, &backup).ok().map(|_| backup);
			(
				ClientKeys::new(),
				LoadStatus::Corrupt {
					reason: e.to_string(),
					backup,
				},
			)
		}
	}
}

/// Writes the whole mapping to `path`, creating parent directories.
///
/// On Unix the file is restricted to the owner (`0600`) before any key is
/// written to it, including when an existing file had looser permissions.
pub fn save_keys(path: &Path, keys: &ClientKeys) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}
	let content = serde_json::to_string_pretty(keys)?;

	let mut options = fs::OpenOptions::new();
	options.write(true).create(true).truncate(true);
	#[cfg(unix)]
	{
		use std::os::unix::fs::OpenOptionsExt;
		options.mode(0o600);
	}
	let mut file = options.open(path)?;
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		file.set_permissions(fs::Permissions::from_mode(0o600))?;
	}
	file.write_all(content.as_bytes())?;
	Ok(())
}

/// `<name>.corrupt`, or `<name>.corrupt.N` with the first free `N` so an
/// earlier backup is never replaced.
fn corrupt_backup_path(path: &Path) -> PathBuf {
	let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| KEYS_FILE_NAME.into());
	name.push(".corrupt");
	let first = path.with_file_name(&name);
	if !first.exists() {
		return first;
	}
	(1u32..)
		.map(|n| {
			let mut numbered = name.clone();
			numbered.push(format!(".{n}"));
			path.with_file_name(numbered)
		})
		.find(|candidate| !candidate.exists())
		.unwrap_or(first)
}

//! Persisted pairing keys: [`ClientKeys`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat mapping of device address to the client key it issued.
///
/// Serialized as a plain JSON object (`{"10.0.0.5": "ABC123"}`) with no
/// schema field, so files written by older versions of the tool still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientKeys(BTreeMap<String, String>);

impl ClientKeys {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the key stored for `device_id`.
	pub fn get(&self, device_id: &str) -> Option<&str> {
		self.0.get(device_id).map(String::as_str)
	}

	/// Stores `key` for `device_id`, returning the key it replaced.
	pub fn insert(&mut self, device_id: impl Into<String>, key: impl Into<String>) -> Option<String> {
		self.0.insert(device_id.into(), key.into())
	}

	/// Device addresses with a stored key, in sorted order.
	pub fn devices(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

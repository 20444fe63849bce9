use std::fs;

use tempfile::TempDir;

use super::KeyStore;

fn store_in(tmp: &TempDir) -> KeyStore {
	KeyStore::open(tmp.path().join("keys.json"))
}

#[test]
fn set_then_get_returns_same_key() {
	let tmp = TempDir::new().unwrap();
	let mut store = store_in(&tmp);

	for (device, key) in [("10.0.0.5", "ABC123"), ("tv.local", "ключ"), ("fe80::1", "a b\"c")] {
		store.set(device, key);
		assert_eq!(store.get(device), Some(key));
	}
	assert!(store.take_warnings().is_empty());
}

#[test]
fn keys_survive_reopen() {
	let tmp = TempDir::new().unwrap();
	store_in(&tmp).set("10.0.0.5", "ABC123");

	let reopened = store_in(&tmp);
	assert_eq!(reopened.get("10.0.0.5"), Some("ABC123"));
}

#[test]
fn set_does_not_touch_other_devices() {
	let tmp = TempDir::new().unwrap();
	let mut store = store_in(&tmp);
	store.set("10.0.0.6", "OTHER");

	store.set("10.0.0.5", "ABC123");

	assert_eq!(store.get("10.0.0.6"), Some("OTHER"));
	assert_eq!(store.get("10.0.0.7"), None);
	assert_eq!(store.devices().collect::<Vec<_>>(), ["10.0.0.5", "10.0.0.6"]);
}

#[test]
fn second_set_overwrites_first() {
	let tmp = TempDir::new().unwrap();
	let mut store = store_in(&tmp);

	store.set("10.0.0.5", "S1");
	store.set("10.0.0.5", "S2");

	assert_eq!(store.get("10.0.0.5"), Some("S2"));
	assert_eq!(store_in(&tmp).get("10.0.0.5"), Some("S2"));
}

#[test]
fn missing_file_opens_empty_without_warning() {
	let tmp = TempDir::new().unwrap();
	let mut store = store_in(&tmp);

	assert_eq!(store.get("10.0.0.5"), None);
	assert!(store.take_warnings().is_empty());
}

#[test]
fn corrupt_file_opens_empty_with_warning() {
	let tmp = TempDir::new().unwrap();
	fs::write(tmp.path().join("keys.json"), "garbage").unwrap();

	let mut store = store_in(&tmp);

	assert_eq!(store.get("10.0.0.5"), None);
	let warnings = store.take_warnings();
	assert_eq!(warnings.len(), 1);
	assert!(warnings[0].contains("corrupt"), "got {warnings:?}");
	assert!(store.take_warnings().is_empty(), "warnings are drained");
}

#[test]
fn corrupt_file_is_replaced_on_next_set() {
	let tmp = TempDir::new().unwrap();
	fs::write(tmp.path().join("keys.json"), "garbage").unwrap();

	store_in(&tmp).set("10.0.0.5", "ABC123");

	assert_eq!(store_in(&tmp).get("10.0.0.5"), Some("ABC123"));
	assert!(tmp.path().join("keys.json.corrupt").exists());
}

#[test]
fn non_utf8_file_is_backed_up_before_next_set() {
	let tmp = TempDir::new().unwrap();
	let bytes = [0x7b, 0xff, 0xfe, 0x7d];
	fs::write(tmp.path().join("keys.json"), bytes).unwrap();

	let mut store = store_in(&tmp);
	let warnings = store.take_warnings();
	assert_eq!(warnings.len(), 1);
	assert!(warnings[0].contains("corrupt"), "got {warnings:?}");

	store.set("10.0.0.5", "ABC123");

	assert_eq!(fs::read(tmp.path().join("keys.json.corrupt")).unwrap(), bytes);
	assert_eq!(store_in(&tmp).get("10.0.0.5"), Some("ABC123"));
}

#[test]
fn failed_write_keeps_key_in_memory_and_warns() {
	let tmp = TempDir::new().unwrap();
	let blocker = tmp.path().join("blocker");
	fs::write(&blocker, "").unwrap();

	let mut store = KeyStore::open(blocker.join("keys.json"));
	store.set("10.0.0.5", "ABC123");

	assert_eq!(store.get("10.0.0.5"), Some("ABC123"));
	let warnings = store.take_warnings();
	assert_eq!(warnings.len(), 1);
	assert!(warnings[0].contains("Could not save key"), "got {warnings:?}");
}

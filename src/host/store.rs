//! Persistent key-value store in a flat file.
//!
//! The file is a sequence of fixed-size records:
//!
//! | bytes  | field                    |
//! |--------|--------------------------|
//! | 0..4   | magic, little endian     |
//! | 4      | format version           |
//! | 5..9   | key, little endian       |
//! | 9..13  | value, little endian     |
//! | 13     | checksum of bytes 0..13  |
//!
//! Records with a bad magic, version or checksum are skipped on load, as is
//! a truncated trailing record. The whole file is rewritten on every write.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use watchface_common::platform::{KeyValueStore, PlatformError};

const STORE_MAGIC: u32 = 0x5753_4746;
const STORE_VERSION: u8 = 1;
const RECORD_LEN: usize = 14;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<u32, i32>,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => decode(&bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                log::warn!("cannot read store {}: {err}", path.display());
                BTreeMap::new()
            }
        };
        log::debug!("store {} opened with {} keys", path.display(), values.len());
        Self { path, values }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl KeyValueStore for FileStore {
    fn read_i32(
        &self,
        key: u32,
    ) -> Option<i32> {
        self.values.get(&key).copied()
    }

    fn write_i32(
        &mut self,
        key: u32,
        value: i32,
    ) -> Result<(), PlatformError> {
        if self.values.get(&key) == Some(&value) {
            return Ok(());
        }

        let mut next = self.values.clone();
        next.insert(key, value);
        fs::write(&self.path, encode(&next)).map_err(|err| {
            log::warn!("cannot write store {}: {err}", self.path.display());
            PlatformError::StoreWrite { key }
        })?;
        self.values = next;
        Ok(())
    }
}

fn encode(values: &BTreeMap<u32, i32>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * RECORD_LEN);
    for (&key, &value) in values {
        let mut record = [0u8; RECORD_LEN];
        record[0..4].copy_from_slice(&STORE_MAGIC.to_le_bytes());
        record[4] = STORE_VERSION;
        record[5..9].copy_from_slice(&key.to_le_bytes());
        record[9..13].copy_from_slice(&value.to_le_bytes());
        record[RECORD_LEN - 1] = checksum8(&record[..RECORD_LEN - 1]);
        bytes.extend_from_slice(&record);
    }
    bytes
}

fn decode(bytes: &[u8]) -> BTreeMap<u32, i32> {
    let mut values = BTreeMap::new();
    let records = bytes.chunks_exact(RECORD_LEN);
    if !records.remainder().is_empty() {
        log::warn!("skipping truncated store record ({} bytes)", records.remainder().len());
    }
    for record in records {
        match decode_record(record) {
            Some((key, value)) => {
                values.insert(key, value);
            }
            None => log::warn!("skipping corrupt store record"),
        }
    }
    values
}

fn decode_record(record: &[u8]) -> Option<(u32, i32)> {
    let magic = u32::from_le_bytes(record.get(0..4)?.try_into().ok()?);
    if magic != STORE_MAGIC || record[4] != STORE_VERSION {
        return None;
    }
    if record[RECORD_LEN - 1] != checksum8(&record[..RECORD_LEN - 1]) {
        return None;
    }
    let key = u32::from_le_bytes(record.get(5..9)?.try_into().ok()?);
    let value = i32::from_le_bytes(record.get(9..13)?.try_into().ok()?);
    Some((key, value))
}

fn checksum8(bytes: &[u8]) -> u8 {
    let mut acc = 0x5Au8;
    for &byte in bytes {
        acc ^= byte.rotate_left(1);
    }
    acc
}

#[cfg(test)]
mod tests {
    use watchface_common::config::STEPS_STATE_KEY;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("watchface-store-{}-{name}.bin", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        let mut store = FileStore::open(&path);
        assert_eq!(store.read_i32(STEPS_STATE_KEY), None);
        store.write_i32(STEPS_STATE_KEY, 2).unwrap();
        store.write_i32(7, -5).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.read_i32(STEPS_STATE_KEY), Some(2));
        assert_eq!(reopened.read_i32(7), Some(-5));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_record_is_skipped() {
        let path = temp_path("corrupt");
        let mut values = BTreeMap::new();
        values.insert(1, 1);
        values.insert(2, 2);
        let mut bytes = encode(&values);
        bytes[RECORD_LEN + 9] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.read_i32(1), Some(1));
        assert_eq!(store.read_i32(2), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_truncated_tail_is_skipped() {
        let path = temp_path("truncated");
        let mut values = BTreeMap::new();
        values.insert(1, 10);
        values.insert(2, 20);
        let mut bytes = encode(&values);
        bytes.truncate(RECORD_LEN + 5);
        fs::write(&path, bytes).unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.read_i32(1), Some(10));
        assert_eq!(store.read_i32(2), None);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_write_keeps_old_value() {
        let dir = temp_path("dir");
        fs::create_dir_all(&dir).unwrap();
        let mut store = FileStore::open(&dir);

        assert_eq!(store.write_i32(3, 1), Err(PlatformError::StoreWrite { key: 3 }));
        assert_eq!(store.read_i32(3), None);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_checksum_detects_single_bit_flip() {
        let record = [1u8, 2, 3, 4];
        let mut flipped = record;
        flipped[2] ^= 0x01;
        assert_ne!(checksum8(&record), checksum8(&flipped));
    }
}

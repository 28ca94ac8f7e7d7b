//! Persist small JSON documents (metadata, processing results) under a directory.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::StoreError;

/// Serialise `value` as pretty JSON (4-space indent) into `dir/filename`.
///
/// Creates `dir` if it does not exist. Returns the path written.
pub fn save_json<T: Serialize + ?Sized>(
    value: &T,
    filename: &str,
    dir: &Path,
) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);

    let mut writer = BufWriter::new(File::create(&path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser)?;
    writer.flush()?;

    debug!(path = %path.display(), "saved json");
    Ok(path)
}

/// Read `dir/filename` and deserialise it.
pub fn load_json<T: DeserializeOwned>(filename: &str, dir: &Path) -> Result<T, StoreError> {
    let path = dir.join(filename);
    if !path.is_file() {
        return Err(StoreError::JsonNotFound(path));
    }
    let reader = BufReader::new(File::open(&path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn save_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let mut sample = BTreeMap::new();
        sample.insert("example", "This is a test.");

        let path = save_json(&sample, "sample.json", &dir).unwrap();
        assert_eq!(path, dir.join("sample.json"));
        assert!(path.is_file());

        let loaded: BTreeMap<String, String> = load_json("sample.json", &dir).unwrap();
        assert_eq!(loaded["example"], "This is a test.");
    }

    #[test]
    fn save_uses_four_space_indent() {
        let tmp = TempDir::new().unwrap();
        let value = serde_json::json!({ "score": 0.5 });
        let path = save_json(&value, "score.json", tmp.path()).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        assert_eq!(raw, "{\n    \"score\": 0.5\n}");
    }

    #[test]
    fn load_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let result: Result<serde_json::Value, _> = load_json("absent.json", tmp.path());
        assert!(matches!(result, Err(StoreError::JsonNotFound(_))));
    }

    #[test]
    fn load_invalid_json_errors() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();
        let result: Result<serde_json::Value, _> = load_json("broken.json", tmp.path());
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}

// Cache store for reading and writing persisted data.
// Handles JSON serialization, raw text bodies, and filesystem operations.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Read JSON data from a file, returning `None` when the file is absent.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&contents)?;
    Ok(Some(data))
}

/// Write data to a file as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    write_atomic(path, json.as_bytes())
}

/// Write a raw response body to a file.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}

/// Write binary data (PDF downloads) to a file.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    write_atomic(path, bytes)
}

/// Read a raw cached body from a file, returning `None` when absent.
pub fn read_to_string(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    Ok(Some(contents))
}

/// Write atomically via a temp file, creating parent directories on demand.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_and_read_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json(&path, &data).unwrap();

        let read: Option<TestData> = read_json(&path).unwrap();
        assert_eq!(read, Some(data));
    }

    #[test]
    fn test_write_and_read_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Reviews.json");

        let body = r#"{"value":[]}"#;
        write_text(&path, body).unwrap();

        let read = read_to_string(&path).unwrap();
        assert_eq!(read, Some(body.to_string()));
    }

    #[test]
    fn test_write_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("AuthorFeedback.pdf");

        let bytes = [0x25u8, 0x50, 0x44, 0x46];
        write_bytes(&path, &bytes).unwrap();

        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let json: Option<TestData> = read_json(&path).unwrap();
        assert!(json.is_none());

        let text = read_to_string(&path).unwrap();
        assert!(text.is_none());
    }

    #[test]
    fn test_overwrite_is_last_writer_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("body.json");

        write_text(&path, "first").unwrap();
        write_text(&path, "second").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), Some("second".to_string()));
    }
}

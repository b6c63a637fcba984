//! File-based row source.
//!
//! Polls a JSON file holding an array of records.

use std::fmt::Debug;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::de::DeserializeOwned;

use super::RowSource;

/// A row source that reads record arrays from a JSON file.
///
/// The source tracks the file's modification time and only returns a fresh
/// collection when the file has been updated since the last read.
#[derive(Debug)]
pub struct FileSource<T> {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    _rows: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> FileSource<T> {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            _rows: PhantomData,
        }
    }

    /// Returns the path being polled.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Vec<T>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(rows) => {
                    self.last_error = None;
                    Some(rows)
                }
                Err(e) => {
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl<T: DeserializeOwned + Debug + Send> RowSource<T> for FileSource<T> {
    fn poll(&mut self) -> Option<Vec<T>> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep the last rows
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(rows) = self.read_file() {
                self.last_modified = current_modified;
                return Some(rows);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    struct User {
        id: i64,
        name: String,
    }

    fn sample_json() -> &'static str {
        r#"[
            { "id": 1, "name": "ada" },
            { "id": 2, "name": "grace" }
        ]"#
    }

    #[test]
    fn new_source_reports_path_and_no_error() {
        let source: FileSource<User> = FileSource::new("/tmp/users.json");
        assert_eq!(source.path(), Path::new("/tmp/users.json"));
        assert_eq!(source.description(), "file: /tmp/users.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn first_poll_reads_the_file_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source: FileSource<User> = FileSource::new(file.path());

        let rows = source.poll().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "ada");

        // No change, no delivery
        assert!(source.poll().is_none());
    }

    #[test]
    fn rewritten_file_is_picked_up() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source: FileSource<User> = FileSource::new(file.path());
        let _ = source.poll();

        // mtime resolution can be coarse on some filesystems
        std::thread::sleep(std::time::Duration::from_millis(10));
        fs::write(file.path(), r#"[{ "id": 3, "name": "lin" }]"#).unwrap();

        if let Some(rows) = source.poll() {
            assert_eq!(rows, vec![User { id: 3, name: "lin".into() }]);
        }
    }

    #[test]
    fn missing_file_sets_read_error() {
        let mut source: FileSource<User> = FileSource::new("/nonexistent/users.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn malformed_json_sets_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source: FileSource<User> = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }
}

//! Safe report reading
//!
//! A report is a small text file, but it may be handed to us while the
//! producing tool is still writing, or not exist at all. Unreadable input
//! is a single fatal condition: the caller gets a skip reason and no
//! content, never a panic or a Rust error bubbling out of the parser.

use std::fs;
use std::path::Path;

/// Result of reading a report file
#[derive(Debug, Clone)]
pub struct FileReadResult {
    /// The file content (if successfully read)
    pub content: Option<String>,

    /// Whether lossy UTF-8 conversion was applied
    pub lossy_conversion: bool,

    /// Reason the file was skipped (if skipped)
    pub skip_reason: Option<String>,
}

impl FileReadResult {
    fn success(content: String) -> Self {
        Self {
            content: Some(content),
            lossy_conversion: false,
            skip_reason: None,
        }
    }

    fn skipped(reason: impl Into<String>) -> Self {
        Self {
            content: None,
            lossy_conversion: false,
            skip_reason: Some(reason.into()),
        }
    }

    fn with_lossy(mut self) -> Self {
        self.lossy_conversion = true;
        self
    }
}

/// Read a report file, tolerating invalid UTF-8 via lossy conversion
pub fn read_report(path: &Path) -> FileReadResult {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            return FileReadResult::skipped(format!("cannot read {}: {}", path.display(), e));
        }
    };

    match String::from_utf8(bytes) {
        Ok(content) => FileReadResult::success(content),
        Err(e) => {
            let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
            FileReadResult::success(content).with_lossy()
        }
    }
}

pub mod markdown;

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Supplies the text a reader would see, read fresh at every scan.
pub trait DocumentSource {
    fn visible_text(&mut self) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Markdown,
    PlainText,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" => FileType::Markdown,
            _ => FileType::PlainText,
        }
    }
}

/// Extract the visible text of already-loaded file contents.
pub fn visible_text(file_type: FileType, content: &str) -> String {
    match file_type {
        FileType::Markdown => markdown::visible_text(content),
        FileType::PlainText => content.to_string(),
    }
}

/// A document on disk; edits made between scans are picked up.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    file_type: FileType,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_type = FileType::from_path(&path);
        Self { path, file_type }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(visible_text(self.file_type, &content))
    }
}

impl DocumentSource for FileDocument {
    fn visible_text(&mut self) -> Result<String> {
        self.read()
    }
}

/// In-memory document that can be edited from another task.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument {
    text: Arc<Mutex<String>>,
}

impl SharedDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(Mutex::new(text.into())),
        }
    }

    pub fn set(&self, text: impl Into<String>) {
        let mut guard = self.text.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = text.into();
    }
}

impl DocumentSource for SharedDocument {
    fn visible_text(&mut self) -> Result<String> {
        let guard = self.text.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone())
    }
}

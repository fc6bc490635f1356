use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes generated documents, creating parent directories as needed.
#[derive(Debug, Default)]
pub struct FileWriter {
    generated_files: Vec<PathBuf>,
}

impl FileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `content` to `path`, replacing any previous file in full
    pub fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        self.generated_files.push(path.to_path_buf());
        Ok(())
    }

    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    pub fn into_generated_files(self) -> Vec<PathBuf> {
        self.generated_files
    }
}

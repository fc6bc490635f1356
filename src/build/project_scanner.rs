use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid package manifest {path}: {message}")]
    InvalidManifest { path: String, message: String },
}

const DEPENDENCY_KEYS: &[&str] = &["dependencies", "peerDependencies", "devDependencies"];

/// The nearest `package.json` and what the generator needs from it.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub root_path: PathBuf,
    pub package_json_path: PathBuf,
    pub name: Option<String>,
    /// Every dependency name; kept out of the bundles
    pub externals: Vec<String>,
}

pub struct ProjectScanner {
    current_dir: PathBuf,
}

impl ProjectScanner {
    pub fn new() -> Self {
        Self {
            current_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn with_current_dir<P: AsRef<Path>>(path: P) -> Self {
        Self {
            current_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Walk up from the current directory to the first one holding a `package.json`.
    pub fn detect_project(&self) -> Result<Option<ProjectInfo>, ScanError> {
        let mut current = Some(self.current_dir.as_path());

        while let Some(dir) = current {
            let manifest = dir.join("package.json");
            if manifest.is_file() {
                return Self::read_manifest(dir, manifest).map(Some);
            }
            current = dir.parent();
        }

        Ok(None)
    }

    fn read_manifest(dir: &Path, manifest: PathBuf) -> Result<ProjectInfo, ScanError> {
        let content = fs::read_to_string(&manifest)?;
        let json: Value =
            serde_json::from_str(&content).map_err(|e| ScanError::InvalidManifest {
                path: manifest.display().to_string(),
                message: e.to_string(),
            })?;

        let mut externals: Vec<String> = Vec::new();
        for key in DEPENDENCY_KEYS {
            if let Some(deps) = json.get(key).and_then(Value::as_object) {
                for name in deps.keys() {
                    if !externals.contains(name) {
                        externals.push(name.clone());
                    }
                }
            }
        }

        Ok(ProjectInfo {
            root_path: dir.to_path_buf(),
            package_json_path: manifest,
            name: json.get("name").and_then(Value::as_str).map(str::to_string),
            externals,
        })
    }
}

impl Default for ProjectScanner {
    fn default() -> Self {
        Self::new()
    }
}

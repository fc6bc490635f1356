use serde::{ser::Serializer, Serialize};

use crate::interface::config::ConfigError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to walk handler directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid entry directory: {0}")]
    InvalidEntryDir(String),

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Template '{template}' is missing the required /* {{{{{marker}}}}} */ marker")]
    MissingMarker { template: String, marker: String },

    #[error("Code generation failed: {0}")]
    CodeGeneration(String),

    #[error("Bundling failed: {0}")]
    Bundle(String),
}

impl From<tera::Error> for Error {
    fn from(err: tera::Error) -> Self {
        let mut message = err.to_string();
        if let Some(source) = std::error::Error::source(&err) {
            message.push_str(&format!(": {}", source));
        }
        Error::Template(message)
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

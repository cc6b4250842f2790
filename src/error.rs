use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid resource name '{name}': {reason}")]
    InvalidResourceName { name: String, reason: &'static str },

    #[error("resource '{0}' appears more than once in the manifest")]
    DuplicateResource(String),

    #[error("resource '{name}' not found at {}", path.display())]
    ResourceNotFound { name: String, path: PathBuf },

    #[error("resource '{name}' at {} is neither a directory nor a regular file", path.display())]
    UnsupportedEntryKind { name: String, path: PathBuf },

    #[error("failed to read resource '{name}' from {}: {source}", path.display())]
    SourceRead {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write archive entry '{name}': {source}")]
    ArchiveWrite {
        name: String,
        #[source]
        source: ZipError,
    },

    #[error("failed to allocate archive file: {0}")]
    Allocation(#[source] std::io::Error),

    #[error("invalid build options: {0}")]
    InvalidOptions(String),

    #[error("manifest not found: {0}")]
    ManifestNotFound(String),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn archive_write(name: &str, source: impl Into<ZipError>) -> Self {
        Error::ArchiveWrite {
            name: name.to_string(),
            source: source.into(),
        }
    }

    /// Name of the resource the failure is attributed to, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            Error::InvalidResourceName { name, .. }
            | Error::ResourceNotFound { name, .. }
            | Error::UnsupportedEntryKind { name, .. }
            | Error::SourceRead { name, .. }
            | Error::ArchiveWrite { name, .. } => Some(name.as_str()),
            Error::DuplicateResource(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

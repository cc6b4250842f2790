use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;
use zipres::error::Error;
use zipres::result::Result;

pub const MANIFEST_FILE: &str = "resources.toml";

/// Find the manifest file in the current directory or specified path
pub fn find_manifest(path: Option<&Path>) -> Result<PathBuf> {
    let base_path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let manifest_path = if base_path.is_file() {
        base_path
    } else {
        base_path.join(MANIFEST_FILE)
    };

    if !manifest_path.exists() {
        return Err(Error::ManifestNotFound(
            manifest_path.display().to_string(),
        ));
    }

    Ok(manifest_path)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Move a finished archive to its destination, copying across filesystems.
///
/// The source is removed whether or not the move succeeds.
pub fn move_file(source: &Path, destination: &Path) -> Result<()> {
    let moved = relocate(source, destination);
    if moved.is_err()
        && source.exists()
        && let Err(err) = fs::remove_file(source)
    {
        warn!(path = %source.display(), %err, "failed to remove archive after move failed");
    }
    moved
}

fn relocate(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::CrossesDevices => {
            fs::copy(source, destination)?;
            fs::remove_file(source)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

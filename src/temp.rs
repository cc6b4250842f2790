use crate::error::Error;
use crate::result::Result;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const PREFIX: &str = "zipres-";
const SUFFIX: &str = ".zip";

/// Create a uniquely named, writable file to receive an archive.
///
/// The file is removed when the handle is dropped unless it is passed to
/// [`persist`], so an abandoned build leaves nothing behind.
pub fn allocate(dir: Option<&Path>) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(PREFIX).suffix(SUFFIX);

    match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(Error::Allocation)
}

/// Keep the file on disk and hand its path to the caller.
pub fn persist(file: NamedTempFile) -> Result<PathBuf> {
    file.into_temp_path()
        .keep()
        .map_err(|err| Error::Allocation(err.error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_allocate_unique_names() {
        let dir = TempDir::new().unwrap();
        let a = allocate(Some(dir.path())).unwrap();
        let b = allocate(Some(dir.path())).unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().starts_with(dir.path()));
        let name = a.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(PREFIX) && name.ends_with(SUFFIX));
    }

    #[test]
    fn test_dropped_file_is_removed() {
        let dir = TempDir::new().unwrap();
        let file = allocate(Some(dir.path())).unwrap();
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn test_persisted_file_survives() {
        let dir = TempDir::new().unwrap();
        let path = persist(allocate(Some(dir.path())).unwrap()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_allocate_in_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(allocate(Some(&missing)), Err(Error::Allocation(_))));
    }
}

use crate::error::Error;
use crate::result::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A resource name resolved against the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Reject names that are empty, absolute, or could step outside the base directory.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(Error::InvalidResourceName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.starts_with('/') {
        return invalid("name must be relative");
    }
    if name.contains('\\') {
        return invalid("name must use forward slashes");
    }
    if name.contains('\0') {
        return invalid("name contains a NUL byte");
    }

    for segment in name.split('/') {
        match segment {
            "" => return invalid("name contains an empty segment"),
            "." | ".." => return invalid("name contains a relative segment"),
            _ => {}
        }
    }

    Ok(())
}

/// Resolve `name` under `base` and classify what is found there.
///
/// Symlinks are not followed, so a link is reported as unsupported rather than
/// as whatever it points at.
pub fn resolve(base: &Path, name: &str) -> Result<Resolved> {
    validate_name(name)?;

    let path = name.split('/').fold(base.to_path_buf(), |acc, seg| acc.join(seg));

    let metadata = match fs::symlink_metadata(&path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(Error::ResourceNotFound {
                name: name.to_string(),
                path,
            });
        }
        Err(source) => {
            return Err(Error::SourceRead {
                name: name.to_string(),
                path,
                source,
            });
        }
    };

    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        return Err(Error::UnsupportedEntryKind {
            name: name.to_string(),
            path,
        });
    };

    Ok(Resolved { path, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_name_accepts_nested_paths() {
        assert!(validate_name("level1").is_ok());
        assert!(validate_name("level1/level2/tmpFile1").is_ok());
        assert!(validate_name("Weird Name.txt").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_escapes() {
        for name in ["", "/etc/passwd", "../up", "a/../b", "./a", "a//b", "a/", "a\\b"] {
            assert!(
                matches!(validate_name(name), Err(Error::InvalidResourceName { .. })),
                "expected '{name}' to be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_classifies_entries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("level1/level2")).unwrap();
        fs::write(dir.path().join("level1/level2/tmpFile1"), "why hello").unwrap();

        let resolved = resolve(dir.path(), "level1/level2").unwrap();
        assert_eq!(resolved.kind, EntryKind::Directory);
        assert_eq!(resolved.path, dir.path().join("level1").join("level2"));

        let resolved = resolve(dir.path(), "level1/level2/tmpFile1").unwrap();
        assert_eq!(resolved.kind, EntryKind::File);
    }

    #[test]
    fn test_resolve_missing() {
        let dir = TempDir::new().unwrap();
        match resolve(dir.path(), "nope") {
            Err(Error::ResourceNotFound { name, path }) => {
                assert_eq!(name, "nope");
                assert_eq!(path, dir.path().join("nope"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlink() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("target"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();

        assert!(matches!(
            resolve(dir.path(), "link"),
            Err(Error::UnsupportedEntryKind { .. })
        ));
    }
}

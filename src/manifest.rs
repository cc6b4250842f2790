use crate::error::Error;
use crate::options::BuildOptions;
use crate::resource::Resource;
use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of a resource manifest file.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestToml {
    #[serde(default)]
    pub base: Option<String>,

    pub resources: Vec<Resource>,

    #[serde(default)]
    pub archive: Option<BuildOptions>,
}

/// Parsed and processed manifest information
#[derive(Debug)]
pub struct Manifest {
    pub base_dir: PathBuf,
    pub resources: Vec<Resource>,
    pub options: BuildOptions,
}

impl Manifest {
    /// Load and parse a manifest file
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(manifest_path)?;
        let anchor = match manifest_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        Self::parse(&anchor, &content)
    }

    /// Parse manifest text; relative paths in it are joined onto `anchor`.
    pub fn parse(anchor: &Path, content: &str) -> Result<Self> {
        let raw: ManifestToml = toml::from_str(content)?;

        let base_dir = raw
            .base
            .map(|b| anchor.join(b))
            .unwrap_or_else(|| anchor.to_path_buf());

        if !base_dir.is_dir() {
            return Err(Error::InvalidManifest(format!(
                "base directory {} does not exist",
                base_dir.display()
            )));
        }

        let mut options = raw.archive.unwrap_or_default();
        if let Some(dir) = options.temp_dir.take() {
            options.temp_dir = Some(anchor.join(dir));
        }

        Ok(Manifest {
            base_dir,
            resources: raw.resources,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DirectoryNaming;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_manifest() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        fs::create_dir_all(dir.path().join("out")).unwrap();

        let manifest = Manifest::parse(
            dir.path(),
            r#"
            base = "app"
            resources = ["level1", "level1/level2", "tmpFile2"]

            [archive]
            temp-dir = "out"
            directory-names = "trailing-slash"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.base_dir, dir.path().join("app"));
        assert_eq!(
            manifest.resources,
            vec![
                Resource::new("level1"),
                Resource::new("level1/level2"),
                Resource::new("tmpFile2"),
            ]
        );
        assert_eq!(manifest.options.temp_dir, Some(dir.path().join("out")));
        assert_eq!(
            manifest.options.directory_names,
            DirectoryNaming::TrailingSlash
        );
    }

    #[test]
    fn test_base_defaults_to_manifest_dir() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::parse(dir.path(), r#"resources = []"#).unwrap();
        assert_eq!(manifest.base_dir, dir.path());
        assert_eq!(manifest.options, BuildOptions::default());
    }

    #[test]
    fn test_load_anchors_at_manifest_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        let path = dir.path().join("upload.toml");
        fs::write(&path, "base = \"app\"\nresources = [\"a\"]").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.base_dir, dir.path().join("app"));
        assert_eq!(manifest.resources, vec![Resource::new("a")]);
    }

    #[test]
    fn test_missing_base_dir() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::parse(dir.path(), "base = \"nope\"\nresources = []").unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(_)));
    }

    #[test]
    fn test_unknown_field() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::parse(dir.path(), "resource = []").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}

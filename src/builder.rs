use crate::entry::{self, EntryOptions};
use crate::error::Error;
use crate::options::BuildOptions;
use crate::resolve;
use crate::resource::Resource;
use crate::result::Result;
use crate::temp;
use std::collections::HashSet;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};
use zip::ZipWriter;

/// Builds a zip archive from an ordered list of resources.
///
/// Entries are written strictly in manifest order, one per resource. Any
/// failure aborts the whole build and removes the partially written file.
#[derive(Debug, Default, Clone)]
pub struct ArchiveBuilder {
    options: BuildOptions,
}

impl ArchiveBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Zip `resources` from `base_dir` into a new temporary archive and
    /// return its path. The caller owns the returned file.
    pub fn build(&self, base_dir: &Path, resources: &[Resource]) -> Result<PathBuf> {
        let _span = info_span!("build", base = %base_dir.display()).entered();
        self.options.validate()?;
        check_manifest(resources)?;
        let entry_options = EntryOptions::new(&self.options)?;

        let file = temp::allocate(self.options.temp_dir.as_deref())?;
        let scratch = file.path().to_path_buf();
        debug!(path = %scratch.display(), "allocated archive file");

        let mut zip = ZipWriter::new(file);
        if let Err(err) = write_entries(&mut zip, base_dir, resources, &entry_options) {
            // Dropping the writer closes and removes the temp file
            drop(zip);
            if scratch.exists() {
                warn!(path = %scratch.display(), "failed to remove incomplete archive");
            }
            return Err(err);
        }

        let file = entry::finish_archive(zip)?;
        let path = temp::persist(file)?;

        info!(
            path = %path.display(),
            entries = resources.len(),
            "archive created"
        );
        Ok(path)
    }
}

/// Zip `resources` from `base_dir` with default options.
pub fn zip_resources(base_dir: &Path, resources: &[Resource]) -> Result<PathBuf> {
    ArchiveBuilder::default().build(base_dir, resources)
}

fn write_entries<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    base_dir: &Path,
    resources: &[Resource],
    options: &EntryOptions,
) -> Result<()> {
    for resource in resources {
        let name = resource.filename.as_str();
        let resolved = resolve::resolve(base_dir, name)?;
        debug!(name, kind = ?resolved.kind, "adding entry");
        entry::write_entry(zip, name, &resolved, options)?;
    }
    Ok(())
}

/// Validate every name up front so a bad manifest never produces a file.
fn check_manifest(resources: &[Resource]) -> Result<()> {
    let mut seen = HashSet::with_capacity(resources.len());
    for resource in resources {
        resolve::validate_name(&resource.filename)?;
        if !seen.insert(resource.filename.as_str()) {
            return Err(Error::DuplicateResource(resource.filename.clone()));
        }
    }
    Ok(())
}

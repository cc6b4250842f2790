use crate::error::Error;
use crate::options::{BuildOptions, DirectoryNaming};
use crate::resolve::{EntryKind, Resolved};
use crate::result::Result;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const FILE_PERMISSIONS: u32 = 0o644;
const DIRECTORY_PERMISSIONS: u32 = 0o755;
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Per-entry header settings, fixed for the duration of a build.
#[derive(Debug, Clone, Copy)]
pub struct EntryOptions {
    file: SimpleFileOptions,
    directory: SimpleFileOptions,
    naming: DirectoryNaming,
}

impl EntryOptions {
    pub fn new(options: &BuildOptions) -> Result<Self> {
        let modified = options.modified_time()?;

        let file = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(options.compression_level)
            .last_modified_time(modified)
            .unix_permissions(FILE_PERMISSIONS);

        // Bare directory entries are written as empty regular files by the zip
        // writer, so they get file permissions
        let directory_permissions = match options.directory_names {
            DirectoryNaming::Bare => FILE_PERMISSIONS,
            DirectoryNaming::TrailingSlash => DIRECTORY_PERMISSIONS,
        };
        let directory = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(modified)
            .unix_permissions(directory_permissions);

        Ok(Self {
            file,
            directory,
            naming: options.directory_names,
        })
    }
}

/// Append one entry named `name` for the resolved resource.
pub fn write_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    resolved: &Resolved,
    options: &EntryOptions,
) -> Result<()> {
    match resolved.kind {
        EntryKind::Directory => write_directory(zip, name, options),
        EntryKind::File => write_file(zip, name, &resolved.path, options),
    }
}

/// Write the central directory and hand back the underlying sink.
pub fn finish_archive<W: Write + Seek>(zip: ZipWriter<W>) -> Result<W> {
    zip.finish()
        .map_err(|err| Error::archive_write("<central directory>", err))
}

fn write_directory<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    options: &EntryOptions,
) -> Result<()> {
    match options.naming {
        // Zero-length stored entry; readers infer the directory from the manifest name
        DirectoryNaming::Bare => zip.start_file(name, options.directory),
        DirectoryNaming::TrailingSlash => zip.add_directory(name, options.directory),
    }
    .map_err(|err| Error::archive_write(name, err))
}

fn write_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    path: &Path,
    options: &EntryOptions,
) -> Result<()> {
    let source_err = |source| Error::SourceRead {
        name: name.to_string(),
        path: path.to_path_buf(),
        source,
    };

    let mut source = File::open(path).map_err(source_err)?;

    zip.start_file(name, options.file)
        .map_err(|err| Error::archive_write(name, err))?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    loop {
        let read = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(source_err(err)),
        };
        zip.write_all(&buffer[..read])
            .map_err(|err| Error::archive_write(name, err))?;
    }

    Ok(())
}

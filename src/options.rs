use crate::error::Error;
use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use time::macros::datetime;
use time::{OffsetDateTime, PrimitiveDateTime};
use zip::DateTime;

/// Earliest timestamp a zip entry can carry.
const ZIP_EPOCH: PrimitiveDateTime = datetime!(1980-01-01 0:00);

/// How directory entries are named inside the archive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryNaming {
    /// The resource name exactly as given, e.g. `level1/level2`.
    #[default]
    Bare,
    /// The resource name with a trailing `/`, e.g. `level1/level2/`.
    TrailingSlash,
}

/// Settings for a single archive build.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildOptions {
    /// Directory that receives the output archive (system temp dir if unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Deflate level for file entries
    #[serde(default)]
    pub compression_level: Option<i64>,

    #[serde(default)]
    pub directory_names: DirectoryNaming,

    /// Unix time stamped on every entry (zip epoch if unset)
    #[serde(default)]
    pub source_date_epoch: Option<i64>,
}

impl BuildOptions {
    pub fn with_temp_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn with_directory_names(mut self, naming: DirectoryNaming) -> Self {
        self.directory_names = naming;
        self
    }

    pub fn with_source_date_epoch(mut self, epoch: i64) -> Self {
        self.source_date_epoch = Some(epoch);
        self
    }

    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Check option values that cannot be expressed in the type system.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(0..=9).contains(&level)
        {
            return Err(Error::InvalidOptions(format!(
                "compression-level must be between 0 and 9, got {level}"
            )));
        }
        self.modified_time()?;
        Ok(())
    }

    /// The modification time written into every entry header.
    pub fn modified_time(&self) -> Result<DateTime> {
        let stamp = match self.source_date_epoch {
            Some(epoch) => {
                let utc = OffsetDateTime::from_unix_timestamp(epoch).map_err(|err| {
                    Error::InvalidOptions(format!("source-date-epoch {epoch}: {err}"))
                })?;
                PrimitiveDateTime::new(utc.date(), utc.time()).max(ZIP_EPOCH)
            }
            None => ZIP_EPOCH,
        };

        DateTime::from_date_and_time(
            stamp.year() as u16,
            u8::from(stamp.month()),
            stamp.day(),
            stamp.hour(),
            stamp.minute(),
            stamp.second(),
        )
        .map_err(|_| {
            Error::InvalidOptions(format!(
                "timestamp {stamp} cannot be represented in a zip archive"
            ))
        })
    }
}

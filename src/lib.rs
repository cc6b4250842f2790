//! Deterministic zip archives from ordered resource manifests.
//!
//! Given a base directory and an ordered list of [`Resource`]s, [`zip_resources`]
//! writes one archive entry per resource, in manifest order: directories as
//! empty stored entries, files as deflate entries holding the source bytes.
//! Entry metadata is pinned, so rebuilding an unchanged tree yields the same
//! archive.

pub mod builder;
pub mod entry;
pub mod error;
pub mod manifest;
pub mod options;
pub mod resolve;
pub mod resource;
pub mod result;
pub mod temp;

pub use builder::{ArchiveBuilder, zip_resources};
pub use error::Error;
pub use options::{BuildOptions, DirectoryNaming};
pub use resolve::EntryKind;
pub use resource::Resource;

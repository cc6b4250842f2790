use serde::{Deserialize, Serialize};
use std::fmt;

/// One manifest entry: a forward-slash path relative to the base directory.
///
/// A resource only names content; it is resolved against the base directory
/// when the archive is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Resource {
    pub filename: String,
}

impl Resource {
    pub fn new<S: Into<String>>(filename: S) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

impl From<&str> for Resource {
    fn from(filename: &str) -> Self {
        Resource::new(filename)
    }
}

impl From<String> for Resource {
    fn from(filename: String) -> Self {
        Resource::new(filename)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename)
    }
}

use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;

use super::model::{Catalog, Track};

/// On-disk catalog layout:
///
/// ```toml
/// [[tracks]]
/// id = 1
/// title = "Deep Relaxation"
/// description = "Gentle sounds to help you relax deeply"
/// category = "meditation"
/// duration = "10:00"
/// source = "https://example.com/deep.mp3"
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Parse and validate a TOML catalog.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(s)?;
        Self::new(file.tracks)
    }

    /// Read a TOML catalog from `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

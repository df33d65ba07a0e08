use std::path::PathBuf;

use verbum_types::VersionId;

use crate::book::{RawSource, VersionCollection};
use crate::error::{StoreError, StoreResult};
use crate::traits::VersionSource;

/// Reads versions from `<root>/<lowercased code>.json`.
#[derive(Clone, Debug)]
pub struct FsVersionSource {
    root: PathBuf,
}

impl FsVersionSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `version`.
    pub fn path_for(&self, version: &VersionId) -> PathBuf {
        self.root.join(format!("{}.json", version.file_stem()))
    }
}

impl VersionSource for FsVersionSource {
    fn load(&self, version: &VersionId) -> StoreResult<Option<VersionCollection>> {
        let path = self.path_for(version);
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let raw = RawSource::from_json_str(&text)
            .map_err(|source| StoreError::Corrupt { path, source })?;
        Ok(Some(VersionCollection::from_raw(raw)))
    }
}

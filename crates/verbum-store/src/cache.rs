use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use verbum_types::VersionId;

use crate::book::VersionCollection;
use crate::traits::VersionSource;

/// Lazy, never-evicting cache of version collections.
///
/// An entry is built on the first request for its version and kept for the
/// life of the cache. Builds are serialized per version: concurrent first
/// requests for the same version wait for one build and then share it.
/// Versions whose source is missing or unreadable are not cached, so a later
/// request tries the source again.
pub struct VersionCache {
    source: Arc<dyn VersionSource>,
    entries: RwLock<HashMap<VersionId, Arc<VersionCollection>>>,
    build_guards: Mutex<HashMap<VersionId, Arc<Mutex<()>>>>,
}

impl VersionCache {
    pub fn new(source: Arc<dyn VersionSource>) -> Self {
        Self {
            source,
            entries: RwLock::new(HashMap::new()),
            build_guards: Mutex::new(HashMap::new()),
        }
    }

    /// Cached collection for `version`, without touching the source.
    pub fn get(&self, version: &VersionId) -> Option<Arc<VersionCollection>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(version)
            .cloned()
    }

    /// Cached collection for `version`, loading it on first use.
    ///
    /// Returns `None` when the source has no data for the version or the
    /// data cannot be decoded. The two cases are distinguished in the logs
    /// only.
    pub fn get_or_load(&self, version: &VersionId) -> Option<Arc<VersionCollection>> {
        if let Some(hit) = self.get(version) {
            return Some(hit);
        }

        let guard = self.build_guard(version);
        let _building = guard.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished the build while we waited.
        if let Some(hit) = self.get(version) {
            return Some(hit);
        }

        match self.source.load(version) {
            Ok(Some(collection)) => {
                tracing::info!(
                    version = %version,
                    books = collection.len(),
                    verses = collection.verse_count(),
                    "version loaded"
                );
                let collection = Arc::new(collection);
                self.entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(version.clone(), Arc::clone(&collection));
                Some(collection)
            }
            Ok(None) => {
                tracing::debug!(version = %version, "version source missing");
                None
            }
            Err(error) => {
                tracing::warn!(version = %version, %error, "version source unusable");
                None
            }
        }
    }

    fn build_guard(&self, version: &VersionId) -> Arc<Mutex<()>> {
        let mut guards = self
            .build_guards
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(guards.entry(version.clone()).or_default())
    }

    pub fn contains(&self, version: &VersionId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(version)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached version codes, sorted.
    pub fn cached_versions(&self) -> Vec<VersionId> {
        let map = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<VersionId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for VersionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionCache")
            .field("cached", &self.cached_versions())
            .finish()
    }
}

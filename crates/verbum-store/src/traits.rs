use verbum_types::VersionId;

use crate::book::VersionCollection;
use crate::error::StoreResult;

/// Where version collections come from.
///
/// All implementations must satisfy these invariants:
/// - `load` returns a fully built collection or nothing; never a partial one.
/// - Repeated loads of an unchanged source build equal collections.
/// - A source that does not exist is `Ok(None)`, not an error.
pub trait VersionSource: Send + Sync {
    /// Build the collection for `version`.
    ///
    /// Returns `Ok(None)` if there is no source for the version.
    /// Returns `Err` if a source exists but cannot be read or decoded.
    fn load(&self, version: &VersionId) -> StoreResult<Option<VersionCollection>>;
}

//! Read operations over Verbum versions.
//!
//! [`Verbum`] is the entry point: it owns a [`VersionCache`] and answers
//! every query the HTTP front end and the CLI expose. Version codes passed
//! in are expected to be validated already (see
//! [`SupportedVersions`](verbum_types::SupportedVersions)).

pub mod error;
pub mod model;
pub mod service;

pub use error::{ErrorKind, QueryError, QueryResult};
pub use model::{
    BookChapters, BookSummary, ChapterCount, Passage, SearchResults, VerseHit, UNKNOWN_ABBREV,
    UNKNOWN_GROUP, UNKNOWN_NAME,
};
pub use service::Verbum;

// Re-export key types
pub use verbum_store::{
    BookRecord, FsVersionSource, InMemoryVersionSource, VersionCache, VersionCollection,
    VersionSource,
};
pub use verbum_types::{SupportedVersions, VersionId};

//! Version sources and the version cache for Verbum.
//!
//! A *version* is one translation of the corpus: an ordered set of books,
//! each an ordered list of chapters, each an ordered list of verse strings.
//! This crate turns on-disk version files into immutable
//! [`VersionCollection`]s and memoizes them per version.
//!
//! # Components
//!
//! - [`RawSource`] -- the two accepted file shapes (a list of books, or an
//!   object keyed by canonical name), decoded at the serde boundary
//! - [`VersionCollection`] -- books keyed by canonical name, in source order
//! - [`VersionSource`] -- where collections come from
//! - [`FsVersionSource`] -- `<root>/<code>.json` files
//! - [`InMemoryVersionSource`] -- `HashMap`-based source for tests and embedding
//! - [`VersionCache`] -- lazy, never-evicting cache in front of a source
//!
//! # Design Rules
//!
//! 1. A collection is immutable once built and shared as `Arc`.
//! 2. A missing source is `Ok(None)`, never an error.
//! 3. A corrupt source is an error for the loader, logged and reported as
//!    absent by the cache.
//! 4. Each version is built at most once at a time; readers never observe a
//!    partially built collection.

pub mod book;
pub mod cache;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use book::{BookRecord, Chapter, KeyedBooks, RawBook, RawSource, VersionCollection};
pub use cache::VersionCache;
pub use error::{StoreError, StoreResult};
pub use fs::FsVersionSource;
pub use memory::InMemoryVersionSource;
pub use traits::VersionSource;

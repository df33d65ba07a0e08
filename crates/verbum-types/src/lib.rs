//! Foundation types for Verbum.
//!
//! This crate provides the identifiers shared by every other Verbum crate:
//! the version code that names one translation of the corpus, the closed set
//! of codes a deployment accepts, and the book-name canonicalization rules
//! used to address books inside a version.
//!
//! # Key Types
//!
//! - [`VersionId`]: Uppercase translation code such as `ARA` or `NVI`
//! - [`SupportedVersions`]: The closed set of codes accepted at the edge
//! - [`canon::normalize`]: Abbreviation or loose name to canonical book key

pub mod canon;
pub mod error;
pub mod version;

pub use canon::{display_name, normalize};
pub use error::TypeError;
pub use version::{SupportedVersions, VersionId, DEFAULT_VERSION, DEFAULT_VERSIONS};

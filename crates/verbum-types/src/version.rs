use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Codes accepted when no explicit list is configured.
pub const DEFAULT_VERSIONS: &[&str] = &[
    "ACF", "ARA", "ARC", "AS21", "JFAA", "KJA", "KJF", "NAA", "NBV", "NTLH", "NVT", "NVI", "TB",
];

/// Version served when a request names none.
pub const DEFAULT_VERSION: &str = "ARA";

/// Identifier of one translation of the corpus.
///
/// Always stored uppercase. Construction does not check membership in a
/// [`SupportedVersions`] set; use [`SupportedVersions::resolve`] at the edge.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionId(String);

impl VersionId {
    /// Create a version identifier, uppercasing and trimming the input.
    pub fn new(code: &str) -> Result<Self, TypeError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(TypeError::EmptyVersion);
        }
        Ok(Self(code.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File stem of this version's source data (`ARA` -> `ara`).
    pub fn file_stem(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Debug for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionId({})", self.0)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for VersionId {
    fn default() -> Self {
        Self(DEFAULT_VERSION.to_string())
    }
}

impl TryFrom<String> for VersionId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<VersionId> for String {
    fn from(id: VersionId) -> Self {
        id.0
    }
}

impl AsRef<str> for VersionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The closed set of version codes a deployment serves.
///
/// Requests naming any other code are rejected before the store is touched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportedVersions(Vec<VersionId>);

impl SupportedVersions {
    pub fn new(versions: impl IntoIterator<Item = VersionId>) -> Self {
        let mut list: Vec<VersionId> = Vec::new();
        for v in versions {
            if !list.contains(&v) {
                list.push(v);
            }
        }
        Self(list)
    }

    /// Validate a raw, possibly lowercase, code against the set.
    pub fn resolve(&self, raw: &str) -> Result<VersionId, TypeError> {
        let id = VersionId::new(raw)?;
        if self.contains(&id) {
            Ok(id)
        } else {
            Err(TypeError::UnsupportedVersion(id.0))
        }
    }

    pub fn contains(&self, id: &VersionId) -> bool {
        self.0.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SupportedVersions {
    fn default() -> Self {
        Self(DEFAULT_VERSIONS.iter().map(|c| VersionId(c.to_string())).collect())
    }
}

use thiserror::Error;
use verbum_types::VersionId;

/// How a query failure should be reported to a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("data for version '{0}' not found")]
    VersionNotFound(VersionId),

    #[error("book '{book}' not found in version {version}")]
    BookNotFound { book: String, version: VersionId },

    #[error("chapter '{chapter}' not found for book '{book}'")]
    ChapterNotFound { chapter: String, book: String },

    #[error("chapter must be an integer, got '{0}'")]
    InvalidChapter(String),

    #[error("search theme must not be empty")]
    EmptyTheme,

    #[error("no books with chapters in version {0}")]
    NoChapters(VersionId),

    #[error("chapter {chapter} of book '{book}' has no verses")]
    EmptyChapter { book: String, chapter: usize },
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidChapter(_) | Self::EmptyTheme => ErrorKind::BadRequest,
            Self::VersionNotFound(_)
            | Self::BookNotFound { .. }
            | Self::ChapterNotFound { .. }
            | Self::NoChapters(_)
            | Self::EmptyChapter { .. } => ErrorKind::NotFound,
        }
    }
}

pub type QueryResult<T> = Result<T, QueryError>;

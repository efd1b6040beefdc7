use std::fmt;

use thiserror::Error;

/// The error an injected API call resolves to when the transport fails.
pub type ApiError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The kind of state held under a [`crate::GlobalState`] key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A [`crate::PaginationState`].
    Pagination,
    /// An [`crate::EntityTable`].
    Entities,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Pagination => write!(f, "pagination"),
            SegmentKind::Entities => write!(f, "entities"),
        }
    }
}

/// Everything that can go wrong when configuring a [`crate::Paginator`], reading state through it,
/// or deciding which page to fetch next.
///
/// Transport failures of the injected API call are deliberately absent: they're logged and
/// swallowed at the orchestration boundary, see [`crate::PageFetch::run`].
#[derive(Debug, Error)]
pub enum PaginatorError {
    /// The configured segment isn't present in the global state.
    ///
    /// This means the reducers were wired into a different location than the [`crate::PaginatorOptions`] point to.
    #[error("Key [{0}] does not exist in global state")]
    MissingStateKey(String),

    /// The configured segment exists, but holds the other kind of state.
    #[error("Key [{key}] holds {found} state, expected {expected} state")]
    SegmentKindMismatch {
        /// The segment name that was looked up.
        key: String,
        /// The kind the paginator needed.
        expected: SegmentKind,
        /// The kind actually stored.
        found: SegmentKind,
    },

    /// The [`crate::PaginatorOptions`] can't be used as given.
    #[error("invalid paginator options: {0}")]
    InvalidOptions(String),

    /// Pages are numbered from 1.
    #[error("page {0} is out of range, pages start at 1")]
    InvalidPage(u64),

    /// Tried to fetch the next page when the last response reported none.
    #[error("no next page")]
    NoNextPage,

    /// Tried to fetch the previous page when the last response reported none.
    #[error("no previous page")]
    NoPreviousPage,

    /// A raw API response was missing a required field, or the field had the wrong shape.
    #[error("response field [{field}] is missing or malformed, expected {expected}")]
    MalformedResponse {
        /// The configured response field name.
        field: String,
        /// What the field should have held.
        expected: &'static str,
    },
}

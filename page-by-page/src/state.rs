use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Filters, PaginatorError, SegmentKind};

/// An entity's identifier, the stringified value of its configured id field.
pub type EntityId = String;

/// Every entity received for one entity type, keyed by identifier. Last write wins.
pub type EntityTable = BTreeMap<EntityId, Value>;

/// Which entities appeared on which page, for every filter set fetched so far.
///
/// Keyed first by filter signature ([`Filters::to_query_string`]), then by page number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex(BTreeMap<String, BTreeMap<u64, Vec<EntityId>>>);

/// The result of looking up a page in a [`PageIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLookup<'a> {
    /// The page's identifiers, in the order the API returned them.
    Found(&'a [EntityId]),
    /// Nothing has been received for this filter signature.
    UnknownFilters,
    /// The filter signature is known, but not this page of it.
    UnknownPage,
}

impl<'a> PageLookup<'a> {
    /// The identifiers if found, otherwise empty.
    pub fn ids_or_empty(self) -> &'a [EntityId] {
        match self {
            PageLookup::Found(ids) => ids,
            PageLookup::UnknownFilters | PageLookup::UnknownPage => &[],
        }
    }
}

impl PageIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the identifiers for `page` under `filter_signature`.
    pub fn lookup(&self, filter_signature: &str, page: u64) -> PageLookup<'_> {
        match self.0.get(filter_signature) {
            None => PageLookup::UnknownFilters,
            Some(pages) => match pages.get(&page) {
                Some(ids) => PageLookup::Found(ids),
                None => PageLookup::UnknownPage,
            },
        }
    }

    /// Set the identifiers for one page, leaving every other page and filter signature untouched.
    pub fn insert(&mut self, filter_signature: impl Into<String>, page: u64, ids: Vec<EntityId>) {
        self.0
            .entry(filter_signature.into())
            .or_default()
            .insert(page, ids);
    }

    /// Whether nothing has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The known filter signatures.
    pub fn filter_signatures(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The known page numbers for a filter signature, ascending.
    pub fn page_numbers(&self, filter_signature: &str) -> impl Iterator<Item = u64> + '_ {
        self.0
            .get(filter_signature)
            .into_iter()
            .flat_map(|pages| pages.keys().copied())
    }
}

impl<S: Into<String>, P: IntoIterator<Item = (u64, Vec<EntityId>)>> FromIterator<(S, P)>
    for PageIndex
{
    fn from_iter<I: IntoIterator<Item = (S, P)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(signature, pages)| (signature.into(), pages.into_iter().collect()))
                .collect(),
        )
    }
}

/// Pagination bookkeeping for one entity type.
///
/// Everything but `pages` reflects the most recently received page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationState {
    /// Identifiers per filter signature per page. Only ever added to.
    pub pages: PageIndex,
    /// The most recently received page number, starting at 1.
    pub page: u64,
    /// The filters the most recent page was fetched with.
    pub filters: Filters,
    /// The API's opaque next page marker, `None` when there's no next page.
    pub next: Option<Value>,
    /// The API's opaque previous page marker, `None` when there's no previous page.
    pub previous: Option<Value>,
    /// The total item count across all pages of the current filters.
    pub count: u64,
    /// Whether any page has been received yet.
    pub paginated: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            pages: PageIndex::new(),
            page: 1,
            filters: Filters::new(),
            next: None,
            previous: None,
            count: 0,
            paginated: false,
        }
    }
}

/// A named slice of the [`GlobalState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "snake_case")]
pub enum Segment {
    /// A pagination slice.
    Pagination(PaginationState),
    /// An entity table slice.
    Entities(EntityTable),
}

impl Segment {
    /// Which kind of slice this is.
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Pagination(_) => SegmentKind::Pagination,
            Segment::Entities(_) => SegmentKind::Entities,
        }
    }
}

impl From<PaginationState> for Segment {
    fn from(state: PaginationState) -> Self {
        Segment::Pagination(state)
    }
}

impl From<EntityTable> for Segment {
    fn from(table: EntityTable) -> Self {
        Segment::Entities(table)
    }
}

/// The application state the paginators read from: named segments, each either pagination or entity state.
///
/// The store owning this is outside this crate. Reducers can be wired in directly, or applied through
/// [`crate::Paginator::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalState {
    segments: BTreeMap<String, Segment>,
}

impl GlobalState {
    /// Create a state with no segments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment, builder style.
    pub fn with_segment(mut self, key: impl Into<String>, segment: impl Into<Segment>) -> Self {
        self.insert_segment(key, segment);
        self
    }

    /// Insert or replace a segment, returning the one replaced.
    pub fn insert_segment(
        &mut self,
        key: impl Into<String>,
        segment: impl Into<Segment>,
    ) -> Option<Segment> {
        self.segments.insert(key.into(), segment.into())
    }

    /// Remove a segment, returning it if present.
    pub fn remove_segment(&mut self, key: &str) -> Option<Segment> {
        self.segments.remove(key)
    }

    /// Resolve the segment named `key`.
    ///
    /// A missing segment means the reducers were wired somewhere other than where the paginator looks,
    /// so it's reported as [`PaginatorError::MissingStateKey`] rather than treated as empty.
    pub fn segment(&self, key: &str) -> Result<&Segment, PaginatorError> {
        self.segments
            .get(key)
            .ok_or_else(|| PaginatorError::MissingStateKey(key.to_string()))
    }

    /// Resolve the pagination segment named `key`.
    pub fn pagination(&self, key: &str) -> Result<&PaginationState, PaginatorError> {
        match self.segment(key)? {
            Segment::Pagination(state) => Ok(state),
            other => Err(mismatch(key, SegmentKind::Pagination, other)),
        }
    }

    /// Resolve the entity table segment named `key`.
    pub fn entities(&self, key: &str) -> Result<&EntityTable, PaginatorError> {
        match self.segment(key)? {
            Segment::Entities(table) => Ok(table),
            other => Err(mismatch(key, SegmentKind::Entities, other)),
        }
    }
}

fn mismatch(key: &str, expected: SegmentKind, found: &Segment) -> PaginatorError {
    PaginatorError::SegmentKindMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

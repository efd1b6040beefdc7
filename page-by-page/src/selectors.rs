use serde_json::Value;

use crate::{Filters, GlobalState, PaginationState, PaginatorError, PaginatorOptions};

/// Read-only projections of a paginator's slices of the [`GlobalState`].
///
/// Every selector resolves its segments by the configured keys, failing with
/// [`PaginatorError::MissingStateKey`] if they aren't there.
#[derive(Debug, Clone, Copy)]
pub struct Selectors<'a> {
    options: &'a PaginatorOptions,
}

impl<'a> Selectors<'a> {
    pub(crate) fn new(options: &'a PaginatorOptions) -> Self {
        Self { options }
    }

    fn pagination<'s>(&self, state: &'s GlobalState) -> Result<&'s PaginationState, PaginatorError> {
        state.pagination(self.options.paginators_key())
    }

    /// Whether the last response reported a next page.
    pub fn has_next(&self, state: &GlobalState) -> Result<bool, PaginatorError> {
        Ok(self.pagination(state)?.next.is_some())
    }

    /// Whether the last response reported a previous page.
    pub fn has_previous(&self, state: &GlobalState) -> Result<bool, PaginatorError> {
        Ok(self.pagination(state)?.previous.is_some())
    }

    /// The active filters.
    pub fn filters<'s>(&self, state: &'s GlobalState) -> Result<&'s Filters, PaginatorError> {
        Ok(&self.pagination(state)?.filters)
    }

    /// The active filters as their canonical query string, e.g. `category_id=5&year=1990`.
    pub fn filters_as_query_string(&self, state: &GlobalState) -> Result<String, PaginatorError> {
        Ok(self.filters(state)?.to_query_string())
    }

    /// The total item count across all pages of the active filters.
    pub fn total_count(&self, state: &GlobalState) -> Result<u64, PaginatorError> {
        Ok(self.pagination(state)?.count)
    }

    /// The most recently received page number.
    pub fn current_page_num(&self, state: &GlobalState) -> Result<u64, PaginatorError> {
        Ok(self.pagination(state)?.page)
    }

    /// The entities on the current page of the active filters, in the order the API returned them.
    ///
    /// A page that hasn't been received yet is empty, not an error. Identifiers with no entity record are skipped.
    pub fn current_page_items<'s>(
        &self,
        state: &'s GlobalState,
    ) -> Result<Vec<&'s Value>, PaginatorError> {
        let filter_signature = self.filters_as_query_string(state)?;
        let page = self.current_page_num(state)?;
        let pagination = self.pagination(state)?;
        let entities = state.entities(self.options.entities_key())?;

        Ok(pagination
            .pages
            .lookup(&filter_signature, page)
            .ids_or_empty()
            .iter()
            .filter_map(|id| entities.get(id))
            .collect())
    }
}

use crate::{Filters, GlobalState, Message, Paginator, PaginatorError, QueryParams};

/// Something messages can be dispatched into, usually the store the paginator's reducers are wired into.
///
/// Implemented for any `FnMut(Message)`.
pub trait Dispatch {
    /// Hand a message to the store.
    fn dispatch(&mut self, message: Message);
}

impl<F> Dispatch for F
where
    F: FnMut(Message),
{
    fn dispatch(&mut self, message: Message) {
        self(message)
    }
}

/// How a [`PageFetch::run`] ended.
///
/// Purely informational, a failure has already been logged and nothing was dispatched for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The page arrived and its [`Message::ReceivePage`] was dispatched.
    Received,
    /// The API call failed or its response was malformed.
    Failed,
}

/// Builders deciding which page to fetch next from a snapshot of the state.
///
/// Each fetch is bound in three steps: the state snapshot, then the page and filter params, then the dispatcher:
///
/// ```ignore
/// let fetch = paginator.navigation().fetch_next_page(&state).with_default_params()?;
/// fetch.run(&mut dispatch).await;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Navigation<'a> {
    paginator: &'a Paginator,
}

impl<'a> Navigation<'a> {
    pub(crate) fn new(paginator: &'a Paginator) -> Self {
        Self { paginator }
    }

    /// Fetch an arbitrary page.
    pub fn fetch_page<'s>(&self, state: &'s GlobalState) -> FetchPage<'s> {
        FetchPage {
            paginator: self.paginator.clone(),
            state,
        }
    }

    /// Fetch the page after the current one.
    pub fn fetch_next_page<'s>(&self, state: &'s GlobalState) -> FetchAdjacentPage<'s> {
        FetchAdjacentPage {
            inner: self.fetch_page(state),
            direction: Direction::Next,
        }
    }

    /// Fetch the page before the current one.
    pub fn fetch_previous_page<'s>(&self, state: &'s GlobalState) -> FetchAdjacentPage<'s> {
        FetchAdjacentPage {
            inner: self.fetch_page(state),
            direction: Direction::Previous,
        }
    }
}

/// A page fetch bound to a state snapshot, waiting for its params.
#[derive(Debug, Clone)]
pub struct FetchPage<'s> {
    paginator: Paginator,
    state: &'s GlobalState,
}

impl FetchPage<'_> {
    /// Target `page` with the current filters.
    ///
    /// If `override_filters` isn't empty it's merged over the current filters and the page resets to 1,
    /// a new filter set always starts from its first page.
    pub fn with_params(
        self,
        page: u64,
        override_filters: Filters,
    ) -> Result<PageFetch, PaginatorError> {
        let current_filters = self.paginator.selectors().filters(self.state)?;
        let (page, filters) = if override_filters.is_empty() {
            (page, current_filters.clone())
        } else {
            (1, current_filters.merged_with(&override_filters))
        };
        if page == 0 {
            return Err(PaginatorError::InvalidPage(page));
        }
        Ok(PageFetch {
            paginator: self.paginator,
            page,
            filters,
        })
    }

    /// Target the first page with the current filters.
    pub fn with_default_params(self) -> Result<PageFetch, PaginatorError> {
        self.with_params(1, Filters::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// A next/previous page fetch bound to a state snapshot, waiting for its params.
#[derive(Debug, Clone)]
pub struct FetchAdjacentPage<'s> {
    inner: FetchPage<'s>,
    direction: Direction,
}

impl FetchAdjacentPage<'_> {
    /// Target the adjacent page, optionally overriding filters (which resets to page 1, see [`FetchPage::with_params`]).
    ///
    /// Fails with [`PaginatorError::NoNextPage`] / [`PaginatorError::NoPreviousPage`] when the last response
    /// reported no page in that direction.
    pub fn with_params(self, override_filters: Filters) -> Result<PageFetch, PaginatorError> {
        let selectors = self.inner.paginator.selectors();
        let state = self.inner.state;
        let current_page = selectors.current_page_num(state)?;
        let page = match self.direction {
            Direction::Next => {
                if !selectors.has_next(state)? {
                    return Err(PaginatorError::NoNextPage);
                }
                current_page.saturating_add(1)
            }
            Direction::Previous => {
                if !selectors.has_previous(state)? || current_page <= 1 {
                    return Err(PaginatorError::NoPreviousPage);
                }
                current_page - 1
            }
        };
        self.inner.with_params(page, override_filters)
    }

    /// Target the adjacent page with the current filters.
    pub fn with_default_params(self) -> Result<PageFetch, PaginatorError> {
        self.with_params(Filters::new())
    }
}

/// A fully decided page fetch, waiting for a dispatcher to run against.
///
/// Holds no reference to the state it was decided from, so it can be stored, cloned and run any number of times,
/// always requesting the same page with the same filters.
#[derive(Debug, Clone)]
pub struct PageFetch {
    paginator: Paginator,
    page: u64,
    filters: Filters,
}

impl PageFetch {
    /// The page that will be requested.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The filters that will be requested.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// What the API call will be invoked with: the filters plus the page under the configured page key.
    pub fn query_params(&self) -> QueryParams {
        self.filters
            .clone()
            .with(self.paginator.options().page_key(), self.page)
    }

    /// Dispatch the request message, call the API, then dispatch the received page.
    ///
    /// Transport failures and malformed responses are logged and swallowed: nothing further is dispatched
    /// and no retry happens. Wrap the API call itself if you need retries.
    pub async fn run<D>(&self, dispatch: &mut D) -> FetchStatus
    where
        D: Dispatch + ?Sized,
    {
        let action_creators = self.paginator.action_creators();
        let entity_type = self.paginator.entity_type();
        let filter_signature = self.filters.to_query_string();

        tracing::debug!(
            entity_type,
            page = self.page,
            filter_signature = %filter_signature,
            "requesting page"
        );
        dispatch.dispatch(action_creators.request_page(self.page, self.filters.clone()));

        let started_at = chrono::Utc::now();
        let response = (self.paginator.inner.api_call)(self.query_params()).await;
        let elapsed_ms = (chrono::Utc::now() - started_at).num_milliseconds();

        let response = match response {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(
                    entity_type,
                    page = self.page,
                    filter_signature = %filter_signature,
                    elapsed_ms,
                    %error,
                    "page fetch failed"
                );
                return FetchStatus::Failed;
            }
        };

        match action_creators.receive_page(self.page, self.filters.clone(), response) {
            Ok(message) => {
                tracing::debug!(
                    entity_type,
                    page = self.page,
                    filter_signature = %filter_signature,
                    elapsed_ms,
                    "received page"
                );
                dispatch.dispatch(message);
                FetchStatus::Received
            }
            Err(error) => {
                tracing::error!(
                    entity_type,
                    page = self.page,
                    filter_signature = %filter_signature,
                    elapsed_ms,
                    %error,
                    "dropping malformed page response"
                );
                FetchStatus::Failed
            }
        }
    }
}

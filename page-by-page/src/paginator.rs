use std::{
    fmt::{self, Debug, Formatter},
    future::Future,
    sync::Arc,
};

use futures::{FutureExt, TryFutureExt, future::BoxFuture};
use serde_json::Value;

use crate::{
    ActionCreators, ApiError, EntitiesReducer, GlobalState, Message, Navigation,
    PaginationReducer, PaginatorError, PaginatorOptions, QueryParams, Segment, SegmentKind,
    Selectors,
};

pub(crate) type ApiCall =
    Arc<dyn Fn(QueryParams) -> BoxFuture<'static, Result<Value, ApiError>> + Send + Sync>;

/// The selectors, reducers, action creators and navigation for one paginated entity type.
///
/// Cheap to clone, all clones share the same configuration and API call.
#[derive(Clone)]
pub struct Paginator {
    pub(crate) inner: Arc<PaginatorInner>,
}

pub(crate) struct PaginatorInner {
    pub entity_type: String,
    pub options: PaginatorOptions,
    pub api_call: ApiCall,
}

impl Debug for Paginator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("entity_type", &self.inner.entity_type)
            .field("options", &self.inner.options)
            .field(
                "api_call",
                &"Arc<dyn Fn(QueryParams) -> BoxFuture<Result<Value, ApiError>>>",
            )
            .finish()
    }
}

impl Paginator {
    /// Create a paginator for `entity_type`.
    ///
    /// `api_call` is invoked with the active filters plus the page number under the configured page key,
    /// and should resolve to the raw response containing the configured results, count, next and previous fields.
    ///
    /// Fails if `options` doesn't validate, see [`PaginatorError::InvalidOptions`].
    pub fn new<F, Fut, E>(
        entity_type: impl Into<String>,
        api_call: F,
        options: PaginatorOptions,
    ) -> Result<Self, PaginatorError>
    where
        F: Fn(QueryParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, E>> + Send + 'static,
        E: Into<ApiError> + 'static,
    {
        options.validate()?;
        Ok(Self {
            inner: Arc::new(PaginatorInner {
                entity_type: entity_type.into(),
                options,
                api_call: Arc::new(move |params| {
                    api_call(params).map_err(Into::<ApiError>::into).boxed()
                }),
            }),
        })
    }

    /// The entity type tag messages from this paginator carry.
    pub fn entity_type(&self) -> &str {
        &self.inner.entity_type
    }

    /// The validated configuration.
    pub fn options(&self) -> &PaginatorOptions {
        &self.inner.options
    }

    /// Read-only projections of this paginator's state.
    pub fn selectors(&self) -> Selectors<'_> {
        Selectors::new(&self.inner.options)
    }

    /// Builders for the page fetches.
    pub fn navigation(&self) -> Navigation<'_> {
        Navigation::new(self)
    }

    /// Constructors for this paginator's messages.
    pub fn action_creators(&self) -> ActionCreators<'_> {
        ActionCreators::new(&self.inner.entity_type, &self.inner.options)
    }

    /// The reducer for the pagination slice.
    pub fn pagination_reducer(&self) -> PaginationReducer<'_> {
        PaginationReducer::new(&self.inner.entity_type, &self.inner.options)
    }

    /// The reducer for the entity table slice.
    pub fn entities_reducer(&self) -> EntitiesReducer<'_> {
        EntitiesReducer::new(&self.inner.entity_type, &self.inner.options)
    }

    /// Run both reducers over their configured segments of `state`.
    ///
    /// Missing segments start out from their initial state. Nothing is touched if either key holds the wrong kind of segment.
    pub fn apply(&self, state: &mut GlobalState, message: &Message) -> Result<(), PaginatorError> {
        let paginators_key = self.inner.options.paginators_key();
        let entities_key = self.inner.options.entities_key();
        ensure_kind(state, paginators_key, SegmentKind::Pagination)?;
        ensure_kind(state, entities_key, SegmentKind::Entities)?;

        let pagination = match state.remove_segment(paginators_key) {
            Some(Segment::Pagination(pagination)) => Some(pagination),
            _ => None,
        };
        let entities = match state.remove_segment(entities_key) {
            Some(Segment::Entities(entities)) => Some(entities),
            _ => None,
        };
        state.insert_segment(
            paginators_key,
            self.pagination_reducer().reduce(pagination, message),
        );
        state.insert_segment(
            entities_key,
            self.entities_reducer().reduce(entities, message),
        );
        Ok(())
    }
}

fn ensure_kind(
    state: &GlobalState,
    key: &str,
    expected: SegmentKind,
) -> Result<(), PaginatorError> {
    match state.segment(key) {
        Ok(segment) if segment.kind() != expected => Err(PaginatorError::SegmentKindMismatch {
            key: key.to_string(),
            expected,
            found: segment.kind(),
        }),
        _ => Ok(()),
    }
}

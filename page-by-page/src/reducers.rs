use serde_json::Value;

use crate::{EntityId, EntityTable, Message, PaginationState, PaginatorOptions};

/// Pull the identifier out of an item, stringifying numbers.
///
/// Items without a usable identifier can't be normalized, they're skipped by both reducers.
fn entity_id(item: &Value, entity_id_key: &str) -> Option<EntityId> {
    match item.get(entity_id_key) {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => {
            tracing::warn!(
                entity_id_key,
                "skipping received item without a string or number identifier"
            );
            None
        }
    }
}

/// Folds received pages into the [`PaginationState`] of one entity type.
#[derive(Debug, Clone, Copy)]
pub struct PaginationReducer<'a> {
    entity_type: &'a str,
    options: &'a PaginatorOptions,
}

impl<'a> PaginationReducer<'a> {
    pub(crate) fn new(entity_type: &'a str, options: &'a PaginatorOptions) -> Self {
        Self {
            entity_type,
            options,
        }
    }

    /// Apply `message` to `state`, starting from [`PaginationState::default`] when `None`.
    ///
    /// Anything but a [`Message::ReceivePage`] for this entity type hands `state` straight back.
    pub fn reduce(&self, state: Option<PaginationState>, message: &Message) -> PaginationState {
        let mut state = state.unwrap_or_default();
        let (payload, meta) = match message {
            Message::ReceivePage { payload, meta } if meta.entity_type == self.entity_type => {
                (payload, meta)
            }
            _ => return state,
        };

        let filter_signature = meta.filters.to_query_string();
        let ids = payload
            .iter()
            .filter_map(|item| entity_id(item, self.options.entity_id_key()))
            .collect::<Vec<_>>();
        tracing::trace!(
            entity_type = self.entity_type,
            page = meta.page,
            filter_signature = %filter_signature,
            items = ids.len(),
            "indexing received page"
        );
        state.pages.insert(filter_signature, meta.page, ids);

        state.page = meta.page;
        state.filters = meta.filters.clone();
        state.next = meta.next.clone();
        state.previous = meta.previous.clone();
        state.count = meta.count;
        state.paginated = meta.paginated;
        state
    }
}

/// Folds received pages into the [`EntityTable`] of one entity type.
#[derive(Debug, Clone, Copy)]
pub struct EntitiesReducer<'a> {
    entity_type: &'a str,
    options: &'a PaginatorOptions,
}

impl<'a> EntitiesReducer<'a> {
    pub(crate) fn new(entity_type: &'a str, options: &'a PaginatorOptions) -> Self {
        Self {
            entity_type,
            options,
        }
    }

    /// Apply `message` to `state`, starting from an empty table when `None`.
    ///
    /// Received items replace any existing record with the same identifier wholesale, no merging.
    /// Anything but a [`Message::ReceivePage`] for this entity type hands `state` straight back.
    pub fn reduce(&self, state: Option<EntityTable>, message: &Message) -> EntityTable {
        let mut state = state.unwrap_or_default();
        let payload = match message {
            Message::ReceivePage { payload, meta } if meta.entity_type == self.entity_type => {
                payload
            }
            _ => return state,
        };

        for item in payload {
            if let Some(id) = entity_id(item, self.options.entity_id_key()) {
                state.insert(id, item.clone());
            }
        }
        state
    }
}

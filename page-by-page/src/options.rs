use serde::Deserialize;

use crate::PaginatorError;

pub(crate) const DEFAULT_ENTITIES_KEY: &str = "entities";
pub(crate) const DEFAULT_PAGINATORS_KEY: &str = "pagination";
pub(crate) const DEFAULT_ENTITY_ID_KEY: &str = "id";
pub(crate) const DEFAULT_RESULTS_KEY: &str = "results";
pub(crate) const DEFAULT_COUNT_KEY: &str = "count";
pub(crate) const DEFAULT_NEXT_KEY: &str = "next";
pub(crate) const DEFAULT_PREVIOUS_KEY: &str = "previous";
pub(crate) const DEFAULT_PAGE_KEY: &str = "page";

/// Configuration for a [`crate::Paginator`]: where its state lives, and how the remote API names its fields.
///
/// Any option left unset falls back to its default. Options are validated once, when the paginator is constructed.
///
/// Also deserializable with the camelCase option names, so it can come straight out of a config file:
///
/// ```
/// let options: page_by_page::PaginatorOptions =
///     serde_json::from_str(r#"{"entityIdKey": "uuid", "pageKey": "p"}"#).unwrap();
/// assert_eq!(options.entity_id_key(), "uuid");
/// assert_eq!(options.page_key(), "p");
/// assert_eq!(options.results_key(), "results");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginatorOptions {
    entities_key: Option<String>,
    paginators_key: Option<String>,
    entity_id_key: Option<String>,
    results_key: Option<String>,
    count_key: Option<String>,
    next_key: Option<String>,
    previous_key: Option<String>,
    page_key: Option<String>,
}

impl PaginatorOptions {
    /// Create new [`PaginatorOptions`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the [`crate::GlobalState`] key holding the entity table.
    ///
    /// Default: `"entities"`
    pub fn set_entities_key(mut self, key: impl Into<String>) -> Self {
        self.entities_key = Some(key.into());
        self
    }

    /// Set the [`crate::GlobalState`] key holding the pagination state.
    ///
    /// Default: `"pagination"`
    pub fn set_paginators_key(mut self, key: impl Into<String>) -> Self {
        self.paginators_key = Some(key.into());
        self
    }

    /// Set the item field holding each entity's identifier. Both reducers index by this field.
    ///
    /// Default: `"id"`
    pub fn set_entity_id_key(mut self, key: impl Into<String>) -> Self {
        self.entity_id_key = Some(key.into());
        self
    }

    /// Set the response field holding the page's items.
    ///
    /// Default: `"results"`
    pub fn set_results_key(mut self, key: impl Into<String>) -> Self {
        self.results_key = Some(key.into());
        self
    }

    /// Set the response field holding the total item count across all pages.
    ///
    /// Default: `"count"`
    pub fn set_count_key(mut self, key: impl Into<String>) -> Self {
        self.count_key = Some(key.into());
        self
    }

    /// Set the response field holding the next page marker.
    ///
    /// Default: `"next"`
    pub fn set_next_key(mut self, key: impl Into<String>) -> Self {
        self.next_key = Some(key.into());
        self
    }

    /// Set the response field holding the previous page marker.
    ///
    /// Default: `"previous"`
    pub fn set_previous_key(mut self, key: impl Into<String>) -> Self {
        self.previous_key = Some(key.into());
        self
    }

    /// Set the query parameter the page number is sent under.
    ///
    /// Default: `"page"`
    pub fn set_page_key(mut self, key: impl Into<String>) -> Self {
        self.page_key = Some(key.into());
        self
    }

    /// The [`crate::GlobalState`] key holding the entity table.
    ///
    /// Default: `"entities"`
    pub fn entities_key(&self) -> &str {
        self.entities_key.as_deref().unwrap_or(DEFAULT_ENTITIES_KEY)
    }

    /// The [`crate::GlobalState`] key holding the pagination state.
    ///
    /// Default: `"pagination"`
    pub fn paginators_key(&self) -> &str {
        self.paginators_key
            .as_deref()
            .unwrap_or(DEFAULT_PAGINATORS_KEY)
    }

    /// The item field holding each entity's identifier.
    ///
    /// Default: `"id"`
    pub fn entity_id_key(&self) -> &str {
        self.entity_id_key.as_deref().unwrap_or(DEFAULT_ENTITY_ID_KEY)
    }

    /// The response field holding the page's items.
    ///
    /// Default: `"results"`
    pub fn results_key(&self) -> &str {
        self.results_key.as_deref().unwrap_or(DEFAULT_RESULTS_KEY)
    }

    /// The response field holding the total count.
    ///
    /// Default: `"count"`
    pub fn count_key(&self) -> &str {
        self.count_key.as_deref().unwrap_or(DEFAULT_COUNT_KEY)
    }

    /// The response field holding the next page marker.
    ///
    /// Default: `"next"`
    pub fn next_key(&self) -> &str {
        self.next_key.as_deref().unwrap_or(DEFAULT_NEXT_KEY)
    }

    /// The response field holding the previous page marker.
    ///
    /// Default: `"previous"`
    pub fn previous_key(&self) -> &str {
        self.previous_key.as_deref().unwrap_or(DEFAULT_PREVIOUS_KEY)
    }

    /// The query parameter the page number is sent under.
    ///
    /// Default: `"page"`
    pub fn page_key(&self) -> &str {
        self.page_key.as_deref().unwrap_or(DEFAULT_PAGE_KEY)
    }

    pub(crate) fn validate(&self) -> Result<(), PaginatorError> {
        let named = [
            ("entitiesKey", self.entities_key()),
            ("paginatorsKey", self.paginators_key()),
            ("entityIdKey", self.entity_id_key()),
            ("resultsKey", self.results_key()),
            ("countKey", self.count_key()),
            ("nextKey", self.next_key()),
            ("previousKey", self.previous_key()),
            ("pageKey", self.page_key()),
        ];
        if let Some((name, _)) = named.iter().find(|(_, key)| key.is_empty()) {
            return Err(PaginatorError::InvalidOptions(format!(
                "{name} must not be empty"
            )));
        }
        // Both slices live side by side in the same state tree:
        if self.entities_key() == self.paginators_key() {
            return Err(PaginatorError::InvalidOptions(format!(
                "entitiesKey and paginatorsKey are both [{}]",
                self.entities_key()
            )));
        }
        Ok(())
    }
}

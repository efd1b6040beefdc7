use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Filters, PaginatorError, PaginatorOptions};

/// Type tag of the message dispatched just before a page is requested from the API.
pub const REQUEST_PAGE: &str = "@@page-by-page/REQUEST_PAGE";

/// Type tag of the message dispatched once a page has come back from the API.
pub const RECEIVE_PAGE: &str = "@@page-by-page/RECEIVE_PAGE";

/// Metadata of a [`Message::RequestPage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPageMeta {
    /// The page being requested.
    pub page: u64,
    /// The filters it's being requested with.
    pub filters: Filters,
    /// The entity type of the paginator that created the message.
    pub entity_type: String,
}

/// Metadata of a [`Message::ReceivePage`], mapped out of the raw API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivePageMeta {
    /// The entity type of the paginator that created the message.
    pub entity_type: String,
    /// The total item count reported by the API.
    pub count: u64,
    /// The API's next page marker.
    pub next: Option<Value>,
    /// The API's previous page marker.
    pub previous: Option<Value>,
    /// The page that was received.
    pub page: u64,
    /// The filters it was fetched with.
    #[serde(default)]
    pub filters: Filters,
    /// Always `true` for messages built by [`ActionCreators::receive_page`].
    pub paginated: bool,
}

/// A message flowing through the state container.
///
/// The paginator reducers only act on [`Message::ReceivePage`] for their own entity type,
/// anything else passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A page is about to be requested. Carries no payload.
    RequestPage {
        /// Request details.
        meta: RequestPageMeta,
    },
    /// A page was received.
    ReceivePage {
        /// The page's items, in API order.
        payload: Vec<Value>,
        /// Response details.
        meta: ReceivePageMeta,
    },
    /// A message belonging to some other part of the application.
    Foreign {
        /// Its type tag.
        kind: String,
        /// Its entity type, if it declares one.
        entity_type: Option<String>,
    },
}

impl Message {
    /// The message's type tag.
    pub fn kind(&self) -> &str {
        match self {
            Message::RequestPage { .. } => REQUEST_PAGE,
            Message::ReceivePage { .. } => RECEIVE_PAGE,
            Message::Foreign { kind, .. } => kind.as_str(),
        }
    }

    /// The entity type the message declares, if any.
    pub fn entity_type(&self) -> Option<&str> {
        match self {
            Message::RequestPage { meta } => Some(meta.entity_type.as_str()),
            Message::ReceivePage { meta, .. } => Some(meta.entity_type.as_str()),
            Message::Foreign { entity_type, .. } => entity_type.as_deref(),
        }
    }
}

/// Builds the two paginator messages for one entity type.
#[derive(Debug, Clone, Copy)]
pub struct ActionCreators<'a> {
    entity_type: &'a str,
    options: &'a PaginatorOptions,
}

impl<'a> ActionCreators<'a> {
    pub(crate) fn new(entity_type: &'a str, options: &'a PaginatorOptions) -> Self {
        Self {
            entity_type,
            options,
        }
    }

    /// The message announcing `page` is about to be fetched with `filters`.
    pub fn request_page(&self, page: u64, filters: Filters) -> Message {
        Message::RequestPage {
            meta: RequestPageMeta {
                page,
                filters,
                entity_type: self.entity_type.to_string(),
            },
        }
    }

    /// The message carrying a received page, reading the configured response fields out of `response`.
    ///
    /// The results field must be an array and the count field a non-negative integer.
    /// Missing next/previous fields are treated as null.
    pub fn receive_page(
        &self,
        page: u64,
        filters: Filters,
        mut response: Value,
    ) -> Result<Message, PaginatorError> {
        let results_key = self.options.results_key();
        let payload = match response.get_mut(results_key).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(PaginatorError::MalformedResponse {
                    field: results_key.to_string(),
                    expected: "an array of items",
                });
            }
        };

        let count_key = self.options.count_key();
        let count = response
            .get(count_key)
            .and_then(Value::as_u64)
            .ok_or_else(|| PaginatorError::MalformedResponse {
                field: count_key.to_string(),
                expected: "a non-negative integer",
            })?;

        let mut marker = |key: &str| match response.get_mut(key).map(Value::take) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        };
        let next = marker(self.options.next_key());
        let previous = marker(self.options.previous_key());

        Ok(Message::ReceivePage {
            payload,
            meta: ReceivePageMeta {
                entity_type: self.entity_type.to_string(),
                count,
                next,
                previous,
                page,
                filters,
                paginated: true,
            },
        })
    }
}

use std::{borrow::Cow, collections::BTreeMap};

use serde::{Deserialize, Serialize};

/// A single filter value, as sent to the API and stored alongside the pagination state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Rendered as a bare key, `key`.
    Null,
    /// Rendered as `key=true` / `key=false`.
    Bool(bool),
    /// Rendered with its JSON number formatting.
    Number(serde_json::Number),
    /// Rendered percent-encoded.
    Text(String),
    /// Rendered as repeated keys, `key=a&key=b`.
    List(Vec<FilterValue>),
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize);

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// The active filter key/value pairs of a paginated collection.
///
/// Keys are held in lexicographic order, so two filter sets with the same pairs always produce the same
/// [`Filters::to_query_string`] signature, no matter what order they were built in.
///
/// The same type doubles as the flat query parameter mapping handed to the injected API call, see [`QueryParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, FilterValue>);

/// The flat mapping of filters plus the page field, passed to the injected API call.
pub type QueryParams = Filters;

impl Filters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a pair, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Option<FilterValue> {
        self.0.insert(key.into(), value.into())
    }

    /// The value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    /// Remove `key`, returning its value if it was set.
    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    /// Whether no filters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// A copy of these filters with `overrides` laid over the top, overrides winning on shared keys.
    pub fn merged_with(&self, overrides: &Filters) -> Filters {
        let mut merged = self.clone();
        merged
            .0
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// The canonical query string serialization, used as the filter signature keying [`crate::PageIndex`].
    ///
    /// Pairs come out in key order as `key=value` joined by `&`, with keys and values strictly
    /// percent-encoded. Empty filters serialize to the empty string.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            push_pair(&mut out, key, value);
        }
        out
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<FilterValue>, const N: usize> From<[(K, V); N]> for Filters {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Filters {
    type Item = (String, FilterValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn push_pair(out: &mut String, key: &str, value: &FilterValue) {
    let rendered: Option<Cow<'_, str>> = match value {
        FilterValue::List(values) => {
            for value in values {
                push_pair(out, key, value);
            }
            return;
        }
        FilterValue::Null => None,
        FilterValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        FilterValue::Number(n) => Some(Cow::Owned(n.to_string())),
        FilterValue::Text(s) => Some(Cow::Borrowed(s)),
    };
    if !out.is_empty() {
        out.push('&');
    }
    encode_component(out, key);
    if let Some(rendered) = rendered {
        out.push('=');
        encode_component(out, &rendered);
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_component(out: &mut String, raw: &str) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0F) as usize] as char);
            }
        }
    }
}

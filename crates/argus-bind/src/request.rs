//! Decoded request snapshots.
//!
//! A [`RawRequest`] is what the host hands the binder: path values captured
//! by the router, decoded query parameters, and an already-parsed JSON body.
//! The binder never touches the wire itself.

use argus_path::PathValues;
use indexmap::IndexMap;

/// Decoded query parameters: an insertion-ordered multimap.
///
/// A key may carry several values (`?q=foo&q=bar`). Scalar binding takes the
/// last occurrence; list binding takes all of them in order.
///
/// # Example
///
/// ```rust
/// use argus_bind::QueryValues;
///
/// let mut query = QueryValues::new();
/// query.insert("q", "foo");
/// query.insert("q", "bar");
///
/// assert_eq!(query.get_last("q"), Some("bar"));
/// assert_eq!(query.get_all("q"), ["foo", "bar"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    entries: IndexMap<String, Vec<String>>,
}

impl QueryValues {
    /// Creates an empty query set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under a key, keeping earlier occurrences.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Returns the last value supplied for a key.
    #[must_use]
    pub fn get_last(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Returns every value supplied for a key, in supply order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns true when the key was supplied at least once.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no query parameter was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over keys and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

/// A decoded request, ready for binding.
///
/// # Example
///
/// ```rust
/// use argus_bind::RawRequest;
/// use serde_json::json;
///
/// let raw = RawRequest::builder()
///     .path_value("item_id", "42")
///     .query_value("q", "pencil")
///     .body(json!({"name": "Foo", "price": 35.4}))
///     .build();
///
/// assert_eq!(raw.path().get("item_id"), Some("42"));
/// assert_eq!(raw.query().get_last("q"), Some("pencil"));
/// assert!(raw.body().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    path: PathValues,
    query: QueryValues,
    body: Option<serde_json::Value>,
}

impl RawRequest {
    /// Starts building a request snapshot.
    #[must_use]
    pub fn builder() -> RawRequestBuilder {
        RawRequestBuilder {
            request: Self::default(),
        }
    }

    /// Returns the captured path values.
    #[must_use]
    pub fn path(&self) -> &PathValues {
        &self.path
    }

    /// Returns the decoded query parameters.
    #[must_use]
    pub fn query(&self) -> &QueryValues {
        &self.query
    }

    /// Returns the decoded body, if one was supplied.
    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Builder for [`RawRequest`], mirroring how a host assembles one.
#[derive(Debug, Default)]
pub struct RawRequestBuilder {
    request: RawRequest,
}

impl RawRequestBuilder {
    /// Adds one captured path value.
    #[must_use]
    pub fn path_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.path.insert(name, value);
        self
    }

    /// Replaces the path values wholesale, e.g. with a template capture.
    #[must_use]
    pub fn path_values(mut self, values: PathValues) -> Self {
        self.request.path = values;
        self
    }

    /// Appends one decoded query parameter.
    #[must_use]
    pub fn query_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.insert(key, value);
        self
    }

    /// Sets the decoded body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.request.body = Some(body);
        self
    }

    /// Finishes the snapshot.
    #[must_use]
    pub fn build(self) -> RawRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_values_multimap() {
        let mut query = QueryValues::new();
        query.insert("q", "foo");
        query.insert("q", "bar");
        query.insert("skip", "3");

        assert_eq!(query.len(), 2);
        assert_eq!(query.get_last("q"), Some("bar"));
        assert_eq!(query.get_all("q"), ["foo", "bar"]);
        assert_eq!(query.get_all("missing"), Vec::<String>::new().as_slice());
        assert!(query.contains_key("skip"));
        assert!(!query.contains_key("limit"));
    }

    #[test]
    fn test_query_values_preserve_key_order() {
        let query: QueryValues = [("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();

        let keys: Vec<_> = query.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(query.get_all("b"), ["1", "3"]);
    }

    #[test]
    fn test_raw_request_builder() {
        let raw = RawRequest::builder()
            .path_value("user_id", "1")
            .path_value("item_id", "pencil")
            .query_value("short", "true")
            .body(json!({"name": "Foo"}))
            .build();

        assert_eq!(raw.path().len(), 2);
        assert_eq!(raw.path().get("item_id"), Some("pencil"));
        assert_eq!(raw.query().get_last("short"), Some("true"));
        assert_eq!(raw.body(), Some(&json!({"name": "Foo"})));
    }

    #[test]
    fn test_empty_request() {
        let raw = RawRequest::builder().build();
        assert!(raw.path().is_empty());
        assert!(raw.query().is_empty());
        assert!(raw.body().is_none());
    }
}

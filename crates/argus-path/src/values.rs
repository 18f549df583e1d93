//! Captured path values.
//!
//! [`PathValues`] holds what a [`PathTemplate`](crate::PathTemplate) captured
//! from one concrete request path: one entry per parameter segment, in
//! template order, with a wildcard's remainder stored as a single entry.
//! Capture names are unique by template construction, so the set behaves as
//! a tiny ordered map; a small-vector backing keeps the common 1-4 capture
//! case off the heap.

use smallvec::SmallVec;

/// Captures stored inline before spilling to the heap.
const INLINE_CAPTURES: usize = 4;

/// One captured segment: the template parameter name and the matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Capture {
    name: String,
    value: String,
}

/// Values captured from a request path, in template order.
///
/// # Example
///
/// ```rust
/// use argus_path::PathTemplate;
///
/// let template = PathTemplate::parse("/users/{user_id}/items/{item_id}").unwrap();
/// let values = template.capture("/users/7/items/pencil").unwrap();
///
/// assert_eq!(values.get("user_id"), Some("7"));
/// assert_eq!(values.get_index(1), Some(("item_id", "pencil")));
/// assert_eq!(values.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathValues {
    captures: SmallVec<[Capture; INLINE_CAPTURES]>,
}

impl PathValues {
    /// Creates an empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a captured value, replacing any earlier capture of the same
    /// name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(idx) = self.captures.iter().position(|c| c.name == name) {
            self.captures[idx].value = value;
        } else {
            self.captures.push(Capture { name, value });
        }
    }

    /// Returns the value captured for a segment name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Returns the capture at a template-order position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.captures
            .get(index)
            .map(|c| (c.name.as_str(), c.value.as_str()))
    }

    /// Returns true if no values were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Returns the number of captured values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Returns an iterator over the (name, value) pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.captures
            .iter()
            .map(|c| (c.name.as_str(), c.value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_captures() {
        let values = PathValues::new();
        assert!(values.is_empty());
        assert_eq!(values.len(), 0);
        assert_eq!(values.get_index(0), None);
    }

    #[test]
    fn test_insert_and_get() {
        let mut values = PathValues::new();
        values.insert("user_id", "7");
        values.insert("item_id", "pencil");

        assert_eq!(values.get("user_id"), Some("7"));
        assert_eq!(values.get("item_id"), Some("pencil"));
        assert_eq!(values.get("unknown"), None);
    }

    #[test]
    fn test_insert_replaces_existing_name() {
        let mut values = PathValues::new();
        values.insert("id", "1");
        values.insert("id", "2");

        assert_eq!(values.len(), 1);
        assert_eq!(values.get("id"), Some("2"));
    }

    #[test]
    fn test_positional_access_in_capture_order() {
        let values: PathValues = [("a", "1"), ("b", "2")].into_iter().collect();

        assert_eq!(values.get_index(0), Some(("a", "1")));
        assert_eq!(values.get_index(1), Some(("b", "2")));
        assert_eq!(values.get_index(2), None);
    }

    #[test]
    fn test_iter_preserves_capture_order() {
        let values: PathValues = [("a", "1"), ("b", "2")].into_iter().collect();

        let pairs: Vec<_> = values.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let mut values = PathValues::new();
        for i in 0..10 {
            values.insert(format!("key{i}"), format!("value{i}"));
        }

        assert_eq!(values.len(), 10);
        assert_eq!(values.get("key5"), Some("value5"));
        assert_eq!(values.get_index(9), Some(("key9", "value9")));
    }
}

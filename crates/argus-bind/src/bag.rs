//! The validated parameter bag.

use argus_core::{ParamValue, StringEnum};
use indexmap::IndexMap;
use serde::Serialize;

/// The typed result of binding a request against its parameter specs.
///
/// Maps each spec's internal name to its bound [`ParamValue`], in spec
/// order. A bag only exists when every required parameter resolved and
/// every present value passed its constraints; handlers can therefore read
/// values without re-checking them. Serializes as a plain JSON object.
///
/// Typed accessors return `None` both for absent names and for values of
/// another type; [`get`](ParameterBag::get) distinguishes the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterBag {
    values: IndexMap<String, ParamValue>,
}

impl ParameterBag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    /// Returns the bound value for a parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Returns the bound string for a parameter name.
    #[must_use]
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Returns the bound integer for a parameter name.
    #[must_use]
    pub fn int_value(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    /// Returns the bound float for a parameter name; integers widen.
    #[must_use]
    pub fn float_value(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_float)
    }

    /// Returns the bound boolean for a parameter name.
    #[must_use]
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParamValue::as_bool)
    }

    /// Returns the bound list for a parameter name.
    #[must_use]
    pub fn list(&self, name: &str) -> Option<&[ParamValue]> {
        self.get(name).and_then(ParamValue::as_list)
    }

    /// Returns the bound object fields for a parameter name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&IndexMap<String, ParamValue>> {
        self.get(name).and_then(ParamValue::as_object)
    }

    /// Returns the typed variant for an enum-valued parameter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argus_bind::bind;
    /// use argus_bind::RawRequest;
    /// use argus_core::fixtures::ModelName;
    /// use argus_core::{EnumSpec, ParamSource, ParameterSpec};
    ///
    /// let spec = ParameterSpec::builder("model_name", ParamSource::Path)
    ///     .enumeration(EnumSpec::of::<ModelName>().unwrap())
    ///     .build()
    ///     .unwrap();
    /// let raw = RawRequest::builder().path_value("model_name", "lenet").build();
    ///
    /// let bag = bind(std::slice::from_ref(&spec), &raw).unwrap();
    /// assert_eq!(bag.enum_value::<ModelName>("model_name"), Some(ModelName::Lenet));
    /// ```
    #[must_use]
    pub fn enum_value<T: StringEnum>(&self, name: &str) -> Option<T> {
        self.str_value(name).and_then(T::from_variant)
    }

    /// Returns true when the parameter bound to the explicit `Null` value.
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.get(name), Some(ParamValue::Null))
    }

    /// Returns true when the bag holds a value for the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over names and values in spec order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<'a> IntoIterator for &'a ParameterBag {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bag() -> ParameterBag {
        let mut bag = ParameterBag::new();
        bag.insert("item_id", ParamValue::String("pencil".to_string()));
        bag.insert("skip", ParamValue::Int(0));
        bag.insert("short", ParamValue::Bool(false));
        bag.insert("limit", ParamValue::Null);
        bag
    }

    #[test]
    fn test_typed_accessors() {
        let bag = sample_bag();

        assert_eq!(bag.str_value("item_id"), Some("pencil"));
        assert_eq!(bag.int_value("skip"), Some(0));
        assert_eq!(bag.float_value("skip"), Some(0.0));
        assert_eq!(bag.bool_value("short"), Some(false));
        assert!(bag.is_null("limit"));

        // wrong type and absent name both come back empty
        assert_eq!(bag.int_value("item_id"), None);
        assert_eq!(bag.str_value("missing"), None);
        assert!(!bag.is_null("missing"));
    }

    #[test]
    fn test_iteration_preserves_spec_order() {
        let bag = sample_bag();
        let names: Vec<_> = bag.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["item_id", "skip", "short", "limit"]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let bag = sample_bag();
        let json = serde_json::to_value(&bag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "item_id": "pencil",
                "skip": 0,
                "short": false,
                "limit": null,
            })
        );
    }
}

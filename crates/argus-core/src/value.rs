//! Bound parameter values.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A bound, validated parameter value.
///
/// This is the value vocabulary of the binder: every parameter in a
/// [`ParameterBag`](https://docs.rs/argus-bind) holds one of these.
/// `Null` renders an optional parameter that was declared with a `None`
/// default and never supplied.
///
/// Serializes untagged, so a bag round-trips into the JSON shape a handler
/// would naturally echo back (`Int(3)` -> `3`, `Null` -> `null`).
///
/// # Example
///
/// ```rust
/// use argus_core::ParamValue;
///
/// let value = ParamValue::Int(10);
/// assert_eq!(value.as_int(), Some(10));
/// assert_eq!(value.as_str(), None);
/// assert_eq!(value.type_name(), "integer");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A UTF-8 string.
    String(String),
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// An ordered list of values.
    List(Vec<ParamValue>),
    /// An ordered mapping of field name to value.
    Object(IndexMap<String, ParamValue>),
    /// An explicit absent-with-default-`None` value.
    Null,
}

impl ParamValue {
    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, if this is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float content; integers widen losslessly within range.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, ParamValue>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns true for the `Null` value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a human-readable name for this value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::Null => "null",
        }
    }

    /// Converts this value into a `serde_json::Value`.
    ///
    /// Floats that JSON cannot represent (NaN, infinities) become `null`,
    /// matching `serde_json`'s own behavior.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Float(n) => serde_json::Value::from(*n),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(_) | Self::Object(_) => write!(f, "{}", self.to_json()),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        assert_eq!(ParamValue::from("abc").as_str(), Some("abc"));
        assert_eq!(ParamValue::Int(7).as_int(), Some(7));
        assert_eq!(ParamValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(ParamValue::Bool(true).as_bool(), Some(true));
        assert!(ParamValue::Null.is_null());

        assert_eq!(ParamValue::Int(7).as_str(), None);
        assert_eq!(ParamValue::from("abc").as_int(), None);
    }

    #[test]
    fn test_as_float_widens_ints() {
        assert_eq!(ParamValue::Int(3).as_float(), Some(3.0));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ParamValue::from("x").type_name(), "string");
        assert_eq!(ParamValue::Int(0).type_name(), "integer");
        assert_eq!(ParamValue::Float(0.0).type_name(), "float");
        assert_eq!(ParamValue::Bool(false).type_name(), "boolean");
        assert_eq!(ParamValue::List(vec![]).type_name(), "list");
        assert_eq!(ParamValue::Object(IndexMap::new()).type_name(), "object");
        assert_eq!(ParamValue::Null.type_name(), "null");
    }

    #[test]
    fn test_to_json() {
        let mut fields = IndexMap::new();
        fields.insert("name".to_string(), ParamValue::from("Foo"));
        fields.insert("price".to_string(), ParamValue::Float(35.4));
        fields.insert("tax".to_string(), ParamValue::Null);
        let value = ParamValue::Object(fields);

        assert_eq!(
            value.to_json(),
            json!({"name": "Foo", "price": 35.4, "tax": null})
        );
    }

    #[test]
    fn test_serializes_untagged() {
        let value = ParamValue::List(vec![ParamValue::from("foo"), ParamValue::from("bar")]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"["foo","bar"]"#);

        let json = serde_json::to_string(&ParamValue::Null).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::from("abc").to_string(), "abc");
        assert_eq!(ParamValue::Int(10).to_string(), "10");
        assert_eq!(ParamValue::Null.to_string(), "null");
        assert_eq!(
            ParamValue::List(vec![ParamValue::Int(1), ParamValue::Int(2)]).to_string(),
            "[1,2]"
        );
    }
}

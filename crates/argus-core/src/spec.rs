//! Declarative parameter specifications.
//!
//! A [`ParameterSpec`] describes one bindable request parameter: where it
//! comes from, what type it converts to, its constraints, and its doc
//! metadata. Specs are built once at startup through
//! [`ParameterSpec::builder`], which rejects inconsistent definitions with a
//! [`SpecError`] before any traffic is served.

use crate::error::SpecError;
use crate::value::ParamValue;
use crate::variants::EnumSpec;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamSource {
    /// A captured path segment.
    Path,
    /// A query-string key.
    Query,
    /// The decoded request body.
    Body,
}

impl ParamSource {
    /// Returns the lowercase source name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The element type of a list parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElemType {
    /// UTF-8 string elements.
    String,
    /// Signed 64-bit integer elements.
    Int,
    /// 64-bit float elements.
    Float,
    /// Boolean elements.
    Bool,
}

impl ElemType {
    /// Returns the human-readable type name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "boolean",
        }
    }
}

/// The declared type a parameter converts to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "spec", rename_all = "snake_case")]
pub enum ParamType {
    /// A UTF-8 string.
    String,
    /// A signed 64-bit integer.
    Int,
    /// A 64-bit float.
    Float,
    /// A boolean.
    Bool,
    /// One variant out of a closed string vocabulary.
    Enum(EnumSpec),
    /// A list of primitive elements.
    List(ElemType),
    /// A structured object with its own field specs.
    Object(ObjectSpec),
}

impl ParamType {
    /// Returns the human-readable type name used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "boolean",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Renders what a default value for this type must look like.
    fn expected_default(&self) -> String {
        match self {
            Self::Enum(spec) => format!("{} variant", spec.name()),
            Self::List(elem) => format!("list of {}", elem.name()),
            other => other.name().to_string(),
        }
    }
}

/// A compiled full-string pattern constraint.
///
/// The declared pattern is wrapped in `^(?:...)$` at compile time, so a match
/// always covers the entire value. [`as_str`](Pattern::as_str) and the serde
/// representation keep the declared source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    fn compile(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self { source, regex })
    }

    /// Returns the declared pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true when the whole of `value` matches the pattern.
    #[must_use]
    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

/// Declared value constraints for one parameter.
///
/// Length bounds count string characters or list elements; numeric bounds
/// apply to integer and float values; the pattern must match the full
/// string. Unset constraints are skipped during both validation and
/// serialization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum: Option<f64>,
}

impl Constraints {
    /// Returns the minimum length bound, if declared.
    #[must_use]
    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    /// Returns the maximum length bound, if declared.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Returns the compiled full-string pattern, if declared.
    #[must_use]
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Returns the numeric lower bound, if declared.
    #[must_use]
    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    /// Returns the numeric upper bound, if declared.
    #[must_use]
    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    /// Returns true when no constraint is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
    }
}

/// The field layout of a structured body parameter.
///
/// Fields are themselves [`ParameterSpec`]s with the [`ParamSource::Body`]
/// source; nested objects recurse through the same shape. Construction
/// rejects duplicate field names and wire-key collisions.
///
/// # Example
///
/// ```rust
/// use argus_core::{ObjectSpec, ParamSource, ParamValue, ParameterSpec};
///
/// let item = ObjectSpec::new(
///     "Item",
///     vec![
///         ParameterSpec::builder("name", ParamSource::Body).build().unwrap(),
///         ParameterSpec::builder("price", ParamSource::Body)
///             .float()
///             .build()
///             .unwrap(),
///         ParameterSpec::builder("tax", ParamSource::Body)
///             .float()
///             .default_value(ParamValue::Null)
///             .build()
///             .unwrap(),
///     ],
/// )
/// .unwrap();
/// assert_eq!(item.fields().len(), 3);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSpec {
    name: String,
    fields: Vec<ParameterSpec>,
}

impl ObjectSpec {
    /// Creates an object layout from a model name and its field specs.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] when a field does not read from the body,
    /// when two fields share an internal name, or when two fields resolve
    /// the same wire key.
    pub fn new(name: impl Into<String>, fields: Vec<ParameterSpec>) -> Result<Self, SpecError> {
        let name = name.into();

        for (idx, field) in fields.iter().enumerate() {
            if field.source() != ParamSource::Body {
                return Err(SpecError::invalid_parameter(
                    format!("{name}.{}", field.name()),
                    "object fields bind from the body",
                ));
            }
            if fields[..idx].iter().any(|f| f.name() == field.name()) {
                return Err(SpecError::invalid_parameter(
                    format!("{name}.{}", field.name()),
                    "duplicate field name",
                ));
            }
            if fields[..idx].iter().any(|f| f.wire_name() == field.wire_name()) {
                return Err(SpecError::invalid_parameter(
                    format!("{name}.{}", field.name()),
                    format!("wire key '{}' is claimed twice", field.wire_name()),
                ));
            }
        }

        Ok(Self { name, fields })
    }

    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field specs in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[ParameterSpec] {
        &self.fields
    }
}

/// A declarative description of one bindable request parameter.
///
/// Built through [`ParameterSpec::builder`]; the build step compiles the
/// pattern and rejects definitions the binder could not honor. A spec with
/// no default is required. Serializes flat (type tag, constraints and doc
/// metadata at the top level) for external documentation tooling.
///
/// # Example
///
/// ```rust
/// use argus_core::{ParamSource, ParameterSpec};
///
/// let q = ParameterSpec::builder("q", ParamSource::Query)
///     .min_length(3)
///     .max_length(50)
///     .pattern("^fixedquery$")
///     .alias("item-query")
///     .build()
///     .unwrap();
/// assert_eq!(q.wire_name(), "item-query");
/// assert!(q.required());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    name: String,
    source: ParamSource,
    #[serde(flatten)]
    ty: ParamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<ParamValue>,
    #[serde(flatten)]
    constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    in_schema: bool,
    deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    greedy: bool,
}

impl ParameterSpec {
    /// Starts building a parameter spec. The type defaults to string.
    #[must_use]
    pub fn builder(name: impl Into<String>, source: ParamSource) -> ParameterSpecBuilder {
        ParameterSpecBuilder {
            name: name.into(),
            source,
            ty: ParamType::String,
            default: None,
            min_length: None,
            max_length: None,
            pattern: None,
            minimum: None,
            maximum: None,
            alias: None,
            in_schema: true,
            deprecated: false,
            title: None,
            description: None,
            greedy: false,
        }
    }

    /// Returns the internal binding name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source this parameter reads from.
    #[must_use]
    pub fn source(&self) -> ParamSource {
        self.source
    }

    /// Returns the declared type.
    #[must_use]
    pub fn param_type(&self) -> &ParamType {
        &self.ty
    }

    /// Returns the declared default, if any.
    #[must_use]
    pub fn default(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }

    /// Returns the declared constraints.
    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Returns the external wire name override, if declared.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the key this parameter is looked up by: the alias when
    /// declared, the internal name otherwise.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns true when a caller must supply this parameter.
    ///
    /// A spec with a default is optional; list parameters are never
    /// required, since an absent list binds as empty.
    #[must_use]
    pub fn required(&self) -> bool {
        self.default.is_none() && !matches!(self.ty, ParamType::List(_))
    }

    /// Returns false when documentation tooling should omit this parameter.
    #[must_use]
    pub fn in_schema(&self) -> bool {
        self.in_schema
    }

    /// Returns true when this parameter is marked deprecated.
    #[must_use]
    pub fn deprecated(&self) -> bool {
        self.deprecated
    }

    /// Returns the doc title, if declared.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the doc description, if declared.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns true when this spec captures the remainder of the path.
    #[must_use]
    pub fn greedy(&self) -> bool {
        self.greedy
    }
}

/// Builder for [`ParameterSpec`].
///
/// Created by [`ParameterSpec::builder`]; finished by
/// [`build`](ParameterSpecBuilder::build), which validates the definition.
#[derive(Debug)]
pub struct ParameterSpecBuilder {
    name: String,
    source: ParamSource,
    ty: ParamType,
    default: Option<ParamValue>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    alias: Option<String>,
    in_schema: bool,
    deprecated: bool,
    title: Option<String>,
    description: Option<String>,
    greedy: bool,
}

impl ParameterSpecBuilder {
    /// Declares the string type (the default).
    #[must_use]
    pub fn string(mut self) -> Self {
        self.ty = ParamType::String;
        self
    }

    /// Declares the integer type.
    #[must_use]
    pub fn int(mut self) -> Self {
        self.ty = ParamType::Int;
        self
    }

    /// Declares the float type.
    #[must_use]
    pub fn float(mut self) -> Self {
        self.ty = ParamType::Float;
        self
    }

    /// Declares the boolean type.
    #[must_use]
    pub fn boolean(mut self) -> Self {
        self.ty = ParamType::Bool;
        self
    }

    /// Declares a closed string-enum type.
    #[must_use]
    pub fn enumeration(mut self, spec: EnumSpec) -> Self {
        self.ty = ParamType::Enum(spec);
        self
    }

    /// Declares a list type with the given element type.
    #[must_use]
    pub fn list(mut self, elem: ElemType) -> Self {
        self.ty = ParamType::List(elem);
        self
    }

    /// Declares a structured object type.
    #[must_use]
    pub fn object(mut self, spec: ObjectSpec) -> Self {
        self.ty = ParamType::Object(spec);
        self
    }

    /// Declares a default value, making the parameter optional.
    ///
    /// Use [`ParamValue::Null`] for "optional with no value".
    #[must_use]
    pub fn default_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Declares a minimum length (string characters or list elements).
    #[must_use]
    pub fn min_length(mut self, bound: usize) -> Self {
        self.min_length = Some(bound);
        self
    }

    /// Declares a maximum length (string characters or list elements).
    #[must_use]
    pub fn max_length(mut self, bound: usize) -> Self {
        self.max_length = Some(bound);
        self
    }

    /// Declares a full-string pattern constraint.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Declares a numeric lower bound (inclusive).
    #[must_use]
    pub fn minimum(mut self, bound: f64) -> Self {
        self.minimum = Some(bound);
        self
    }

    /// Declares a numeric upper bound (inclusive).
    #[must_use]
    pub fn maximum(mut self, bound: f64) -> Self {
        self.maximum = Some(bound);
        self
    }

    /// Declares an external wire name distinct from the internal name.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Marks this parameter as capturing the remainder of the path.
    #[must_use]
    pub fn greedy(mut self) -> Self {
        self.greedy = true;
        self
    }

    /// Marks this parameter deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Hides this parameter from documentation tooling.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.in_schema = false;
        self
    }

    /// Declares a doc title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Declares a doc description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the definition and builds the spec.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] when the definition is inconsistent: greedy
    /// specs outside the path or carrying types, constraints, defaults or
    /// aliases; lists on the path; objects outside the body; constraints
    /// that do not apply to the declared type; inverted bounds; a pattern
    /// that does not compile; or a default that does not match the type.
    pub fn build(self) -> Result<ParameterSpec, SpecError> {
        let name = self.name;

        if self.greedy {
            if self.source != ParamSource::Path {
                return Err(SpecError::invalid_parameter(
                    name,
                    "greedy parameters bind from the path",
                ));
            }
            if !matches!(self.ty, ParamType::String) {
                return Err(SpecError::invalid_parameter(
                    name,
                    "greedy parameters are plain strings",
                ));
            }
            let constrained = self.min_length.is_some()
                || self.max_length.is_some()
                || self.pattern.is_some()
                || self.minimum.is_some()
                || self.maximum.is_some();
            if constrained {
                return Err(SpecError::invalid_parameter(
                    name,
                    "greedy parameters accept no constraints",
                ));
            }
            if self.default.is_some() {
                return Err(SpecError::invalid_parameter(
                    name,
                    "greedy parameters accept no default",
                ));
            }
            if self.alias.is_some() {
                return Err(SpecError::invalid_parameter(
                    name,
                    "greedy parameters accept no alias",
                ));
            }
        }

        if matches!(self.ty, ParamType::List(_)) && self.source == ParamSource::Path {
            return Err(SpecError::invalid_parameter(
                name,
                "list parameters cannot bind from the path",
            ));
        }
        if matches!(self.ty, ParamType::Object(_)) && self.source != ParamSource::Body {
            return Err(SpecError::invalid_parameter(
                name,
                "object parameters bind from the body",
            ));
        }

        let length_capable = matches!(self.ty, ParamType::String | ParamType::List(_));
        if (self.min_length.is_some() || self.max_length.is_some()) && !length_capable {
            return Err(SpecError::invalid_parameter(
                name,
                format!("length bounds do not apply to {} parameters", self.ty.name()),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SpecError::invalid_bounds(
                    name,
                    format!("min_length {min} > max_length {max}"),
                ));
            }
        }

        let pattern_capable = matches!(
            self.ty,
            ParamType::String | ParamType::List(ElemType::String)
        );
        if self.pattern.is_some() && !pattern_capable {
            return Err(SpecError::invalid_parameter(
                name,
                format!("patterns do not apply to {} parameters", self.ty.name()),
            ));
        }

        let numeric = matches!(
            self.ty,
            ParamType::Int
                | ParamType::Float
                | ParamType::List(ElemType::Int | ElemType::Float)
        );
        if (self.minimum.is_some() || self.maximum.is_some()) && !numeric {
            return Err(SpecError::invalid_parameter(
                name,
                format!(
                    "numeric bounds do not apply to {} parameters",
                    self.ty.name()
                ),
            ));
        }
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min > max {
                return Err(SpecError::invalid_bounds(
                    name,
                    format!("minimum {min} > maximum {max}"),
                ));
            }
        }

        if let Some(default) = &self.default {
            if matches!(self.ty, ParamType::Object(_)) && !default.is_null() {
                return Err(SpecError::invalid_parameter(
                    name,
                    "object parameters only accept a null default",
                ));
            }
            if !default.is_null() && !default_matches(&self.ty, default) {
                return Err(SpecError::InvalidDefault {
                    name,
                    expected: self.ty.expected_default(),
                });
            }
        }

        let pattern = match self.pattern {
            Some(source) => match Pattern::compile(source) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    return Err(SpecError::InvalidPattern {
                        name,
                        source: Box::new(err),
                    })
                }
            },
            None => None,
        };

        Ok(ParameterSpec {
            name,
            source: self.source,
            ty: self.ty,
            default: self.default,
            constraints: Constraints {
                min_length: self.min_length,
                max_length: self.max_length,
                pattern,
                minimum: self.minimum,
                maximum: self.maximum,
            },
            alias: self.alias,
            in_schema: self.in_schema,
            deprecated: self.deprecated,
            title: self.title,
            description: self.description,
            greedy: self.greedy,
        })
    }
}

fn default_matches(ty: &ParamType, value: &ParamValue) -> bool {
    match ty {
        ParamType::String => matches!(value, ParamValue::String(_)),
        ParamType::Int => matches!(value, ParamValue::Int(_)),
        // integer defaults widen into float parameters
        ParamType::Float => matches!(value, ParamValue::Float(_) | ParamValue::Int(_)),
        ParamType::Bool => matches!(value, ParamValue::Bool(_)),
        ParamType::Enum(spec) => value.as_str().is_some_and(|s| spec.contains(s)),
        ParamType::List(elem) => value
            .as_list()
            .is_some_and(|items| items.iter().all(|item| elem_matches(*elem, item))),
        ParamType::Object(_) => false,
    }
}

fn elem_matches(elem: ElemType, value: &ParamValue) -> bool {
    match elem {
        ElemType::String => matches!(value, ParamValue::String(_)),
        ElemType::Int => matches!(value, ParamValue::Int(_)),
        ElemType::Float => matches!(value, ParamValue::Float(_) | ParamValue::Int(_)),
        ElemType::Bool => matches!(value, ParamValue::Bool(_)),
    }
}

//! Path template parsing and capture.

use crate::values::PathValues;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Errors raised while parsing a path template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{}` segment with no parameter name.
    #[error("empty parameter name in segment '{segment}'")]
    EmptyParamName {
        /// The offending segment text.
        segment: String,
    },

    /// A `*` segment with no wildcard name.
    #[error("empty wildcard name in segment '{segment}'")]
    EmptyWildcardName {
        /// The offending segment text.
        segment: String,
    },

    /// A `{` without a matching `}` (or the reverse).
    #[error("unbalanced braces in segment '{segment}'")]
    UnbalancedBraces {
        /// The offending segment text.
        segment: String,
    },

    /// A wildcard segment that is not the final segment.
    #[error("wildcard segment '*{name}' must be the last segment")]
    WildcardNotLast {
        /// The wildcard name.
        name: String,
    },

    /// Two segments capturing under the same name.
    #[error("duplicate segment name '{name}'")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

/// One parsed segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal path segment (e.g. "users", "items").
    Literal(String),
    /// Named parameter capturing exactly one segment (e.g. "{item_id}").
    Param(String),
    /// Named wildcard capturing the remainder of the path (e.g. "*file_path").
    Wildcard(String),
}

/// A parsed path pattern that can capture values from one concrete path.
///
/// Templates use `{name}` for single-segment parameters and a trailing
/// `*name` for a wildcard that captures the remainder of the path,
/// separators included. Matching compares literal segments exactly and is
/// insensitive to leading/trailing slashes.
///
/// # Example
///
/// ```rust
/// use argus_path::PathTemplate;
///
/// let template = PathTemplate::parse("/models/{model_name}").unwrap();
/// assert_eq!(template.pattern(), "/models/{model_name}");
/// assert_eq!(template.param_names(), vec!["model_name"]);
///
/// let values = template.capture("/models/alexnet").unwrap();
/// assert_eq!(values.get("model_name"), Some("alexnet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a path pattern into a template.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the pattern is malformed: empty
    /// parameter or wildcard names, unbalanced braces, a wildcard that is
    /// not in tail position, or duplicate capture names.
    pub fn parse(pattern: impl Into<String>) -> Result<Self, TemplateError> {
        let pattern = pattern.into();
        let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();

        let mut segments = Vec::with_capacity(raw.len());
        let mut names: Vec<String> = Vec::new();

        for (idx, segment) in raw.iter().enumerate() {
            let parsed = if let Some(name) = segment.strip_prefix('{') {
                let Some(name) = name.strip_suffix('}') else {
                    return Err(TemplateError::UnbalancedBraces {
                        segment: (*segment).to_string(),
                    });
                };
                if name.is_empty() {
                    return Err(TemplateError::EmptyParamName {
                        segment: (*segment).to_string(),
                    });
                }
                Segment::Param(name.to_string())
            } else if let Some(name) = segment.strip_prefix('*') {
                if name.is_empty() {
                    return Err(TemplateError::EmptyWildcardName {
                        segment: (*segment).to_string(),
                    });
                }
                if idx + 1 != raw.len() {
                    return Err(TemplateError::WildcardNotLast {
                        name: name.to_string(),
                    });
                }
                Segment::Wildcard(name.to_string())
            } else if segment.contains('{') || segment.contains('}') {
                return Err(TemplateError::UnbalancedBraces {
                    segment: (*segment).to_string(),
                });
            } else {
                Segment::Literal((*segment).to_string())
            };

            if let Segment::Param(name) | Segment::Wildcard(name) = &parsed {
                if names.iter().any(|n| n == name) {
                    return Err(TemplateError::DuplicateName { name: name.clone() });
                }
                names.push(name.clone());
            }

            segments.push(parsed);
        }

        Ok(Self { pattern, segments })
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the capture names in template order, wildcard included.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) | Segment::Wildcard(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Returns the wildcard name if the template ends in one.
    #[must_use]
    pub fn wildcard_name(&self) -> Option<&str> {
        self.segments.iter().find_map(|s| match s {
            Segment::Wildcard(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Returns true if the template ends in a wildcard segment.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.wildcard_name().is_some()
    }

    /// Returns true if `name` is captured by a single-segment parameter.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Param(n) if n == name))
    }

    /// Attempts to capture values from a concrete request path.
    ///
    /// Literal segments must match exactly; parameter segments capture one
    /// path segment each; a wildcard captures everything that remains,
    /// separators included. Returns `None` if the path does not match.
    ///
    /// A wildcard needs at least one remaining segment, so `/files/*path`
    /// does not match `/files`.
    #[must_use]
    pub fn capture(&self, path: &str) -> Option<PathValues> {
        let request: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut values = PathValues::new();

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(lit) => {
                    if request.get(idx).copied() != Some(lit.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let actual = request.get(idx)?;
                    values.insert(name.clone(), *actual);
                }
                Segment::Wildcard(name) => {
                    if idx >= request.len() {
                        return None;
                    }
                    values.insert(name.clone(), request[idx..].join("/"));
                    return Some(values);
                }
            }
        }

        if request.len() != self.segments.len() {
            return None;
        }

        Some(values)
    }

    /// Returns true if two templates match the same set of concrete paths.
    ///
    /// Literal segments compare exactly; parameter segments compare by
    /// position with names ignored, so `/users/{a}` and `/users/{b}` share
    /// a shape. Used to detect duplicate route registrations.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| match (a, b) {
                    (Segment::Literal(x), Segment::Literal(y)) => x == y,
                    (Segment::Param(_), Segment::Param(_))
                    | (Segment::Wildcard(_), Segment::Wildcard(_)) => true,
                    _ => false,
                })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl Serialize for PathTemplate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.pattern)
    }
}

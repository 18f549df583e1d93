//! Error types for the Argus binding layer.
//!
//! Two families live here, and the distinction is load-bearing:
//!
//! - [`SpecError`] - a mistake in the parameter or endpoint *definitions*.
//!   These are configuration errors, raised once while specs are built and
//!   registered; a host should treat them as fatal and abort startup.
//! - [`BindError`] / [`BindFailure`] - a malformed *request*. These are
//!   per-request values returned to the caller, never panics, and carry
//!   enough structure (kind + parameter + message) for a host to render a
//!   422-style response body.

use crate::spec::ParamSource;
use argus_path::TemplateError;
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while building parameter specs, endpoint specs, or
/// registering endpoints into a catalog.
#[derive(Error, Debug)]
pub enum SpecError {
    /// Path template failed to parse.
    #[error("invalid path template '{template}': {source}")]
    InvalidTemplate {
        /// The offending pattern.
        template: String,
        /// The parse failure.
        #[source]
        source: TemplateError,
    },

    /// Two parameters on one endpoint share an internal name.
    #[error("duplicate parameter name '{name}' on endpoint '{endpoint}'")]
    DuplicateParameter {
        /// The endpoint operation id.
        endpoint: String,
        /// The repeated internal name.
        name: String,
    },

    /// Two parameters on one endpoint resolve the same wire key from the
    /// same source.
    #[error("alias collision on endpoint '{endpoint}': {source_kind} key '{wire_name}' is claimed twice")]
    AliasCollision {
        /// The endpoint operation id.
        endpoint: String,
        /// The source both parameters read from.
        source_kind: ParamSource,
        /// The contested wire key.
        wire_name: String,
    },

    /// A template segment has no matching path parameter spec.
    #[error("endpoint '{endpoint}' declares no parameter for template segment '{segment}'")]
    UnboundSegment {
        /// The endpoint operation id.
        endpoint: String,
        /// The unmatched segment name.
        segment: String,
    },

    /// A path parameter spec has no matching template segment.
    #[error("path parameter '{name}' on endpoint '{endpoint}' matches no template segment")]
    UnknownPathParameter {
        /// The endpoint operation id.
        endpoint: String,
        /// The wire key the spec resolves (alias or name).
        name: String,
    },

    /// More than one body parameter on a single endpoint.
    #[error("endpoint '{endpoint}' declares more than one body parameter")]
    MultipleBodyParameters {
        /// The endpoint operation id.
        endpoint: String,
    },

    /// A parameter definition is internally inconsistent.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter internal name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A default value does not match the declared type.
    #[error("default value for parameter '{name}' is not a valid {expected}")]
    InvalidDefault {
        /// The parameter internal name.
        name: String,
        /// The declared type name.
        expected: String,
    },

    /// A pattern constraint failed to compile.
    #[error("invalid pattern on parameter '{name}': {source}")]
    InvalidPattern {
        /// The parameter internal name.
        name: String,
        /// The regex compile failure.
        #[source]
        source: Box<regex::Error>,
    },

    /// Inverted length or numeric bounds.
    #[error("invalid bounds on parameter '{name}': {reason}")]
    InvalidBounds {
        /// The parameter internal name.
        name: String,
        /// Which bound pair is inverted.
        reason: String,
    },

    /// An enum variant set is empty.
    #[error("enum '{name}' declares no variants")]
    EmptyEnum {
        /// The enum name.
        name: String,
    },

    /// An enum variant set repeats a variant.
    #[error("enum '{name}' declares variant '{variant}' more than once")]
    DuplicateVariant {
        /// The enum name.
        name: String,
        /// The repeated variant.
        variant: String,
    },

    /// A second endpoint was registered for an already-claimed method and
    /// path shape.
    #[error("duplicate route: {method} {path} is already registered as '{existing}'")]
    DuplicateRoute {
        /// The HTTP method.
        method: Method,
        /// The newly offered template pattern.
        path: String,
        /// The operation id holding the route.
        existing: String,
    },
}

impl SpecError {
    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-bounds error.
    pub fn invalid_bounds(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBounds {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// The closed set of per-request validation failure kinds.
///
/// Serialized in `snake_case` so hosts can echo the kind straight into an
/// error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindErrorKind {
    /// A required parameter was absent.
    MissingRequired,
    /// The value could not be converted to the declared type, or a number
    /// fell outside its declared bounds.
    TypeMismatch,
    /// A string or list violated its length bounds.
    LengthViolation,
    /// A string did not match its full-string pattern.
    PatternViolation,
    /// A value was not a member of its enum variant set.
    EnumViolation,
}

impl BindErrorKind {
    /// Returns the machine-readable error code for envelopes.
    #[must_use]
    pub const fn error_code(self) -> &'static str {
        match self {
            Self::MissingRequired => "MISSING_REQUIRED",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::LengthViolation => "LENGTH_VIOLATION",
            Self::PatternViolation => "PATTERN_VIOLATION",
            Self::EnumViolation => "ENUM_VIOLATION",
        }
    }
}

/// A single per-request validation failure.
///
/// Carries the failure kind, the source the parameter was read from, the
/// parameter name (dotted for nested body fields, e.g. `item.price`), and
/// a human-readable message.
///
/// # Example
///
/// ```rust
/// use argus_core::{BindError, BindErrorKind, ParamSource};
/// use http::StatusCode;
///
/// let err = BindError::missing_required(ParamSource::Query, "needy");
/// assert_eq!(err.kind(), BindErrorKind::MissingRequired);
/// assert_eq!(err.param(), "needy");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert!(err.to_string().contains("needy"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindError {
    kind: BindErrorKind,
    source: ParamSource,
    param: String,
    message: String,
}

impl BindError {
    /// Creates an error for an absent required parameter.
    #[must_use]
    pub fn missing_required(source: ParamSource, param: impl Into<String>) -> Self {
        let param = param.into();
        Self {
            kind: BindErrorKind::MissingRequired,
            source,
            message: format!("missing required {source} parameter: {param}"),
            param,
        }
    }

    /// Creates an error for a value that failed type conversion or fell
    /// outside its numeric bounds.
    #[must_use]
    pub fn type_mismatch(
        source: ParamSource,
        param: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let param = param.into();
        let details = details.into();
        Self {
            kind: BindErrorKind::TypeMismatch,
            source,
            message: format!("invalid {source} parameter '{param}': {details}"),
            param,
        }
    }

    /// Creates an error for a length-bound violation.
    #[must_use]
    pub fn length_violation(
        source: ParamSource,
        param: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let param = param.into();
        let details = details.into();
        Self {
            kind: BindErrorKind::LengthViolation,
            source,
            message: format!("validation failed for {source} parameter '{param}': {details}"),
            param,
        }
    }

    /// Creates an error for a pattern violation.
    #[must_use]
    pub fn pattern_violation(
        source: ParamSource,
        param: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let param = param.into();
        let details = details.into();
        Self {
            kind: BindErrorKind::PatternViolation,
            source,
            message: format!("validation failed for {source} parameter '{param}': {details}"),
            param,
        }
    }

    /// Creates an error for a value outside an enum variant set.
    #[must_use]
    pub fn enum_violation(
        source: ParamSource,
        param: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let param = param.into();
        let details = details.into();
        Self {
            kind: BindErrorKind::EnumViolation,
            source,
            message: format!("invalid {source} parameter '{param}': {details}"),
            param,
        }
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> BindErrorKind {
        self.kind
    }

    /// Returns the source the parameter was read from.
    #[must_use]
    pub fn param_source(&self) -> ParamSource {
        self.source
    }

    /// Returns the offending parameter name (dotted for nested fields).
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the machine-readable error code for envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    /// Returns the HTTP status code appropriate for this single error.
    ///
    /// Absent or untypeable values are client mistakes in the request
    /// envelope (400); values that parsed but violated a declared
    /// constraint are semantic failures (422).
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            BindErrorKind::MissingRequired | BindErrorKind::TypeMismatch => {
                StatusCode::BAD_REQUEST
            }
            BindErrorKind::LengthViolation
            | BindErrorKind::PatternViolation
            | BindErrorKind::EnumViolation => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BindError {}

/// The full, ordered set of validation failures for one request.
///
/// Returned when binding fails: every spec is checked and every failure is
/// collected, so a caller sees all problems with a request at once rather
/// than one per round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindFailure {
    errors: Vec<BindError>,
}

impl BindFailure {
    /// Wraps an ordered list of bind errors.
    ///
    /// Callers are expected to pass at least one error; an empty list still
    /// constructs but renders a failure with nothing to report.
    #[must_use]
    pub fn new(errors: Vec<BindError>) -> Self {
        Self { errors }
    }

    /// Returns the failures in spec order.
    #[must_use]
    pub fn errors(&self) -> &[BindError] {
        &self.errors
    }

    /// Consumes the failure and returns the error list.
    #[must_use]
    pub fn into_errors(self) -> Vec<BindError> {
        self.errors
    }

    /// Returns the number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the aggregate HTTP status code for the whole report.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

impl fmt::Display for BindFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            1 => write!(f, "parameter binding failed: {}", self.errors[0]),
            n => write!(f, "parameter binding failed with {n} errors"),
        }
    }
}

impl std::error::Error for BindFailure {}

//! Endpoint specifications.
//!
//! An [`EndpointSpec`] ties an operation id and HTTP method to a path
//! template and the ordered parameter specs a request must satisfy. The
//! build step cross-checks the parameters against each other and against
//! the template, so every spec-level mistake surfaces at startup.

use crate::error::SpecError;
use crate::spec::{ParamSource, ParameterSpec};
use argus_path::PathTemplate;
use http::Method;
use serde::Serialize;

/// A declarative description of one endpoint.
///
/// # Example
///
/// ```rust
/// use argus_core::{EndpointSpec, ParamSource, ParameterSpec};
/// use http::Method;
///
/// let endpoint = EndpointSpec::builder("readUser")
///     .method(Method::GET)
///     .path("/users/{user_id}")
///     .param(
///         ParameterSpec::builder("user_id", ParamSource::Path)
///             .int()
///             .build()
///             .unwrap(),
///     )
///     .build()
///     .unwrap();
/// assert_eq!(endpoint.operation_id(), "readUser");
/// assert_eq!(endpoint.path(), "/users/{user_id}");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct EndpointSpec {
    operation_id: String,
    #[serde(serialize_with = "serialize_method")]
    method: Method,
    #[serde(rename = "path")]
    template: PathTemplate,
    params: Vec<ParameterSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl EndpointSpec {
    /// Starts building an endpoint spec.
    ///
    /// The method defaults to `GET` and the path to `/`.
    #[must_use]
    pub fn builder(operation_id: impl Into<String>) -> EndpointSpecBuilder {
        EndpointSpecBuilder {
            operation_id: operation_id.into(),
            method: Method::GET,
            path: String::from("/"),
            params: Vec::new(),
            description: None,
        }
    }

    /// Returns the operation id.
    #[must_use]
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the declared path pattern.
    #[must_use]
    pub fn path(&self) -> &str {
        self.template.pattern()
    }

    /// Returns the parsed path template.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Returns the parameter specs in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Returns the body parameter spec, if this endpoint declares one.
    #[must_use]
    pub fn body_param(&self) -> Option<&ParameterSpec> {
        self.params
            .iter()
            .find(|spec| spec.source() == ParamSource::Body)
    }

    /// Returns the doc description, if declared.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Builder for [`EndpointSpec`].
#[derive(Debug)]
pub struct EndpointSpecBuilder {
    operation_id: String,
    method: Method,
    path: String,
    params: Vec<ParameterSpec>,
    description: Option<String>,
}

impl EndpointSpecBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the path template pattern.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Adds one parameter spec.
    #[must_use]
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Adds parameter specs in order.
    #[must_use]
    pub fn params(mut self, specs: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.params.extend(specs);
        self
    }

    /// Sets the doc description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the definition and builds the endpoint spec.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] when the path template does not parse, when
    /// parameters repeat a name or claim the same wire key from one source,
    /// when more than one body parameter is declared, or when the path
    /// parameters and the template segments do not agree.
    pub fn build(self) -> Result<EndpointSpec, SpecError> {
        let operation_id = self.operation_id;

        let template = PathTemplate::parse(&self.path).map_err(|source| {
            SpecError::InvalidTemplate {
                template: self.path.clone(),
                source,
            }
        })?;

        for (idx, spec) in self.params.iter().enumerate() {
            if self.params[..idx].iter().any(|s| s.name() == spec.name()) {
                return Err(SpecError::DuplicateParameter {
                    endpoint: operation_id,
                    name: spec.name().to_string(),
                });
            }
            if self.params[..idx]
                .iter()
                .any(|s| s.source() == spec.source() && s.wire_name() == spec.wire_name())
            {
                return Err(SpecError::AliasCollision {
                    endpoint: operation_id,
                    source_kind: spec.source(),
                    wire_name: spec.wire_name().to_string(),
                });
            }
        }

        let body_params = self
            .params
            .iter()
            .filter(|spec| spec.source() == ParamSource::Body)
            .count();
        if body_params > 1 {
            return Err(SpecError::MultipleBodyParameters {
                endpoint: operation_id,
            });
        }

        // every template segment needs a path spec, and vice versa
        for segment in template.param_names() {
            let Some(spec) = self
                .params
                .iter()
                .find(|s| s.source() == ParamSource::Path && s.wire_name() == segment)
            else {
                return Err(SpecError::UnboundSegment {
                    endpoint: operation_id,
                    segment: segment.to_string(),
                });
            };

            let wildcard = template.wildcard_name() == Some(segment);
            if wildcard && !spec.greedy() {
                return Err(SpecError::invalid_parameter(
                    spec.name(),
                    "template wildcard segment requires a greedy parameter",
                ));
            }
            if !wildcard && spec.greedy() {
                return Err(SpecError::invalid_parameter(
                    spec.name(),
                    "greedy parameter requires a '*' template segment",
                ));
            }
        }
        let captured = template.param_names();
        for spec in &self.params {
            if spec.source() == ParamSource::Path && !captured.contains(&spec.wire_name()) {
                return Err(SpecError::UnknownPathParameter {
                    endpoint: operation_id,
                    name: spec.wire_name().to_string(),
                });
            }
        }

        Ok(EndpointSpec {
            operation_id,
            method: self.method,
            template,
            params: self.params,
            description: self.description,
        })
    }
}

fn serialize_method<S>(method: &Method, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(method.as_str())
}

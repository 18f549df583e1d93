//! The endpoint catalog.

use crate::endpoint::EndpointSpec;
use crate::error::SpecError;
use argus_path::PathValues;
use http::Method;
use serde::Serialize;
use tracing::debug;

/// A registry of endpoint specs with duplicate-route detection.
///
/// Registering a second endpoint whose method and path shape (literals plus
/// parameter positions, names ignored) collide with an existing one is a
/// [`SpecError::DuplicateRoute`]. Resolution is a linear scan in
/// registration order, so more specific literal routes must be registered
/// before the parameterized routes that would shadow them; this is a
/// convenience for hosts and tests, not a routing tree.
///
/// # Example
///
/// ```rust
/// use argus_core::{EndpointCatalog, EndpointSpec};
/// use http::Method;
///
/// let mut catalog = EndpointCatalog::new();
/// catalog
///     .register(EndpointSpec::builder("readRoot").path("/").build().unwrap())
///     .unwrap();
///
/// let (endpoint, _values) = catalog.resolve(&Method::GET, "/").unwrap();
/// assert_eq!(endpoint.operation_id(), "readRoot");
/// ```
#[derive(Debug, Default, Serialize)]
pub struct EndpointCatalog {
    endpoints: Vec<EndpointSpec>,
}

impl EndpointCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DuplicateRoute`] when an endpoint with the same
    /// method and path shape is already registered.
    pub fn register(&mut self, endpoint: EndpointSpec) -> Result<(), SpecError> {
        if let Some(existing) = self.endpoints.iter().find(|e| {
            e.method() == endpoint.method() && e.template().same_shape(endpoint.template())
        }) {
            return Err(SpecError::DuplicateRoute {
                method: endpoint.method().clone(),
                path: endpoint.path().to_string(),
                existing: existing.operation_id().to_string(),
            });
        }

        debug!(
            operation_id = %endpoint.operation_id(),
            method = %endpoint.method(),
            path = %endpoint.path(),
            "registered endpoint"
        );
        self.endpoints.push(endpoint);
        Ok(())
    }

    /// Resolves a concrete method and path to an endpoint plus its captured
    /// path values.
    ///
    /// Endpoints are tried in registration order; the first template that
    /// captures the path wins.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<(&EndpointSpec, PathValues)> {
        for endpoint in &self.endpoints {
            if endpoint.method() != method {
                continue;
            }
            if let Some(values) = endpoint.template().capture(path) {
                debug!(
                    operation_id = %endpoint.operation_id(),
                    method = %method,
                    path = %path,
                    "resolved endpoint"
                );
                return Some((endpoint, values));
            }
        }
        None
    }

    /// Returns the endpoint with the given operation id.
    #[must_use]
    pub fn get(&self, operation_id: &str) -> Option<&EndpointSpec> {
        self.endpoints
            .iter()
            .find(|e| e.operation_id() == operation_id)
    }

    /// Returns the registered endpoints in registration order.
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    /// Returns the number of registered endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true when no endpoint is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ParamSource, ParameterSpec};

    // declares a path spec for every `{name}` segment in the pattern
    fn endpoint(id: &str, method: Method, path: &str) -> EndpointSpec {
        let mut builder = EndpointSpec::builder(id).method(method).path(path);
        for segment in path
            .split('/')
            .filter_map(|s| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
        {
            builder = builder.param(
                ParameterSpec::builder(segment, ParamSource::Path)
                    .build()
                    .unwrap(),
            );
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_register_and_resolve() {
        let mut catalog = EndpointCatalog::new();
        catalog
            .register(endpoint("readItem", Method::GET, "/items/{item_id}"))
            .unwrap();

        let (spec, values) = catalog.resolve(&Method::GET, "/items/42").unwrap();
        assert_eq!(spec.operation_id(), "readItem");
        assert_eq!(values.get("item_id"), Some("42"));
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut catalog = EndpointCatalog::new();
        catalog
            .register(endpoint("readItem", Method::GET, "/items/{item_id}"))
            .unwrap();

        // same shape even though the parameter name differs
        let err = catalog
            .register(endpoint("readItemAgain", Method::GET, "/items/{id}"))
            .unwrap_err();
        assert!(matches!(
            err,
            SpecError::DuplicateRoute { ref existing, .. } if existing == "readItem"
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_same_path_different_method_allowed() {
        let mut catalog = EndpointCatalog::new();
        catalog
            .register(endpoint("listItems", Method::GET, "/items"))
            .unwrap();
        catalog
            .register(endpoint("createItem", Method::POST, "/items"))
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_resolution_follows_registration_order() {
        let mut catalog = EndpointCatalog::new();
        catalog
            .register(endpoint("readUserMe", Method::GET, "/users/me"))
            .unwrap();
        catalog
            .register(endpoint("readUser", Method::GET, "/users/{user_id}"))
            .unwrap();

        let (spec, _) = catalog.resolve(&Method::GET, "/users/me").unwrap();
        assert_eq!(spec.operation_id(), "readUserMe");

        let (spec, values) = catalog.resolve(&Method::GET, "/users/7").unwrap();
        assert_eq!(spec.operation_id(), "readUser");
        assert_eq!(values.get("user_id"), Some("7"));
    }

    #[test]
    fn test_resolve_misses() {
        let mut catalog = EndpointCatalog::new();
        catalog
            .register(endpoint("listItems", Method::GET, "/items"))
            .unwrap();

        assert!(catalog.resolve(&Method::POST, "/items").is_none());
        assert!(catalog.resolve(&Method::GET, "/users").is_none());
    }

    #[test]
    fn test_get_by_operation_id() {
        let mut catalog = EndpointCatalog::new();
        catalog
            .register(endpoint("listItems", Method::GET, "/items"))
            .unwrap();

        assert!(catalog.get("listItems").is_some());
        assert!(catalog.get("missing").is_none());
    }
}

//! # Argus
//!
//! **Declarative request validation and parameter binding for HTTP services**
//!
//! Argus separates the declaration of an HTTP API's parameters from the
//! handling of its requests. Endpoints state where each parameter comes from,
//! what type it carries, and what constraints it must satisfy; the binder then
//! turns a raw request into typed values, or into a complete, ordered error
//! report when the request does not conform.
//!
//! - 🧭 **Path templates** – literal, parameterized, and wildcard segments with
//!   declaration-order route resolution
//! - 🔢 **Typed parameters** – strings, integers, floats, booleans, closed enum
//!   vocabularies, lists, and nested objects
//! - 📏 **Declarative constraints** – length bounds, regex patterns, and numeric
//!   ranges, checked after conversion and reported per field
//! - 📋 **Complete error reports** – every failing parameter in one pass, in
//!   declaration order, with HTTP status mapping
//! - 📝 **Documentation metadata** – titles, descriptions, aliases, deprecation
//!   and visibility flags carried on the spec for schema tooling
//!
//! ## Quick Start
//!
//! ```rust
//! use argus::prelude::*;
//! use http::Method;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = EndpointSpec::builder("listItems")
//!     .method(Method::GET)
//!     .path("/items")
//!     .param(
//!         ParameterSpec::builder("skip", ParamSource::Query)
//!             .int()
//!             .default_value(0)
//!             .build()?,
//!     )
//!     .param(
//!         ParameterSpec::builder("limit", ParamSource::Query)
//!             .int()
//!             .default_value(10)
//!             .build()?,
//!     )
//!     .build()?;
//!
//! let raw = RawRequest::builder().query_value("skip", "20").build();
//! let bag = bind_endpoint(&endpoint, &raw)?;
//!
//! assert_eq!(bag.int_value("skip"), Some(20));
//! assert_eq!(bag.int_value("limit"), Some(10));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Reports
//!
//! A non-conforming request produces a `BindFailure` carrying every failing
//! parameter in declaration order. It serializes straight into a response
//! payload:
//!
//! ```rust
//! use argus::prelude::*;
//! use http::{Method, StatusCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = EndpointSpec::builder("readItem")
//!     .method(Method::GET)
//!     .path("/items/{item_id}")
//!     .param(
//!         ParameterSpec::builder("item_id", ParamSource::Path)
//!             .int()
//!             .build()?,
//!     )
//!     .param(ParameterSpec::builder("needy", ParamSource::Query).build()?)
//!     .build()?;
//!
//! let raw = RawRequest::builder().path_value("item_id", "pencil").build();
//! let failure = bind_endpoint(&endpoint, &raw).unwrap_err();
//! assert_eq!(failure.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
//!
//! let report = serde_json::to_value(&failure)?;
//! assert_eq!(report["errors"][0]["param"], "item_id");
//! assert_eq!(report["errors"][0]["kind"], "type_mismatch");
//! assert_eq!(report["errors"][1]["param"], "needy");
//! assert_eq!(report["errors"][1]["kind"], "missing_required");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Binding is a single pass over the endpoint's parameter specs:
//!
//! ```text
//! Request → Catalog::resolve → PathValues ─┐
//!           Query string ──────────────────┼→ bind → ParameterBag → Handler
//!           JSON body ─────────────────────┘    ↓
//!                                          BindFailure (ordered, complete)
//! ```

#![doc(html_root_url = "https://docs.rs/argus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the spec model
pub use argus_core as core;

// Re-export the binder
pub use argus_bind as bind;

// Re-export path template types
pub use argus_path as path;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use argus::prelude::*;
/// ```
pub mod prelude {
    pub use argus_core::{
        BindError, BindErrorKind, BindFailure, EndpointCatalog, EndpointSpec, ParamSource,
        ParamValue, ParameterSpec, SpecError,
    };

    // Re-export the full spec vocabulary
    pub use argus_core::{
        Constraints, ElemType, EndpointSpecBuilder, EnumSpec, ObjectSpec, ParamType,
        ParameterSpecBuilder, Pattern, StringEnum,
    };

    // Re-export the binder entry points
    pub use argus_bind::{bind, bind_endpoint, ParameterBag, QueryValues, RawRequest};

    // Re-export path template types
    pub use argus_path::{PathTemplate, PathValues, TemplateError};
}

//! # Argus Bind
//!
//! The request binder for the argus parameter layer.
//!
//! Hosts hand [`bind`] (or [`bind_endpoint`]) a [`RawRequest`] - captured
//! path values, decoded query parameters, and an already-parsed JSON body -
//! together with the parameter specs from `argus-core`. Binding returns
//! either a [`ParameterBag`] of typed values or the full, ordered error
//! report; there is no partial success.
//!
//! # Example
//!
//! ```rust
//! use argus_bind::{bind_endpoint, RawRequest};
//! use argus_core::fixtures;
//! use http::Method;
//!
//! let catalog = fixtures::tutorial_catalog();
//! let (endpoint, path_values) = catalog
//!     .resolve(&Method::GET, "/users/7/items/pencil")
//!     .unwrap();
//!
//! let raw = RawRequest::builder()
//!     .path_values(path_values)
//!     .query_value("q", "wooden")
//!     .query_value("short", "true")
//!     .build();
//!
//! let bag = bind_endpoint(endpoint, &raw).unwrap();
//! assert_eq!(bag.int_value("user_id"), Some(7));
//! assert_eq!(bag.str_value("item_id"), Some("pencil"));
//! assert_eq!(bag.str_value("q"), Some("wooden"));
//! assert_eq!(bag.bool_value("short"), Some(true));
//! ```

#![doc(html_root_url = "https://docs.rs/argus-bind/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bag;
mod binder;
mod request;

pub use bag::ParameterBag;
pub use binder::{bind, bind_endpoint};
pub use request::{QueryValues, RawRequest, RawRequestBuilder};

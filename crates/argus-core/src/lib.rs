//! # Argus Core
//!
//! The declarative model for the argus parameter-binding layer.
//!
//! This crate provides the types an endpoint is described with before any
//! request arrives:
//!
//! - [`ParameterSpec`] - one bindable parameter: source, type, constraints,
//!   default, and doc metadata
//! - [`EnumSpec`] / [`StringEnum`] - closed string vocabularies and their
//!   typed Rust counterparts
//! - [`EndpointSpec`] - operation id, method, path template, and ordered
//!   parameter specs
//! - [`EndpointCatalog`] - endpoint registry with duplicate-route detection
//! - [`ParamValue`] - the bound value vocabulary
//! - [`SpecError`] - startup configuration failures; [`BindError`] /
//!   [`BindFailure`] - per-request validation failures
//!
//! The binder that drives these specs lives in `argus-bind`.

#![doc(html_root_url = "https://docs.rs/argus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod endpoint;
mod error;
pub mod fixtures;
mod spec;
mod value;
mod variants;

pub use catalog::EndpointCatalog;
pub use endpoint::{EndpointSpec, EndpointSpecBuilder};
pub use error::{BindError, BindErrorKind, BindFailure, SpecError};
pub use spec::{
    Constraints, ElemType, ObjectSpec, ParamSource, ParamType, ParameterSpec,
    ParameterSpecBuilder, Pattern,
};
pub use value::ParamValue;
pub use variants::{EnumSpec, StringEnum};

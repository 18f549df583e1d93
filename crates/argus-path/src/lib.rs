//! Path templates and captured path values for the Argus binding layer.
//!
//! This crate provides the path-side vocabulary of the parameter binder:
//!
//! - [`PathTemplate`] - a parsed path pattern (`/items/{item_id}`,
//!   `/files/*file_path`) that can capture values from one concrete path
//! - [`PathValues`] - ordered (name, value) pairs captured from a path
//!
//! There is no routing tree here. A template knows how to match and capture
//! a single concrete path; hosts that already run their own router can hand
//! the captured values straight to the binder instead.
//!
//! # Example
//!
//! ```rust
//! use argus_path::PathTemplate;
//!
//! let template = PathTemplate::parse("/users/{user_id}/items/{item_id}").unwrap();
//!
//! let values = template.capture("/users/7/items/pencil").unwrap();
//! assert_eq!(values.get("user_id"), Some("7"));
//! assert_eq!(values.get("item_id"), Some("pencil"));
//!
//! assert!(template.capture("/users/7").is_none());
//! ```
//!
//! Wildcard templates capture the remainder of the path, separators included:
//!
//! ```rust
//! use argus_path::PathTemplate;
//!
//! let template = PathTemplate::parse("/files/*file_path").unwrap();
//! let values = template.capture("/files/home/johndoe/myfile.txt").unwrap();
//! assert_eq!(values.get("file_path"), Some("home/johndoe/myfile.txt"));
//! ```

#![doc(html_root_url = "https://docs.rs/argus-path/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod template;
mod values;

pub use template::{PathTemplate, TemplateError};
pub use values::PathValues;

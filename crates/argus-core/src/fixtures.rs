//! Test fixtures for argus development and testing.
//!
//! This module provides a pre-built endpoint catalog, spec constructors, and
//! a seeded item store that model a small users-and-items API. Tests across
//! the workspace bind requests against these specs instead of declaring
//! their own.
//!
//! # Example
//!
//! ```
//! use argus_core::fixtures;
//! use http::Method;
//!
//! let catalog = fixtures::tutorial_catalog();
//!
//! let (endpoint, values) = catalog.resolve(&Method::GET, "/users/me").unwrap();
//! assert_eq!(endpoint.operation_id(), "readUserMe");
//! assert!(values.is_empty());
//! ```

use crate::catalog::EndpointCatalog;
use crate::endpoint::EndpointSpec;
use crate::spec::{ElemType, ObjectSpec, ParamSource, ParameterSpec};
use crate::value::ParamValue;
use crate::variants::{EnumSpec, StringEnum};
use http::Method;

/// The closed model vocabulary served by `getModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelName {
    /// The AlexNet image classifier.
    Alexnet,
    /// The ResNet image classifier.
    Resnet,
    /// The LeNet image classifier.
    Lenet,
}

impl StringEnum for ModelName {
    const NAME: &'static str = "model_name";
    const VARIANTS: &'static [&'static str] = &["alexnet", "resnet", "lenet"];

    fn from_variant(value: &str) -> Option<Self> {
        match value {
            "alexnet" => Some(Self::Alexnet),
            "resnet" => Some(Self::Resnet),
            "lenet" => Some(Self::Lenet),
            _ => None,
        }
    }

    fn as_variant(&self) -> &'static str {
        match self {
            Self::Alexnet => "alexnet",
            Self::Resnet => "resnet",
            Self::Lenet => "lenet",
        }
    }
}

/// A seeded, explicitly owned item store.
///
/// Stands in for the database a real host would inject. Paging follows the
/// usual skip/limit slice semantics; out-of-range pages are empty, never an
/// error.
///
/// # Example
///
/// ```
/// use argus_core::fixtures::ItemStore;
///
/// let store = ItemStore::seeded();
/// assert_eq!(store.page(1, Some(1)), ["Bar"]);
/// ```
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: Vec<String>,
}

impl ItemStore {
    /// Creates a store seeded with Foo, Bar and Baz.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            items: vec!["Foo".to_string(), "Bar".to_string(), "Baz".to_string()],
        }
    }

    /// Returns the page starting at `skip`, at most `limit` items long.
    ///
    /// A `None` limit returns everything from `skip` onward.
    #[must_use]
    pub fn page(&self, skip: usize, limit: Option<usize>) -> &[String] {
        let start = skip.min(self.items.len());
        let end = match limit {
            Some(limit) => start.saturating_add(limit).min(self.items.len()),
            None => self.items.len(),
        };
        &self.items[start..end]
    }

    /// Returns all item names.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Returns the `model_name` enum vocabulary.
#[must_use]
pub fn model_name_spec() -> EnumSpec {
    EnumSpec::of::<ModelName>().expect("ModelName declares valid variants")
}

/// Returns the `Item` body model: required `name` and `price`, optional
/// `description` and `tax`.
#[must_use]
pub fn item_object() -> ObjectSpec {
    ObjectSpec::new(
        "Item",
        vec![
            ParameterSpec::builder("name", ParamSource::Body)
                .build()
                .expect("valid fixture spec"),
            ParameterSpec::builder("description", ParamSource::Body)
                .default_value(ParamValue::Null)
                .build()
                .expect("valid fixture spec"),
            ParameterSpec::builder("price", ParamSource::Body)
                .float()
                .build()
                .expect("valid fixture spec"),
            ParameterSpec::builder("tax", ParamSource::Body)
                .float()
                .default_value(ParamValue::Null)
                .build()
                .expect("valid fixture spec"),
        ],
    )
    .expect("valid fixture model")
}

/// Creates the tutorial endpoint catalog.
///
/// The catalog registers, in order:
/// - `readRoot` - GET /
/// - `readUserMe` - GET /users/me
/// - `readUser` - GET /users/{user_id}
/// - `getModel` - GET /models/{model_name}
/// - `readFile` - GET /files/*file_path
/// - `listItems` - GET /items
/// - `readItem` - GET /items/{item_id}
/// - `readUserItem` - GET /users/{user_id}/items/{item_id}
/// - `createItem` - POST /items
/// - `updateItem` - PUT /items/{item_id}
///
/// Literal routes precede the parameterized routes that would otherwise
/// shadow them, so `/users/me` resolves to `readUserMe`.
///
/// # Example
///
/// ```
/// use argus_core::fixtures::tutorial_catalog;
///
/// let catalog = tutorial_catalog();
/// assert_eq!(catalog.len(), 10);
/// assert!(catalog.get("readItem").is_some());
/// ```
#[must_use]
pub fn tutorial_catalog() -> EndpointCatalog {
    let mut catalog = EndpointCatalog::new();
    for endpoint in tutorial_endpoints() {
        catalog
            .register(endpoint)
            .expect("fixture routes are distinct");
    }
    catalog
}

fn tutorial_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::builder("readRoot")
            .method(Method::GET)
            .path("/")
            .description("Returns a greeting")
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("readUserMe")
            .method(Method::GET)
            .path("/users/me")
            .description("Returns the current user")
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("readUser")
            .method(Method::GET)
            .path("/users/{user_id}")
            .description("Retrieves a user by id")
            .param(
                ParameterSpec::builder("user_id", ParamSource::Path)
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("getModel")
            .method(Method::GET)
            .path("/models/{model_name}")
            .description("Retrieves a model by name")
            .param(
                ParameterSpec::builder("model_name", ParamSource::Path)
                    .enumeration(model_name_spec())
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("readFile")
            .method(Method::GET)
            .path("/files/*file_path")
            .description("Reads the file at the given path")
            .param(
                ParameterSpec::builder("file_path", ParamSource::Path)
                    .greedy()
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("listItems")
            .method(Method::GET)
            .path("/items")
            .description("Lists items with pagination")
            .param(
                ParameterSpec::builder("skip", ParamSource::Query)
                    .int()
                    .default_value(0)
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("limit", ParamSource::Query)
                    .int()
                    .default_value(10)
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("readItem")
            .method(Method::GET)
            .path("/items/{item_id}")
            .description("Retrieves an item with its query options")
            .param(
                ParameterSpec::builder("item_id", ParamSource::Path)
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("needy", ParamSource::Query)
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("skip", ParamSource::Query)
                    .int()
                    .default_value(0)
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("limit", ParamSource::Query)
                    .int()
                    .default_value(ParamValue::Null)
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("readUserItem")
            .method(Method::GET)
            .path("/users/{user_id}/items/{item_id}")
            .description("Retrieves an item owned by a user")
            .param(
                ParameterSpec::builder("user_id", ParamSource::Path)
                    .int()
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("item_id", ParamSource::Path)
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("q", ParamSource::Query)
                    .default_value(ParamValue::Null)
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("short", ParamSource::Query)
                    .boolean()
                    .default_value(false)
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("createItem")
            .method(Method::POST)
            .path("/items")
            .description("Creates an item from the request body")
            .param(
                ParameterSpec::builder("item", ParamSource::Body)
                    .object(item_object())
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
        EndpointSpec::builder("updateItem")
            .method(Method::PUT)
            .path("/items/{item_id}")
            .description("Replaces an item")
            .param(
                ParameterSpec::builder("item_id", ParamSource::Path)
                    .int()
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("item", ParamSource::Body)
                    .object(item_object())
                    .build()
                    .expect("valid fixture spec"),
            )
            .param(
                ParameterSpec::builder("q", ParamSource::Query)
                    .default_value(ParamValue::Null)
                    .build()
                    .expect("valid fixture spec"),
            )
            .build()
            .expect("valid fixture endpoint"),
    ]
}

/// GET /items with `q` defaulting to `"fixedquery"` and length plus pattern
/// validation. Not registered in [`tutorial_catalog`]; bind against its
/// params directly.
#[must_use]
pub fn validated_query_endpoint() -> EndpointSpec {
    items_query_endpoint(
        "readItemsValidated",
        ParameterSpec::builder("q", ParamSource::Query)
            .default_value("fixedquery")
            .min_length(3)
            .max_length(50)
            .pattern("^fixedquery$")
            .build()
            .expect("valid fixture spec"),
    )
}

/// GET /items with a repeatable `q` collected into a string list.
#[must_use]
pub fn multi_query_endpoint() -> EndpointSpec {
    items_query_endpoint(
        "readItemsMulti",
        ParameterSpec::builder("q", ParamSource::Query)
            .list(ElemType::String)
            .build()
            .expect("valid fixture spec"),
    )
}

/// GET /items with a documented optional `q` (title, description, min
/// length).
#[must_use]
pub fn documented_query_endpoint() -> EndpointSpec {
    items_query_endpoint(
        "readItemsDocumented",
        ParameterSpec::builder("q", ParamSource::Query)
            .default_value(ParamValue::Null)
            .title("Query string")
            .description(
                "Query string for the items to search in the database that have a good match",
            )
            .min_length(3)
            .build()
            .expect("valid fixture spec"),
    )
}

/// GET /items with `q` supplied under the `item-query` wire alias.
#[must_use]
pub fn aliased_query_endpoint() -> EndpointSpec {
    items_query_endpoint(
        "readItemsAliased",
        ParameterSpec::builder("q", ParamSource::Query)
            .default_value(ParamValue::Null)
            .alias("item-query")
            .build()
            .expect("valid fixture spec"),
    )
}

/// GET /items with the fully decorated, deprecated `q`.
#[must_use]
pub fn deprecated_query_endpoint() -> EndpointSpec {
    items_query_endpoint(
        "readItemsDeprecated",
        ParameterSpec::builder("q", ParamSource::Query)
            .default_value(ParamValue::Null)
            .alias("item-query")
            .title("Query string")
            .description(
                "Query string for the items to search in the database that have a good match",
            )
            .min_length(3)
            .max_length(50)
            .pattern("^fixedquery$")
            .deprecated()
            .build()
            .expect("valid fixture spec"),
    )
}

/// GET /items with `hidden_query` excluded from documentation tooling.
#[must_use]
pub fn hidden_query_endpoint() -> EndpointSpec {
    items_query_endpoint(
        "readItemsHidden",
        ParameterSpec::builder("hidden_query", ParamSource::Query)
            .default_value(ParamValue::Null)
            .hidden()
            .build()
            .expect("valid fixture spec"),
    )
}

fn items_query_endpoint(operation_id: &str, query: ParameterSpec) -> EndpointSpec {
    EndpointSpec::builder(operation_id)
        .method(Method::GET)
        .path("/items")
        .param(query)
        .build()
        .expect("valid fixture endpoint")
}

//! End-to-end binding integration tests.
//!
//! These tests drive the flow a host would: resolve a concrete request
//! against the tutorial catalog, feed the captured path values plus the
//! decoded query and body into the binder, and read typed values out of the
//! resulting bag (or inspect the ordered error report).

use argus_bind::{bind_endpoint, ParameterBag, RawRequest};
use argus_core::fixtures::{self, ItemStore, ModelName};
use argus_core::{BindErrorKind, BindFailure, EndpointCatalog, ParamValue};
use http::{Method, StatusCode};
use serde_json::json;

/// Resolves a request against the catalog and binds it, returning the
/// operation id alongside the binding outcome.
fn run(
    catalog: &EndpointCatalog,
    method: Method,
    path: &str,
    query: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> (String, Result<ParameterBag, BindFailure>) {
    let (endpoint, values) = catalog
        .resolve(&method, path)
        .unwrap_or_else(|| panic!("no endpoint for {method} {path}"));

    let mut builder = RawRequest::builder().path_values(values);
    for (key, value) in query {
        builder = builder.query_value(*key, *value);
    }
    if let Some(body) = body {
        builder = builder.body(body);
    }

    (
        endpoint.operation_id().to_string(),
        bind_endpoint(endpoint, &builder.build()),
    )
}

#[test]
fn test_root_binds_empty_bag() {
    let catalog = fixtures::tutorial_catalog();
    let (op, result) = run(&catalog, Method::GET, "/", &[], None);

    assert_eq!(op, "readRoot");
    assert!(result.unwrap().is_empty());
}

#[test]
fn test_literal_route_wins_over_parameterized() {
    let catalog = fixtures::tutorial_catalog();

    let (op, result) = run(&catalog, Method::GET, "/users/me", &[], None);
    assert_eq!(op, "readUserMe");
    assert!(result.unwrap().is_empty());

    let (op, result) = run(&catalog, Method::GET, "/users/7", &[], None);
    assert_eq!(op, "readUser");
    // readUser declares user_id as a string
    assert_eq!(result.unwrap().str_value("user_id"), Some("7"));
}

#[test]
fn test_model_binds_typed_enum() {
    let catalog = fixtures::tutorial_catalog();

    let (op, result) = run(&catalog, Method::GET, "/models/alexnet", &[], None);
    assert_eq!(op, "getModel");
    let bag = result.unwrap();
    assert_eq!(bag.str_value("model_name"), Some("alexnet"));
    assert_eq!(
        bag.enum_value::<ModelName>("model_name"),
        Some(ModelName::Alexnet)
    );

    let (_, result) = run(&catalog, Method::GET, "/models/vgg", &[], None);
    let failure = result.unwrap_err();
    assert_eq!(failure.errors()[0].kind(), BindErrorKind::EnumViolation);
    assert_eq!(
        failure.errors()[0].status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert!(failure.errors()[0].message().contains("alexnet"));
}

#[test]
fn test_greedy_file_path_keeps_separators() {
    let catalog = fixtures::tutorial_catalog();

    let (op, result) = run(
        &catalog,
        Method::GET,
        "/files/home/johndoe/myfile.txt",
        &[],
        None,
    );
    assert_eq!(op, "readFile");
    assert_eq!(
        result.unwrap().str_value("file_path"),
        Some("home/johndoe/myfile.txt")
    );

    // the wildcard needs at least one remaining segment
    assert!(catalog.resolve(&Method::GET, "/files").is_none());
}

#[test]
fn test_list_items_drives_the_store() {
    let catalog = fixtures::tutorial_catalog();
    let store = ItemStore::seeded();

    let (op, result) = run(&catalog, Method::GET, "/items", &[], None);
    assert_eq!(op, "listItems");
    let bag = result.unwrap();
    assert_eq!(bag.int_value("skip"), Some(0));
    assert_eq!(bag.int_value("limit"), Some(10));

    let skip = usize::try_from(bag.int_value("skip").unwrap()).unwrap();
    let limit = usize::try_from(bag.int_value("limit").unwrap()).unwrap();
    assert_eq!(store.page(skip, Some(limit)), ["Foo", "Bar", "Baz"]);

    let (_, result) = run(
        &catalog,
        Method::GET,
        "/items",
        &[("skip", "1"), ("limit", "1")],
        None,
    );
    let bag = result.unwrap();
    let skip = usize::try_from(bag.int_value("skip").unwrap()).unwrap();
    let limit = usize::try_from(bag.int_value("limit").unwrap()).unwrap();
    assert_eq!(store.page(skip, Some(limit)), ["Bar"]);
}

#[test]
fn test_read_item_required_and_optional_mix() {
    let catalog = fixtures::tutorial_catalog();

    let (op, result) = run(
        &catalog,
        Method::GET,
        "/items/foo",
        &[("needy", "sooooneedy")],
        None,
    );
    assert_eq!(op, "readItem");
    let bag = result.unwrap();
    assert_eq!(bag.str_value("item_id"), Some("foo"));
    assert_eq!(bag.str_value("needy"), Some("sooooneedy"));
    assert_eq!(bag.int_value("skip"), Some(0));
    assert!(bag.is_null("limit"));

    // missing needy is a 400-class error inside a 422 report
    let (_, result) = run(&catalog, Method::GET, "/items/foo", &[], None);
    let failure = result.unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.errors()[0].param(), "needy");
    assert_eq!(failure.errors()[0].kind(), BindErrorKind::MissingRequired);
    assert_eq!(failure.errors()[0].status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(failure.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_multiple_path_and_query_parameters() {
    let catalog = fixtures::tutorial_catalog();

    let (op, result) = run(
        &catalog,
        Method::GET,
        "/users/1/items/2",
        &[("q", "w"), ("short", "false")],
        None,
    );
    assert_eq!(op, "readUserItem");
    let bag = result.unwrap();
    assert_eq!(bag.int_value("user_id"), Some(1));
    assert_eq!(bag.str_value("item_id"), Some("2"));
    assert_eq!(bag.str_value("q"), Some("w"));
    assert_eq!(bag.bool_value("short"), Some(false));

    let (_, result) = run(
        &catalog,
        Method::GET,
        "/users/abc/items/2",
        &[("short", "yes")],
        None,
    );
    let failure = result.unwrap_err();
    assert_eq!(failure.errors()[0].param(), "user_id");
    assert_eq!(failure.errors()[0].kind(), BindErrorKind::TypeMismatch);
}

#[test]
fn test_create_item_from_body() {
    let catalog = fixtures::tutorial_catalog();

    let (op, result) = run(
        &catalog,
        Method::POST,
        "/items",
        &[],
        Some(json!({"name": "Foo", "price": 35.4, "tax": 3.2})),
    );
    assert_eq!(op, "createItem");
    let bag = result.unwrap();
    let item = bag.object("item").unwrap();
    assert_eq!(item["name"].as_str(), Some("Foo"));
    assert_eq!(item["description"], ParamValue::Null);

    // a handler computes price_with_tax from the typed fields
    let price = item["price"].as_float().unwrap();
    let tax = item["tax"].as_float().unwrap();
    assert!((price + tax - 38.6).abs() < 1e-9);
}

#[test]
fn test_update_item_mixes_all_three_sources() {
    let catalog = fixtures::tutorial_catalog();

    let (op, result) = run(
        &catalog,
        Method::PUT,
        "/items/1",
        &[("q", "as")],
        Some(json!({"name": "Bar", "price": 10.0})),
    );
    assert_eq!(op, "updateItem");
    let bag = result.unwrap();
    assert_eq!(bag.int_value("item_id"), Some(1));
    assert_eq!(bag.str_value("q"), Some("as"));
    assert_eq!(bag.object("item").unwrap()["name"].as_str(), Some("Bar"));
}

#[test]
fn test_error_report_spans_sources_in_spec_order() {
    let catalog = fixtures::tutorial_catalog();

    // bad path id, body missing name, body price wrong type
    let (_, result) = run(
        &catalog,
        Method::PUT,
        "/items/notanumber",
        &[],
        Some(json!({"price": "ten"})),
    );
    let failure = result.unwrap_err();

    let params: Vec<_> = failure.errors().iter().map(|e| e.param()).collect();
    assert_eq!(params, vec!["item_id", "item.name", "item.price"]);

    let json = serde_json::to_value(&failure).unwrap();
    assert_eq!(json["errors"][0]["kind"], "type_mismatch");
    assert_eq!(json["errors"][0]["source"], "path");
    assert_eq!(json["errors"][1]["kind"], "missing_required");
    assert_eq!(json["errors"][1]["param"], "item.name");
}

#[test]
fn test_validated_query_variant() {
    let endpoint = fixtures::validated_query_endpoint();

    let raw = RawRequest::builder().build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert_eq!(bag.str_value("q"), Some("fixedquery"));

    let raw = RawRequest::builder().query_value("q", "fixedquery").build();
    assert!(bind_endpoint(&endpoint, &raw).is_ok());

    let raw = RawRequest::builder().query_value("q", "fx").build();
    let failure = bind_endpoint(&endpoint, &raw).unwrap_err();
    assert_eq!(failure.errors()[0].kind(), BindErrorKind::LengthViolation);

    let raw = RawRequest::builder().query_value("q", "anotherquery").build();
    let failure = bind_endpoint(&endpoint, &raw).unwrap_err();
    assert_eq!(failure.errors()[0].kind(), BindErrorKind::PatternViolation);
}

#[test]
fn test_multi_query_variant() {
    let endpoint = fixtures::multi_query_endpoint();

    let raw = RawRequest::builder()
        .query_value("q", "foo")
        .query_value("q", "bar")
        .build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    let items = bag.list("q").unwrap();
    assert_eq!(items[0].as_str(), Some("foo"));
    assert_eq!(items[1].as_str(), Some("bar"));

    let raw = RawRequest::builder().build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert_eq!(bag.list("q"), Some(&[][..]));
}

#[test]
fn test_documented_query_variant() {
    let endpoint = fixtures::documented_query_endpoint();
    // the doc metadata rides along without changing binding
    assert_eq!(endpoint.params()[0].title(), Some("Query string"));
    assert!(endpoint.params()[0].description().is_some());

    let raw = RawRequest::builder().query_value("q", "matching").build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert_eq!(bag.str_value("q"), Some("matching"));

    let raw = RawRequest::builder().query_value("q", "ab").build();
    let failure = bind_endpoint(&endpoint, &raw).unwrap_err();
    assert_eq!(failure.errors()[0].kind(), BindErrorKind::LengthViolation);

    let raw = RawRequest::builder().build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert!(bag.is_null("q"));
}

#[test]
fn test_aliased_query_variant() {
    let endpoint = fixtures::aliased_query_endpoint();

    let raw = RawRequest::builder()
        .query_value("item-query", "ddddd")
        .build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert_eq!(bag.str_value("q"), Some("ddddd"));
    assert!(!bag.contains("item-query"));
}

#[test]
fn test_deprecated_query_variant_still_binds() {
    let endpoint = fixtures::deprecated_query_endpoint();

    let raw = RawRequest::builder()
        .query_value("item-query", "fixedquery")
        .build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert_eq!(bag.str_value("q"), Some("fixedquery"));
}

#[test]
fn test_hidden_query_variant_binds_normally() {
    let endpoint = fixtures::hidden_query_endpoint();
    assert!(!endpoint.params()[0].in_schema());

    let raw = RawRequest::builder()
        .query_value("hidden_query", "secret")
        .build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert_eq!(bag.str_value("hidden_query"), Some("secret"));

    let raw = RawRequest::builder().build();
    let bag = bind_endpoint(&endpoint, &raw).unwrap();
    assert!(bag.is_null("hidden_query"));
}

#[test]
fn test_unroutable_paths_do_not_resolve() {
    let catalog = fixtures::tutorial_catalog();

    assert!(catalog.resolve(&Method::GET, "/items/1/extra").is_none());
    assert!(catalog.resolve(&Method::DELETE, "/items/1").is_none());
    assert!(catalog.resolve(&Method::GET, "/nothing").is_none());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // binding the same input twice gives the same outcome, bag or report
        #[test]
        fn test_binding_is_idempotent(value in "[a-zA-Z0-9_.-]{0,24}") {
            let endpoint = fixtures::validated_query_endpoint();
            let raw = RawRequest::builder()
                .query_value("q", value.as_str())
                .build();

            let first = bind_endpoint(&endpoint, &raw);
            let second = bind_endpoint(&endpoint, &raw);
            prop_assert_eq!(first, second);
        }

        // malformed input always comes back as a report, never a panic
        #[test]
        fn test_binder_never_panics(
            needy in proptest::option::of("\\PC{0,12}"),
            skip in "\\PC{0,12}",
            limit in proptest::option::of("\\PC{0,12}"),
        ) {
            let catalog = fixtures::tutorial_catalog();
            let (endpoint, values) = catalog
                .resolve(&Method::GET, "/items/thing")
                .expect("readItem routes");

            let mut builder = RawRequest::builder()
                .path_values(values)
                .query_value("skip", skip.as_str());
            if let Some(needy) = &needy {
                builder = builder.query_value("needy", needy.as_str());
            }
            if let Some(limit) = &limit {
                builder = builder.query_value("limit", limit.as_str());
            }

            match bind_endpoint(endpoint, &builder.build()) {
                Ok(bag) => prop_assert!(bag.contains("needy")),
                Err(failure) => prop_assert!(!failure.is_empty()),
            }
        }
    }
}

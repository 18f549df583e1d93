//! The bind algorithm.
//!
//! Binding walks the parameter specs in declaration order. For each spec the
//! raw value is resolved from its declared source by wire name, converted to
//! the declared type, and checked against the declared constraints; failures
//! accumulate instead of short-circuiting, so one report covers the whole
//! request. A [`ParameterBag`] is only produced when every spec succeeded.

use crate::bag::ParameterBag;
use crate::request::RawRequest;
use argus_core::{
    BindError, BindFailure, Constraints, ElemType, EndpointSpec, ObjectSpec, ParamSource,
    ParamType, ParamValue, ParameterSpec,
};
use indexmap::IndexMap;
use tracing::warn;

/// Binds a decoded request against a set of parameter specs.
///
/// Specs are processed in order. Absent parameters fall back to their
/// declared default (which is never constraint-checked); absent required
/// parameters report `missing_required`; absent lists bind as empty.
/// Supplied values are converted and validated, one error per parameter.
///
/// # Errors
///
/// Returns a [`BindFailure`] carrying every failed parameter, in spec
/// order, when any spec could not be bound.
///
/// # Example
///
/// ```rust
/// use argus_bind::{bind, RawRequest};
/// use argus_core::{ParamSource, ParameterSpec};
///
/// let specs = vec![
///     ParameterSpec::builder("skip", ParamSource::Query)
///         .int()
///         .default_value(0)
///         .build()
///         .unwrap(),
///     ParameterSpec::builder("limit", ParamSource::Query)
///         .int()
///         .default_value(10)
///         .build()
///         .unwrap(),
/// ];
/// let raw = RawRequest::builder().query_value("skip", "20").build();
///
/// let bag = bind(&specs, &raw).unwrap();
/// assert_eq!(bag.int_value("skip"), Some(20));
/// assert_eq!(bag.int_value("limit"), Some(10));
/// ```
pub fn bind(specs: &[ParameterSpec], raw: &RawRequest) -> Result<ParameterBag, BindFailure> {
    let mut bag = ParameterBag::new();
    let mut errors = Vec::new();

    for spec in specs {
        match bind_param(spec, raw) {
            Ok(value) => bag.insert(spec.name(), value),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    if errors.is_empty() {
        Ok(bag)
    } else {
        Err(BindFailure::new(errors))
    }
}

/// Binds a decoded request against an endpoint's parameter specs.
///
/// # Errors
///
/// Returns a [`BindFailure`] carrying every failed parameter when any spec
/// could not be bound.
pub fn bind_endpoint(
    endpoint: &EndpointSpec,
    raw: &RawRequest,
) -> Result<ParameterBag, BindFailure> {
    bind(endpoint.params(), raw)
}

fn bind_param(spec: &ParameterSpec, raw: &RawRequest) -> Result<ParamValue, Vec<BindError>> {
    match spec.source() {
        ParamSource::Path => bind_path(spec, raw).map_err(|err| vec![err]),
        ParamSource::Query => bind_query(spec, raw).map_err(|err| vec![err]),
        ParamSource::Body => bind_body(spec, raw),
    }
}

fn bind_path(spec: &ParameterSpec, raw: &RawRequest) -> Result<ParamValue, BindError> {
    let Some(text) = raw.path().get(spec.wire_name()) else {
        return absent(spec, ParamSource::Path, spec.name());
    };
    note_deprecated(spec, spec.name());

    if spec.greedy() {
        // the captured remainder, separators included, stays a plain string
        return Ok(ParamValue::String(text.to_string()));
    }

    let value = convert_text(spec, ParamSource::Path, spec.name(), text)?;
    check_constraints(spec.constraints(), ParamSource::Path, spec.name(), &value)?;
    Ok(value)
}

fn bind_query(spec: &ParameterSpec, raw: &RawRequest) -> Result<ParamValue, BindError> {
    if let ParamType::List(elem) = spec.param_type() {
        return bind_query_list(spec, *elem, raw);
    }

    // a key supplied several times binds the last occurrence
    let Some(text) = raw.query().get_last(spec.wire_name()) else {
        return absent(spec, ParamSource::Query, spec.name());
    };
    note_deprecated(spec, spec.name());

    let value = convert_text(spec, ParamSource::Query, spec.name(), text)?;
    check_constraints(spec.constraints(), ParamSource::Query, spec.name(), &value)?;
    Ok(value)
}

fn bind_query_list(
    spec: &ParameterSpec,
    elem: ElemType,
    raw: &RawRequest,
) -> Result<ParamValue, BindError> {
    let occurrences = raw.query().get_all(spec.wire_name());
    if occurrences.is_empty() {
        return absent(spec, ParamSource::Query, spec.name());
    }
    note_deprecated(spec, spec.name());

    let mut items = Vec::with_capacity(occurrences.len());
    for (idx, text) in occurrences.iter().enumerate() {
        match convert_elem_text(elem, text) {
            Some(value) => items.push(value),
            None => {
                return Err(BindError::type_mismatch(
                    ParamSource::Query,
                    spec.name(),
                    format!("element {idx}: '{text}' is not a valid {}", elem.name()),
                ));
            }
        }
    }

    let value = ParamValue::List(items);
    check_constraints(spec.constraints(), ParamSource::Query, spec.name(), &value)?;
    Ok(value)
}

fn bind_body(spec: &ParameterSpec, raw: &RawRequest) -> Result<ParamValue, Vec<BindError>> {
    let Some(body) = raw.body() else {
        return absent(spec, ParamSource::Body, spec.name()).map_err(|err| vec![err]);
    };
    note_deprecated(spec, spec.name());
    bind_json(spec, spec.name(), body)
}

fn bind_json(
    spec: &ParameterSpec,
    name: &str,
    json: &serde_json::Value,
) -> Result<ParamValue, Vec<BindError>> {
    // JSON null satisfies a spec declared optional with a null default
    if json.is_null() && nullable(spec) {
        return Ok(ParamValue::Null);
    }

    match spec.param_type() {
        ParamType::Object(object) => {
            let serde_json::Value::Object(map) = json else {
                return Err(vec![BindError::type_mismatch(
                    ParamSource::Body,
                    name,
                    format!("expected object, got {}", json_type_name(json)),
                )]);
            };
            bind_object(object, name, map)
        }
        _ => {
            let value = convert_json(spec, name, json).map_err(|err| vec![err])?;
            check_constraints(spec.constraints(), ParamSource::Body, name, &value)
                .map_err(|err| vec![err])?;
            Ok(value)
        }
    }
}

fn bind_object(
    object: &ObjectSpec,
    prefix: &str,
    map: &serde_json::Map<String, serde_json::Value>,
) -> Result<ParamValue, Vec<BindError>> {
    let mut fields = IndexMap::new();
    let mut errors = Vec::new();

    // undeclared keys are ignored
    for field in object.fields() {
        let dotted = format!("{prefix}.{}", field.name());
        match map.get(field.wire_name()) {
            None => match absent(field, ParamSource::Body, &dotted) {
                Ok(value) => {
                    fields.insert(field.name().to_string(), value);
                }
                Err(err) => errors.push(err),
            },
            Some(json) => {
                note_deprecated(field, &dotted);
                match bind_json(field, &dotted, json) {
                    Ok(value) => {
                        fields.insert(field.name().to_string(), value);
                    }
                    Err(mut errs) => errors.append(&mut errs),
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(ParamValue::Object(fields))
    } else {
        Err(errors)
    }
}

fn absent(spec: &ParameterSpec, source: ParamSource, name: &str) -> Result<ParamValue, BindError> {
    if let Some(default) = spec.default() {
        return Ok(default.clone());
    }
    if matches!(spec.param_type(), ParamType::List(_)) {
        return Ok(ParamValue::List(Vec::new()));
    }
    Err(BindError::missing_required(source, name))
}

fn convert_text(
    spec: &ParameterSpec,
    source: ParamSource,
    name: &str,
    text: &str,
) -> Result<ParamValue, BindError> {
    match spec.param_type() {
        ParamType::String => Ok(ParamValue::String(text.to_string())),
        ParamType::Int => text.parse::<i64>().map(ParamValue::Int).map_err(|_| {
            BindError::type_mismatch(source, name, format!("'{text}' is not a valid integer"))
        }),
        ParamType::Float => text.parse::<f64>().map(ParamValue::Float).map_err(|_| {
            BindError::type_mismatch(source, name, format!("'{text}' is not a valid float"))
        }),
        ParamType::Bool => parse_bool(text).map(ParamValue::Bool).ok_or_else(|| {
            BindError::type_mismatch(source, name, format!("'{text}' is not a valid boolean"))
        }),
        ParamType::Enum(variants) => {
            if variants.contains(text) {
                Ok(ParamValue::String(text.to_string()))
            } else {
                Err(BindError::enum_violation(
                    source,
                    name,
                    format!("'{text}' is not one of: {}", variants.expected_one_of()),
                ))
            }
        }
        // lists and objects never reach scalar conversion
        ParamType::List(_) | ParamType::Object(_) => Err(BindError::type_mismatch(
            source,
            name,
            format!("expected {}", spec.param_type().name()),
        )),
    }
}

fn convert_json(
    spec: &ParameterSpec,
    name: &str,
    json: &serde_json::Value,
) -> Result<ParamValue, BindError> {
    let mismatch = |expected: &str| {
        BindError::type_mismatch(
            ParamSource::Body,
            name,
            format!("expected {expected}, got {}", json_type_name(json)),
        )
    };

    match spec.param_type() {
        ParamType::String => json
            .as_str()
            .map(|s| ParamValue::String(s.to_string()))
            .ok_or_else(|| mismatch("string")),
        ParamType::Int => json
            .as_i64()
            .map(ParamValue::Int)
            .ok_or_else(|| mismatch("integer")),
        ParamType::Float => json
            .as_f64()
            .map(ParamValue::Float)
            .ok_or_else(|| mismatch("float")),
        ParamType::Bool => json
            .as_bool()
            .map(ParamValue::Bool)
            .ok_or_else(|| mismatch("boolean")),
        ParamType::Enum(variants) => {
            let Some(text) = json.as_str() else {
                return Err(mismatch("string"));
            };
            if variants.contains(text) {
                Ok(ParamValue::String(text.to_string()))
            } else {
                Err(BindError::enum_violation(
                    ParamSource::Body,
                    name,
                    format!("'{text}' is not one of: {}", variants.expected_one_of()),
                ))
            }
        }
        ParamType::List(elem) => {
            let Some(array) = json.as_array() else {
                return Err(mismatch("array"));
            };
            let mut items = Vec::with_capacity(array.len());
            for (idx, item) in array.iter().enumerate() {
                match convert_elem_json(*elem, item) {
                    Some(value) => items.push(value),
                    None => {
                        return Err(BindError::type_mismatch(
                            ParamSource::Body,
                            name,
                            format!(
                                "element {idx}: expected {}, got {}",
                                elem.name(),
                                json_type_name(item)
                            ),
                        ));
                    }
                }
            }
            Ok(ParamValue::List(items))
        }
        // objects are handled before conversion
        ParamType::Object(_) => Err(mismatch("object")),
    }
}

fn convert_elem_text(elem: ElemType, text: &str) -> Option<ParamValue> {
    match elem {
        ElemType::String => Some(ParamValue::String(text.to_string())),
        ElemType::Int => text.parse::<i64>().ok().map(ParamValue::Int),
        ElemType::Float => text.parse::<f64>().ok().map(ParamValue::Float),
        ElemType::Bool => parse_bool(text).map(ParamValue::Bool),
    }
}

fn convert_elem_json(elem: ElemType, json: &serde_json::Value) -> Option<ParamValue> {
    match elem {
        ElemType::String => json.as_str().map(|s| ParamValue::String(s.to_string())),
        ElemType::Int => json.as_i64().map(ParamValue::Int),
        ElemType::Float => json.as_f64().map(ParamValue::Float),
        ElemType::Bool => json.as_bool().map(ParamValue::Bool),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn check_constraints(
    constraints: &Constraints,
    source: ParamSource,
    name: &str,
    value: &ParamValue,
) -> Result<(), BindError> {
    match value {
        ParamValue::String(s) => {
            check_length(constraints, source, name, s.chars().count())?;
            if let Some(pattern) = constraints.pattern() {
                if !pattern.is_full_match(s) {
                    return Err(BindError::pattern_violation(
                        source,
                        name,
                        format!("'{s}' does not match pattern '{}'", pattern.as_str()),
                    ));
                }
            }
            Ok(())
        }
        ParamValue::Int(n) => match numeric_violation(constraints, *n as f64) {
            Some(detail) => Err(BindError::type_mismatch(source, name, detail)),
            None => Ok(()),
        },
        ParamValue::Float(n) => match numeric_violation(constraints, *n) {
            Some(detail) => Err(BindError::type_mismatch(source, name, detail)),
            None => Ok(()),
        },
        ParamValue::List(items) => {
            check_length(constraints, source, name, items.len())?;
            for (idx, item) in items.iter().enumerate() {
                match item {
                    ParamValue::String(s) => {
                        if let Some(pattern) = constraints.pattern() {
                            if !pattern.is_full_match(s) {
                                return Err(BindError::pattern_violation(
                                    source,
                                    name,
                                    format!(
                                        "element {idx} does not match pattern '{}'",
                                        pattern.as_str()
                                    ),
                                ));
                            }
                        }
                    }
                    ParamValue::Int(n) => {
                        if let Some(detail) = numeric_violation(constraints, *n as f64) {
                            return Err(BindError::type_mismatch(
                                source,
                                name,
                                format!("element {idx}: {detail}"),
                            ));
                        }
                    }
                    ParamValue::Float(n) => {
                        if let Some(detail) = numeric_violation(constraints, *n) {
                            return Err(BindError::type_mismatch(
                                source,
                                name,
                                format!("element {idx}: {detail}"),
                            ));
                        }
                    }
                    _ => {}
                }
            }
            Ok(())
        }
        // booleans, objects and nulls carry no constraints
        _ => Ok(()),
    }
}

fn check_length(
    constraints: &Constraints,
    source: ParamSource,
    name: &str,
    length: usize,
) -> Result<(), BindError> {
    if let Some(min) = constraints.min_length() {
        if length < min {
            return Err(BindError::length_violation(
                source,
                name,
                format!("length {length} is less than min_length {min}"),
            ));
        }
    }
    if let Some(max) = constraints.max_length() {
        if length > max {
            return Err(BindError::length_violation(
                source,
                name,
                format!("length {length} is greater than max_length {max}"),
            ));
        }
    }
    Ok(())
}

fn numeric_violation(constraints: &Constraints, value: f64) -> Option<String> {
    if let Some(min) = constraints.minimum() {
        if value < min {
            return Some(format!("{value} is less than minimum {min}"));
        }
    }
    if let Some(max) = constraints.maximum() {
        if value > max {
            return Some(format!("{value} is greater than maximum {max}"));
        }
    }
    None
}

fn nullable(spec: &ParameterSpec) -> bool {
    matches!(spec.default(), Some(ParamValue::Null))
}

fn note_deprecated(spec: &ParameterSpec, name: &str) {
    if spec.deprecated() {
        warn!(param = %name, "deprecated parameter supplied");
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

//! Shape predicates over raw schema nodes.
//!
//! Schema nodes stay as borrowed `serde_json::Value` trees. These functions
//! classify them without mutating or copying.

use serde_json::Value;
use std::borrow::Cow;

/// Extension keys naming an explicit TypeScript type, checked in order.
pub const CUSTOM_TYPE_KEYS: &[&str] = &["x-ts-type", "x-custom-type"];

/// Pointer prefix of intra-document component schemas.
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// The schema's `type`, with a type list reduced to its first non-null entry.
///
/// A list holding only `"null"` normalizes to `"null"`.
pub fn normalized_type(schema: &Value) -> Option<&str> {
    match schema.get("type")? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(types) => {
            let mut names = types.iter().filter_map(Value::as_str);
            let first = names.clone().find(|t| *t != "null");
            first.or_else(|| names.find(|t| *t == "null"))
        }
        _ => None,
    }
}

/// `nullable: true` (3.0) or a type list containing `"null"` (3.1).
pub fn is_nullable(schema: &Value) -> bool {
    if schema.get("nullable").and_then(Value::as_bool) == Some(true) {
        return true;
    }
    schema
        .get("type")
        .and_then(Value::as_array)
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some("null")))
}

/// An explicit `type: object`, or a non-empty `properties` map.
pub fn is_object_shaped(schema: &Value) -> bool {
    normalized_type(schema) == Some("object") || properties(schema).is_some()
}

/// An explicit `type: array`, or any `items` key at all.
pub fn is_array_shaped(schema: &Value) -> bool {
    normalized_type(schema) == Some("array") || schema.get("items").is_some()
}

/// Non-empty `properties` map.
pub fn properties(schema: &Value) -> Option<&serde_json::Map<String, Value>> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .filter(|p| !p.is_empty())
}

/// Non-empty sequence under `key` (`oneOf`, `anyOf`, `allOf`, `enum`).
pub fn non_empty_list<'a>(schema: &'a Value, key: &str) -> Option<&'a [Value]> {
    schema
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .filter(|items| !items.is_empty())
}

/// The custom type override, if any extension key carries a non-empty name.
pub fn custom_type(schema: &Value) -> Option<&str> {
    CUSTOM_TYPE_KEYS
        .iter()
        .filter_map(|key| schema.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|name| !name.is_empty())
}

/// The `$ref` pointer, when it is a string.
pub fn ref_target(schema: &Value) -> Option<&str> {
    schema.get("$ref").and_then(Value::as_str)
}

/// Final path segment of a reference, unescaped, e.g. `Category` for
/// `#/components/schemas/Category`.
pub fn ref_name(reference: &str) -> Cow<'_, str> {
    let segment = reference
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(reference);
    unescape_pointer(segment)
}

/// The component schema name a reference points at, if it is intra-document.
pub fn component_name(reference: &str) -> Option<Cow<'_, str>> {
    reference
        .strip_prefix(COMPONENT_SCHEMA_PREFIX)
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .map(unescape_pointer)
}

/// RFC 6901 unescaping of one pointer segment: `~1` is `/`, `~0` is `~`.
pub fn unescape_pointer(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') {
        Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(segment)
    }
}

pub fn description(schema: &Value) -> Option<&str> {
    schema.get("description").and_then(Value::as_str)
}

pub fn format(schema: &Value) -> Option<&str> {
    schema.get("format").and_then(Value::as_str)
}

/// Names listed under `required`, verbatim.
pub fn required(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// A combinator next to direct `properties`; only one of them can win.
pub fn mixes_combinator_and_properties(schema: &Value) -> bool {
    properties(schema).is_some()
        && ["oneOf", "anyOf", "allOf"]
            .iter()
            .any(|key| non_empty_list(schema, key).is_some())
}

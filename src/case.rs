//! Key casing between the wire (camelCase) and the database (snake_case).

use serde_json::{Map, Value};

/// `"icon_name"` -> `"iconName"`.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `"routeFrom"` -> `"route_from"`. Already-snake keys pass through unchanged.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn rename_keys(obj: Map<String, Value>, f: fn(&str) -> String) -> Map<String, Value> {
    obj.into_iter().map(|(k, v)| (f(&k), v)).collect()
}

/// Response rows: database column names to wire names.
pub fn keys_to_camel_case(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(rename_keys(map, to_camel_case)),
        other => other,
    }
}

/// Request bodies: wire names to database column names.
pub fn keys_to_snake_case(obj: Map<String, Value>) -> Map<String, Value> {
    rename_keys(obj, to_snake_case)
}

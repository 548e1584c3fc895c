use std::collections::BTreeMap;
use std::iter::FromIterator;

use ::serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, QuadError};

fn serde_error(code: &str, err: impl ToString) -> QuadError {
    QuadError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut ordered = BTreeMap::new();
            for (key, val) in map {
                ordered.insert(key, canonicalize(val));
            }
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, QuadError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Same as [`to_canonical_json_bytes`] but pretty printed.
pub fn to_canonical_json_pretty<T: Serialize>(value: &T) -> Result<String, QuadError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    serde_json::to_string_pretty(&canonicalize(value)).map_err(|err| serde_error("json-write", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_recursively() {
        let value = json!({"b": 1, "a": {"d": 2, "c": [ {"z": 0, "y": 1} ]}});
        let bytes = to_canonical_json_bytes(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":{"c":[{"y":1,"z":0}],"d":2},"b":1}"#
        );
    }

    #[test]
    fn non_finite_floats_encode_as_null() {
        let bytes = to_canonical_json_bytes(&vec![f64::NAN, 1.5]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "[null,1.5]");
    }
}

//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore wraps every field value in a single-key object naming its
//! type, e.g. `{"stringValue": "Sales"}` or `{"integerValue": "42"}`.

use serde_json::{Map, Number, Value};

/// Decodes a typed Firestore value into plain JSON.
///
/// Unknown or malformed encodings decode to `Value::Null`, which item
/// normalization then treats as a missing field.
pub fn decode_value(typed: &Value) -> Value {
    let Some(obj) = typed.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "booleanValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| inner.clone()),
            other => other.clone()
        },
        "doubleValue" => match inner {
            Value::Number(_) => inner.clone(),
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number),
            _ => Value::Null
        },
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default()
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default()
        ),
        _ => Value::Null
    }
}

/// Decodes a document's `fields` map.
pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, typed)| (name.clone(), decode_value(typed)))
        .collect()
}

/// Encodes plain JSON as a typed Firestore value.
pub fn encode_value(value: &Value) -> Value {
    let mut typed = Map::new();
    match value {
        Value::Null => {
            typed.insert("nullValue".to_string(), Value::Null);
        }
        Value::Bool(b) => {
            typed.insert("booleanValue".to_string(), Value::Bool(*b));
        }
        Value::Number(n) if n.is_i64() || n.is_u64() => {
            typed.insert("integerValue".to_string(), Value::String(n.to_string()));
        }
        Value::Number(n) => {
            typed.insert("doubleValue".to_string(), Value::Number(n.clone()));
        }
        Value::String(s) => {
            typed.insert("stringValue".to_string(), Value::String(s.clone()));
        }
        Value::Array(values) => {
            let mut array = Map::new();
            array.insert(
                "values".to_string(),
                Value::Array(values.iter().map(encode_value).collect())
            );
            typed.insert("arrayValue".to_string(), Value::Object(array));
        }
        Value::Object(fields) => {
            let mut map = Map::new();
            map.insert("fields".to_string(), Value::Object(encode_fields(fields)));
            typed.insert("mapValue".to_string(), Value::Object(map));
        }
    }
    Value::Object(typed)
}

pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode_value(&json!({"stringValue": "Sales"})), json!("Sales"));
        assert_eq!(decode_value(&json!({"integerValue": "42"})), json!(42));
        assert_eq!(decode_value(&json!({"booleanValue": true})), json!(true));
        assert_eq!(
            decode_value(&json!({"timestampValue": "2024-01-01T00:00:00Z"})),
            json!("2024-01-01T00:00:00Z")
        );
        assert_eq!(decode_value(&json!({"nullValue": null})), Value::Null);
    }

    #[test]
    fn test_decode_malformed_is_null() {
        assert_eq!(decode_value(&json!("bare")), Value::Null);
        assert_eq!(decode_value(&json!({})), Value::Null);
        assert_eq!(decode_value(&json!({"geoPointValue": {}})), Value::Null);
    }

    #[test]
    fn test_decode_nested() {
        let typed = json!({"mapValue": {"fields": {
            "tags": {"arrayValue": {"values": [{"stringValue": "a"}, {"integerValue": "1"}]}}
        }}});
        assert_eq!(decode_value(&typed), json!({"tags": ["a", 1]}));
    }

    #[test]
    fn test_encode_item_body() {
        let body = json!({"title": "Weekly", "downloadUrl": "#", "count": 3});
        let encoded = encode_fields(body.as_object().unwrap());
        assert_eq!(encoded["title"], json!({"stringValue": "Weekly"}));
        assert_eq!(encoded["count"], json!({"integerValue": "3"}));
    }

    #[test]
    fn test_encode_decode_agree() {
        let body = json!({"title": "Weekly", "group": "Sales", "n": 2, "ok": false});
        let fields = body.as_object().unwrap();
        assert_eq!(&decode_fields(&encode_fields(fields)), fields);
    }
}

//! Conversion between plain JSON and Firestore's typed `Value` encoding.

use crate::core::Fields;
use crate::utils::error::{AdminError, Result};
use serde_json::{json, Map, Value};

pub fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    Value::Object(encoded)
}

pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore 的 int64 以十進位字串傳輸
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(key, value)| (key.clone(), encode_value(value)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decodes a document's `fields` object. A missing object decodes as empty.
pub fn decode_fields(fields: Option<&Value>) -> Result<Fields> {
    let Some(fields) = fields else {
        return Ok(Fields::new());
    };
    let object = fields.as_object().ok_or_else(|| malformed("fields", fields))?;
    object
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

pub fn decode_value(value: &Value) -> Result<Value> {
    let object = value.as_object().ok_or_else(|| malformed("value", value))?;
    let (kind, inner) = object.iter().next().ok_or_else(|| malformed("value", value))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(Value::Bool(inner.as_bool().unwrap_or(false))),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed.map(Value::from).ok_or_else(|| malformed(kind, inner))
        }
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            // NaN / Infinity 以字串表示，JSON 無法承載
            Value::String(_) => Ok(Value::Null),
            _ => Err(malformed(kind, inner)),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => Ok(inner.clone()),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = decode_fields(inner.get("fields"))?;
            Ok(Value::Object(fields.into_iter().collect()))
        }
        other => Err(AdminError::SerializationError(serde::de::Error::custom(
            format!("unknown Firestore value type '{}'", other),
        ))),
    }
}

fn malformed(kind: &str, value: &Value) -> AdminError {
    AdminError::SerializationError(serde::de::Error::custom(format!(
        "malformed Firestore {}: {}",
        kind, value
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_service_fields() {
        let mut fields = Fields::new();
        fields.insert("title".to_string(), json!("Welding"));
        fields.insert("orderIndex".to_string(), json!(3));

        let encoded = encode_fields(&fields);

        assert_eq!(encoded["title"], json!({"stringValue": "Welding"}));
        assert_eq!(encoded["orderIndex"], json!({"integerValue": "3"}));
    }

    #[test]
    fn test_encode_nested_values() {
        let encoded = encode_value(&json!({"tags": ["a", 1.5, null, true]}));
        assert_eq!(
            encoded,
            json!({"mapValue": {"fields": {"tags": {"arrayValue": {"values": [
                {"stringValue": "a"},
                {"doubleValue": 1.5},
                {"nullValue": null},
                {"booleanValue": true}
            ]}}}}})
        );
    }

    #[test]
    fn test_decode_document_fields() {
        let raw = json!({
            "name": {"stringValue": "Copper"},
            "orderIndex": {"integerValue": "12"},
            "weight": {"doubleValue": 8.96},
            "aliases": {"arrayValue": {}},
            "meta": {"mapValue": {"fields": {"active": {"booleanValue": true}}}}
        });

        let fields = decode_fields(Some(&raw)).unwrap();

        assert_eq!(fields["name"], json!("Copper"));
        assert_eq!(fields["orderIndex"], json!(12));
        assert_eq!(fields["weight"], json!(8.96));
        assert_eq!(fields["aliases"], json!([]));
        assert_eq!(fields["meta"], json!({"active": true}));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_value(&json!({"integerValue": "twelve"})).is_err());
        assert!(decode_value(&json!({"mysteryValue": 1})).is_err());
        assert!(decode_value(&json!("bare")).is_err());
        assert!(decode_fields(None).unwrap().is_empty());
    }
}

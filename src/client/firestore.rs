//! Wire types and value decoding for the document store's REST API.
//!
//! The store encodes every field as a single-key object naming its type, e.g.
//! `{"stringValue": "Red Shoes"}` or `{"integerValue": "20"}`. Documents are
//! decoded to plain JSON before being deserialized into [`Product`].

use crate::models::Product;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// One element of a `documents:batchGet` response array.
#[derive(Debug, Deserialize)]
pub(crate) struct BatchGetEntry {
    /// Present when the document exists
    #[serde(default)]
    pub found: Option<Document>,

    /// Resource name of a requested document that does not exist
    #[serde(default)]
    pub missing: Option<String>,
}

/// A stored document.
#[derive(Debug, Deserialize)]
pub(crate) struct Document {
    /// Full resource name; the last path segment is the document id
    pub name: String,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Document id taken from the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Decode into a product, binding the document id.
    ///
    /// Never fails: fields of an unexpected type end up in `Product::extra`.
    pub fn into_product(self) -> Product {
        let id = self.id().to_string();

        let mut fields: Map<String, Value> = self
            .fields
            .into_iter()
            .map(|(key, value)| (key, decode_value(value)))
            .collect();
        fields.insert("id".to_string(), Value::String(id));

        Product::from(fields)
    }
}

/// Decode one typed store value into plain JSON.
///
/// Integers arrive as decimal strings and are turned back into numbers. Types
/// without a JSON counterpart (timestamps, references, bytes) become strings;
/// unknown encodings decode to `null`.
pub fn decode_value(value: Value) -> Value {
    let map = match value {
        Value::Object(map) => map,
        other => return other,
    };
    let (kind, inner) = match map.into_iter().next() {
        Some(entry) => entry,
        None => return Value::Null,
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" | "geoPointValue" | "stringValue" | "timestampValue"
        | "referenceValue" | "bytesValue" => inner,
        "integerValue" => {
            let parsed = inner.as_str().and_then(|raw| raw.parse::<i64>().ok());
            match parsed {
                Some(n) => Value::Number(Number::from(n)),
                None => inner,
            }
        }
        "arrayValue" => {
            let values = match inner {
                Value::Object(mut array) => array.remove("values"),
                _ => None,
            };
            match values {
                Some(Value::Array(items)) => {
                    Value::Array(items.into_iter().map(decode_value).collect())
                }
                _ => Value::Array(Vec::new()),
            }
        }
        "mapValue" => {
            let fields = match inner {
                Value::Object(mut nested) => nested.remove("fields"),
                _ => None,
            };
            match fields {
                Some(Value::Object(fields)) => Value::Object(
                    fields
                        .into_iter()
                        .map(|(key, value)| (key, decode_value(value)))
                        .collect(),
                ),
                _ => Value::Object(Map::new()),
            }
        }
        other => {
            tracing::debug!("Unsupported store value type: {}", other);
            Value::Null
        }
    }
}

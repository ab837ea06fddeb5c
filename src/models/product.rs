//! Product model representing a record in the primary document store.

use crate::domain::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A product document from the primary store.
///
/// Every attribute other than `id` is optional: documents are schemaless, and a
/// missing field is carried as `None` rather than rejected. Fields beyond the
/// catalogue attributes are kept in `extra` so hydrated search results are the
/// complete document.
///
/// Deserialization never fails on a JSON object: a catalogue attribute holding an
/// unexpected type is left unset and its raw value is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "Map<String, Value>")]
pub struct Product {
    /// Document id assigned by the store. Snapshots delivered with change events
    /// may omit it; the event's record id is bound before projection.
    pub id: String,

    /// Product title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Long-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered category tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    /// Store-internal price field. Kept as a JSON number so integer costs
    /// round-trip as integers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Number>,

    /// Any other document fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Take `key` out of `fields` if `convert` accepts it. A rejected value stays in
/// `fields`; `null` is dropped.
fn take_field<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let converted = match fields.get(key) {
        None => return None,
        Some(Value::Null) => None,
        Some(value) => match convert(value) {
            Some(converted) => Some(converted),
            None => {
                tracing::debug!("Keeping mistyped product field {:?} as an extra field", key);
                return None;
            }
        },
    };
    fields.remove(key);
    converted
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn as_string_list(value: &Value) -> Option<Vec<String>> {
    value.as_array()?.iter().map(as_string).collect()
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        _ => None,
    }
}

impl From<Map<String, Value>> for Product {
    fn from(mut fields: Map<String, Value>) -> Self {
        // A non-string id cannot name a document and is not kept
        let id = fields
            .remove("id")
            .and_then(|id| as_string(&id))
            .unwrap_or_default();
        let title = take_field(&mut fields, "title", as_string);
        let description = take_field(&mut fields, "description", as_string);
        let categories = take_field(&mut fields, "categories", as_string_list);
        let cost = take_field(&mut fields, "cost", as_number);

        Self {
            id,
            title,
            description,
            categories,
            cost,
            extra: fields,
        }
    }
}

impl Product {
    /// Create a product with an id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_cost(mut self, cost: impl Into<Number>) -> Self {
        self.cost = Some(cost.into());
        self
    }

    /// Bind the document id from the change event onto this snapshot.
    pub fn with_id(mut self, id: &ProductId) -> Self {
        self.id = id.as_str().to_string();
        self
    }
}

//! Search-index projection of a product.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// The shape of a product as stored in the search index.
///
/// Built only by [`crate::projection::project`]. Absent attributes are omitted
/// from the serialized object rather than written as explicit nulls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IndexEntry {
    /// Equal to the source product's id
    #[serde(rename = "objectID")]
    pub object_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    /// Projected from the product's `cost`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
}

//! Change projector: maps a product document to its search-index entry.
//!
//! The projection is a fixed rename table. It is pure and total: it never
//! performs I/O and never rejects a product, it only narrows the shape.

use crate::models::{IndexEntry, Product};

/// One row of the projection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name on the stored product document
    pub record_field: &'static str,
    /// Field name on the index entry
    pub index_field: &'static str,
}

/// Fields copied from a product into its index entry.
///
/// `cost` is published as `price`. Fields not listed here are never sent to the
/// index. [`project`] must agree with this table; the unit tests check it.
pub const FIELD_MAPPING: &[FieldMapping] = &[
    FieldMapping { record_field: "id", index_field: "objectID" },
    FieldMapping { record_field: "title", index_field: "title" },
    FieldMapping { record_field: "description", index_field: "description" },
    FieldMapping { record_field: "categories", index_field: "categories" },
    FieldMapping { record_field: "cost", index_field: "price" },
];

/// Project a product into the entry stored in the search index.
pub fn project(record: &Product) -> IndexEntry {
    IndexEntry {
        object_id: record.id.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        categories: record.categories.clone(),
        price: record.cost.clone(),
    }
}

//! Change events delivered by the store trigger layer.

use crate::domain::ProductId;
use crate::models::Product;
use serde::{Deserialize, Serialize};

/// A single create, update or delete of a product document.
///
/// Delivery is at-least-once and unordered, so the same event may arrive more
/// than once and events for one product may arrive out of order. Events are
/// consumed once per delivery and never stored.
///
/// JSON form:
///
/// ```json
/// { "type": "updated", "record_id": "p1", "record": { "title": "Blue Shoes", "cost": 20 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A document was created; `record` is the new snapshot.
    Created { record_id: ProductId, record: Product },

    /// A document was changed; `record` is the post-change snapshot.
    Updated { record_id: ProductId, record: Product },

    /// A document was removed.
    Deleted { record_id: ProductId },
}

impl ChangeEvent {
    /// The id of the product this event concerns.
    pub fn record_id(&self) -> &ProductId {
        match self {
            Self::Created { record_id, .. }
            | Self::Updated { record_id, .. }
            | Self::Deleted { record_id } => record_id,
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
        }
    }
}

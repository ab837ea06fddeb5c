//! Data models for the product catalogue.
//!
//! This module contains the record held by the primary store, its search-index
//! projection, and the change events that drive index synchronization.

pub mod change_event;
pub mod index_entry;
pub mod product;

pub use change_event::ChangeEvent;
pub use index_entry::IndexEntry;
pub use product::Product;

//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts. Value objects
//! validate at construction time and prevent invalid data (such as an empty
//! product id reaching the index as an object id) from being represented.

pub mod errors;
pub mod product_id;

pub use errors::ValidationError;
pub use product_id::ProductId;

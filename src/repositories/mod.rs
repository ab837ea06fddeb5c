mod algolia_index_repository;
mod firestore_product_repository;
mod traits;

pub use algolia_index_repository::AlgoliaIndexRepository;
pub use firestore_product_repository::FirestoreProductRepository;
pub use traits::{ProductRepository, SearchIndexRepository};

//! In-memory repository doubles shared by the integration tests.

mod mock_index_repository;
mod mock_product_repository;

#[allow(unused_imports)]
pub use mock_index_repository::MockIndexRepository;
#[allow(unused_imports)]
pub use mock_product_repository::MockProductRepository;

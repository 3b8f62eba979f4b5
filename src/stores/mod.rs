// Stores own all database access. Each store holds a cloned (pooled)
// connection and returns internal errors; HTTP concerns stay in the API
// layer.

pub mod brand_store;
pub mod category_store;
pub mod credential_store;
pub mod detail_store;
pub mod product_store;

pub use brand_store::BrandStore;
pub use category_store::CategoryStore;
pub use credential_store::CredentialStore;
pub use detail_store::DetailStore;
pub use product_store::{ProductInput, ProductStore};

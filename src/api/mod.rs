// API layer - HTTP endpoints

pub mod auth;
pub mod brands;
pub mod categories;
pub mod details;
pub mod health;
pub mod products;

pub use auth::AuthApi;
pub use brands::BrandsApi;
pub use categories::CategoriesApi;
pub use details::DetailsApi;
pub use health::HealthApi;
pub use products::ProductsApi;

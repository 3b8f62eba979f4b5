// SeaORM entities backing the auth and catalog schemas.

pub mod brand;
pub mod category;
pub mod detail;
pub mod product;
pub mod product_category;
pub mod role;
pub mod user;
pub mod user_role;
pub mod user_token;

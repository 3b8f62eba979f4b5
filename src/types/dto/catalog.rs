use poem_openapi::Object;

use crate::types::db;

/// Request model for creating or updating a product
#[derive(Object, Debug)]
pub struct ProductRequest {
    /// Product title (1-200 characters)
    #[oai(validator(min_length = 1, max_length = 200))]
    pub title: String,

    /// Optional product description
    pub description: Option<String>,

    /// Owning brand id, if any
    pub brand_id: Option<i32>,

    /// List price
    #[oai(validator(minimum(value = "0")))]
    pub price: f64,

    /// Absolute discount applied to the price
    #[oai(validator(minimum(value = "0")), default)]
    pub discount: f64,

    /// Category ids attached to this product; replaces prior links on update
    #[oai(default)]
    pub category_ids: Vec<i32>,
}

/// Response model representing a product
#[derive(Object, Debug)]
pub struct ProductResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub brand_id: Option<i32>,
    pub price: f64,
    pub discount: f64,
    /// Category ids attached to this product
    pub category_ids: Vec<i32>,
    /// Creation timestamp (unix seconds)
    pub created_at: i64,
}

impl ProductResponse {
    pub fn from_model(model: db::product::Model, category_ids: Vec<i32>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            brand_id: model.brand_id,
            price: model.price,
            discount: model.discount,
            category_ids,
            created_at: model.created_at,
        }
    }
}

/// Request model for creating or updating a brand
#[derive(Object, Debug)]
pub struct BrandRequest {
    /// Brand name (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub name: String,
}

/// Response model representing a brand
#[derive(Object, Debug)]
pub struct BrandResponse {
    pub id: i32,
    pub name: String,
    pub created_at: i64,
}

impl From<db::brand::Model> for BrandResponse {
    fn from(model: db::brand::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

/// Request model for creating or updating a category
#[derive(Object, Debug)]
pub struct CategoryRequest {
    /// Category name (1-100 characters)
    #[oai(validator(min_length = 1, max_length = 100))]
    pub name: String,

    /// Optional parent category id
    pub parent_id: Option<i32>,

    /// Ordering priority (lower sorts first)
    #[oai(default)]
    pub priority: i32,
}

/// Response model representing a category
#[derive(Object, Debug)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub priority: i32,
    pub created_at: i64,
}

impl From<db::category::Model> for CategoryResponse {
    fn from(model: db::category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
            priority: model.priority,
            created_at: model.created_at,
        }
    }
}

/// Request model for creating or updating a detail entry
#[derive(Object, Debug)]
pub struct DetailRequest {
    /// Detail title (1-200 characters)
    #[oai(validator(min_length = 1, max_length = 200))]
    pub title: String,

    /// Optional body text
    pub description: Option<String>,

    /// Category this detail belongs to
    pub category_id: i32,
}

/// Response model representing a detail entry
#[derive(Object, Debug)]
pub struct DetailResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category_id: i32,
    pub created_at: i64,
}

impl From<db::detail::Model> for DetailResponse {
    fn from(model: db::detail::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            category_id: model.category_id,
            created_at: model.created_at,
        }
    }
}

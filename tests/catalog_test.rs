// Catalog CRUD across products, brands, categories and details.

mod common;

use common::setup_db;
use storefront_backend::stores::{
    BrandStore, CategoryStore, DetailStore, ProductInput, ProductStore,
};

#[tokio::test]
async fn product_with_brand_and_categories() {
    let db = setup_db().await;
    let brands = BrandStore::new(db.clone());
    let categories = CategoryStore::new(db.clone());
    let products = ProductStore::new(db.clone());

    let brand = brands.create("Acme").await.unwrap();
    let cat_a = categories.create("Audio", None, 1).await.unwrap();
    let cat_b = categories.create("Wireless", None, 2).await.unwrap();

    let (created, links) = products
        .create(ProductInput {
            title: "Headphones".to_string(),
            description: Some("Over-ear".to_string()),
            brand_id: Some(brand.id),
            price: 129.90,
            discount: 10.0,
            category_ids: vec![cat_a.id, cat_b.id],
        })
        .await
        .unwrap();

    assert_eq!(created.brand_id, Some(brand.id));
    assert_eq!(links, vec![cat_a.id, cat_b.id]);

    let listed = products.list().await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn soft_delete_is_invisible_but_not_destructive() {
    let db = setup_db().await;
    let brands = BrandStore::new(db.clone());

    let brand = brands.create("Ghost").await.unwrap();
    brands.delete(brand.id).await.unwrap();

    // Hidden from reads
    assert!(brands.get(brand.id).await.is_err());
    assert!(brands.list().await.unwrap().is_empty());

    // Still present in the table
    use sea_orm::EntityTrait;
    let raw = storefront_backend::types::db::brand::Entity::find_by_id(brand.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(raw.is_deleted);
}

#[tokio::test]
async fn details_follow_their_category() {
    let db = setup_db().await;
    let categories = CategoryStore::new(db.clone());
    let details = DetailStore::new(db.clone());

    let specs = categories.create("Specs", None, 0).await.unwrap();
    let shipping = categories.create("Shipping", None, 1).await.unwrap();

    let detail = details
        .create("Weight", Some("1.2kg".to_string()), specs.id)
        .await
        .unwrap();

    let moved = details
        .update(detail.id, "Weight", Some("1.2kg".to_string()), shipping.id)
        .await
        .unwrap();
    assert_eq!(moved.category_id, shipping.id);
}

pub use sea_orm_migration::prelude::*;

mod m20250810_000001_create_auth_schema;
mod m20250810_000002_create_catalog_schema;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000001_create_auth_schema::Migration),
            Box::new(m20250810_000002_create_catalog_schema::Migration),
        ]
    }
}

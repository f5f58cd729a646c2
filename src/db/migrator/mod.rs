use sea_orm_migration::prelude::*;

mod m20250601_create_catalog;
mod m20250602_create_admins;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_create_catalog::Migration),
            Box::new(m20250602_create_admins::Migration),
        ]
    }
}

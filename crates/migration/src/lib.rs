pub use sea_orm_migration::prelude::*;

mod m20260605_000001_init;
mod m20260718_000002_budgets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260605_000001_init::Migration),
            Box::new(m20260718_000002_budgets::Migration),
        ]
    }
}

//! Seeds the default categories.
//!
//! The insert skips rows that already exist under `uq_category_key`, so
//! running it again, or from several processes at once, leaves exactly one
//! copy of each default.

use pocketbook_core::category::{DEFAULT_CATEGORIES, DefaultCategory};
use sea_orm_migration::prelude::*;

use crate::entities::categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Builds the idempotent insert of every default category.
pub(crate) fn seed_statement(defaults: &[DefaultCategory]) -> InsertStatement {
    let mut insert = Query::insert();
    insert.into_table(categories::Entity).columns([
        categories::Column::Name,
        categories::Column::Kind,
        categories::Column::Color,
        categories::Column::Icon,
        categories::Column::IsDefault,
    ]);

    for category in defaults {
        insert.values_panic([
            category.name.into(),
            category.kind.as_str().into(),
            category.color.into(),
            category.icon.into(),
            true.into(),
        ]);
    }

    insert.on_conflict(
        OnConflict::columns([
            categories::Column::UserId,
            categories::Column::Name,
            categories::Column::Kind,
        ])
        .do_nothing()
        .to_owned(),
    );
    insert
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();
        let result = db.execute(backend.build(&seed_statement(&DEFAULT_CATEGORIES))).await?;

        tracing::info!(
            inserted = result.rows_affected(),
            "Seeded default categories"
        );
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DELETE FROM categories WHERE is_default = true;")
            .await?;
        Ok(())
    }
}

//! Category repository: defaults plus each user's own categories.

use chrono::Utc;
use pocketbook_core::category::{
    Category, CategoryError, CategoryUpdate, NewCategory, sort_for_listing,
};
use pocketbook_core::transaction::TransactionKind as CoreKind;
use pocketbook_shared::types::{CategoryId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryTrait, Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::{categories, sea_orm_active_enums::TransactionKind};

fn store_err(err: &DbErr) -> CategoryError {
    CategoryError::Store(err.to_string())
}

/// Categories `owner` can see: every default plus their own.
fn visible_to(owner: UserId) -> Condition {
    Condition::any()
        .add(categories::Column::IsDefault.eq(true))
        .add(categories::Column::UserId.eq(owner.into_inner()))
}

/// Categories `owner` may change: their own, never a default.
fn editable_by(owner: UserId) -> Condition {
    Condition::all()
        .add(categories::Column::UserId.eq(owner.into_inner()))
        .add(categories::Column::IsDefault.eq(false))
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists defaults and `owner`'s categories, defaults first, then by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        owner: UserId,
        kind: Option<CoreKind>,
    ) -> Result<Vec<Category>, CategoryError> {
        let models = categories::Entity::find()
            .filter(visible_to(owner))
            .apply_if(kind, |query, k| {
                query.filter(categories::Column::Kind.eq(TransactionKind::from(k)))
            })
            .all(&self.db)
            .await
            .map_err(|e| store_err(&e))?;

        let mut list: Vec<Category> = models.into_iter().map(Category::from).collect();
        sort_for_listing(&mut list);
        Ok(list)
    }

    /// Creates a category owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if a default or one of `owner`'s categories already
    /// has the same name and kind.
    pub async fn create(
        &self,
        owner: UserId,
        input: NewCategory,
    ) -> Result<Category, CategoryError> {
        let existing = categories::Entity::find()
            .filter(visible_to(owner))
            .filter(categories::Column::Name.eq(input.name.as_str()))
            .filter(categories::Column::Kind.eq(TransactionKind::from(input.kind)))
            .count(&self.db)
            .await
            .map_err(|e| store_err(&e))?;
        if existing > 0 {
            return Err(duplicate(&input.name, input.kind));
        }

        let now = Utc::now().fixed_offset();
        let model = categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(Some(owner.into_inner())),
            name: Set(input.name.clone()),
            kind: Set(input.kind.into()),
            color: Set(input.color),
            icon: Set(input.icon),
            is_default: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = model
            .insert(&self.db)
            .await
            .map_err(|e| unique_or_store(&e, &input.name, input.kind))?;
        tracing::debug!(user_id = %owner, category_id = %stored.id, "Category created");
        Ok(stored.into())
    }

    /// Updates one of `owner`'s categories.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for defaults, missing ids and other users'
    /// categories.
    pub async fn update(
        &self,
        owner: UserId,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryError> {
        let model = categories::Entity::find_by_id(id.into_inner())
            .filter(editable_by(owner))
            .one(&self.db)
            .await
            .map_err(|e| store_err(&e))?
            .ok_or(CategoryError::NotFound(id))?;

        let mut category = Category::from(model.clone());
        update.apply_to(&mut category);

        let mut active = model.into_active_model();
        active.name = Set(category.name.clone());
        active.color = Set(category.color);
        active.icon = Set(category.icon);
        active.updated_at = Set(Utc::now().fixed_offset());

        let stored = active
            .update(&self.db)
            .await
            .map_err(|e| unique_or_store(&e, &category.name, category.kind))?;
        Ok(stored.into())
    }

    /// Deletes one of `owner`'s categories.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for defaults, missing ids and other users'
    /// categories.
    pub async fn delete(&self, owner: UserId, id: CategoryId) -> Result<(), CategoryError> {
        let result = categories::Entity::delete_many()
            .filter(categories::Column::Id.eq(id.into_inner()))
            .filter(editable_by(owner))
            .exec(&self.db)
            .await
            .map_err(|e| store_err(&e))?;

        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }
}

fn duplicate(name: &str, kind: CoreKind) -> CategoryError {
    CategoryError::Duplicate {
        name: name.to_string(),
        kind: kind.to_string(),
    }
}

fn unique_or_store(err: &DbErr, name: &str, kind: CoreKind) -> CategoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(name, kind),
        _ => store_err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn model(name: &str, owner: Option<Uuid>) -> categories::Model {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        categories::Model {
            id: Uuid::now_v7(),
            user_id: owner,
            name: name.to_string(),
            kind: TransactionKind::Expense,
            color: "#e74c3c".to_string(),
            icon: String::new(),
            is_default: owner.is_none(),
            created_at: at,
            updated_at: at,
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, sea_orm::Value> {
        BTreeMap::from([("num_items", sea_orm::Value::from(n))])
    }

    #[tokio::test]
    async fn test_list_puts_defaults_first() {
        let owner = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model("Aquarium", Some(owner)),
                model("Transport", None),
                model("Food", None),
            ]])
            .into_connection();
        let repo = CategoryRepository::new(db);

        let list = repo.list(UserId::from_uuid(owner), None).await.unwrap();

        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport", "Aquarium"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .into_connection();
        let repo = CategoryRepository::new(db);
        let input = NewCategory::new("Food", "expense", None, None).unwrap();

        let result = repo.create(UserId::new(), input).await;

        assert!(matches!(result, Err(CategoryError::Duplicate { name, .. }) if name == "Food"));
    }

    #[tokio::test]
    async fn test_create_inserts_owned_category() {
        let owner = Uuid::now_v7();
        let stored = model("Pets", Some(owner));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let repo = CategoryRepository::new(db);
        let input = NewCategory::new("Pets", "expense", None, None).unwrap();

        let created = repo.create(UserId::from_uuid(owner), input).await.unwrap();

        assert_eq!(created.id.into_inner(), stored.id);
        assert!(!created.is_default);
        assert_eq!(created.owner_id, Some(UserId::from_uuid(owner)));
    }

    #[tokio::test]
    async fn test_update_of_default_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<categories::Model>::new()])
            .into_connection();
        let repo = CategoryRepository::new(db);
        let id = CategoryId::new();

        let result = repo
            .update(UserId::new(), id, CategoryUpdate::default())
            .await;

        assert!(matches!(result, Err(CategoryError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_of_foreign_category_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = CategoryRepository::new(db);

        let result = repo.delete(UserId::new(), CategoryId::new()).await;

        assert!(matches!(result, Err(CategoryError::NotFound(_))));
    }
}

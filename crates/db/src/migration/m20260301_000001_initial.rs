//! Initial database migration.
//!
//! Creates users, budgets, transactions and categories with their unique
//! constraints and lookup indexes. Requires PostgreSQL 15+ for
//! `NULLS NOT DISTINCT`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    category VARCHAR(100) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    period VARCHAR(16) NOT NULL DEFAULT 'monthly',
    year INTEGER NOT NULL,
    month INTEGER,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_budget_amount CHECK (amount >= 0),
    CONSTRAINT chk_budget_period CHECK (period IN ('monthly', 'yearly')),
    CONSTRAINT chk_budget_month CHECK (
        (period = 'monthly' AND month BETWEEN 1 AND 12)
        OR (period = 'yearly' AND month IS NULL)
    ),
    -- Yearly budgets have no month; NULLS NOT DISTINCT keeps them unique too
    CONSTRAINT uq_budget_key UNIQUE NULLS NOT DISTINCT (user_id, category, period, year, month)
);

CREATE INDEX idx_budgets_lookup ON budgets(user_id, period, year, month);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind VARCHAR(16) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    category VARCHAR(100) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    occurred_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_transaction_amount CHECK (amount >= 0),
    CONSTRAINT chk_transaction_kind CHECK (kind IN ('income', 'expense'))
);

CREATE INDEX idx_transactions_user_date ON transactions(user_id, occurred_at DESC);
CREATE INDEX idx_transactions_spending ON transactions(user_id, kind, occurred_at, category);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    kind VARCHAR(16) NOT NULL,
    color VARCHAR(7) NOT NULL DEFAULT '#3498db',
    icon VARCHAR(32) NOT NULL DEFAULT '',
    is_default BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_category_kind CHECK (kind IN ('income', 'expense')),
    CONSTRAINT chk_category_color CHECK (color ~ '^#[0-9A-Fa-f]{6}$'),
    CONSTRAINT chk_category_owner CHECK (is_default = (user_id IS NULL)),
    CONSTRAINT uq_category_key UNIQUE NULLS NOT DISTINCT (user_id, name, kind)
);

CREATE INDEX idx_categories_user ON categories(user_id, kind);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";

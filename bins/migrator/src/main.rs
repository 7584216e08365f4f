//! Database migration runner for Pocketbook.
//!
//! Reads the connection string from `DATABASE_URL` (or `-u`).
//!
//! Usage:
//!   migrator up      - Run pending migrations, seeding default categories
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use pocketbook_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}

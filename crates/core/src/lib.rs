//! Core business logic for Pocketbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Budgets, reporting periods, and the budget-vs-spending reconciliation engine
//! - `transaction` - Income/expense records and their statistics
//! - `category` - Default and user-defined categories
//! - `auth` - Password hashing
//! - `limits` - Field limits matching the storage schema

pub mod auth;
pub mod budget;
pub mod category;
pub mod limits;
pub mod percent;
pub mod transaction;

//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Budget and transaction repositories also implement the store traits the
//! core services are generic over.

pub mod budget;
pub mod category;
pub mod transaction;
pub mod user;

pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

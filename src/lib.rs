// Expense Tracker - Core Library
// Exposes all modules for use in the server binary and tests

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod expense;
pub mod store;

// Re-export commonly used types
pub use api::{router, ApiError, AppState};
pub use config::Config;
pub use error::StoreError;
pub use expense::{derive_id, Expense, MissingField, NewExpense};
pub use store::ExpenseStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

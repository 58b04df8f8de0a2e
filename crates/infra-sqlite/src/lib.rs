// Birthdays Infrastructure - SQLite Adapter
// Implements: ContactStore, ActivityLog

mod activity_log;
mod connection;
mod contact_store;
mod migration;

pub use activity_log::SqliteActivityLog;
pub use connection::create_pool;
pub use contact_store::SqliteContactStore;
pub use migration::run_migrations;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)

// Domain Layer - Pure business logic and entities

pub mod contact;
pub mod date_rule;
pub mod error;
pub mod report;

// Re-exports
pub use contact::{ContactId, EligibleContact};
pub use date_rule::{DateRule, DateUnit, Direction};
pub use error::DomainError;
pub use report::{RunReport, SendCounts, SendOutcome};

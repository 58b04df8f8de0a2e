// Application Layer - Use Cases and Business Logic

pub mod mailer;
pub mod runner;
pub mod selector;

// Re-exports
pub use mailer::ReminderMailer;
pub use runner::{ReminderRunner, RunConfig};
pub use selector::{ContactSelector, Selection};

// Port Layer - Interfaces for external dependencies

pub mod activity_log;
pub mod contact_store;
pub mod mail_sender;
pub mod time_provider;

// Re-exports
pub use activity_log::ActivityLog;
pub use contact_store::ContactStore;
pub use mail_sender::MailSender;
pub use time_provider::{SystemTimeProvider, TimeProvider};

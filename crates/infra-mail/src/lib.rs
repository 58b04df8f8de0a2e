// Birthdays Infrastructure - SMTP Adapter
// Implements: MailSender

mod smtp;

pub use smtp::{SmtpConfig, SmtpMailSender};

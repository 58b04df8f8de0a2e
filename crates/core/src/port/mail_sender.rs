// Mail Sender Port (Interface)

use crate::domain::EligibleContact;
use crate::error::Result;
use async_trait::async_trait;

/// Outbound mail interface
///
/// `to` is the resolved destination: the contact's own primary address, or
/// the operator-supplied debug address on redirected runs. The implementation
/// renders the reminder message from the contact.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send_reminder(&self, to: &str, contact: &EligibleContact) -> Result<()>;
}

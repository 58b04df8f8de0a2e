// Batch Send-and-Record Use Case

use crate::domain::{EligibleContact, SendCounts, SendOutcome};
use crate::port::{ActivityLog, MailSender};
use std::sync::Arc;
use tracing::{info, warn};

/// Sends one reminder per contact and records the outcome as an activity
///
/// Contacts are processed sequentially: the send-then-record ordering per
/// contact is what makes the audit trail attributable.
pub struct ReminderMailer {
    sender: Arc<dyn MailSender>,
    activity_log: Arc<dyn ActivityLog>,
}

impl ReminderMailer {
    pub fn new(sender: Arc<dyn MailSender>, activity_log: Arc<dyn ActivityLog>) -> Self {
        Self {
            sender,
            activity_log,
        }
    }

    /// Send a reminder to every contact, isolating per-contact failures
    ///
    /// `record_activity` gates only the audit trail, never the send itself.
    /// A failed send increments the failure counter regardless. Returns the
    /// attempted and failed counts; the caller derives successes.
    pub async fn send_all(
        &self,
        contacts: &[EligibleContact],
        record_activity: bool,
        debug_address: &str,
    ) -> SendCounts {
        let mut counts = SendCounts::default();

        for contact in contacts {
            counts.attempted += 1;

            let to = if contact.is_debug_redirected {
                debug_address
            } else {
                contact.email.as_str()
            };

            let outcome = match self.sender.send_reminder(to, contact).await {
                Ok(()) => SendOutcome::Success,
                Err(e) => {
                    warn!(contact_id = contact.contact_id, error = %e, "Reminder send failed");
                    counts.failed += 1;
                    SendOutcome::Failure(e.to_string())
                }
            };

            if record_activity {
                // An audit-trail fault must not change the send accounting
                if let Err(e) = self.activity_log.record(contact.contact_id, &outcome).await {
                    warn!(
                        contact_id = contact.contact_id,
                        error = %e,
                        "Failed to write reminder activity"
                    );
                }
            }
        }

        info!(
            attempted = counts.attempted,
            failed = counts.failed,
            "Reminder batch finished"
        );

        counts
    }
}

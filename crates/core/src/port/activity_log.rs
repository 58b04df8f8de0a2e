// Activity Log Port (Interface)

use crate::domain::{ContactId, SendOutcome};
use crate::error::Result;
use async_trait::async_trait;

/// Audit-trail interface keyed by contact identifier and outcome type
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Record a "successful reminder" or "failed reminder" activity
    /// against the contact
    async fn record(&self, contact_id: ContactId, outcome: &SendOutcome) -> Result<()>;
}

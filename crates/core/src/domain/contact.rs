// Eligible Contact Domain Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contact ID as assigned by the contact store
pub type ContactId = i64;

/// One qualifying contact for a single run
///
/// Produced by the selector, consumed by the mailer, not retained beyond
/// the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleContact {
    pub contact_id: ContactId,
    pub birth_date: NaiveDate,
    /// Primary email address. Blank when `is_debug_redirected` is set;
    /// the mailer then substitutes the operator-supplied debug address.
    pub email: String,
    pub is_debug_redirected: bool,
}

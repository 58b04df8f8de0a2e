//! RPC Request/Response Types

use serde::{Deserialize, Serialize};

/// birthdays.sendReminders.v1 - Run one reminder batch
#[derive(Debug, Default, Deserialize)]
pub struct SendRemindersRequest {
    /// Redirect all mails to this address and cap selection at 10 contacts
    #[serde(default)]
    pub debug_email: String,

    /// Suppress writing "successful"/"failed" activities to contacts
    #[serde(default)]
    pub disable_activities: bool,

    /// Relative-date rule `<+|-><integer> <DAY|WEEK|MONTH|YEAR>`;
    /// empty means exact match on today
    #[serde(default)]
    pub date_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRemindersResponse {
    /// Non-fatal conditions encountered during the run
    pub errors: Vec<String>,
    /// "Executed: X out of Y mails/activities processed"
    pub status: String,
    pub total_candidates: usize,
    pub successful_sends: usize,
    pub failed_sends: usize,
}

/// birthdays.sendReminders.v3 - Legacy envelope around the same run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacySendRemindersResponse {
    pub is_error: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<SendRemindersResponse>,
}

// Run Report & Send Outcome Domain Models

use serde::{Deserialize, Serialize};

/// Per-contact send outcome, aggregated immediately into the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Success,
    Failure(String),
}

impl SendOutcome {
    /// Activity type name written to the contact's audit trail
    pub fn activity_type(&self) -> &'static str {
        match self {
            SendOutcome::Success => "birthday_reminder_sent",
            SendOutcome::Failure(_) => "birthday_reminder_failed",
        }
    }
}

/// Counters returned by one mailer batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCounts {
    pub attempted: usize,
    pub failed: usize,
}

/// Final output of one reminder run
///
/// Built incrementally; always produced, even when every step failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub total_candidates: usize,
    pub successful_sends: usize,
    pub failed_sends: usize,
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Human-readable summary line for the caller
    pub fn status_line(&self) -> String {
        format!(
            "Executed: {} out of {} mails/activities processed",
            self.successful_sends, self.total_candidates
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_format() {
        let report = RunReport {
            total_candidates: 3,
            successful_sends: 3,
            failed_sends: 0,
            warnings: vec![],
        };
        assert_eq!(
            report.status_line(),
            "Executed: 3 out of 3 mails/activities processed"
        );
    }

    #[test]
    fn outcome_activity_types() {
        assert_eq!(SendOutcome::Success.activity_type(), "birthday_reminder_sent");
        assert_eq!(
            SendOutcome::Failure("smtp down".into()).activity_type(),
            "birthday_reminder_failed"
        );
    }
}

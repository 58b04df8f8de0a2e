// Reminder Run Orchestration

use crate::application::{ContactSelector, ReminderMailer};
use crate::domain::{DateRule, RunReport};
use crate::port::TimeProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Options for one reminder run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Relative-date rule, e.g. `+1 DAY`; empty means exact match on today
    #[serde(default)]
    pub date_filter: String,

    /// Redirect every send to this address and cap selection at 10 contacts;
    /// empty disables redirection
    #[serde(default)]
    pub debug_email: String,

    /// Suppress writing "successful"/"failed" activities to contacts
    #[serde(default)]
    pub disable_activities: bool,
}

/// Orchestrates parse -> select -> send -> summarize into one run report
///
/// One invocation is one best-effort attempt: every step's errors become
/// report warnings, nothing escapes to crash the run, and no retries happen
/// here (the scheduler re-invokes on its next cycle).
pub struct ReminderRunner {
    selector: ContactSelector,
    mailer: ReminderMailer,
    time_provider: Arc<dyn TimeProvider>,
}

impl ReminderRunner {
    pub fn new(
        selector: ContactSelector,
        mailer: ReminderMailer,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            selector,
            mailer,
            time_provider,
        }
    }

    pub async fn run(&self, config: &RunConfig) -> RunReport {
        let mut report = RunReport::default();

        let rule: Option<DateRule> = if config.date_filter.is_empty() {
            None
        } else {
            match config.date_filter.parse() {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!(date_filter = %config.date_filter, error = %e, "Date filter rejected");
                    report.push_warning(format!("{}", e));
                    // Malformed rule halts rule parsing only; the run still
                    // produces a best-effort report over zero candidates.
                    return report;
                }
            }
        };

        let debug_redirect = !config.debug_email.is_empty();
        let today = self.time_provider.today();

        let selection = self.selector.select(rule.as_ref(), debug_redirect, today).await;
        for warning in selection.warnings {
            report.push_warning(warning);
        }

        report.total_candidates = selection.contacts.len();

        if !selection.contacts.is_empty() {
            let counts = self
                .mailer
                .send_all(
                    &selection.contacts,
                    !config.disable_activities,
                    &config.debug_email,
                )
                .await;
            report.failed_sends = counts.failed;
        }

        report.successful_sends = report.total_candidates - report.failed_sends;

        info!(
            total = report.total_candidates,
            sent = report.successful_sends,
            failed = report.failed_sends,
            warnings = report.warnings.len(),
            "Reminder run finished"
        );

        report
    }
}

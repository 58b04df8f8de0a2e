//! RPC Method Handlers

use crate::types::{LegacySendRemindersResponse, SendRemindersRequest, SendRemindersResponse};
use birthdays_core::application::{ReminderRunner, RunConfig};
use std::sync::Arc;
use tracing::info;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    runner: Arc<ReminderRunner>,
}

impl RpcHandler {
    pub fn new(runner: Arc<ReminderRunner>) -> Self {
        Self { runner }
    }

    /// birthdays.sendReminders.v1
    ///
    /// The run never surfaces a raw error to the caller: every fault becomes
    /// an entry in the report.
    pub async fn send_reminders(&self, params: SendRemindersRequest) -> SendRemindersResponse {
        info!(
            date_filter = %params.date_filter,
            debug_redirect = !params.debug_email.is_empty(),
            disable_activities = params.disable_activities,
            "Reminder run requested"
        );

        let config = RunConfig {
            date_filter: params.date_filter,
            debug_email: params.debug_email,
            disable_activities: params.disable_activities,
        };

        let report = self.runner.run(&config).await;

        SendRemindersResponse {
            status: report.status_line(),
            errors: report.warnings,
            total_candidates: report.total_candidates,
            successful_sends: report.successful_sends,
            failed_sends: report.failed_sends,
        }
    }

    /// birthdays.sendReminders.v3
    ///
    /// Translates the v1 report into the legacy error/success envelope:
    /// any error entry in the report makes the whole call an error there.
    pub async fn send_reminders_legacy(
        &self,
        params: SendRemindersRequest,
    ) -> LegacySendRemindersResponse {
        let response = self.send_reminders(params).await;

        if let Some(first_error) = response.errors.first() {
            LegacySendRemindersResponse {
                is_error: 1,
                error_message: Some(format!("Rethrow error from v1 report: {}", first_error)),
                values: None,
            }
        } else {
            LegacySendRemindersResponse {
                is_error: 0,
                error_message: None,
                values: Some(response),
            }
        }
    }
}

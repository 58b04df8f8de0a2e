// SQLite ActivityLog Implementation

use crate::contact_store::map_sqlx_error;
use async_trait::async_trait;
use birthdays_core::domain::{ContactId, SendOutcome};
use birthdays_core::error::Result;
use birthdays_core::port::{ActivityLog, TimeProvider};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteActivityLog {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteActivityLog {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }
}

#[async_trait]
impl ActivityLog for SqliteActivityLog {
    async fn record(&self, contact_id: ContactId, outcome: &SendOutcome) -> Result<()> {
        let detail = match outcome {
            SendOutcome::Success => None,
            SendOutcome::Failure(reason) => Some(reason.as_str()),
        };

        sqlx::query(
            r#"
            INSERT INTO activities (contact_id, activity_type, detail, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(contact_id)
        .bind(outcome.activity_type())
        .bind(detail)
        .bind(self.time_provider.now_millis())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use birthdays_core::port::SystemTimeProvider;

    #[tokio::test]
    async fn records_success_and_failure_outcomes() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let contact_id: i64 =
            sqlx::query_scalar("INSERT INTO contacts (birth_date) VALUES ('1990-01-01') RETURNING id")
                .fetch_one(&pool)
                .await
                .unwrap();

        let log = SqliteActivityLog::new(pool.clone(), Arc::new(SystemTimeProvider));
        log.record(contact_id, &SendOutcome::Success).await.unwrap();
        log.record(contact_id, &SendOutcome::Failure("bounced".to_string()))
            .await
            .unwrap();

        let types: Vec<String> = sqlx::query_scalar(
            "SELECT activity_type FROM activities WHERE contact_id = ? ORDER BY id",
        )
        .bind(contact_id)
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            types,
            vec!["birthday_reminder_sent", "birthday_reminder_failed"]
        );

        let detail: Option<String> =
            sqlx::query_scalar("SELECT detail FROM activities ORDER BY id DESC LIMIT 1")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(detail.as_deref(), Some("bounced"));
    }
}

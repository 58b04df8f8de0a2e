// SQLite ContactStore Implementation
//
// Eligibility lives in two static, fully parameterized queries; the date-rule
// offset is computed by the domain and bound as a plain month-day value, so
// no SQL is ever assembled from user input.

use async_trait::async_trait;
use birthdays_core::domain::EligibleContact;
use birthdays_core::error::{AppError, Result};
use birthdays_core::port::ContactStore;
use chrono::NaiveDate;
use sqlx::SqlitePool;

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                AppError::Database(format!("Database error [{}]: {}", code, db_err.message()))
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => AppError::Database(err.to_string()),
    }
}

const ELIGIBLE_BASE: &str = r#"
    SELECT
        c.id AS contact_id,
        c.birth_date AS birth_date,
        e.email AS email
    FROM contacts c
        INNER JOIN group_contacts gc
            ON c.id = gc.contact_id
        INNER JOIN emails e
            ON c.id = e.contact_id
                AND e.is_primary = 1
    WHERE c.contact_type = 'Individual'
        AND c.is_opt_out = 0
        AND c.do_not_email = 0
        AND c.is_deceased = 0
        AND c.is_deleted = 0
        AND gc.group_id = ?
        AND c.birth_date IS NOT NULL
"#;

pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    contact_id: i64,
    birth_date: NaiveDate,
    email: String,
}

impl ContactRow {
    fn into_contact(self) -> EligibleContact {
        EligibleContact {
            contact_id: self.contact_id,
            birth_date: self.birth_date,
            email: self.email,
            is_debug_redirected: false,
        }
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn find_group_id(&self, name: &str) -> Result<Option<i64>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM groups WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn select_birthday_contacts(
        &self,
        group_id: i64,
        birthday_on: Option<NaiveDate>,
        limit: Option<u32>,
    ) -> Result<Vec<EligibleContact>> {
        // Year is forced to the current year by comparing month-day only
        let with_date = format!("{} AND strftime('%m-%d', c.birth_date) = ?", ELIGIBLE_BASE);
        let with_limit = format!("{} LIMIT ?", ELIGIBLE_BASE);

        let rows: Vec<ContactRow> = match (birthday_on, limit) {
            (Some(date), _) => {
                sqlx::query_as(&with_date)
                    .bind(group_id)
                    .bind(date.format("%m-%d").to_string())
                    .fetch_all(&self.pool)
                    .await
            }
            (None, Some(limit)) => {
                sqlx::query_as(&with_limit)
                    .bind(group_id)
                    .bind(limit as i64)
                    .fetch_all(&self.pool)
                    .await
            }
            (None, None) => sqlx::query_as(ELIGIBLE_BASE).bind(group_id).fetch_all(&self.pool).await,
        }
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContactRow::into_contact).collect())
    }

    async fn group_has_birth_date_contacts(&self, group_id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM contacts c
                INNER JOIN group_contacts gc ON c.id = gc.contact_id
            WHERE gc.group_id = ?
                AND c.birth_date IS NOT NULL
            "#,
        )
        .bind(group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};

    async fn setup() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed_group(pool: &SqlitePool, name: &str) -> i64 {
        sqlx::query_scalar("INSERT INTO groups (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn seed_contact(
        pool: &SqlitePool,
        group_id: i64,
        birth_date: Option<&str>,
        email: Option<&str>,
    ) -> i64 {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO contacts (birth_date) VALUES (?) RETURNING id")
                .bind(birth_date)
                .fetch_one(pool)
                .await
                .unwrap();

        sqlx::query("INSERT INTO group_contacts (group_id, contact_id) VALUES (?, ?)")
            .bind(group_id)
            .bind(id)
            .execute(pool)
            .await
            .unwrap();

        if let Some(email) = email {
            sqlx::query("INSERT INTO emails (contact_id, email, is_primary) VALUES (?, ?, 1)")
                .bind(id)
                .bind(email)
                .execute(pool)
                .await
                .unwrap();
        }

        id
    }

    #[tokio::test]
    async fn resolves_group_by_name() {
        let pool = setup().await;
        let store = SqliteContactStore::new(pool.clone());

        let id = seed_group(&pool, "birthday_greeting_recipients_group").await;
        assert_eq!(
            store
                .find_group_id("birthday_greeting_recipients_group")
                .await
                .unwrap(),
            Some(id)
        );
        assert_eq!(store.find_group_id("renamed_group").await.unwrap(), None);
    }

    #[tokio::test]
    async fn matches_month_day_with_year_forced() {
        let pool = setup().await;
        let store = SqliteContactStore::new(pool.clone());
        let group_id = seed_group(&pool, "g").await;

        // Born on different years, same calendar day
        seed_contact(&pool, group_id, Some("1990-06-15"), Some("a@example.org")).await;
        seed_contact(&pool, group_id, Some("1955-06-15"), Some("b@example.org")).await;
        seed_contact(&pool, group_id, Some("1990-06-16"), Some("c@example.org")).await;

        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let contacts = store
            .select_birthday_contacts(group_id, Some(day), None)
            .await
            .unwrap();

        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|c| !c.is_debug_redirected));
    }

    #[tokio::test]
    async fn excludes_ineligible_contacts() {
        let pool = setup().await;
        let store = SqliteContactStore::new(pool.clone());
        let group_id = seed_group(&pool, "g").await;

        let eligible =
            seed_contact(&pool, group_id, Some("1990-06-15"), Some("ok@example.org")).await;
        // No primary email
        seed_contact(&pool, group_id, Some("1990-06-15"), None).await;
        // No birth date
        seed_contact(&pool, group_id, None, Some("nobday@example.org")).await;
        // Opted out
        let opted =
            seed_contact(&pool, group_id, Some("1990-06-15"), Some("out@example.org")).await;
        sqlx::query("UPDATE contacts SET is_opt_out = 1 WHERE id = ?")
            .bind(opted)
            .execute(&pool)
            .await
            .unwrap();
        // Organization
        let org = seed_contact(&pool, group_id, Some("1990-06-15"), Some("org@example.org")).await;
        sqlx::query("UPDATE contacts SET contact_type = 'Organization' WHERE id = ?")
            .bind(org)
            .execute(&pool)
            .await
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let contacts = store
            .select_birthday_contacts(group_id, Some(day), None)
            .await
            .unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].contact_id, eligible);
    }

    #[tokio::test]
    async fn limit_caps_the_result_set_without_date_predicate() {
        let pool = setup().await;
        let store = SqliteContactStore::new(pool.clone());
        let group_id = seed_group(&pool, "g").await;

        for i in 0..15 {
            seed_contact(
                &pool,
                group_id,
                Some("1990-01-01"),
                Some(&format!("c{}@example.org", i)),
            )
            .await;
        }

        let contacts = store
            .select_birthday_contacts(group_id, None, Some(10))
            .await
            .unwrap();
        assert_eq!(contacts.len(), 10);
    }

    #[tokio::test]
    async fn birth_date_prerequisite_check() {
        let pool = setup().await;
        let store = SqliteContactStore::new(pool.clone());
        let group_id = seed_group(&pool, "g").await;

        seed_contact(&pool, group_id, None, Some("nobday@example.org")).await;
        assert!(!store.group_has_birth_date_contacts(group_id).await.unwrap());

        seed_contact(&pool, group_id, Some("1970-02-03"), None).await;
        assert!(store.group_has_birth_date_contacts(group_id).await.unwrap());
    }
}

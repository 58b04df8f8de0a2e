// Contact Selection Use Case

use crate::domain::{DateRule, EligibleContact};
use crate::port::ContactStore;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result-set cap for debug runs, bounding the blast radius of test runs
/// against production data.
pub const DEBUG_CONTACT_CAP: u32 = 10;

/// Outcome of one selection pass
///
/// Warnings are explicit values, not exceptions: the run continues with
/// whatever contacts could be collected.
#[derive(Debug, Default)]
pub struct Selection {
    pub contacts: Vec<EligibleContact>,
    pub warnings: Vec<String>,
}

/// Queries the contact store for contacts matching the date rule and
/// group membership
pub struct ContactSelector {
    store: Arc<dyn ContactStore>,
    group_name: String,
}

impl ContactSelector {
    pub fn new(store: Arc<dyn ContactStore>, group_name: impl Into<String>) -> Self {
        Self {
            store,
            group_name: group_name.into(),
        }
    }

    /// Select eligible contacts for the run
    ///
    /// `rule` offsets `today` to the target calendar day; absence means exact
    /// match on today. With `debug_redirect` the date predicate is dropped,
    /// the result set is capped at [`DEBUG_CONTACT_CAP`] and every contact is
    /// marked for redirection with a blanked email.
    ///
    /// Storage faults and a missing group surface as warnings with an empty
    /// contact list; the run is never hard-failed here.
    pub async fn select(
        &self,
        rule: Option<&DateRule>,
        debug_redirect: bool,
        today: NaiveDate,
    ) -> Selection {
        let mut selection = Selection::default();

        let group_id = match self.store.find_group_id(&self.group_name).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                selection.warnings.push(format!(
                    "Birthday group '{}' does not exist",
                    self.group_name
                ));
                return selection;
            }
            Err(e) => {
                selection.warnings.push(format!(
                    "There is a problem collecting birthday contacts: {}",
                    e
                ));
                return selection;
            }
        };

        // Prerequisite: distinguish "group misconfigured" from "no birthdays
        // today" so zero reminders is never silent.
        match self.store.group_has_birth_date_contacts(group_id).await {
            Ok(true) => {}
            Ok(false) => {
                selection.warnings.push(
                    "There are no contacts in the birthday group or there are contacts \
                     where no birth date is set."
                        .to_string(),
                );
            }
            Err(e) => {
                selection
                    .warnings
                    .push(format!("Birthday group check failed: {}", e));
            }
        }

        let (birthday_on, limit) = if debug_redirect {
            // Show up to 10 contacts no matter which birth date
            (None, Some(DEBUG_CONTACT_CAP))
        } else {
            let target = match rule {
                Some(rule) => match rule.target_date(today) {
                    Ok(date) => date,
                    Err(e) => {
                        selection
                            .warnings
                            .push(format!("Date rule cannot be applied: {}", e));
                        return selection;
                    }
                },
                None => today,
            };
            (Some(target), None)
        };

        match self
            .store
            .select_birthday_contacts(group_id, birthday_on, limit)
            .await
        {
            Ok(mut contacts) => {
                if debug_redirect {
                    for contact in &mut contacts {
                        contact.email.clear();
                        contact.is_debug_redirected = true;
                    }
                }
                debug!(
                    group_id,
                    candidates = contacts.len(),
                    debug_redirect,
                    "Birthday contacts selected"
                );
                selection.contacts = contacts;
            }
            Err(e) => {
                warn!(group_id, error = %e, "Birthday contact query failed");
                selection.warnings.push(format!(
                    "There is a problem collecting birthday contacts: {}",
                    e
                ));
            }
        }

        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::port::contact_store::MockContactStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn contact(id: i64, email: &str) -> EligibleContact {
        EligibleContact {
            contact_id: id,
            birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            email: email.to_string(),
            is_debug_redirected: false,
        }
    }

    #[tokio::test]
    async fn missing_group_is_a_warning_with_empty_contacts() {
        let mut store = MockContactStore::new();
        store.expect_find_group_id().returning(|_| Ok(None));

        let selector = ContactSelector::new(Arc::new(store), "birthday_greeting_recipients_group");
        let selection = selector.select(None, false, today()).await;

        assert!(selection.contacts.is_empty());
        assert_eq!(selection.warnings.len(), 1);
        assert!(selection.warnings[0].contains("does not exist"));
    }

    #[tokio::test]
    async fn store_fault_is_a_warning_not_a_failure() {
        let mut store = MockContactStore::new();
        store
            .expect_find_group_id()
            .returning(|_| Err(AppError::Database("connection refused".to_string())));

        let selector = ContactSelector::new(Arc::new(store), "g");
        let selection = selector.select(None, false, today()).await;

        assert!(selection.contacts.is_empty());
        assert!(selection.warnings[0].contains("problem collecting birthday contacts"));
    }

    #[tokio::test]
    async fn empty_birth_date_group_warns_but_still_queries() {
        let mut store = MockContactStore::new();
        store.expect_find_group_id().returning(|_| Ok(Some(7)));
        store
            .expect_group_has_birth_date_contacts()
            .returning(|_| Ok(false));
        store
            .expect_select_birthday_contacts()
            .withf(|group_id, birthday_on, limit| {
                *group_id == 7 && birthday_on.is_some() && limit.is_none()
            })
            .returning(|_, _, _| Ok(vec![]));

        let selector = ContactSelector::new(Arc::new(store), "g");
        let selection = selector.select(None, false, today()).await;

        assert!(selection.contacts.is_empty());
        assert_eq!(selection.warnings.len(), 1);
        assert!(selection.warnings[0].contains("no contacts in the birthday group"));
    }

    #[tokio::test]
    async fn rule_offsets_the_target_date() {
        let rule: DateRule = "+1 WEEK".parse().unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 6, 22).unwrap();

        let mut store = MockContactStore::new();
        store.expect_find_group_id().returning(|_| Ok(Some(1)));
        store
            .expect_group_has_birth_date_contacts()
            .returning(|_| Ok(true));
        store
            .expect_select_birthday_contacts()
            .withf(move |_, birthday_on, _| *birthday_on == Some(expected))
            .returning(|_, _, _| Ok(vec![contact(1, "a@example.org")]));

        let selector = ContactSelector::new(Arc::new(store), "g");
        let selection = selector.select(Some(&rule), false, today()).await;

        assert_eq!(selection.contacts.len(), 1);
        assert!(selection.warnings.is_empty());
    }

    #[tokio::test]
    async fn debug_redirect_caps_and_blanks_emails() {
        let mut store = MockContactStore::new();
        store.expect_find_group_id().returning(|_| Ok(Some(1)));
        store
            .expect_group_has_birth_date_contacts()
            .returning(|_| Ok(true));
        store
            .expect_select_birthday_contacts()
            .withf(|_, birthday_on, limit| birthday_on.is_none() && *limit == Some(DEBUG_CONTACT_CAP))
            .returning(|_, _, _| {
                Ok((1..=10)
                    .map(|i| contact(i, &format!("c{}@example.org", i)))
                    .collect())
            });

        let selector = ContactSelector::new(Arc::new(store), "g");
        let selection = selector.select(None, true, today()).await;

        assert_eq!(selection.contacts.len(), 10);
        for c in &selection.contacts {
            assert!(c.is_debug_redirected);
            assert!(c.email.is_empty());
        }
    }
}

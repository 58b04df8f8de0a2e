// Contact Store Port (Interface)

use crate::domain::EligibleContact;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository interface over the host contact/group/email store
///
/// Implementations must apply the full eligibility predicate: individual
/// contact type, not opted out, not do-not-email, not deceased, not deleted,
/// member of the given group, birth date set, primary email present.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Resolve the reminder recipients group name to its identifier
    async fn find_group_id(&self, name: &str) -> Result<Option<i64>>;

    /// Select eligible contacts of a group
    ///
    /// `birthday_on` filters on the birth date with its year forced to the
    /// current year; `None` skips the date predicate entirely (debug runs).
    /// `limit` caps the result set.
    async fn select_birthday_contacts(
        &self,
        group_id: i64,
        birthday_on: Option<NaiveDate>,
        limit: Option<u32>,
    ) -> Result<Vec<EligibleContact>>;

    /// Whether the group contains at least one contact with a birth date set,
    /// independent of today's match
    async fn group_has_birth_date_contacts(&self, group_id: i64) -> Result<bool>;
}
